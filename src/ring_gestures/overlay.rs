use crate::ring_gestures::engine::Point;

/// Drawing surface for gesture lines.
///
/// Formed edges are handed over once as fixed segments; the in-progress
/// segment is redrawn every frame while the pointer moves.
pub trait LineSink {
    fn live_segment(&mut self, start: Point, end: Point, thickness: f32);
    fn fixed_segment(&mut self, start: Point, end: Point, thickness: f32);
    fn discard_live(&mut self);
    fn clear(&mut self);
}

#[derive(Debug, Default)]
pub struct NoopLineSink;

impl LineSink for NoopLineSink {
    fn live_segment(&mut self, _start: Point, _end: Point, _thickness: f32) {}

    fn fixed_segment(&mut self, _start: Point, _end: Point, _thickness: f32) {}

    fn discard_live(&mut self) {}

    fn clear(&mut self) {}
}

/// Geometry of a drawn segment, as a renderer would lay out a rotated quad.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentGeometry {
    pub origin: Point,
    pub length: f32,
    pub thickness: f32,
    pub angle_deg: f32,
}

pub fn segment_geometry(start: Point, end: Point, thickness: f32) -> SegmentGeometry {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    SegmentGeometry {
        origin: start,
        length: (dx * dx + dy * dy).sqrt(),
        thickness,
        angle_deg: dy.atan2(dx).to_degrees(),
    }
}
