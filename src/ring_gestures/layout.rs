use crate::ring_gestures::engine::{NodeIndex, Point};
use std::f32::consts::PI;

/// Presentation-side collaborator that knows where nodes sit on screen.
pub trait NodeLayout {
    fn node_count(&self) -> usize;
    fn anchor(&self, node: NodeIndex) -> Option<Point>;
    /// Node under `point`, if any.
    fn hit_test(&self, point: Point) -> Option<NodeIndex>;
}

/// Nodes evenly spaced on a circle, node 0 at angle zero.
#[derive(Debug, Clone, PartialEq)]
pub struct RingLayout {
    center: Point,
    radius: f32,
    hit_radius: f32,
    anchors: Vec<Point>,
}

impl RingLayout {
    pub fn new(node_count: usize, center: Point, radius: f32, hit_radius: f32) -> Self {
        let anchors = (0..node_count)
            .map(|i| {
                let angle = i as f32 * 2.0 * PI / node_count as f32;
                Point {
                    x: center.x + radius * angle.cos(),
                    y: center.y + radius * angle.sin(),
                }
            })
            .collect();
        Self {
            center,
            radius,
            hit_radius,
            anchors,
        }
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn anchors(&self) -> &[Point] {
        &self.anchors
    }
}

impl NodeLayout for RingLayout {
    fn node_count(&self) -> usize {
        self.anchors.len()
    }

    fn anchor(&self, node: NodeIndex) -> Option<Point> {
        self.anchors.get(node).copied()
    }

    fn hit_test(&self, point: Point) -> Option<NodeIndex> {
        let limit = self.hit_radius * self.hit_radius;
        self.anchors
            .iter()
            .enumerate()
            .map(|(idx, anchor)| {
                let dx = point.x - anchor.x;
                let dy = point.y - anchor.y;
                (idx, dx * dx + dy * dy)
            })
            .filter(|(_, dist_sq)| *dist_sq <= limit)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(idx, _)| idx)
    }
}
