use crate::ring_gestures::db::{ActionDefinition, PatternMatcher};
use crate::ring_gestures::engine::{GestureTracker, NodeEvent, NodeIndex, Point, TrackOutcome};
use crate::ring_gestures::layout::NodeLayout;
use crate::ring_gestures::overlay::{LineSink, NoopLineSink};
use std::sync::Arc;

pub const DEFAULT_LINE_THICKNESS: f32 = 5.0;

/// Pointer state sampled once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerFrame {
    pub position: Point,
    /// Button went down this frame.
    pub pressed: bool,
    /// Button is down (including the frame it was pressed).
    pub held: bool,
    /// Button went up this frame.
    pub released: bool,
}

impl PointerFrame {
    pub fn press(position: impl Into<Point>) -> Self {
        Self {
            position: position.into(),
            pressed: true,
            held: true,
            released: false,
        }
    }

    pub fn drag(position: impl Into<Point>) -> Self {
        Self {
            position: position.into(),
            pressed: false,
            held: true,
            released: false,
        }
    }

    pub fn release(position: impl Into<Point>) -> Self {
        Self {
            position: position.into(),
            pressed: false,
            held: false,
            released: true,
        }
    }

    pub fn hover(position: impl Into<Point>) -> Self {
        Self {
            position: position.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CastOutcome {
    Committed { action_id: String },
    /// Pattern matched but the resource check refused; the gesture is kept.
    InsufficientResources { action_id: String },
    NoMatch,
    Inactive,
}

/// Resource check performed before a matched action is committed.
pub trait CastBudget {
    fn try_commit(&mut self, action: &ActionDefinition) -> bool;
}

impl<F> CastBudget for F
where
    F: FnMut(&ActionDefinition) -> bool,
{
    fn try_commit(&mut self, action: &ActionDefinition) -> bool {
        self(action)
    }
}

/// Receives read-only notifications from a [`GestureSurface`].
pub trait GestureEventSink {
    fn sequence_changed(&mut self, sequence: &[NodeIndex]);
    fn preview_changed(&mut self, preview: Option<&ActionDefinition>);
    fn cast_resolved(&mut self, outcome: &CastOutcome);
}

#[derive(Debug, Default)]
pub struct NoopEventSink;

impl GestureEventSink for NoopEventSink {
    fn sequence_changed(&mut self, _sequence: &[NodeIndex]) {}

    fn preview_changed(&mut self, _preview: Option<&ActionDefinition>) {}

    fn cast_resolved(&mut self, _outcome: &CastOutcome) {}
}

/// The drawing surface: owns the tracker and wires it to layout, line
/// rendering, pattern matching and the consumer's sink.
pub struct GestureSurface {
    tracker: GestureTracker,
    matcher: Arc<PatternMatcher>,
    layout: Box<dyn NodeLayout>,
    lines: Box<dyn LineSink>,
    sink: Box<dyn GestureEventSink>,
    line_thickness: f32,
    active: bool,
    hovered: Option<NodeIndex>,
}

impl GestureSurface {
    pub fn new(matcher: Arc<PatternMatcher>, layout: Box<dyn NodeLayout>) -> Self {
        Self::new_with_sinks(
            matcher,
            layout,
            Box::new(NoopLineSink),
            Box::new(NoopEventSink),
        )
    }

    pub fn new_with_sinks(
        matcher: Arc<PatternMatcher>,
        layout: Box<dyn NodeLayout>,
        lines: Box<dyn LineSink>,
        sink: Box<dyn GestureEventSink>,
    ) -> Self {
        let tracker = GestureTracker::new(layout.node_count());
        Self {
            tracker,
            matcher,
            layout,
            lines,
            sink,
            line_thickness: DEFAULT_LINE_THICKNESS,
            active: false,
            hovered: None,
        }
    }

    pub fn with_line_thickness(mut self, thickness: f32) -> Self {
        self.line_thickness = thickness;
        self
    }

    pub fn tracker(&self) -> &GestureTracker {
        &self.tracker
    }

    pub fn matcher(&self) -> &PatternMatcher {
        &self.matcher
    }

    pub fn sequence(&self) -> &[NodeIndex] {
        self.tracker.sequence()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn get_activation(&self, node: NodeIndex) -> bool {
        self.tracker.is_active(node)
    }

    pub fn activate(&mut self) {
        self.active = true;
        self.clear();
    }

    pub fn deactivate(&mut self) {
        self.clear();
        self.active = false;
    }

    pub fn clear(&mut self) {
        self.tracker.clear();
        self.hovered = None;
        self.lines.clear();
        self.sink.sequence_changed(&[]);
        self.sink.preview_changed(None);
    }

    /// Currently previewed action for the drawn sequence.
    pub fn preview(&self) -> Option<&ActionDefinition> {
        self.matcher.match_sequence(self.tracker.sequence())
    }

    /// Routes one node-keyed event through the tracker and reacts to the
    /// outcome.
    pub fn handle(&mut self, event: NodeEvent) -> TrackOutcome {
        if !self.active {
            return TrackOutcome::Ignored;
        }
        let open_before = self.tracker.open_node();
        let len_before = self.tracker.sequence().len();
        let outcome = self.tracker.handle(event);
        match outcome {
            TrackOutcome::DragStarted { node } => {
                if let Some(anchor) = self.layout.anchor(node) {
                    self.lines.live_segment(anchor, anchor, self.line_thickness);
                }
            }
            TrackOutcome::EdgeFormed { .. } => {
                let from = open_before.and_then(|node| self.layout.anchor(node));
                let to = self.tracker.open_node().and_then(|node| self.layout.anchor(node));
                if let (Some(from), Some(to)) = (from, to) {
                    self.lines.fixed_segment(from, to, self.line_thickness);
                    self.lines.live_segment(to, to, self.line_thickness);
                }
            }
            TrackOutcome::Released { .. } => {
                self.lines.discard_live();
                self.refresh_preview();
            }
            TrackOutcome::Ignored
            | TrackOutcome::DuplicateEdge { .. }
            | TrackOutcome::Highlight { .. } => {}
        }
        // A press on a new node appends it just like a formed edge does.
        if self.tracker.sequence().len() > len_before {
            self.sink.sequence_changed(self.tracker.sequence());
            self.refresh_preview();
        }
        outcome
    }

    /// Feeds one polled pointer sample: hover transitions first, then the
    /// button edges.
    pub fn process_frame(&mut self, frame: PointerFrame) {
        if !self.active {
            return;
        }
        let hit = self.layout.hit_test(frame.position);
        if hit != self.hovered {
            if let Some(old) = self.hovered.take() {
                self.handle(NodeEvent::HoverExit(old));
            }
            if let Some(new) = hit {
                self.handle(NodeEvent::HoverEnter(new));
            }
            self.hovered = hit;
        }

        if frame.pressed {
            if let Some(node) = hit {
                self.handle(NodeEvent::PointerDown(node));
            }
        }

        if frame.held {
            match self.tracker.open_node() {
                None => {
                    if let Some(node) = hit {
                        self.handle(NodeEvent::PointerDown(node));
                    }
                }
                Some(open) => {
                    if let Some(start) = self.layout.anchor(open) {
                        self.lines
                            .live_segment(start, frame.position, self.line_thickness);
                    }
                }
            }
        }

        if frame.released {
            self.handle(NodeEvent::PointerUp);
        }
    }

    /// Explicit finish trigger: match the drawn sequence, run the resource
    /// check and clear the gesture only when both pass.
    pub fn commit(&mut self, budget: &mut dyn CastBudget) -> CastOutcome {
        let outcome = self.resolve_cast(budget);
        self.sink.cast_resolved(&outcome);
        if matches!(outcome, CastOutcome::Committed { .. }) {
            self.clear();
        }
        outcome
    }

    fn resolve_cast(&self, budget: &mut dyn CastBudget) -> CastOutcome {
        if !self.active {
            return CastOutcome::Inactive;
        }
        let Some(action) = self.matcher.match_sequence(self.tracker.sequence()) else {
            tracing::info!(sequence = ?self.tracker.sequence(), "no matching pattern for drawn gesture");
            return CastOutcome::NoMatch;
        };
        if budget.try_commit(action) {
            tracing::info!(action = %action.id, "action committed");
            CastOutcome::Committed {
                action_id: action.id.clone(),
            }
        } else {
            tracing::info!(action = %action.id, cost = action.cost, "not enough resources to commit");
            CastOutcome::InsufficientResources {
                action_id: action.id.clone(),
            }
        }
    }

    fn refresh_preview(&mut self) {
        let preview = self.matcher.match_sequence(self.tracker.sequence());
        self.sink.preview_changed(preview);
    }
}
