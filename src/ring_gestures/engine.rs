use hashlink::LinkedHashSet;
use serde::{Deserialize, Serialize};

/// Stable 0-based position of a node on the ring.
pub type NodeIndex = usize;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl From<(f32, f32)> for Point {
    fn from(value: (f32, f32)) -> Self {
        Self {
            x: value.0,
            y: value.1,
        }
    }
}

/// Undirected connection between two distinct nodes, stored as `(min, max)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge {
    low: NodeIndex,
    high: NodeIndex,
}

impl Edge {
    /// Returns `None` for self-loops.
    pub fn new(a: NodeIndex, b: NodeIndex) -> Option<Self> {
        if a == b {
            return None;
        }
        Some(Self {
            low: a.min(b),
            high: a.max(b),
        })
    }

    pub fn nodes(self) -> (NodeIndex, NodeIndex) {
        (self.low, self.high)
    }

    pub fn touches(self, node: NodeIndex) -> bool {
        self.low == node || self.high == node
    }
}

/// Node-keyed input delivered to [`GestureTracker::handle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeEvent {
    /// Button pressed (or still held while idle) with the pointer over a node.
    PointerDown(NodeIndex),
    HoverEnter(NodeIndex),
    HoverExit(NodeIndex),
    PointerUp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragState {
    Idle,
    Dragging,
}

/// Transient state of one press-drag-release interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSession {
    /// Node the press landed on.
    pub pressed: NodeIndex,
    /// Free end of the in-progress line.
    pub open: NodeIndex,
    pub made_connection: bool,
}

/// What a single [`NodeEvent`] did to the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackOutcome {
    /// Out-of-range node, or an event that has no meaning in the current state.
    Ignored,
    DragStarted { node: NodeIndex },
    EdgeFormed { edge: Edge },
    DuplicateEdge { edge: Edge },
    /// Hover highlight changed without touching the graph.
    Highlight { node: NodeIndex, lit: bool },
    Released { cancelled: bool },
}

impl TrackOutcome {
    pub fn sequence_extended(&self) -> bool {
        matches!(self, TrackOutcome::EdgeFormed { .. })
    }
}

/// Drag state machine over a fixed ring of `node_count` nodes.
///
/// Owns the edge set, the per-node degree map, the visitation sequence and
/// the current drag session. Consumers read through the accessors; nothing
/// outside the tracker mutates that state.
#[derive(Debug, Clone)]
pub struct GestureTracker {
    node_count: usize,
    edges: LinkedHashSet<Edge>,
    degree: Vec<u32>,
    sequence: Vec<NodeIndex>,
    session: Option<DragSession>,
    hover_lit: Vec<bool>,
}

impl GestureTracker {
    pub fn new(node_count: usize) -> Self {
        Self {
            node_count,
            edges: LinkedHashSet::new(),
            degree: vec![0; node_count],
            sequence: Vec::new(),
            session: None,
            hover_lit: vec![false; node_count],
        }
    }

    /// Single dispatch entry point; routes by the current [`DragState`].
    pub fn handle(&mut self, event: NodeEvent) -> TrackOutcome {
        match event {
            NodeEvent::PointerDown(node) => self.pointer_down(node),
            NodeEvent::HoverEnter(node) => self.hover_enter(node),
            NodeEvent::HoverExit(node) => self.hover_exit(node),
            NodeEvent::PointerUp => self.pointer_up(),
        }
    }

    pub fn clear(&mut self) {
        self.edges.clear();
        self.degree.iter_mut().for_each(|d| *d = 0);
        self.sequence.clear();
        self.session = None;
        self.hover_lit.iter_mut().for_each(|lit| *lit = false);
        tracing::debug!("gesture state cleared");
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn state(&self) -> DragState {
        if self.session.is_some() {
            DragState::Dragging
        } else {
            DragState::Idle
        }
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Free end of the in-progress line while dragging.
    pub fn open_node(&self) -> Option<NodeIndex> {
        self.session.map(|session| session.open)
    }

    pub fn sequence(&self) -> &[NodeIndex] {
        &self.sequence
    }

    /// Formed edges in the order they were closed.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.edges.iter().copied()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn contains_edge(&self, a: NodeIndex, b: NodeIndex) -> bool {
        Edge::new(a, b).is_some_and(|edge| self.edges.contains(&edge))
    }

    pub fn degree(&self, node: NodeIndex) -> u32 {
        self.degree.get(node).copied().unwrap_or(0)
    }

    /// A node is active once any formed edge touches it.
    pub fn is_active(&self, node: NodeIndex) -> bool {
        self.degree(node) > 0
    }

    /// Active nodes plus transient hover/press highlights.
    pub fn is_highlighted(&self, node: NodeIndex) -> bool {
        self.is_active(node) || self.hover_lit.get(node).copied().unwrap_or(false)
    }

    fn in_range(&self, node: NodeIndex) -> bool {
        node < self.node_count
    }

    fn visit(&mut self, node: NodeIndex) {
        if self.sequence.last() != Some(&node) {
            self.sequence.push(node);
        }
    }

    fn set_lit(&mut self, node: NodeIndex, lit: bool) {
        if let Some(slot) = self.hover_lit.get_mut(node) {
            *slot = lit;
        }
    }

    fn pointer_down(&mut self, node: NodeIndex) -> TrackOutcome {
        if !self.in_range(node) {
            tracing::debug!(node, "pointer down outside node range ignored");
            return TrackOutcome::Ignored;
        }
        self.visit(node);
        self.set_lit(node, true);
        self.session = Some(DragSession {
            pressed: node,
            open: node,
            made_connection: false,
        });
        tracing::debug!(node, "drag started");
        TrackOutcome::DragStarted { node }
    }

    fn hover_enter(&mut self, node: NodeIndex) -> TrackOutcome {
        if !self.in_range(node) {
            return TrackOutcome::Ignored;
        }
        let outcome = match self.session {
            Some(session) if session.open != node => self.connect(session, node),
            _ => None,
        };
        self.set_lit(node, true);
        outcome.unwrap_or(TrackOutcome::Highlight { node, lit: true })
    }

    fn connect(&mut self, session: DragSession, node: NodeIndex) -> Option<TrackOutcome> {
        let edge = Edge::new(session.open, node)?;
        if self.edges.contains(&edge) {
            tracing::trace!(?edge, "edge already formed");
            return Some(TrackOutcome::DuplicateEdge { edge });
        }

        self.edges.insert(edge);
        self.degree[session.open] += 1;
        self.degree[node] += 1;
        self.visit(node);
        self.session = Some(DragSession {
            pressed: session.pressed,
            open: node,
            made_connection: true,
        });
        tracing::debug!(?edge, sequence = ?self.sequence, "edge formed");
        Some(TrackOutcome::EdgeFormed { edge })
    }

    fn hover_exit(&mut self, node: NodeIndex) -> TrackOutcome {
        if !self.in_range(node) {
            return TrackOutcome::Ignored;
        }
        // The pressed node stays lit for the whole drag.
        if self.session.is_some_and(|session| session.pressed == node) {
            return TrackOutcome::Highlight { node, lit: true };
        }
        self.set_lit(node, false);
        TrackOutcome::Highlight {
            node,
            lit: self.is_highlighted(node),
        }
    }

    fn pointer_up(&mut self) -> TrackOutcome {
        let Some(session) = self.session.take() else {
            return TrackOutcome::Ignored;
        };
        let cancelled = !session.made_connection && self.degree(session.pressed) == 0;
        if cancelled {
            self.set_lit(session.pressed, false);
        }
        tracing::debug!(cancelled, sequence = ?self.sequence, "drag released");
        TrackOutcome::Released { cancelled }
    }
}
