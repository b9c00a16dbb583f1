pub mod db;
pub mod engine;
pub mod layout;
pub mod overlay;
pub mod script;
pub mod service;
pub mod stats;

pub use db::{
    load_library, ActionDefinition, PatternLibrary, PatternMatcher, RegisterError,
    RegisterErrorKind,
};
pub use engine::{DragState, Edge, GestureTracker, NodeEvent, NodeIndex, Point, TrackOutcome};
pub use layout::{NodeLayout, RingLayout};
pub use overlay::{LineSink, NoopLineSink};
pub use service::{
    CastBudget, CastOutcome, GestureEventSink, GestureSurface, NoopEventSink, PointerFrame,
};
