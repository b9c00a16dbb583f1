use crate::ring_gestures::engine::NodeIndex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const PATTERNS_FILE: &str = "spell_patterns.json";
pub const SCHEMA_VERSION: u32 = 1;

/// A castable action and the ring pattern that triggers it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActionDefinition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub cost: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub pattern: Vec<NodeIndex>,
}

impl ActionDefinition {
    pub fn new(id: impl Into<String>, pattern: Vec<NodeIndex>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            cost: 0,
            icon: None,
            pattern,
        }
    }

    /// Exact positional equality: same length, same index at every position.
    pub fn matches(&self, sequence: &[NodeIndex]) -> bool {
        self.pattern.as_slice() == sequence
    }
}

/// On-disk action library.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PatternLibrary {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    #[serde(default)]
    pub actions: Vec<ActionDefinition>,
}

impl Default for PatternLibrary {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            actions: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternConflictKind {
    DuplicateId,
    DuplicateSequence,
}

/// Two library entries that cannot both be registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternConflict {
    pub kind: PatternConflictKind,
    pub first: usize,
    pub second: usize,
}

impl PatternLibrary {
    /// Pairs of entries (by position) that clash, each later entry reported
    /// against the first one it collides with.
    pub fn find_conflicts(&self) -> Vec<PatternConflict> {
        let mut conflicts = Vec::new();
        let mut ids: HashMap<&str, usize> = HashMap::new();
        let mut sequences: HashMap<&[NodeIndex], usize> = HashMap::new();
        for (idx, action) in self.actions.iter().enumerate() {
            if let Some(&first) = ids.get(action.id.as_str()) {
                conflicts.push(PatternConflict {
                    kind: PatternConflictKind::DuplicateId,
                    first,
                    second: idx,
                });
            } else {
                ids.insert(action.id.as_str(), idx);
            }
            if action.pattern.is_empty() {
                continue;
            }
            if let Some(&first) = sequences.get(action.pattern.as_slice()) {
                conflicts.push(PatternConflict {
                    kind: PatternConflictKind::DuplicateSequence,
                    first,
                    second: idx,
                });
            } else {
                sequences.insert(action.pattern.as_slice(), idx);
            }
        }
        conflicts
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterErrorKind {
    EmptyPattern,
    DuplicateId,
    /// Same sequence as the already registered action `existing`.
    DuplicateSequence { existing: String },
    NodeOutOfRange { index: NodeIndex, node_count: usize },
    /// Equal consecutive indices never occur in a drawn sequence.
    RepeatedNode { position: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterError {
    pub id: String,
    pub kind: RegisterErrorKind,
}

impl std::fmt::Display for RegisterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            RegisterErrorKind::EmptyPattern => write!(f, "action '{}' has an empty pattern", self.id),
            RegisterErrorKind::DuplicateId => {
                write!(f, "action '{}' is already registered", self.id)
            }
            RegisterErrorKind::DuplicateSequence { existing } => write!(
                f,
                "action '{}' uses the same pattern as '{existing}'",
                self.id
            ),
            RegisterErrorKind::NodeOutOfRange { index, node_count } => write!(
                f,
                "action '{}' references node {index} but the ring has {node_count} nodes",
                self.id
            ),
            RegisterErrorKind::RepeatedNode { position } => write!(
                f,
                "action '{}' repeats a node at position {position}",
                self.id
            ),
        }
    }
}

impl std::error::Error for RegisterError {}

/// Registered patterns, searched in registration order.
///
/// Conflicts are rejected by [`PatternMatcher::register`], so a successful
/// match is always unambiguous.
#[derive(Debug, Clone, Default)]
pub struct PatternMatcher {
    node_count: Option<usize>,
    actions: Vec<ActionDefinition>,
}

impl PatternMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Matcher that also rejects patterns referencing nodes `>= node_count`.
    pub fn for_ring(node_count: usize) -> Self {
        Self {
            node_count: Some(node_count),
            actions: Vec::new(),
        }
    }

    /// Registers every library entry in order. Rejected entries are logged
    /// and returned; the rest stay usable.
    pub fn from_library(library: &PatternLibrary, node_count: usize) -> (Self, Vec<RegisterError>) {
        let mut matcher = Self::for_ring(node_count);
        let mut rejected = Vec::new();
        for action in &library.actions {
            if let Err(err) = matcher.register(action.clone()) {
                tracing::warn!(%err, "pattern rejected");
                rejected.push(err);
            }
        }
        (matcher, rejected)
    }

    pub fn register_pattern(
        &mut self,
        id: impl Into<String>,
        pattern: Vec<NodeIndex>,
    ) -> Result<(), RegisterError> {
        self.register(ActionDefinition::new(id, pattern))
    }

    pub fn register(&mut self, action: ActionDefinition) -> Result<(), RegisterError> {
        self.validate(&action).map_err(|kind| RegisterError {
            id: action.id.clone(),
            kind,
        })?;
        tracing::debug!(id = %action.id, pattern = ?action.pattern, "pattern registered");
        self.actions.push(action);
        Ok(())
    }

    fn validate(&self, action: &ActionDefinition) -> Result<(), RegisterErrorKind> {
        if action.pattern.is_empty() {
            return Err(RegisterErrorKind::EmptyPattern);
        }
        if let Some(node_count) = self.node_count {
            if let Some(&index) = action.pattern.iter().find(|&&idx| idx >= node_count) {
                return Err(RegisterErrorKind::NodeOutOfRange { index, node_count });
            }
        }
        if let Some(position) = action
            .pattern
            .windows(2)
            .position(|pair| pair[0] == pair[1])
        {
            return Err(RegisterErrorKind::RepeatedNode {
                position: position + 1,
            });
        }
        if self.actions.iter().any(|existing| existing.id == action.id) {
            return Err(RegisterErrorKind::DuplicateId);
        }
        if let Some(existing) = self
            .actions
            .iter()
            .find(|existing| existing.pattern == action.pattern)
        {
            return Err(RegisterErrorKind::DuplicateSequence {
                existing: existing.id.clone(),
            });
        }
        Ok(())
    }

    /// First registered action whose pattern equals `sequence` exactly.
    /// An empty sequence never matches.
    pub fn match_sequence(&self, sequence: &[NodeIndex]) -> Option<&ActionDefinition> {
        if sequence.is_empty() {
            return None;
        }
        self.actions.iter().find(|action| action.matches(sequence))
    }

    pub fn get(&self, id: &str) -> Option<&ActionDefinition> {
        self.actions.iter().find(|action| action.id == id)
    }

    pub fn actions(&self) -> &[ActionDefinition] {
        &self.actions
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

pub fn load_library(path: &str) -> anyhow::Result<PatternLibrary> {
    let content = std::fs::read_to_string(path).unwrap_or_default();
    if content.trim().is_empty() {
        return Ok(PatternLibrary::default());
    }
    let library: PatternLibrary = serde_json::from_str(&content)?;
    if library.schema_version != SCHEMA_VERSION {
        return Err(anyhow::anyhow!(
            "Unsupported pattern schema version {}",
            library.schema_version
        ));
    }
    Ok(library)
}

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}
