use crate::ring_gestures::db::{PatternConflictKind, PatternLibrary};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LibraryStats {
    pub patterns: usize,
    pub duplicate_ids: usize,
    pub duplicate_sequences: usize,
    pub out_of_range: usize,
    /// Empty patterns or patterns with a node repeated back to back.
    pub undrawable: usize,
}

pub fn library_stats(library: &PatternLibrary, node_count: usize) -> LibraryStats {
    let mut stats = LibraryStats {
        patterns: library.actions.len(),
        ..LibraryStats::default()
    };
    for action in &library.actions {
        if action.pattern.iter().any(|&idx| idx >= node_count) {
            stats.out_of_range += 1;
        }
        if action.pattern.is_empty() || action.pattern.windows(2).any(|pair| pair[0] == pair[1]) {
            stats.undrawable += 1;
        }
    }
    for conflict in library.find_conflicts() {
        match conflict.kind {
            PatternConflictKind::DuplicateId => stats.duplicate_ids += 1,
            PatternConflictKind::DuplicateSequence => stats.duplicate_sequences += 1,
        }
    }
    stats
}
