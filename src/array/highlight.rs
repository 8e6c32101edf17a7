//! Per-index highlight tracking
//!
//! Two rules govern every tag:
//! - A permanent tag is sticky: later `mark` calls on that index are ignored until it is
//!   explicitly unmarked.
//! - A temporary tag lives for exactly one snapshot; [`Highlighting::decay`] runs right after
//!   each capture and drops every non-permanent entry.

use rustc_hash::FxHashMap;

/// Why an index is visually distinguished
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HighlightKind {
    Default,
    Index,
    Comparison,
    Move,
}

impl HighlightKind {
    pub fn label(self) -> &'static str {
        match self {
            HighlightKind::Default => "default",
            HighlightKind::Index => "index",
            HighlightKind::Comparison => "comparison",
            HighlightKind::Move => "move",
        }
    }
}

/// A highlight applied to one index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightTag {
    pub kind: HighlightKind,
    pub permanent: bool,
}

impl HighlightTag {
    pub fn new(kind: HighlightKind, permanent: bool) -> Self {
        HighlightTag { kind, permanent }
    }
}

/// Sparse index -> tag mapping. Absent keys are unhighlighted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Highlighting {
    tags: FxHashMap<usize, HighlightTag>,
}

impl Highlighting {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a tag unless a permanent one already occupies `index`.
    ///
    /// Returns `false` when the write was blocked.
    pub fn mark(&mut self, index: usize, kind: HighlightKind, permanent: bool) -> bool {
        match self.tags.get(&index) {
            Some(existing) if existing.permanent => false,
            _ => {
                self.tags.insert(index, HighlightTag::new(kind, permanent));
                true
            }
        }
    }

    /// Remove any tag at `index`, permanent or not
    pub fn unmark(&mut self, index: usize) -> Option<HighlightTag> {
        self.tags.remove(&index)
    }

    /// Drop every temporary tag
    pub fn decay(&mut self) {
        self.tags.retain(|_, tag| tag.permanent);
    }

    pub fn clear(&mut self) {
        self.tags.clear();
    }

    pub fn get(&self, index: usize) -> Option<HighlightTag> {
        self.tags.get(&index).copied()
    }

    pub fn kind_at(&self, index: usize) -> HighlightKind {
        self.get(index)
            .map(|tag| tag.kind)
            .unwrap_or(HighlightKind::Default)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Tags ordered by index
    pub fn iter_sorted(&self) -> Vec<(usize, HighlightTag)> {
        let mut entries: Vec<_> = self.tags.iter().map(|(i, t)| (*i, *t)).collect();
        entries.sort_by_key(|(i, _)| *i);
        entries
    }

    /// Rough heap footprint, used by the snapshot memory budget
    pub(crate) fn estimated_size(&self) -> usize {
        self.tags.len() * (std::mem::size_of::<usize>() + std::mem::size_of::<HighlightTag>())
    }
}
