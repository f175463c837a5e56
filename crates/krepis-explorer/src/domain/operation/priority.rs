//! Priority List
//!
//! Ordered, duplicate-free sequence of live operations. Earlier means higher
//! priority.
//!
//! # Invariant
//!
//! Every operation carried by a non-completed eligible entity appears exactly
//! once. [`PriorityList::highest_among`] panics when it finds none of the
//! requested operations, since that means the invariant was already broken.

use crate::domain::entity::OperationId;
use std::fmt;

/// Ordered list of live operations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriorityList {
    ops: Vec<OperationId>,
}

impl PriorityList {
    /// Create an empty list
    pub const fn new() -> Self {
        Self { ops: Vec::new() }
    }

    /// Number of listed operations
    #[inline]
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Whether nothing is listed
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Listed operations, highest priority first
    #[inline]
    pub fn as_slice(&self) -> &[OperationId] {
        &self.ops
    }

    /// Whether `op` is listed
    #[inline]
    pub fn contains(&self, op: OperationId) -> bool {
        self.ops.contains(&op)
    }

    /// Priority rank of `op` (0 = highest)
    pub fn position(&self, op: OperationId) -> Option<usize> {
        self.ops.iter().position(|&o| o == op)
    }

    /// Insert `op` at rank `index`
    ///
    /// # Panics
    ///
    /// Panics if `op` is already listed or `index > len()`.
    pub fn insert_at(&mut self, index: usize, op: OperationId) {
        assert!(!self.contains(op), "{} is already in the priority list", op);
        assert!(
            index <= self.ops.len(),
            "Priority rank {} out of bounds for {} operations",
            index,
            self.ops.len()
        );
        self.ops.insert(index, op);
    }

    /// Remove `op`, returning whether it was listed
    pub fn remove(&mut self, op: OperationId) -> bool {
        match self.position(op) {
            Some(idx) => {
                self.ops.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Move `op` to the lowest priority
    ///
    /// # Panics
    ///
    /// Panics if `op` is not listed.
    pub fn demote(&mut self, op: OperationId) {
        let Some(idx) = self.position(op) else {
            panic!("Cannot demote {}: not in the priority list", op);
        };
        let op = self.ops.remove(idx);
        self.ops.push(op);
    }

    /// Highest-priority listed operation among `candidates`
    ///
    /// # Panics
    ///
    /// Panics if none of `candidates` is listed.
    pub fn highest_among(&self, candidates: &[OperationId]) -> OperationId {
        match self.ops.iter().find(|op| candidates.contains(op)) {
            Some(&op) => op,
            None => panic!(
                "Priority list {} contains none of the eligible operations {:?}",
                self, candidates
            ),
        }
    }

    /// Drop every operation
    pub fn clear(&mut self) {
        self.ops.clear();
    }
}

impl fmt::Display for PriorityList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, op) in self.ops.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", op)?;
        }
        write!(f, "]")
    }
}
