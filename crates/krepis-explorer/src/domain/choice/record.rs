//! Choice Record Types

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single recorded decision
///
/// `value` is what was (or can be) chosen at a depth; `exhausted` is true once
/// the subtree below this sibling needs no further exploration on the current
/// path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice<T> {
    /// The decision value
    pub value: T,
    /// Whether this sibling has been explored
    pub exhausted: bool,
}

impl<T> Choice<T> {
    /// Create an unexplored choice
    #[inline(always)]
    pub const fn new(value: T) -> Self {
        Self {
            value,
            exhausted: false,
        }
    }
}

/// Value recorded on the nondeterministic-choice stack
///
/// Boolean and integer draws share one stack so that a single index tracks
/// the position of every in-program draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NondetValue {
    /// Boolean draw
    Bool(bool),
    /// Integer draw in `[0, max_value)`
    Int(u64),
}

impl NondetValue {
    /// Whether `self` and `other` come from the same kind of draw
    #[inline]
    pub fn same_kind(self, other: Self) -> bool {
        matches!(
            (self, other),
            (Self::Bool(_), Self::Bool(_)) | (Self::Int(_), Self::Int(_))
        )
    }
}

impl From<u64> for NondetValue {
    #[inline]
    fn from(value: u64) -> Self {
        Self::Int(value)
    }
}

impl fmt::Display for NondetValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{}", b),
            Self::Int(i) => write!(f, "{}", i),
        }
    }
}

/// Sibling values of a frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
enum Siblings<T> {
    /// Explicit values, in order
    Listed(Vec<T>),
    /// `T::from(0) .. T::from(n)`, never materialized
    Counted(u64),
}

/// Ordered set of sibling choices at one depth
///
/// Siblings are tried front to back and the exhausted ones always form a
/// leading run, so a frame only records how long that run is. Counted frames
/// (integer draws) cost the same whatever their width.
///
/// # Invariants
///
/// - Never empty.
/// - Sibling order is fixed at construction.
/// - `exhausted <= len()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceFrame<T> {
    siblings: Siblings<T>,
    exhausted: u64,
}

impl<T: Copy + From<u64>> ChoiceFrame<T> {
    /// Create a frame from sibling values, in the order given
    ///
    /// # Panics
    ///
    /// Panics if `values` is empty: a decision point always has at least one
    /// alternative.
    pub fn new(values: impl IntoIterator<Item = T>) -> Self {
        let values: Vec<T> = values.into_iter().collect();
        assert!(!values.is_empty(), "Choice frame must have at least one sibling");
        Self {
            siblings: Siblings::Listed(values),
            exhausted: 0,
        }
    }

    /// Create a frame over the `count` values `T::from(0) .. T::from(count)`
    ///
    /// # Panics
    ///
    /// Panics if `count` is zero.
    pub fn counted(count: u64) -> Self {
        assert!(count > 0, "Choice frame must have at least one sibling");
        Self {
            siblings: Siblings::Counted(count),
            exhausted: 0,
        }
    }

    /// Number of siblings
    #[inline]
    pub fn len(&self) -> u64 {
        match &self.siblings {
            Siblings::Listed(values) => values.len() as u64,
            Siblings::Counted(count) => *count,
        }
    }

    /// Always false; frames are never empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Value of the sibling at `rank`
    #[inline]
    pub fn value(&self, rank: u64) -> Option<T> {
        match &self.siblings {
            Siblings::Listed(values) => usize::try_from(rank)
                .ok()
                .and_then(|i| values.get(i))
                .copied(),
            Siblings::Counted(count) => (rank < *count).then(|| T::from(rank)),
        }
    }

    /// Sibling at `rank` with its exhausted flag
    #[inline]
    pub fn choice(&self, rank: u64) -> Option<Choice<T>> {
        self.value(rank).map(|value| Choice {
            value,
            exhausted: rank < self.exhausted,
        })
    }

    /// Value of the first sibling (used for kind checks on replay)
    #[inline]
    pub fn first_value(&self) -> T {
        match &self.siblings {
            Siblings::Listed(values) => values[0],
            Siblings::Counted(_) => T::from(0),
        }
    }

    /// Number of exhausted siblings
    #[inline]
    pub fn exhausted_count(&self) -> u64 {
        self.exhausted
    }

    /// Whether every sibling is exhausted
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.exhausted == self.len()
    }

    /// Rank of the first sibling still open
    #[inline]
    pub fn first_open(&self) -> Option<u64> {
        (!self.is_exhausted()).then_some(self.exhausted)
    }

    /// Rank of the last exhausted sibling
    #[inline]
    pub fn last_exhausted(&self) -> Option<u64> {
        self.exhausted.checked_sub(1)
    }

    /// Mark the first open sibling exhausted and return its value
    ///
    /// Returns `None` when the frame is already exhausted.
    #[inline]
    pub fn close_next(&mut self) -> Option<T> {
        let rank = self.first_open()?;
        self.exhausted += 1;
        self.value(rank)
    }

    /// Mark the last exhausted sibling open again
    ///
    /// Returns false when no sibling was exhausted.
    #[inline]
    pub fn reopen_last(&mut self) -> bool {
        match self.last_exhausted() {
            Some(rank) => {
                self.exhausted = rank;
                true
            }
            None => false,
        }
    }
}

impl ChoiceFrame<NondetValue> {
    /// Frame for a boolean draw: `false` first, then `true`
    pub fn boolean() -> Self {
        Self::new([NondetValue::Bool(false), NondetValue::Bool(true)])
    }

    /// Frame for an integer draw over `[0, max_value)`
    ///
    /// A `max_value` of zero yields the single sibling `0`.
    pub fn integer(max_value: u64) -> Self {
        Self::counted(max_value.max(1))
    }
}

impl<T: fmt::Display> fmt::Display for ChoiceFrame<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.siblings {
            Siblings::Listed(values) => {
                write!(f, "[")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    let mark = if (i as u64) < self.exhausted { "*" } else { "" };
                    write!(f, "{}{}", value, mark)?;
                }
                write!(f, "]")
            }
            Siblings::Counted(count) => {
                write!(f, "[0..{}* | {}..{}]", self.exhausted, self.exhausted, count)
            }
        }
    }
}
