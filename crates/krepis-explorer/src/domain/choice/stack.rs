//! Decision Stack Implementation
//!
//! Frames indexed by depth, mutated in place between iterations. The stack is
//! only rebuilt from scratch by `clear()`.

use super::record::ChoiceFrame;
use std::fmt;

/// Growable vector of per-depth choice frames
///
/// # Lifecycle
///
/// ```text
/// iteration k:   select(0), select(1), ..., select(n)   (replay, then extend)
/// between:       pop_exhausted_tail() or reopen_last_in_top()
/// new campaign:  clear()
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionStack<T> {
    frames: Vec<ChoiceFrame<T>>,
}

impl<T: Copy + From<u64>> Default for DecisionStack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy + From<u64>> DecisionStack<T> {
    /// Create an empty stack
    pub const fn new() -> Self {
        Self { frames: Vec::new() }
    }

    /// Number of recorded depths
    #[inline]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether no depth has been recorded
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Recorded frames, shallowest first
    #[inline]
    pub fn frames(&self) -> &[ChoiceFrame<T>] {
        &self.frames
    }

    /// Frame recorded at `depth`
    #[inline]
    pub fn frame(&self, depth: usize) -> Option<&ChoiceFrame<T>> {
        self.frames.get(depth)
    }

    /// Pick the next sibling at `depth`
    ///
    /// Reuses the recorded frame when `depth` is within the stack, otherwise
    /// pushes the frame built by `make_frame`. Returns `None` when every
    /// sibling at this depth is already exhausted.
    ///
    /// # Algorithm
    ///
    /// 1. Stop if the frame has no open sibling.
    /// 2. If `depth > 0`, reopen the last exhausted sibling of the parent frame.
    /// 3. Mark the first open sibling exhausted and return it.
    ///
    /// # Panics
    ///
    /// - `depth > len()`: a choice-set index referring to a depth that was
    ///   never visited.
    /// - The parent frame has no exhausted sibling: the parent depth was not
    ///   selected on this path.
    pub fn select<F>(&mut self, depth: usize, make_frame: F) -> Option<T>
    where
        F: FnOnce() -> ChoiceFrame<T>,
    {
        assert!(
            depth <= self.frames.len(),
            "Decision depth {} skips recorded depth {}",
            depth,
            self.frames.len()
        );

        if depth == self.frames.len() {
            self.frames.push(make_frame());
        }

        if self.frames[depth].is_exhausted() {
            return None;
        }

        if depth > 0 && !self.frames[depth - 1].reopen_last() {
            panic!("Parent frame at depth {} has no selected sibling", depth - 1);
        }

        self.frames[depth].close_next()
    }

    /// Pop fully exhausted trailing frames
    ///
    /// Walks from the deepest frame towards depth 1. Each exhausted frame is
    /// removed and the first open sibling of its parent is closed, so the
    /// parent will advance to its next sibling on the following iteration.
    /// Stops at the first frame that still has an open sibling. Frame 0 is
    /// never popped.
    ///
    /// # Panics
    ///
    /// Panics if a parent frame of an exhausted frame has no open sibling.
    pub fn pop_exhausted_tail(&mut self) {
        let mut idx = self.frames.len();
        while idx > 1 {
            idx -= 1;
            if !self.frames[idx].is_exhausted() {
                break;
            }

            if self.frames[idx - 1].close_next().is_none() {
                panic!("Parent frame at depth {} has no open sibling", idx - 1);
            }

            self.frames.pop();
        }
    }

    /// Reopen the last exhausted sibling of the deepest frame
    ///
    /// Used to replay the same prefix while a different branch is explored
    /// on another stack. No-op on an empty stack.
    pub fn reopen_last_in_top(&mut self) {
        if let Some(top) = self.frames.last_mut() {
            top.reopen_last();
        }
    }

    /// Whether every recorded frame is exhausted (vacuously true when empty)
    #[inline]
    pub fn is_fully_exhausted(&self) -> bool {
        self.frames.iter().all(ChoiceFrame::is_exhausted)
    }

    /// Drop all frames
    pub fn clear(&mut self) {
        self.frames.clear();
    }
}

impl<T: fmt::Display> fmt::Display for DecisionStack<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (depth, frame) in self.frames.iter().enumerate() {
            writeln!(f, "{:>3}: {}", depth, frame)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two() -> ChoiceFrame<u64> {
        ChoiceFrame::new([0u64, 1])
    }

    fn flags(stack: &DecisionStack<u64>) -> Vec<Vec<bool>> {
        stack
            .frames()
            .iter()
            .map(|f| (0..f.len()).map(|r| r < f.exhausted_count()).collect())
            .collect()
    }

    #[test]
    fn test_select_extends_stack() {
        let mut stack = DecisionStack::new();
        assert_eq!(stack.select(0, two), Some(0));
        assert_eq!(stack.select(1, two), Some(0));
        assert_eq!(stack.len(), 2);

        // Only the deepest pick stays marked
        assert_eq!(flags(&stack), vec![vec![false, false], vec![true, false]]);
    }

    #[test]
    fn test_select_replays_recorded_frame() {
        let mut stack = DecisionStack::new();
        stack.select(0, two);

        // A replayed depth ignores the new frame
        let picked = stack.select(0, || ChoiceFrame::new([9u64]));
        assert_eq!(picked, Some(1));
        assert_eq!(stack.frame(0).map(ChoiceFrame::len), Some(2));
    }

    #[test]
    fn test_select_exhausted_frame_returns_none() {
        let mut stack = DecisionStack::new();
        stack.select(0, || ChoiceFrame::new([5u64]));
        assert_eq!(stack.select(0, two), None);
    }

    #[test]
    fn test_pop_exhausted_tail() {
        let mut stack = DecisionStack::new();
        stack.select(0, two);
        stack.select(1, two);
        // second pass over depth 1
        stack.select(0, two);
        stack.select(1, two);
        assert_eq!(flags(&stack), vec![vec![false, false], vec![true, true]]);

        stack.pop_exhausted_tail();
        assert_eq!(stack.len(), 1);
        assert_eq!(flags(&stack), vec![vec![true, false]]);
    }

    #[test]
    fn test_pop_never_removes_root() {
        let mut stack = DecisionStack::new();
        stack.select(0, || ChoiceFrame::new([3u64]));
        stack.pop_exhausted_tail();
        assert_eq!(stack.len(), 1);
        assert!(stack.is_fully_exhausted());
    }

    #[test]
    fn test_reopen_last_in_top() {
        let mut stack = DecisionStack::new();
        stack.select(0, two);
        stack.reopen_last_in_top();
        assert_eq!(flags(&stack), vec![vec![false, false]]);

        let mut empty = DecisionStack::<u64>::new();
        empty.reopen_last_in_top();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_counted_frames_nest() {
        let wide = || ChoiceFrame::<u64>::counted(1 << 40);
        let mut stack = DecisionStack::new();
        assert_eq!(stack.select(0, wide), Some(0));
        assert_eq!(stack.select(1, wide), Some(0));
        stack.pop_exhausted_tail();

        assert_eq!(stack.select(0, wide), Some(0));
        assert_eq!(stack.select(1, wide), Some(1));
        assert_eq!(stack.frame(1).map(ChoiceFrame::exhausted_count), Some(2));
    }

    #[test]
    #[should_panic(expected = "skips recorded depth")]
    fn test_select_skipping_depth_panics() {
        let mut stack = DecisionStack::new();
        stack.select(1, two);
    }
}
