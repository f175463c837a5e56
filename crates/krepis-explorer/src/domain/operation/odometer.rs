//! Delay Odometer
//!
//! Fixed number of delay slots advanced like an odometer between iterations.
//! Each configuration is a multiset of step indices at which a delay fires.
//!
//! # Canonical Form
//!
//! Slots are kept non-increasing (`slots[0] >= slots[1] >= ...`), so each
//! multiset of placements is visited exactly once:
//!
//! ```text
//! k = 2, bound = 2:
//!   [0,0] → [1,0] → [2,0] → [1,1] → [2,1] → [2,2] → wrap
//! ```
//!
//! With `k` slots and bound `m` there are `C(m + k, k)` configurations, the
//! number of sorted `k`-tuples over `[0, m]`.

/// Odometer over sorted delay placements
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelayOdometer {
    slots: Vec<usize>,
}

impl DelayOdometer {
    /// Create an odometer with `k` slots, all at zero
    pub fn new(k: usize) -> Self {
        Self { slots: vec![0; k] }
    }

    /// Number of slots
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the odometer has no slots
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Raw slot values
    #[inline]
    pub fn slots(&self) -> &[usize] {
        &self.slots
    }

    /// Return every slot to zero
    pub fn reset(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = 0);
    }

    /// Move to the next configuration with slot values in `[0, bound]`
    ///
    /// Increments the first slot still below `bound` and carries the new
    /// value into every earlier slot. Returns `false` when no slot can be
    /// incremented, i.e. the odometer has wrapped; the slots are then left
    /// untouched for the caller to reset. An odometer without slots wraps
    /// immediately.
    pub fn advance(&mut self, bound: usize) -> bool {
        let Some(idx) = self.slots.iter().position(|&slot| slot < bound) else {
            return false;
        };

        let value = self.slots[idx] + 1;
        self.slots[..=idx].iter_mut().for_each(|slot| *slot = value);
        true
    }

    /// Slot values in ascending order
    pub fn sorted_delays(&self) -> Vec<usize> {
        let mut delays = self.slots.clone();
        delays.sort_unstable();
        delays
    }
}
