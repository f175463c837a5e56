//! Entity Types
//!
//! Newtype identifiers and the status snapshot consumed at each decision point.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Entity identifier
///
/// Identifies one schedulable unit of concurrent execution (an actor or
/// state machine instance) inside the program under test.
///
/// # Example
///
/// ```rust
/// use krepis_explorer::domain::entity::EntityId;
///
/// let a = EntityId::new(1);
/// let b = EntityId::new(2);
/// assert!(a < b);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u64);

impl EntityId {
    /// Create a new EntityId
    #[inline(always)]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw numeric ID
    #[inline(always)]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl From<u64> for EntityId {
    #[inline(always)]
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// Operation identifier
///
/// Groups causally-related entities: every entity that exists because of one
/// originating action carries the same `OperationId`. Operation-bounding
/// strategies schedule at this granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OperationId(pub u64);

impl OperationId {
    /// Create a new OperationId
    #[inline(always)]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw numeric ID
    #[inline(always)]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for OperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Op({})", self.0)
    }
}

/// Status flags of an entity at one decision point
///
/// The flags are independent; the runtime may report an entity as enabled
/// and blocked at the same time (it has work but is parked on a receive with
/// a filter, for instance). Eligibility is computed from the combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EntityStatus {
    /// The entity has work it could perform
    pub enabled: bool,
    /// The entity is parked on a synchronization primitive
    pub blocked: bool,
    /// The entity is waiting for a message to arrive
    pub waiting_to_receive: bool,
    /// The entity has halted for good
    pub completed: bool,
}

impl EntityStatus {
    /// Enabled, nothing holding it back
    pub const fn runnable() -> Self {
        Self {
            enabled: true,
            blocked: false,
            waiting_to_receive: false,
            completed: false,
        }
    }

    /// Enabled but blocked
    pub const fn blocked() -> Self {
        Self {
            enabled: true,
            blocked: true,
            waiting_to_receive: false,
            completed: false,
        }
    }

    /// Waiting for a message
    pub const fn waiting() -> Self {
        Self {
            enabled: false,
            blocked: false,
            waiting_to_receive: true,
            completed: false,
        }
    }

    /// Halted
    pub const fn completed() -> Self {
        Self {
            enabled: false,
            blocked: false,
            waiting_to_receive: false,
            completed: true,
        }
    }

    /// Enabled and neither blocked nor waiting
    #[inline(always)]
    pub const fn is_runnable(self) -> bool {
        self.enabled && !self.blocked && !self.waiting_to_receive
    }
}

/// Snapshot of one entity at a decision point
///
/// # Pending Operations
///
/// An entity can be *pending* an operation without carrying its id, which
/// models causally-queued continuations: an event of operation 7 sitting in
/// the inbox of an entity that currently runs on behalf of operation 3. An
/// operation is only complete once no live entity carries it or has it
/// pending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulableEntity {
    /// Entity identity
    pub id: EntityId,
    /// Operation the entity currently runs on behalf of
    pub operation_id: OperationId,
    /// Status flags
    pub status: EntityStatus,
    /// Operations queued on this entity but not yet carried by it
    #[serde(default)]
    pub pending_operations: Vec<OperationId>,
}

impl SchedulableEntity {
    /// Create an entity snapshot with no pending operations
    pub fn new(id: EntityId, operation_id: OperationId, status: EntityStatus) -> Self {
        Self {
            id,
            operation_id,
            status,
            pending_operations: Vec::new(),
        }
    }

    /// Attach pending operations
    pub fn with_pending(mut self, pending: impl IntoIterator<Item = OperationId>) -> Self {
        self.pending_operations.extend(pending);
        self
    }

    /// Enabled and neither blocked nor waiting
    #[inline(always)]
    pub fn is_runnable(&self) -> bool {
        self.status.is_runnable()
    }

    /// Whether `op` is queued on this entity
    #[inline]
    pub fn is_operation_pending(&self, op: OperationId) -> bool {
        self.pending_operations.contains(&op)
    }

    /// Whether this entity keeps `op` alive
    ///
    /// True when the entity has not completed and either carries `op` or has
    /// it pending.
    #[inline]
    pub fn keeps_alive(&self, op: OperationId) -> bool {
        !self.status.completed && (self.operation_id == op || self.is_operation_pending(op))
    }
}

/// Select the entities eligible to run next
///
/// Runnable entities win; when there are none, entities waiting to receive
/// become the fallback set. Snapshot order is preserved.
pub fn eligible_entities(entities: &[SchedulableEntity]) -> Vec<&SchedulableEntity> {
    let runnable: Vec<&SchedulableEntity> =
        entities.iter().filter(|e| e.is_runnable()).collect();
    if !runnable.is_empty() {
        return runnable;
    }

    entities
        .iter()
        .filter(|e| e.status.waiting_to_receive)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(id: u64, op: u64, status: EntityStatus) -> SchedulableEntity {
        SchedulableEntity::new(EntityId(id), OperationId(op), status)
    }

    #[test]
    fn test_runnable_status() {
        assert!(EntityStatus::runnable().is_runnable());
        assert!(!EntityStatus::blocked().is_runnable());
        assert!(!EntityStatus::waiting().is_runnable());
        assert!(!EntityStatus::completed().is_runnable());
    }

    #[test]
    fn test_eligible_prefers_runnable() {
        let entities = vec![
            entity(0, 0, EntityStatus::waiting()),
            entity(1, 0, EntityStatus::runnable()),
            entity(2, 1, EntityStatus::blocked()),
            entity(3, 1, EntityStatus::runnable()),
        ];

        let ids: Vec<EntityId> = eligible_entities(&entities).iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![EntityId(1), EntityId(3)]);
    }

    #[test]
    fn test_eligible_falls_back_to_waiting() {
        let entities = vec![
            entity(0, 0, EntityStatus::waiting()),
            entity(1, 0, EntityStatus::blocked()),
            entity(2, 1, EntityStatus::completed()),
        ];

        let ids: Vec<EntityId> = eligible_entities(&entities).iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![EntityId(0)]);
    }

    #[test]
    fn test_eligible_empty() {
        let entities = vec![entity(0, 0, EntityStatus::completed())];
        assert!(eligible_entities(&entities).is_empty());
    }

    #[test]
    fn test_keeps_alive() {
        let e = entity(0, 3, EntityStatus::runnable()).with_pending([OperationId(7)]);
        assert!(e.keeps_alive(OperationId(3)));
        assert!(e.keeps_alive(OperationId(7)));
        assert!(!e.keeps_alive(OperationId(9)));

        let done = entity(1, 3, EntityStatus::completed());
        assert!(!done.keeps_alive(OperationId(3)));
    }
}
