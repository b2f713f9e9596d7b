use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{ActorId, TrackableId};
use super::progress::ProgressState;

/// One atomic balance credit handed to the persistence layer.
///
/// `entry_id` is the idempotency key: implementations must apply an entry at
/// most once (a single conditional increment per update) and report replays
/// as [`LedgerError::DuplicateEntry`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub entry_id: String,
    pub actor: ActorId,
    pub tokens: u32,
    pub experience: u32,
    pub reputation: u32,
}

/// Persistence abstraction so the engagement service can be exercised in
/// isolation. The computation core never writes state itself; it only hands
/// deltas and next-states through this port.
pub trait LedgerWriter: Send + Sync {
    fn credit(&self, entry: LedgerEntry) -> Result<(), LedgerError>;
    fn load_progress(
        &self,
        actor: &ActorId,
        trackable: &TrackableId,
    ) -> Result<Option<ProgressState>, LedgerError>;
    fn store_progress(
        &self,
        actor: &ActorId,
        trackable: &TrackableId,
        state: ProgressState,
    ) -> Result<(), LedgerError>;
}

/// Error enumeration for ledger failures.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("ledger entry already applied")]
    DuplicateEntry,
    #[error("ledger unavailable: {0}")]
    Unavailable(String),
}

/// Outbound hook for user-facing "badge earned" / "task completed" messages.
/// The service only signals the completion transition; formatting and
/// delivery belong to the subscribing adapter.
pub trait NotificationPublisher: Send + Sync {
    fn publish(&self, alert: EngagementAlert) -> Result<(), AlertError>;
}

/// Simple alert payload so hosts and tests can assert integration boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngagementAlert {
    pub template: String,
    pub actor: ActorId,
    pub details: BTreeMap<String, String>,
}

/// Alert dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum AlertError {
    #[error("alert transport unavailable: {0}")]
    Transport(String),
}
