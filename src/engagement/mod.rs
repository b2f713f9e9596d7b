//! Reward computation and progress accounting for supporter engagement.
//!
//! The core (`rewards`, `progress`) is pure and synchronous: it computes
//! reward outcomes and next progress states as values, with no I/O and no
//! shared mutable state, so it is safe to call from any number of request
//! handlers. Persistence and messaging stay behind the `ledger` ports.

pub mod domain;
pub mod ledger;
pub mod progress;
pub(crate) mod rewards;
pub mod service;


pub use domain::{
    Action, ActionId, ActionKind, ActorId, Attachments, BadgeRarity, CheckInVenue, RewardKey,
    TaskDifficulty, Trackable, TrackableId, TrackableKind, TrackableReward,
};
pub use ledger::{
    AlertError, EngagementAlert, LedgerEntry, LedgerError, LedgerWriter, NotificationPublisher,
};
pub use progress::{ProgressError, ProgressState};
pub use rewards::{
    BaseReward, BonusComponent, BonusRule, RewardEngine, RewardError, RewardOutcome, RewardTable,
};
pub use service::{EngagementService, EngagementServiceError, ProgressUpdate};
