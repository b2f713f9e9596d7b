//! Token-reward and badge/task progress computation for the fan engagement
//! platform.
//!
//! This crate is a library, not a service. It computes [`RewardOutcome`]s and
//! [`ProgressState`] transitions as pure values and hands them to pluggable
//! ledger and notification ports; it owns no I/O, no persistence, and no HTTP
//! surface. Hosts wire an [`engagement::EngagementService`] to their own
//! storage and messaging adapters.

pub mod config;
pub mod engagement;
pub mod telemetry;

pub use engagement::{
    Action, ActionId, ActionKind, ActorId, Attachments, CheckInVenue, EngagementService,
    EngagementServiceError, ProgressState, ProgressUpdate, RewardEngine, RewardOutcome,
    RewardTable, Trackable, TrackableReward,
};
