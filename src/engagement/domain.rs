use std::num::NonZeroU32;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier for a discrete reward-eligible action. Doubles as the ledger
/// idempotency key, so callers must mint one id per distinct user event.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionId(pub String);

/// Identifier for the supporter performing the action.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId(pub String);

/// Identifier for a badge or task definition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TrackableId(pub String);

/// Where a match-day check-in happened, relative to the supporter's club.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CheckInVenue {
    Stadium,
    Home,
    Away,
}

impl CheckInVenue {
    pub const fn label(self) -> &'static str {
        match self {
            CheckInVenue::Stadium => "stadium",
            CheckInVenue::Home => "home",
            CheckInVenue::Away => "away",
        }
    }
}

/// Optional proof a supporter attaches to a check-in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachments {
    pub photo_url: Option<String>,
    pub comment: Option<String>,
}

impl Attachments {
    pub fn has_photo(&self) -> bool {
        self.photo_url.is_some()
    }

    pub fn has_comment(&self) -> bool {
        self.comment.is_some()
    }
}

/// Tagged payloads for the finite set of reward-eligible events, so the
/// reward-affecting conditions are exhaustively matchable rather than read
/// out of an untyped data bag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionKind {
    CheckIn {
        venue: CheckInVenue,
        attachments: Attachments,
    },
    BadgeProgress {
        trackable: TrackableId,
    },
    TaskProgress {
        trackable: TrackableId,
    },
    EventRegistration {
        event_id: String,
    },
}

/// One discrete, reward-eligible user event. Created transiently per request;
/// the computed outcome is handed to the ledger and the action is discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub id: ActionId,
    pub actor: ActorId,
    pub kind: ActionKind,
    pub occurred_at: DateTime<Utc>,
}

impl Action {
    /// Reward-table key for this action's type/subtype pair.
    pub fn reward_key(&self) -> RewardKey {
        match &self.kind {
            ActionKind::CheckIn { venue, .. } => RewardKey::CheckIn(*venue),
            ActionKind::BadgeProgress { .. } => RewardKey::BadgeProgress,
            ActionKind::TaskProgress { .. } => RewardKey::TaskProgress,
            ActionKind::EventRegistration { .. } => RewardKey::EventRegistration,
        }
    }
}

/// Lookup key pairing an action type with its reward-affecting subtype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RewardKey {
    CheckIn(CheckInVenue),
    BadgeProgress,
    TaskProgress,
    EventRegistration,
}

impl RewardKey {
    pub const fn label(self) -> &'static str {
        match self {
            RewardKey::CheckIn(CheckInVenue::Stadium) => "check_in/stadium",
            RewardKey::CheckIn(CheckInVenue::Home) => "check_in/home",
            RewardKey::CheckIn(CheckInVenue::Away) => "check_in/away",
            RewardKey::BadgeProgress => "badge_progress",
            RewardKey::TaskProgress => "task_progress",
            RewardKey::EventRegistration => "event_registration",
        }
    }
}

/// Collectible tiers for badges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BadgeRarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

/// Effort tiers for tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskDifficulty {
    Easy,
    Medium,
    Hard,
    Expert,
}

/// Distinguishes the two trackable families. Tasks additionally pay
/// reputation on completion; badges do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrackableKind {
    Badge { rarity: BadgeRarity },
    Task { difficulty: TaskDifficulty },
}

impl TrackableKind {
    pub const fn label(self) -> &'static str {
        match self {
            TrackableKind::Badge { .. } => "badge",
            TrackableKind::Task { .. } => "task",
        }
    }
}

/// Payout configured on a trackable, credited once when progress reaches max.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackableReward {
    pub tokens: u32,
    pub experience: u32,
    pub reputation: u32,
}

/// A badge or task definition owned by the catalog. Treated as immutable once
/// progress against it exists: reward values must not change retroactively
/// for already-earned records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trackable {
    pub id: TrackableId,
    pub kind: TrackableKind,
    pub name: String,
    pub max_progress: NonZeroU32,
    pub reward: TrackableReward,
}
