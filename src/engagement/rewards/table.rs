use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::super::domain::{CheckInVenue, RewardKey};
use super::RewardError;
use crate::config::RewardOverrides;

/// Base token/experience yield fixed by action kind, before bonuses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseReward {
    pub tokens: u32,
    pub experience: u32,
}

impl BaseReward {
    pub const fn tokens_only(tokens: u32) -> Self {
        Self {
            tokens,
            experience: 0,
        }
    }
}

/// Data-driven mapping from action kind to base yield.
///
/// A key with no entry is a configuration gap and surfaces as
/// [`RewardError::UnknownActionKind`] rather than defaulting to zero, so a
/// missing reward rule cannot silently pay nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardTable {
    entries: BTreeMap<RewardKey, BaseReward>,
}

impl Default for RewardTable {
    fn default() -> Self {
        // Check-in values match the production tariff; badge/task progress
        // ticks and event registrations pay nothing up front because their
        // payout comes from the completed trackable itself.
        Self::empty()
            .with_entry(
                RewardKey::CheckIn(CheckInVenue::Stadium),
                BaseReward::tokens_only(50),
            )
            .with_entry(
                RewardKey::CheckIn(CheckInVenue::Away),
                BaseReward::tokens_only(30),
            )
            .with_entry(
                RewardKey::CheckIn(CheckInVenue::Home),
                BaseReward::tokens_only(10),
            )
            .with_entry(RewardKey::BadgeProgress, BaseReward::default())
            .with_entry(RewardKey::TaskProgress, BaseReward::default())
            .with_entry(RewardKey::EventRegistration, BaseReward::default())
    }
}

impl RewardTable {
    /// Table with no entries; every lookup fails until entries are added.
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    pub fn with_entry(mut self, key: RewardKey, reward: BaseReward) -> Self {
        self.entries.insert(key, reward);
        self
    }

    /// Default tariff with any configured check-in token overrides applied.
    pub fn from_config(overrides: &RewardOverrides) -> Self {
        let mut table = Self::default();
        let venues = [
            (CheckInVenue::Stadium, overrides.stadium_tokens),
            (CheckInVenue::Away, overrides.away_tokens),
            (CheckInVenue::Home, overrides.home_tokens),
        ];
        for (venue, tokens) in venues {
            if let Some(tokens) = tokens {
                table = table.with_entry(
                    RewardKey::CheckIn(venue),
                    BaseReward::tokens_only(tokens),
                );
            }
        }
        table
    }

    /// Pure lookup of the base yield for an action kind.
    pub fn base_reward(&self, key: RewardKey) -> Result<BaseReward, RewardError> {
        self.entries
            .get(&key)
            .copied()
            .ok_or(RewardError::UnknownActionKind { key })
    }
}
