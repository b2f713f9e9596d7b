mod bonus;
mod table;

pub use bonus::{BonusComponent, BonusRule};
pub use table::{BaseReward, RewardTable};

use serde::{Deserialize, Serialize};

use super::domain::{Action, ActionId, RewardKey};

/// Stateless engine applying the base tariff and bonus rules to an action.
pub struct RewardEngine {
    table: RewardTable,
}

impl RewardEngine {
    pub fn new(table: RewardTable) -> Self {
        Self { table }
    }

    /// Compute the full reward outcome for one action.
    ///
    /// Pure over the action value: identical inputs always yield identical
    /// outcomes, which reward audits rely on. The only failure mode is a
    /// reward key with no table entry.
    pub fn compute(&self, action: &Action) -> Result<RewardOutcome, RewardError> {
        let base = self.table.base_reward(action.reward_key())?;
        let bonuses = bonus::evaluate(action);
        let bonus_tokens: u32 = bonuses.iter().map(|component| component.tokens).sum();

        Ok(RewardOutcome {
            action_id: action.id.clone(),
            base_tokens: base.tokens,
            bonus_tokens,
            total_tokens: base.tokens + bonus_tokens,
            experience: base.experience,
            bonuses,
        })
    }
}

/// Computed result of applying the reward rules to a single action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardOutcome {
    pub action_id: ActionId,
    pub base_tokens: u32,
    pub bonus_tokens: u32,
    pub total_tokens: u32,
    pub experience: u32,
    pub bonuses: Vec<BonusComponent>,
}

impl RewardOutcome {
    pub fn summary(&self) -> String {
        if self.bonus_tokens == 0 {
            format!("{} tokens", self.total_tokens)
        } else {
            format!(
                "{} tokens ({} base + {} bonus)",
                self.total_tokens, self.base_tokens, self.bonus_tokens
            )
        }
    }

    /// Whether applying this outcome would change any balance.
    pub fn pays_anything(&self) -> bool {
        self.total_tokens > 0 || self.experience > 0
    }
}

/// Reward computation failure. A missing table entry is a configuration gap
/// and must reach the caller rather than be defaulted away.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RewardError {
    #[error("no reward rule configured for action kind '{}'", key.label())]
    UnknownActionKind { key: RewardKey },
}
