use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, info};

use super::domain::{Action, ActorId, Trackable, TrackableKind, TrackableReward};
use super::ledger::{
    AlertError, EngagementAlert, LedgerEntry, LedgerError, LedgerWriter, NotificationPublisher,
};
use super::progress::{ProgressError, ProgressState};
use super::rewards::{RewardEngine, RewardError, RewardOutcome, RewardTable};

/// Service composing the reward engine with the ledger and notification ports.
pub struct EngagementService<L, N> {
    engine: RewardEngine,
    ledger: Arc<L>,
    notifier: Arc<N>,
}

impl<L, N> EngagementService<L, N>
where
    L: LedgerWriter + 'static,
    N: NotificationPublisher + 'static,
{
    pub fn new(ledger: Arc<L>, notifier: Arc<N>, table: RewardTable) -> Self {
        Self {
            engine: RewardEngine::new(table),
            ledger,
            notifier,
        }
    }

    /// Compute the reward for an action and credit it to the actor's balance.
    ///
    /// The action id doubles as the ledger idempotency key, so replaying the
    /// same action surfaces [`LedgerError::DuplicateEntry`] instead of paying
    /// twice. Zero-value outcomes are returned without touching the ledger.
    pub fn record_action(
        &self,
        action: &Action,
    ) -> Result<RewardOutcome, EngagementServiceError> {
        let outcome = self.engine.compute(action)?;
        debug!(
            action = %action.id.0,
            key = action.reward_key().label(),
            reward = %outcome.summary(),
            "computed reward outcome"
        );

        if outcome.pays_anything() {
            self.ledger.credit(LedgerEntry {
                entry_id: action.id.0.clone(),
                actor: action.actor.clone(),
                tokens: outcome.total_tokens,
                experience: outcome.experience,
                reputation: 0,
            })?;
            info!(
                actor = %action.actor.0,
                action = %action.id.0,
                tokens = outcome.total_tokens,
                experience = outcome.experience,
                "credited action reward"
            );
        }

        Ok(outcome)
    }

    /// Advance an actor's progress against a badge or task.
    ///
    /// Persists the new counter and, exactly when the advance crosses the
    /// completion threshold, credits the trackable's configured reward and
    /// publishes a completion alert. The credit lands before the completed
    /// state is stored, so a transient ledger failure can be retried without
    /// losing the payout. Advancing an already-completed trackable is a
    /// no-op with no further credit or alert.
    pub fn advance_progress(
        &self,
        actor: &ActorId,
        trackable: &Trackable,
        delta: i64,
    ) -> Result<ProgressUpdate, EngagementServiceError> {
        let before = self
            .ledger
            .load_progress(actor, &trackable.id)?
            .unwrap_or_else(|| ProgressState::new(trackable.max_progress));
        let was_complete = before.is_complete();

        let after = before.advance(delta)?;

        let newly_completed = !was_complete && after.is_complete();
        if !newly_completed {
            self.ledger.store_progress(actor, &trackable.id, after)?;
            debug!(
                actor = %actor.0,
                trackable = %trackable.id.0,
                current = after.current,
                max = after.max.get(),
                "progress advanced"
            );
            return Ok(ProgressUpdate {
                state: after,
                newly_completed: false,
                reward: None,
            });
        }

        // Credit before persisting the completed state: if the credit fails
        // here, the stored counter is still one advance short and the retried
        // advance crosses the threshold again. A replayed completion key
        // means an earlier attempt already paid out, so the reward and alert
        // are skipped and only the state write is repeated.
        let reward = trackable.reward;
        let already_paid = match self.ledger.credit(LedgerEntry {
            entry_id: format!("{}:{}:completion", actor.0, trackable.id.0),
            actor: actor.clone(),
            tokens: reward.tokens,
            experience: reward.experience,
            reputation: reward.reputation,
        }) {
            Ok(()) => false,
            Err(LedgerError::DuplicateEntry) => true,
            Err(err) => return Err(err.into()),
        };

        if !already_paid {
            let template = match trackable.kind {
                TrackableKind::Badge { .. } => "badge_earned",
                TrackableKind::Task { .. } => "task_completed",
            };
            let mut details = BTreeMap::new();
            details.insert("name".to_string(), trackable.name.clone());
            details.insert("tokens".to_string(), reward.tokens.to_string());
            details.insert("experience".to_string(), reward.experience.to_string());
            self.notifier.publish(EngagementAlert {
                template: template.to_string(),
                actor: actor.clone(),
                details,
            })?;

            info!(
                actor = %actor.0,
                trackable = %trackable.id.0,
                kind = trackable.kind.label(),
                tokens = reward.tokens,
                "trackable completed"
            );
        }

        self.ledger.store_progress(actor, &trackable.id, after)?;

        Ok(ProgressUpdate {
            state: after,
            newly_completed: true,
            reward: Some(reward),
        })
    }
}

/// Result of one progress advance, including whether it crossed the
/// completion threshold and, if so, the reward that was credited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressUpdate {
    pub state: ProgressState,
    pub newly_completed: bool,
    pub reward: Option<TrackableReward>,
}

/// Error raised by the engagement service.
#[derive(Debug, thiserror::Error)]
pub enum EngagementServiceError {
    #[error(transparent)]
    Reward(#[from] RewardError),
    #[error(transparent)]
    Progress(#[from] ProgressError),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Alert(#[from] AlertError),
}
