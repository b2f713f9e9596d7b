use std::collections::{BTreeMap, HashMap, HashSet};
use std::num::NonZeroU32;
use std::sync::{Arc, Mutex};

use chrono::{TimeZone, Utc};

use crate::engagement::domain::{
    Action, ActionId, ActionKind, ActorId, Attachments, BadgeRarity, CheckInVenue, TaskDifficulty,
    Trackable, TrackableId, TrackableKind, TrackableReward,
};
use crate::engagement::ledger::{
    AlertError, EngagementAlert, LedgerEntry, LedgerError, LedgerWriter, NotificationPublisher,
};
use crate::engagement::progress::ProgressState;
use crate::engagement::rewards::{RewardEngine, RewardTable};
use crate::engagement::service::EngagementService;

pub(super) fn actor() -> ActorId {
    ActorId("supporter-417".to_string())
}

pub(super) fn check_in(
    id: &str,
    venue: CheckInVenue,
    photo: bool,
    comment: bool,
) -> Action {
    Action {
        id: ActionId(id.to_string()),
        actor: actor(),
        kind: ActionKind::CheckIn {
            venue,
            attachments: Attachments {
                photo_url: photo.then(|| "https://cdn.example/match-day.jpg".to_string()),
                comment: comment.then(|| "What a goal!".to_string()),
            },
        },
        occurred_at: Utc.with_ymd_and_hms(2025, 11, 2, 15, 30, 0).single().expect("valid"),
    }
}

pub(super) fn event_registration(id: &str) -> Action {
    Action {
        id: ActionId(id.to_string()),
        actor: actor(),
        kind: ActionKind::EventRegistration {
            event_id: "derby-watch-party".to_string(),
        },
        occurred_at: Utc.with_ymd_and_hms(2025, 11, 2, 12, 0, 0).single().expect("valid"),
    }
}

pub(super) fn badge_tick(id: &str, trackable: &str) -> Action {
    Action {
        id: ActionId(id.to_string()),
        actor: actor(),
        kind: ActionKind::BadgeProgress {
            trackable: TrackableId(trackable.to_string()),
        },
        occurred_at: Utc.with_ymd_and_hms(2025, 11, 2, 16, 0, 0).single().expect("valid"),
    }
}

pub(super) fn task_tick(id: &str, trackable: &str) -> Action {
    Action {
        id: ActionId(id.to_string()),
        actor: actor(),
        kind: ActionKind::TaskProgress {
            trackable: TrackableId(trackable.to_string()),
        },
        occurred_at: Utc.with_ymd_and_hms(2025, 11, 2, 16, 5, 0).single().expect("valid"),
    }
}

pub(super) fn max(value: u32) -> NonZeroU32 {
    NonZeroU32::new(value).expect("non-zero max")
}

pub(super) fn badge(id: &str, max_progress: u32, tokens: u32, experience: u32) -> Trackable {
    Trackable {
        id: TrackableId(id.to_string()),
        kind: TrackableKind::Badge {
            rarity: BadgeRarity::Rare,
        },
        name: "Away Days Collector".to_string(),
        max_progress: max(max_progress),
        reward: TrackableReward {
            tokens,
            experience,
            reputation: 0,
        },
    }
}

pub(super) fn task(id: &str, max_progress: u32, reward: TrackableReward) -> Trackable {
    Trackable {
        id: TrackableId(id.to_string()),
        kind: TrackableKind::Task {
            difficulty: TaskDifficulty::Medium,
        },
        name: "Share five match predictions".to_string(),
        max_progress: max(max_progress),
        reward,
    }
}

pub(super) fn reward_engine() -> RewardEngine {
    RewardEngine::new(RewardTable::default())
}

pub(super) fn build_service() -> (
    EngagementService<MemoryLedger, MemoryNotifier>,
    Arc<MemoryLedger>,
    Arc<MemoryNotifier>,
) {
    let ledger = Arc::new(MemoryLedger::default());
    let notifier = Arc::new(MemoryNotifier::default());
    let service = EngagementService::new(ledger.clone(), notifier.clone(), RewardTable::default());
    (service, ledger, notifier)
}

/// Running balances per actor, as a stand-in for the persistence layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(super) struct Balance {
    pub(super) tokens: u64,
    pub(super) experience: u64,
    pub(super) reputation: u64,
}

#[derive(Default)]
pub(super) struct MemoryLedger {
    balances: Mutex<BTreeMap<ActorId, Balance>>,
    applied: Mutex<HashSet<String>>,
    progress: Mutex<HashMap<(ActorId, TrackableId), ProgressState>>,
    entries: Mutex<Vec<LedgerEntry>>,
}

impl MemoryLedger {
    pub(super) fn balance(&self, actor: &ActorId) -> Balance {
        self.balances
            .lock()
            .expect("balance mutex poisoned")
            .get(actor)
            .copied()
            .unwrap_or_default()
    }

    pub(super) fn entries(&self) -> Vec<LedgerEntry> {
        self.entries.lock().expect("entry mutex poisoned").clone()
    }
}

impl LedgerWriter for MemoryLedger {
    fn credit(&self, entry: LedgerEntry) -> Result<(), LedgerError> {
        let mut applied = self.applied.lock().expect("applied mutex poisoned");
        if !applied.insert(entry.entry_id.clone()) {
            return Err(LedgerError::DuplicateEntry);
        }

        let mut balances = self.balances.lock().expect("balance mutex poisoned");
        let balance = balances.entry(entry.actor.clone()).or_default();
        balance.tokens += u64::from(entry.tokens);
        balance.experience += u64::from(entry.experience);
        balance.reputation += u64::from(entry.reputation);

        self.entries
            .lock()
            .expect("entry mutex poisoned")
            .push(entry);
        Ok(())
    }

    fn load_progress(
        &self,
        actor: &ActorId,
        trackable: &TrackableId,
    ) -> Result<Option<ProgressState>, LedgerError> {
        let guard = self.progress.lock().expect("progress mutex poisoned");
        Ok(guard.get(&(actor.clone(), trackable.clone())).copied())
    }

    fn store_progress(
        &self,
        actor: &ActorId,
        trackable: &TrackableId,
        state: ProgressState,
    ) -> Result<(), LedgerError> {
        let mut guard = self.progress.lock().expect("progress mutex poisoned");
        guard.insert((actor.clone(), trackable.clone()), state);
        Ok(())
    }
}

#[derive(Default)]
pub(super) struct MemoryNotifier {
    alerts: Mutex<Vec<EngagementAlert>>,
}

impl MemoryNotifier {
    pub(super) fn alerts(&self) -> Vec<EngagementAlert> {
        self.alerts.lock().expect("alert mutex poisoned").clone()
    }
}

impl NotificationPublisher for MemoryNotifier {
    fn publish(&self, alert: EngagementAlert) -> Result<(), AlertError> {
        self.alerts
            .lock()
            .expect("alert mutex poisoned")
            .push(alert);
        Ok(())
    }
}

/// Ledger double whose first credit fails transiently, then behaves normally.
#[derive(Default)]
pub(super) struct FlakyCreditLedger {
    inner: MemoryLedger,
    remaining_faults: Mutex<u32>,
}

impl FlakyCreditLedger {
    pub(super) fn failing_once() -> Self {
        Self {
            inner: MemoryLedger::default(),
            remaining_faults: Mutex::new(1),
        }
    }

    pub(super) fn balance(&self, actor: &ActorId) -> Balance {
        self.inner.balance(actor)
    }
}

impl LedgerWriter for FlakyCreditLedger {
    fn credit(&self, entry: LedgerEntry) -> Result<(), LedgerError> {
        let mut faults = self.remaining_faults.lock().expect("fault mutex poisoned");
        if *faults > 0 {
            *faults -= 1;
            return Err(LedgerError::Unavailable("transient fault".to_string()));
        }
        self.inner.credit(entry)
    }

    fn load_progress(
        &self,
        actor: &ActorId,
        trackable: &TrackableId,
    ) -> Result<Option<ProgressState>, LedgerError> {
        self.inner.load_progress(actor, trackable)
    }

    fn store_progress(
        &self,
        actor: &ActorId,
        trackable: &TrackableId,
        state: ProgressState,
    ) -> Result<(), LedgerError> {
        self.inner.store_progress(actor, trackable, state)
    }
}

/// Ledger double whose first progress write fails after credits succeed.
#[derive(Default)]
pub(super) struct FlakyStoreLedger {
    inner: MemoryLedger,
    remaining_faults: Mutex<u32>,
}

impl FlakyStoreLedger {
    pub(super) fn failing_once() -> Self {
        Self {
            inner: MemoryLedger::default(),
            remaining_faults: Mutex::new(1),
        }
    }

    pub(super) fn balance(&self, actor: &ActorId) -> Balance {
        self.inner.balance(actor)
    }
}

impl LedgerWriter for FlakyStoreLedger {
    fn credit(&self, entry: LedgerEntry) -> Result<(), LedgerError> {
        self.inner.credit(entry)
    }

    fn load_progress(
        &self,
        actor: &ActorId,
        trackable: &TrackableId,
    ) -> Result<Option<ProgressState>, LedgerError> {
        self.inner.load_progress(actor, trackable)
    }

    fn store_progress(
        &self,
        actor: &ActorId,
        trackable: &TrackableId,
        state: ProgressState,
    ) -> Result<(), LedgerError> {
        let mut faults = self.remaining_faults.lock().expect("fault mutex poisoned");
        if *faults > 0 {
            *faults -= 1;
            return Err(LedgerError::Unavailable("transient fault".to_string()));
        }
        self.inner.store_progress(actor, trackable, state)
    }
}

/// Ledger double whose writes always fail, for error-path coverage.
pub(super) struct UnavailableLedger;

impl LedgerWriter for UnavailableLedger {
    fn credit(&self, _entry: LedgerEntry) -> Result<(), LedgerError> {
        Err(LedgerError::Unavailable("maintenance window".to_string()))
    }

    fn load_progress(
        &self,
        _actor: &ActorId,
        _trackable: &TrackableId,
    ) -> Result<Option<ProgressState>, LedgerError> {
        Ok(None)
    }

    fn store_progress(
        &self,
        _actor: &ActorId,
        _trackable: &TrackableId,
        _state: ProgressState,
    ) -> Result<(), LedgerError> {
        Err(LedgerError::Unavailable("maintenance window".to_string()))
    }
}
