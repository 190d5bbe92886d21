//! State-change events.
//!
//! Every mutating engine call returns the events it produced. Bindings use
//! them for feedback (haptics, sounds, celebration dialogs) without
//! re-diffing the snapshot.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::generator::MissionIntent;
use crate::history::FailureReason;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum Event {
    ProtocolAdded {
        id: String,
        name: String,
    },
    ProtocolRemoved {
        id: String,
    },
    ProtocolCompleted {
        id: String,
        awarded_xp: i64,
        streak: u32,
        on: NaiveDate,
    },
    /// Completion undone; all derived state reverted.
    ProtocolReopened {
        id: String,
        reverted_xp: i64,
    },
    LevelUp {
        from: u32,
        to: u32,
    },
    PhaseAdvanced {
        from: u8,
        to: u8,
    },
    /// A premium unlock flag flipped true (sticky from here on).
    PremiumUnlocked {
        source: String,
    },
    TrialStarted {
        ends_on: NaiveDate,
    },
    StreakProtectionArmed {
        on: NaiveDate,
    },
    /// An armed protection charge absorbed a missed day.
    StreakProtectionConsumed {
        on: NaiveDate,
    },
    StreakBroken {
        was: u32,
        on: NaiveDate,
    },
    TasksGenerated {
        count: usize,
        intent: MissionIntent,
        on: NaiveDate,
    },
    MissionIntentSet {
        intent: MissionIntent,
        on: NaiveDate,
    },
    FailureRecorded {
        reason: FailureReason,
        on: NaiveDate,
    },
    DayRolled {
        on: NaiveDate,
    },
    DataWiped,
}
