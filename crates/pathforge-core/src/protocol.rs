//! Protocol (task instance) types.
//!
//! A protocol is a single habit/task for a day. Protocols are created by the
//! daily generator or explicitly by the user; `completed` flips only through
//! the engine's toggle, and `streak` moves only through the daily-completion
//! rule, never by direct assignment.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::identity::IdentityPath;

/// Closed set of task flavors across all identity paths.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    Lesson,
    Practice,
    Revision,
    Test,
    Recall,
    Workout,
    Cardio,
    Rest,
    Deepwork,
    Admin,
    Planning,
    Reflection,
    Habit,
}

impl TaskType {
    /// Display label with the emoji used across the UI surface.
    pub fn label(&self) -> &'static str {
        match self {
            TaskType::Lesson => "📚 Lesson",
            TaskType::Practice => "✏️ Practice",
            TaskType::Revision => "🔄 Revision",
            TaskType::Test => "🧪 Test",
            TaskType::Recall => "🧠 Recall",
            TaskType::Workout => "💪 Workout",
            TaskType::Cardio => "🏃 Cardio",
            TaskType::Rest => "🌳 Rest Day",
            TaskType::Deepwork => "🎯 Deep Work",
            TaskType::Admin => "📋 Admin",
            TaskType::Planning => "🗺️ Planning",
            TaskType::Reflection => "💭 Reflection",
            TaskType::Habit => "⭐ Habit",
        }
    }
}

impl std::str::FromStr for TaskType {
    type Err = crate::error::ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_value(serde_json::Value::String(s.to_ascii_lowercase())).map_err(|_| {
            crate::error::ValidationError::InvalidValue {
                field: "task_type".into(),
                message: format!("unknown task type '{s}'"),
            }
        })
    }
}

/// Per-protocol notification preferences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotificationSettings {
    #[serde(default = "default_true")]
    pub enable_vibration: bool,
    #[serde(default = "default_true")]
    pub enable_sound: bool,
    /// Append the remaining-task count to the notification title.
    #[serde(default = "default_true")]
    pub notify_if_tasks_left: bool,
    /// Lead time before `scheduled_time`, in minutes.
    #[serde(default = "default_reminder_minutes")]
    pub reminder_minutes: u32,
}

fn default_true() -> bool {
    true
}
fn default_reminder_minutes() -> u32 {
    15
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            enable_vibration: true,
            enable_sound: true,
            notify_if_tasks_left: true,
            reminder_minutes: 15,
        }
    }
}

/// How a protocol came to exist.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProtocolSource {
    /// Produced by the daily generator; replaced at the next generation.
    Generated,
    /// Created explicitly by the user.
    User,
}

/// Bookkeeping captured on completion so an undo can reverse the exact
/// effects, including account-level streak state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompletionUndo {
    /// XP actually awarded (multiplier already applied).
    pub awarded_xp: i64,
    /// Protocol streak before this completion.
    pub prev_streak: u32,
    /// Protocol's previous completion date before this completion.
    pub prev_completed_on: Option<NaiveDate>,
    /// Account `consecutive_days` before this completion.
    pub prev_consecutive_days: u32,
    /// Account `last_completed_date` before this completion.
    pub prev_last_completed_date: Option<NaiveDate>,
}

/// A single task/habit instance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Protocol {
    /// Unique identifier
    pub id: String,
    pub name: String,
    /// Identity path this protocol belongs to
    pub category: IdentityPath,
    pub task_type: TaskType,
    /// Base XP; the settings multiplier is applied at award time, not here.
    pub xp: u32,
    pub completed: bool,
    /// Consecutive-day completion count; engine-managed.
    pub streak: u32,
    /// Daily protocols reset at the day boundary instead of being removed.
    pub is_daily: bool,
    /// Scheduled time as "HH:MM" (local), if a reminder is wanted.
    pub scheduled_time: Option<String>,
    pub remind: bool,
    pub notification_settings: Option<NotificationSettings>,
    #[serde(default = "default_source")]
    pub source: ProtocolSource,
    /// Most recent date this protocol was completed.
    #[serde(default)]
    pub last_completed_on: Option<NaiveDate>,
    /// Set while `completed` is true; consumed by the undo path.
    #[serde(default)]
    pub undo: Option<CompletionUndo>,
}

fn default_source() -> ProtocolSource {
    ProtocolSource::User
}

/// Input for creating a protocol through the engine.
#[derive(Debug, Clone)]
pub struct NewProtocol {
    pub name: String,
    pub task_type: TaskType,
    pub xp: u32,
    pub is_daily: bool,
    pub remind: bool,
    pub scheduled_time: Option<String>,
    pub notification_settings: Option<NotificationSettings>,
}

impl NewProtocol {
    pub fn new(name: impl Into<String>, task_type: TaskType, xp: u32) -> Self {
        Self {
            name: name.into(),
            task_type,
            xp,
            is_daily: false,
            remind: false,
            scheduled_time: None,
            notification_settings: None,
        }
    }

    pub fn daily(mut self) -> Self {
        self.is_daily = true;
        self
    }

    pub fn with_reminder(mut self, at: impl Into<String>, settings: NotificationSettings) -> Self {
        self.remind = true;
        self.scheduled_time = Some(at.into());
        self.notification_settings = Some(settings);
        self
    }
}

impl Protocol {
    /// Materialize a user-created protocol.
    pub fn from_new(spec: NewProtocol, category: IdentityPath) -> Self {
        Protocol {
            id: new_protocol_id(),
            name: spec.name,
            category,
            task_type: spec.task_type,
            xp: spec.xp,
            completed: false,
            streak: 0,
            is_daily: spec.is_daily,
            scheduled_time: spec.scheduled_time,
            remind: spec.remind,
            notification_settings: spec.notification_settings,
            source: ProtocolSource::User,
            last_completed_on: None,
            undo: None,
        }
    }
}

/// Unique id: timestamp prefix for rough ordering plus a UUID.
pub(crate) fn new_protocol_id() -> String {
    format!("proto-{}-{}", Utc::now().timestamp(), uuid::Uuid::new_v4())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_type_parses_from_lowercase() {
        let t: TaskType = "deepwork".parse().unwrap();
        assert_eq!(t, TaskType::Deepwork);
        assert!("napping".parse::<TaskType>().is_err());
    }

    #[test]
    fn new_protocol_builder_sets_reminder_fields() {
        let spec = NewProtocol::new("Morning Workout", TaskType::Workout, 15)
            .daily()
            .with_reminder("07:30", NotificationSettings::default());
        let p = Protocol::from_new(spec, IdentityPath::Warrior);
        assert!(p.is_daily);
        assert!(p.remind);
        assert_eq!(p.scheduled_time.as_deref(), Some("07:30"));
        assert!(!p.completed);
        assert_eq!(p.streak, 0);
    }

    #[test]
    fn protocol_ids_are_unique() {
        assert_ne!(new_protocol_id(), new_protocol_id());
    }
}
