//! Read-only reminder scan.
//!
//! The binding polls once a minute with the current local time and the
//! protocol registry; the scan decides which reminder notifications are due
//! at that exact minute. Nothing here mutates state or keeps a schedule; a
//! minute either matches or it does not, so a poll loop never double-fires.

use serde::{Deserialize, Serialize};

use crate::protocol::{NotificationSettings, Protocol};
use crate::settings::CustomSettings;

/// Why a reminder fired for this minute.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FireKind {
    /// `reminder_minutes` before the scheduled time.
    Lead,
    /// At the scheduled time itself.
    Start,
}

/// A notification due at the scanned minute.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReminderFire {
    pub protocol_id: String,
    pub protocol_name: String,
    pub kind: FireKind,
    pub vibrate: bool,
    pub sound: bool,
    /// Count of incomplete protocols, present when the protocol opted into
    /// the tasks-left suffix.
    pub tasks_left: Option<usize>,
}

/// Minutes since midnight for an "HH:MM" string; `None` for anything else.
fn parse_minute(s: &str) -> Option<u32> {
    let (h, m) = s.split_once(':')?;
    let h: u32 = h.parse().ok()?;
    let m: u32 = m.parse().ok()?;
    if h > 23 || m > 59 {
        return None;
    }
    Some(h * 60 + m)
}

/// Scan the registry for reminders due at `now` ("HH:MM", local).
///
/// Fires only for incomplete protocols with `remind` set and a parseable
/// schedule, and only while notifications are enabled globally. The lead
/// fire lands `reminder_minutes` before the schedule, wrapping across
/// midnight; a zero lead time collapses both fires into one.
pub fn scan_reminders(
    protocols: &[Protocol],
    settings: &CustomSettings,
    now: &str,
) -> Vec<ReminderFire> {
    if !settings.enable_notifications {
        return Vec::new();
    }
    let Some(now_min) = parse_minute(now) else {
        return Vec::new();
    };

    let incomplete = protocols.iter().filter(|p| !p.completed).count();
    let mut fires = Vec::new();

    for p in protocols {
        if p.completed || !p.remind {
            continue;
        }
        let Some(at) = p.scheduled_time.as_deref().and_then(parse_minute) else {
            continue;
        };
        let prefs = p
            .notification_settings
            .clone()
            .unwrap_or_else(NotificationSettings::default);
        let lead = (at + 24 * 60 - (prefs.reminder_minutes % (24 * 60))) % (24 * 60);

        let kind = if now_min == at {
            Some(FireKind::Start)
        } else if now_min == lead {
            Some(FireKind::Lead)
        } else {
            None
        };
        let Some(kind) = kind else { continue };

        fires.push(ReminderFire {
            protocol_id: p.id.clone(),
            protocol_name: p.name.clone(),
            kind,
            vibrate: prefs.enable_vibration,
            sound: prefs.enable_sound,
            tasks_left: prefs.notify_if_tasks_left.then_some(incomplete),
        });
    }

    fires
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::IdentityPath;
    use crate::protocol::{NewProtocol, TaskType};

    fn reminded(name: &str, at: &str, prefs: NotificationSettings) -> Protocol {
        Protocol::from_new(
            NewProtocol::new(name, TaskType::Habit, 10).with_reminder(at, prefs),
            IdentityPath::Discipline,
        )
    }

    #[test]
    fn fires_lead_and_start_minutes_only() {
        let prefs = NotificationSettings {
            reminder_minutes: 15,
            ..Default::default()
        };
        let protocols = vec![reminded("Evening Review", "21:00", prefs)];
        let settings = CustomSettings::default();

        assert_eq!(scan_reminders(&protocols, &settings, "20:44").len(), 0);
        let lead = scan_reminders(&protocols, &settings, "20:45");
        assert_eq!(lead.len(), 1);
        assert_eq!(lead[0].kind, FireKind::Lead);
        let start = scan_reminders(&protocols, &settings, "21:00");
        assert_eq!(start.len(), 1);
        assert_eq!(start[0].kind, FireKind::Start);
        assert_eq!(scan_reminders(&protocols, &settings, "21:01").len(), 0);
    }

    #[test]
    fn lead_wraps_across_midnight() {
        let prefs = NotificationSettings {
            reminder_minutes: 30,
            ..Default::default()
        };
        let protocols = vec![reminded("Early Run", "00:10", prefs)];
        let settings = CustomSettings::default();

        let lead = scan_reminders(&protocols, &settings, "23:40");
        assert_eq!(lead.len(), 1);
        assert_eq!(lead[0].kind, FireKind::Lead);
    }

    #[test]
    fn completed_and_silent_protocols_do_not_fire() {
        let mut p = reminded("Done Task", "09:00", NotificationSettings::default());
        p.completed = true;
        let quiet = Protocol::from_new(
            NewProtocol::new("No Reminder", TaskType::Admin, 5),
            IdentityPath::Discipline,
        );
        let settings = CustomSettings::default();
        assert!(scan_reminders(&[p, quiet], &settings, "09:00").is_empty());
    }

    #[test]
    fn global_notifications_toggle_silences_everything() {
        let protocols = vec![reminded("Task", "09:00", NotificationSettings::default())];
        let mut settings = CustomSettings::default();
        settings.enable_notifications = false;
        assert!(scan_reminders(&protocols, &settings, "09:00").is_empty());
    }

    #[test]
    fn tasks_left_counts_incomplete_protocols() {
        let protocols = vec![
            reminded("Task A", "09:00", NotificationSettings::default()),
            Protocol::from_new(
                NewProtocol::new("Task B", TaskType::Habit, 5),
                IdentityPath::Discipline,
            ),
        ];
        let settings = CustomSettings::default();
        let fires = scan_reminders(&protocols, &settings, "09:00");
        assert_eq!(fires[0].tasks_left, Some(2));
    }

    #[test]
    fn malformed_times_are_ignored() {
        let mut p = reminded("Odd", "25:99", NotificationSettings::default());
        assert!(scan_reminders(
            &[p.clone()],
            &CustomSettings::default(),
            "09:00"
        )
        .is_empty());
        p.scheduled_time = Some("soon".into());
        assert!(scan_reminders(&[p], &CustomSettings::default(), "not-a-time").is_empty());
    }
}
