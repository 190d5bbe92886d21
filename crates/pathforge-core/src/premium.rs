//! Premium unlock evaluation, trial, and streak protection.
//!
//! Unlock flags are sticky: once a threshold check has flipped one to true,
//! no later mutation (including an XP-reverting undo) sets it back. Trial
//! expiry lapses only the trial grant itself.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Trial length granted at level 7.
pub const TRIAL_DAYS: u64 = 60;

/// Level gate for starting the trial.
pub const TRIAL_LEVEL_GATE: u32 = 7;

/// Consecutive-day streak that unlocks premium.
pub const STREAK_UNLOCK_DAYS: u32 = 7;

/// ISO week key used for the once-per-week streak protection rule.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct WeekKey {
    pub year: i32,
    pub week: u32,
}

impl WeekKey {
    pub fn of(date: NaiveDate) -> Self {
        let iso = date.iso_week();
        WeekKey {
            year: iso.year(),
            week: iso.week(),
        }
    }
}

/// Premium entitlement state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct PremiumState {
    /// End of the 60-day trial, if one was ever started.
    pub trial_end_date: Option<NaiveDate>,
    pub unlocked_by_streak: bool,
    pub unlocked_by_level10: bool,
    pub unlocked_by_level100: bool,
    /// ISO week in which streak protection was last armed. Blocks re-arming
    /// within the same week whether or not the charge was consumed.
    pub protection_week: Option<WeekKey>,
    /// Whether the armed protection still has its one-miss charge.
    pub protection_available: bool,
}

impl PremiumState {
    /// Whether any premium grant is currently active.
    pub fn is_premium(&self, today: NaiveDate) -> bool {
        self.unlocked_by_streak
            || self.unlocked_by_level10
            || self.unlocked_by_level100
            || self.trial_active(today)
    }

    pub fn trial_active(&self, today: NaiveDate) -> bool {
        self.trial_end_date.is_some_and(|end| end >= today)
    }

    /// Threshold checks run after every mutation that can change
    /// `consecutive_days` or `level`. Returns the flags that newly flipped.
    pub fn evaluate(&mut self, consecutive_days: u32, level: u32) -> Vec<&'static str> {
        let mut flipped = Vec::new();
        if !self.unlocked_by_streak && consecutive_days >= STREAK_UNLOCK_DAYS {
            self.unlocked_by_streak = true;
            flipped.push("streak");
        }
        if !self.unlocked_by_level10 && level >= 10 {
            self.unlocked_by_level10 = true;
            flipped.push("level10");
        }
        if !self.unlocked_by_level100 && level >= 100 {
            self.unlocked_by_level100 = true;
            flipped.push("level100");
        }
        flipped
    }

    /// Start the trial. Gated by `level >= 7`; a no-op while a trial is
    /// already running (never extends or stacks).
    pub fn start_trial(&mut self, level: u32, today: NaiveDate) -> bool {
        if level < TRIAL_LEVEL_GATE || self.trial_active(today) {
            return false;
        }
        self.trial_end_date = Some(today + chrono::Days::new(TRIAL_DAYS));
        true
    }

    /// Arm streak protection for this ISO week. Succeeds at most once per
    /// week and only while premium.
    pub fn arm_protection(&mut self, today: NaiveDate) -> bool {
        if !self.is_premium(today) {
            return false;
        }
        let week = WeekKey::of(today);
        if self.protection_week == Some(week) {
            return false;
        }
        self.protection_week = Some(week);
        self.protection_available = true;
        true
    }

    /// Consume the armed charge to absorb a missed day inside `week`.
    /// Returns false when no charge applies.
    pub fn consume_protection(&mut self, week: WeekKey) -> bool {
        if self.protection_available && self.protection_week == Some(week) {
            self.protection_available = false;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn evaluate_flips_flags_at_thresholds() {
        let mut p = PremiumState::default();
        assert!(p.evaluate(6, 9).is_empty());
        let flipped = p.evaluate(7, 10);
        assert!(flipped.contains(&"streak"));
        assert!(flipped.contains(&"level10"));
        assert!(!p.unlocked_by_level100);

        let flipped = p.evaluate(0, 100);
        assert_eq!(flipped, vec!["level100"]);
        assert!(p.unlocked_by_level100);
        // Sticky once flipped, and no re-announcement.
        assert!(p.evaluate(0, 1).is_empty());
        assert!(p.unlocked_by_level100);
    }

    #[test]
    fn flags_stay_true_after_values_drop() {
        let mut p = PremiumState::default();
        p.evaluate(7, 1);
        assert!(p.unlocked_by_streak);
        p.evaluate(0, 1);
        assert!(p.unlocked_by_streak);
    }

    #[test]
    fn trial_requires_level_seven() {
        let mut p = PremiumState::default();
        let today = date(2026, 8, 26);
        assert!(!p.start_trial(6, today));
        assert!(!p.is_premium(today));
        assert!(p.start_trial(7, today));
        assert_eq!(p.trial_end_date, Some(date(2026, 10, 25)));
        assert!(p.is_premium(today));
    }

    #[test]
    fn trial_does_not_stack() {
        let mut p = PremiumState::default();
        let today = date(2026, 8, 26);
        assert!(p.start_trial(10, today));
        let end = p.trial_end_date;
        assert!(!p.start_trial(10, today + chrono::Days::new(5)));
        assert_eq!(p.trial_end_date, end);
    }

    #[test]
    fn trial_expiry_keeps_unlock_flags() {
        let mut p = PremiumState::default();
        p.start_trial(7, date(2026, 1, 1));
        p.evaluate(7, 1);
        let after_expiry = date(2026, 6, 1);
        assert!(!p.trial_active(after_expiry));
        assert!(p.unlocked_by_streak);
        assert!(p.is_premium(after_expiry));
    }

    #[test]
    fn protection_arms_once_per_iso_week() {
        let mut p = PremiumState::default();
        p.unlocked_by_level10 = true;
        let mon = date(2026, 8, 24);
        assert!(p.arm_protection(mon));
        // Same ISO week, different day.
        assert!(!p.arm_protection(date(2026, 8, 28)));
        // Next week is fine again.
        assert!(p.arm_protection(date(2026, 8, 31)));
    }

    #[test]
    fn protection_requires_premium() {
        let mut p = PremiumState::default();
        assert!(!p.arm_protection(date(2026, 8, 24)));
    }

    #[test]
    fn protection_charge_consumes_once() {
        let mut p = PremiumState::default();
        p.unlocked_by_level10 = true;
        let day = date(2026, 8, 24);
        assert!(p.arm_protection(day));
        let week = WeekKey::of(day);
        assert!(p.consume_protection(week));
        assert!(!p.consume_protection(week));
        // Consumed charge still blocks re-arming the same week.
        assert!(!p.arm_protection(day));
    }
}
