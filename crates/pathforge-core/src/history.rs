//! Streak and history tracking.
//!
//! Rolling completion counters (weekday / day-of-month / month-of-year),
//! account-level consecutive-day streaks, trailing-week XP, and recorded
//! failure reasons. The engine drives all mutation; everything here is
//! plain bookkeeping with the calendar date injected by the caller.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::ValidationError;

/// Self-reported reason for a lapse, captured by the momentum check.
/// Stored as inert telemetry; nothing feeds it back into generation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FailureReason {
    /// Not enough time available
    Time,
    /// Lost motivation
    Motivation,
    /// Got distracted
    Distraction,
    /// Felt overwhelmed
    Overwhelmed,
}

impl FailureReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureReason::Time => "time",
            FailureReason::Motivation => "motivation",
            FailureReason::Distraction => "distraction",
            FailureReason::Overwhelmed => "overwhelmed",
        }
    }
}

impl std::str::FromStr for FailureReason {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "time" => Ok(FailureReason::Time),
            "motivation" => Ok(FailureReason::Motivation),
            "distraction" => Ok(FailureReason::Distraction),
            "overwhelmed" => Ok(FailureReason::Overwhelmed),
            other => Err(ValidationError::InvalidValue {
                field: "reason".into(),
                message: format!("unknown failure reason '{other}'"),
            }),
        }
    }
}

/// A recorded failure reason with the date it was captured.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FailureRecord {
    pub reason: FailureReason,
    pub recorded_on: NaiveDate,
}

/// History buckets and streak state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct History {
    /// Completions per weekday, Sunday-first to match the report view.
    pub weekly: [u32; 7],
    /// Completions per day-of-month (1-indexed day stored at index day-1).
    pub monthly: [u32; 31],
    /// Completions per month-of-year.
    pub yearly: [u32; 12],
    /// Most recent day on which at least one protocol was completed.
    pub last_completed_date: Option<NaiveDate>,
    /// Count of consecutive calendar days with at least one completion.
    pub consecutive_days: u32,
    /// XP awarded per day, trimmed to the trailing week on each touch.
    #[serde(default)]
    pub xp_by_day: BTreeMap<NaiveDate, i64>,
    #[serde(default)]
    pub failure_reasons: Vec<FailureRecord>,
}

impl Default for History {
    fn default() -> Self {
        Self {
            weekly: [0; 7],
            monthly: [0; 31],
            yearly: [0; 12],
            last_completed_date: None,
            consecutive_days: 0,
            xp_by_day: BTreeMap::new(),
            failure_reasons: Vec::new(),
        }
    }
}

/// Sunday-first weekday index, matching the weekly report ordering.
fn weekday_index(date: NaiveDate) -> usize {
    date.weekday().num_days_from_sunday() as usize
}

impl History {
    /// Record one completion on `date` worth `awarded_xp`.
    pub fn record_completion(&mut self, date: NaiveDate, awarded_xp: i64) {
        self.weekly[weekday_index(date)] += 1;
        self.monthly[date.day0() as usize] += 1;
        self.yearly[date.month0() as usize] += 1;
        *self.xp_by_day.entry(date).or_insert(0) += awarded_xp;
        self.trim_xp_window(date);
    }

    /// Reverse one completion on `date` (undo path). Saturating so a stale
    /// snapshot can never underflow the buckets.
    pub fn unrecord_completion(&mut self, date: NaiveDate, awarded_xp: i64) {
        let w = weekday_index(date);
        self.weekly[w] = self.weekly[w].saturating_sub(1);
        let d = date.day0() as usize;
        self.monthly[d] = self.monthly[d].saturating_sub(1);
        let m = date.month0() as usize;
        self.yearly[m] = self.yearly[m].saturating_sub(1);
        if let Some(xp) = self.xp_by_day.get_mut(&date) {
            *xp -= awarded_xp;
            if *xp <= 0 {
                self.xp_by_day.remove(&date);
            }
        }
    }

    /// XP earned in the trailing 7-day window ending at `today`.
    pub fn weekly_xp_gain(&self, today: NaiveDate) -> i64 {
        let cutoff = today - chrono::Days::new(6);
        self.xp_by_day
            .iter()
            .filter(|(d, _)| **d >= cutoff && **d <= today)
            .map(|(_, xp)| *xp)
            .sum()
    }

    fn trim_xp_window(&mut self, today: NaiveDate) {
        let cutoff = today - chrono::Days::new(6);
        self.xp_by_day.retain(|d, _| *d >= cutoff);
    }

    /// Total completions in each report bucket.
    pub fn weekly_total(&self) -> u32 {
        self.weekly.iter().sum()
    }

    pub fn monthly_total(&self) -> u32 {
        self.monthly.iter().sum()
    }

    pub fn yearly_total(&self) -> u32 {
        self.yearly.iter().sum()
    }

    /// Whether the dashboard should trigger the momentum check: a gap of two
    /// or more days since the last completion, post-setup.
    pub fn needs_momentum_check(&self, today: NaiveDate) -> bool {
        match self.last_completed_date {
            Some(last) => (today - last).num_days() >= 2,
            None => false,
        }
    }

    pub fn record_failure(&mut self, reason: FailureReason, today: NaiveDate) {
        self.failure_reasons.push(FailureRecord {
            reason,
            recorded_on: today,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn record_bumps_all_three_buckets() {
        let mut h = History::default();
        // 2026-08-26 is a Wednesday.
        let d = date(2026, 8, 26);
        h.record_completion(d, 10);
        assert_eq!(h.weekly[3], 1);
        assert_eq!(h.monthly[25], 1);
        assert_eq!(h.yearly[7], 1);
        assert_eq!(h.weekly_total(), 1);
    }

    #[test]
    fn unrecord_is_symmetric() {
        let mut h = History::default();
        let d = date(2026, 8, 26);
        h.record_completion(d, 10);
        h.unrecord_completion(d, 10);
        assert_eq!(h, History::default());
    }

    #[test]
    fn unrecord_saturates_at_zero() {
        let mut h = History::default();
        h.unrecord_completion(date(2026, 8, 26), 10);
        assert_eq!(h.weekly_total(), 0);
    }

    #[test]
    fn weekly_xp_gain_covers_trailing_window_only() {
        let mut h = History::default();
        h.record_completion(date(2026, 8, 20), 10);
        h.record_completion(date(2026, 8, 26), 15);
        // Aug 20 is exactly 6 days before Aug 26, so still inside.
        assert_eq!(h.weekly_xp_gain(date(2026, 8, 26)), 25);
        // A day later the old entry falls out.
        assert_eq!(h.weekly_xp_gain(date(2026, 8, 27)), 15);
    }

    #[test]
    fn momentum_check_requires_two_day_gap() {
        let mut h = History::default();
        assert!(!h.needs_momentum_check(date(2026, 8, 26)));
        h.last_completed_date = Some(date(2026, 8, 25));
        assert!(!h.needs_momentum_check(date(2026, 8, 26)));
        h.last_completed_date = Some(date(2026, 8, 24));
        assert!(h.needs_momentum_check(date(2026, 8, 26)));
    }

    #[test]
    fn failure_reasons_accumulate() {
        let mut h = History::default();
        h.record_failure(FailureReason::Time, date(2026, 8, 26));
        h.record_failure(FailureReason::Distraction, date(2026, 8, 27));
        assert_eq!(h.failure_reasons.len(), 2);
        assert_eq!(h.failure_reasons[0].reason, FailureReason::Time);
    }
}
