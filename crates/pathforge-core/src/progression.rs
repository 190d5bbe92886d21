//! Level and phase derivation from cumulative XP.
//!
//! Both values are pure functions of `total_xp` and are recomputed on
//! demand; nothing here is stored, so the derived display can never desync
//! from the source field.

use serde::{Deserialize, Serialize};

/// XP required per level.
pub const XP_PER_LEVEL: u64 = 50;

/// Narrative phase names, 1-indexed.
pub const PHASE_NAMES: [&str; 5] = ["Awareness", "Discipline", "Momentum", "Mastery", "Ascension"];

/// Cumulative XP required to *enter* each phase. Phase 1 starts at 0;
/// phase 5 is terminal.
pub const PHASE_THRESHOLDS: [u64; 5] = [0, 250, 750, 1750, 3500];

/// Derived progression snapshot.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Progression {
    pub total_xp: u64,
    pub level: u32,
    /// 1..=5
    pub phase: u8,
    /// XP still needed to reach the next level.
    pub xp_to_next_level: u64,
    /// Cumulative XP threshold of the next phase; None once phase 5 is
    /// reached.
    pub xp_to_next_phase: Option<u64>,
}

/// Level for a cumulative XP total: `floor(xp / 50) + 1`.
pub fn level_for_xp(total_xp: u64) -> u32 {
    (total_xp / XP_PER_LEVEL) as u32 + 1
}

/// Phase (1..=5) for a cumulative XP total. Never decreases because
/// `total_xp` never decreases under normal play, and thresholds are fixed.
pub fn phase_for_xp(total_xp: u64) -> u8 {
    let mut phase = 1u8;
    for (i, threshold) in PHASE_THRESHOLDS.iter().enumerate() {
        if total_xp >= *threshold {
            phase = (i + 1) as u8;
        }
    }
    phase
}

/// Display name for a phase; falls back to a numbered label out of range.
pub fn phase_name(phase: u8) -> String {
    PHASE_NAMES
        .get(phase.saturating_sub(1) as usize)
        .map(|s| (*s).to_string())
        .unwrap_or_else(|| format!("Phase {phase}"))
}

impl Progression {
    /// Derive the full snapshot for a cumulative XP total.
    pub fn for_xp(total_xp: u64) -> Self {
        let phase = phase_for_xp(total_xp);
        let xp_to_next_phase = PHASE_THRESHOLDS.get(phase as usize).copied();
        Progression {
            total_xp,
            level: level_for_xp(total_xp),
            phase,
            xp_to_next_level: XP_PER_LEVEL - (total_xp % XP_PER_LEVEL),
            xp_to_next_phase,
        }
    }

    /// Progress within the current level as `(earned, needed)`.
    pub fn level_progress(&self) -> (u64, u64) {
        (self.total_xp % XP_PER_LEVEL, XP_PER_LEVEL)
    }

    pub fn phase_name(&self) -> String {
        phase_name(self.phase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn level_is_one_based() {
        assert_eq!(level_for_xp(0), 1);
        assert_eq!(level_for_xp(49), 1);
        assert_eq!(level_for_xp(50), 2);
        assert_eq!(level_for_xp(499), 10);
        assert_eq!(level_for_xp(500), 11);
    }

    #[test]
    fn phase_ladder_boundaries() {
        assert_eq!(phase_for_xp(0), 1);
        assert_eq!(phase_for_xp(249), 1);
        assert_eq!(phase_for_xp(250), 2);
        assert_eq!(phase_for_xp(750), 3);
        assert_eq!(phase_for_xp(1750), 4);
        assert_eq!(phase_for_xp(3499), 4);
        assert_eq!(phase_for_xp(3500), 5);
        assert_eq!(phase_for_xp(1_000_000), 5);
    }

    #[test]
    fn terminal_phase_has_no_next_threshold() {
        assert!(Progression::for_xp(3500).xp_to_next_phase.is_none());
        assert_eq!(Progression::for_xp(0).xp_to_next_phase, Some(250));
    }

    #[test]
    fn phase_names_resolve() {
        assert_eq!(phase_name(1), "Awareness");
        assert_eq!(phase_name(5), "Ascension");
        assert_eq!(phase_name(9), "Phase 9");
    }

    proptest! {
        #[test]
        fn level_and_phase_are_monotonic(xp in 0u64..100_000, delta in 0u64..10_000) {
            prop_assert!(level_for_xp(xp + delta) >= level_for_xp(xp));
            prop_assert!(phase_for_xp(xp + delta) >= phase_for_xp(xp));
        }

        #[test]
        fn level_progress_is_bounded(xp in 0u64..100_000) {
            let (earned, needed) = Progression::for_xp(xp).level_progress();
            prop_assert!(earned < needed);
        }
    }
}
