//! Identity strength meter.
//!
//! A [0,100] score blending today's completion rate with streak
//! consistency. Pure and repeatable over the current registry and streak
//! state, so views can recompute it on every render; the engine caches the
//! last value purely for display.

use crate::protocol::Protocol;

/// Streak length at which the consistency contribution saturates.
pub const STREAK_CEILING: u32 = 30;

/// Weight of the completion-rate component; the remainder is streak
/// consistency.
const COMPLETION_WEIGHT: f64 = 0.6;

/// Compute the identity strength score.
///
/// `completion rate = completed / total` over today's protocols (0 when the
/// registry is empty), `consistency = min(consecutive_days, 30) / 30`.
pub fn identity_strength(protocols: &[Protocol], consecutive_days: u32) -> u8 {
    let completion_rate = if protocols.is_empty() {
        0.0
    } else {
        let completed = protocols.iter().filter(|p| p.completed).count();
        completed as f64 / protocols.len() as f64
    };
    let consistency = consecutive_days.min(STREAK_CEILING) as f64 / STREAK_CEILING as f64;

    let score = (completion_rate * COMPLETION_WEIGHT + consistency * (1.0 - COMPLETION_WEIGHT))
        * 100.0;
    score.round().clamp(0.0, 100.0) as u8
}

/// Tier label shown next to the meter.
pub fn strength_tier(score: u8) -> &'static str {
    match score {
        80..=100 => "Unstoppable",
        60..=79 => "Strong",
        40..=59 => "Building",
        _ => "Emerging",
    }
}
