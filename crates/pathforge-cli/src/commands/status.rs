//! Progression dashboard command.

use pathforge_core::progression::phase_name;
use pathforge_core::strength::strength_tier;

use crate::common;

pub fn run(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let (_db, engine) = common::open()?;
    let today = common::today();
    let state = engine.state();

    if json {
        println!("{}", serde_json::to_string_pretty(state)?);
        return Ok(());
    }

    match (&state.profile, state.identity) {
        (Some(profile), Some(path)) => {
            println!("{} | {}", profile.name, path.title());
        }
        _ => println!("Onboarding incomplete: run `pathforge-cli onboard`"),
    }

    let p = engine.progression();
    println!(
        "Level {} | Phase {} ({}) | {} XP total",
        p.level,
        p.phase,
        phase_name(p.phase),
        p.total_xp
    );
    println!("XP to next level: {}", p.xp_to_next_level);
    if let Some(xp) = p.xp_to_next_phase {
        println!("XP to next phase: {xp}");
    }

    let history = &state.history;
    println!(
        "Streak: {} days | Weekly XP: {} | Identity strength: {}% ({})",
        history.consecutive_days,
        history.weekly_xp_gain(today),
        state.identity_strength,
        strength_tier(state.identity_strength)
    );
    println!(
        "Premium: {} | Theme: {}",
        if engine.is_premium(today) { "yes" } else { "no" },
        state.theme.as_str()
    );

    let done = state.protocols.iter().filter(|p| p.completed).count();
    println!(
        "Protocols: {done}/{} completed today | best protocol streak: {}",
        state.protocols.len(),
        engine.best_streak()
    );
    if engine.mission_intent_pending(today) {
        println!("Mission intent not set yet today");
    }
    if engine.needs_momentum_check(today) {
        println!("Momentum check due");
    }
    Ok(())
}
