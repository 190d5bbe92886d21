//! Shared helpers for CLI commands.

use chrono::{Local, NaiveDate};
use pathforge_core::{Database, Engine, Event};

/// Open the database and restore the engine from the persisted snapshot.
pub fn open() -> Result<(Database, Engine), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let engine = Engine::load_or_default(&db);
    Ok((db, engine))
}

/// Write the engine snapshot back through to the database.
pub fn save(db: &Database, engine: &Engine) -> Result<(), Box<dyn std::error::Error>> {
    engine.persist(db)?;
    Ok(())
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Current local time as "HH:MM".
pub fn now_hhmm() -> String {
    Local::now().format("%H:%M").to_string()
}

/// Print events as one human-readable line each.
pub fn print_events(events: &[Event]) {
    for event in events {
        match event {
            Event::ProtocolAdded { id, name } => println!("Protocol created: {name} ({id})"),
            Event::ProtocolRemoved { id } => println!("Protocol removed: {id}"),
            Event::ProtocolCompleted {
                awarded_xp, streak, ..
            } => println!("Completed: +{awarded_xp} XP (streak {streak})"),
            Event::ProtocolReopened { reverted_xp, .. } => {
                println!("Reopened: -{reverted_xp} XP")
            }
            Event::LevelUp { from, to } => println!("Level up! {from} -> {to}"),
            Event::PhaseAdvanced { from, to } => println!("Phase advanced: {from} -> {to}"),
            Event::PremiumUnlocked { source } => println!("Premium unlocked ({source})"),
            Event::TrialStarted { ends_on } => println!("Premium trial started, ends {ends_on}"),
            Event::StreakProtectionArmed { on } => {
                println!("Streak protection armed for the week of {on}")
            }
            Event::StreakProtectionConsumed { on } => {
                println!("Streak protection covered the missed day {on}")
            }
            Event::StreakBroken { was, on } => println!("Streak broken on {on} (was {was} days)"),
            Event::TasksGenerated { count, intent, on } => {
                println!("Generated {count} protocols for {on} ({})", intent.as_str())
            }
            Event::MissionIntentSet { intent, on } => {
                println!("Mission intent for {on}: {}", intent.as_str())
            }
            Event::FailureRecorded { reason, on } => {
                println!("Recorded failure reason '{}' on {on}", reason.as_str())
            }
            Event::DayRolled { on } => println!("Day rolled: {on}"),
            Event::DataWiped => println!("All data wiped"),
        }
    }
}
