//! Premium status, trial, and streak protection commands.

use clap::Subcommand;

use crate::common;

#[derive(Subcommand)]
pub enum PremiumAction {
    /// Show premium status and unlock flags
    Status,
    /// Start the 60-day trial (requires level 7)
    Trial,
    /// Arm this week's streak protection (premium only)
    Protect,
}

pub fn run(action: PremiumAction) -> Result<(), Box<dyn std::error::Error>> {
    let (db, mut engine) = common::open()?;
    let today = common::today();

    match action {
        PremiumAction::Status => {
            let premium = &engine.state().premium;
            println!(
                "Premium: {}",
                if engine.is_premium(today) { "yes" } else { "no" }
            );
            if let Some(end) = premium.trial_end_date {
                let label = if premium.trial_active(today) {
                    "active until"
                } else {
                    "ended"
                };
                println!("Trial: {label} {end}");
            }
            println!("Unlocked by streak: {}", premium.unlocked_by_streak);
            println!("Unlocked by level 10: {}", premium.unlocked_by_level10);
            println!("Unlocked by level 100: {}", premium.unlocked_by_level100);
            println!(
                "Streak protection: {}",
                if premium.protection_available {
                    "armed"
                } else {
                    "not armed"
                }
            );
        }
        PremiumAction::Trial => match engine.start_premium_trial(today) {
            Some(event) => {
                common::save(&db, &engine)?;
                common::print_events(&[event]);
            }
            None => println!("Trial unavailable: requires level 7 and no previous trial"),
        },
        PremiumAction::Protect => match engine.use_streak_protection(today) {
            Some(event) => {
                common::save(&db, &engine)?;
                common::print_events(&[event]);
            }
            None => println!("Protection unavailable: premium only, once per week"),
        },
    }
    Ok(())
}
