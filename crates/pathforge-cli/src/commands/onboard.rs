//! Onboarding commands: identity path and profile.

use clap::Subcommand;
use pathforge_core::{Gender, IdentityPath, Profile};

use crate::common;

#[derive(Subcommand)]
pub enum OnboardAction {
    /// Choose the identity path (one-time)
    Identity {
        /// scholar, warrior, focus, or discipline
        path: String,
    },
    /// Set the user profile
    Profile {
        /// Display name
        name: String,
        /// Age (10-99)
        #[arg(long)]
        age: u8,
        /// female, male, or other
        #[arg(long, default_value = "other")]
        gender: String,
    },
    /// List the selectable identity paths
    Paths,
    /// Show onboarding state
    Show,
}

fn parse_gender(s: &str) -> Result<Gender, String> {
    match s.to_ascii_lowercase().as_str() {
        "female" => Ok(Gender::Female),
        "male" => Ok(Gender::Male),
        "other" => Ok(Gender::Other),
        other => Err(format!("unknown gender '{other}'")),
    }
}

pub fn run(action: OnboardAction) -> Result<(), Box<dyn std::error::Error>> {
    let (db, mut engine) = common::open()?;

    match action {
        OnboardAction::Identity { path } => {
            let path: IdentityPath = path.parse()?;
            engine.set_identity(path)?;
            common::save(&db, &engine)?;
            println!("{}: {}", path.title(), path.motto());
        }
        OnboardAction::Profile { name, age, gender } => {
            let gender = parse_gender(&gender)?;
            let profile = Profile::new(name, age, gender)?;
            engine.set_profile(profile.clone());
            common::save(&db, &engine)?;
            println!("Profile saved: {} ({})", profile.name, profile.age);
        }
        OnboardAction::Paths => {
            for path in IdentityPath::ALL {
                println!("{:<12} {:<16} {}", path.as_str(), path.title(), path.motto());
            }
        }
        OnboardAction::Show => {
            let state = engine.state();
            match state.identity {
                Some(path) => println!("Identity: {}", path.title()),
                None => println!("Identity: (not chosen)"),
            }
            match &state.profile {
                Some(p) => println!("Profile: {} ({})", p.name, p.age),
                None => println!("Profile: (not set)"),
            }
            println!(
                "Setup: {}",
                if engine.has_setup() {
                    "complete"
                } else {
                    "incomplete"
                }
            );
        }
    }
    Ok(())
}
