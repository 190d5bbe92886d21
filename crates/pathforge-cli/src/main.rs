use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

mod commands;
mod common;

#[derive(Parser)]
#[command(name = "pathforge-cli", version, about = "Pathforge CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Onboarding: identity path and profile
    Onboard {
        #[command(subcommand)]
        action: commands::onboard::OnboardAction,
    },
    /// Identity-specific setup configuration
    Setup {
        #[command(subcommand)]
        action: commands::setup::SetupAction,
    },
    /// Protocol (task) management
    Protocol {
        #[command(subcommand)]
        action: commands::protocol::ProtocolAction,
    },
    /// Daily mission intent
    Intent {
        #[command(subcommand)]
        action: commands::intent::IntentAction,
    },
    /// Generate today's protocol set
    Generate,
    /// Day rollover and momentum check
    Day {
        #[command(subcommand)]
        action: commands::day::DayAction,
    },
    /// Progression dashboard
    Status {
        /// Print the full state snapshot as JSON
        #[arg(long)]
        json: bool,
    },
    /// Completion history report
    Report,
    /// Settings management
    Settings {
        #[command(subcommand)]
        action: commands::settings::SettingsAction,
    },
    /// Premium status, trial, and streak protection
    Premium {
        #[command(subcommand)]
        action: commands::premium::PremiumAction,
    },
    /// Scan for due reminders
    Remind {
        /// Time to scan as HH:MM (default: now)
        #[arg(long)]
        at: Option<String>,
    },
    /// Data management
    Data {
        #[command(subcommand)]
        action: commands::data::DataAction,
    },
    /// Generate shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Onboard { action } => commands::onboard::run(action),
        Commands::Setup { action } => commands::setup::run(action),
        Commands::Protocol { action } => commands::protocol::run(action),
        Commands::Intent { action } => commands::intent::run(action),
        Commands::Generate => commands::generate::run(),
        Commands::Day { action } => commands::day::run(action),
        Commands::Status { json } => commands::status::run(json),
        Commands::Report => commands::report::run(),
        Commands::Settings { action } => commands::settings::run(action),
        Commands::Premium { action } => commands::premium::run(action),
        Commands::Remind { at } => commands::remind::run(at),
        Commands::Data { action } => commands::data::run(action),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
