use clap::{Parser, Subcommand};

use compose_cli::commands::{config_ops, replay_ops};
use compose_core::settings::settings;
use compose_core::unicode::OffsetUnit;

#[derive(Parser)]
#[command(name = "composetool", about = "Composing-text tracker diagnostics")]
struct Cli {
    /// Custom settings TOML (defaults are embedded)
    #[arg(long, global = true)]
    settings: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Replay an editing script through the tracker and print the state after each line
    Replay {
        /// Path to the script file
        script: String,
        /// Offset unit: char or utf16 (defaults to tracker.offset_unit)
        #[arg(long)]
        unit: Option<OffsetUnit>,
        /// Output as JSON lines instead of text
        #[arg(long)]
        json: bool,
    },

    /// Settings file management
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Print the embedded default settings
    Export,
    /// Check a settings file
    Validate {
        /// Path to the settings TOML
        file: String,
    },
}

fn main() {
    let cli = Cli::parse();
    if let Some(path) = &cli.settings {
        config_ops::settings_load(path);
    }

    match cli.command {
        Command::Replay { script, unit, json } => {
            let unit = unit.unwrap_or(settings().tracker.offset_unit);
            replay_ops::replay_file(&script, unit, json);
        }
        Command::Settings { action } => match action {
            SettingsAction::Export => config_ops::settings_export(),
            SettingsAction::Validate { file } => config_ops::settings_validate(&file),
        },
    }
}
