use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};
use holiday_core::PlannerId;

/// Manage holiday planners stored on a REST backend
///
/// Lists, shows, creates, edits, deletes and prints planner records. Every
/// change is followed by a reload of the full list from the backend.
#[derive(Parser)]
#[command(version, about, name = "holiday")]
pub struct Args {
    /// Base URL of the planner API. Falls back to the `base_url` preference.
    #[arg(long, global = true, env = "HOLIDAY_API_HOST")]
    pub base_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, global = true, env = "HOLIDAY_API_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Path to the preferences file. Defaults to
    /// $XDG_CONFIG_HOME/holiday/preferences.json
    #[arg(long, global = true)]
    pub prefs_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all planners
    #[command(alias = "ls")]
    List,
    /// Show one planner
    Show { id: PlannerId },
    /// Create a planner
    Create {
        #[command(flatten)]
        fields: PlannerFields,
    },
    /// Edit a planner; omitted options keep their current value
    Edit {
        id: PlannerId,
        #[command(flatten)]
        fields: PlannerFields,
    },
    /// Delete a planner
    #[command(alias = "rm")]
    Delete { id: PlannerId },
    /// Render a planner as printable HTML
    Print {
        id: PlannerId,
        /// Write the HTML here instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Read or change stored preferences
    Prefs {
        #[command(subcommand)]
        command: PrefsCommands,
    },
}

#[derive(ClapArgs, Debug, Default)]
pub struct PlannerFields {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// Start date, YYYY-MM-DD
    #[arg(long)]
    pub start_date: Option<String>,
    /// End date, YYYY-MM-DD
    #[arg(long)]
    pub end_date: Option<String>,
    #[arg(long)]
    pub location: Option<String>,
    /// Participant name; repeat for several. Replaces the whole list.
    #[arg(long = "participant")]
    pub participants: Vec<String>,
}

#[derive(Subcommand)]
pub enum PrefsCommands {
    /// Print the JSON stored under KEY
    Get { key: String },
    /// Store VALUE under KEY; VALUE is kept as a string unless it is valid JSON
    Set { key: String, value: String },
    /// Remove KEY
    Unset { key: String },
}
