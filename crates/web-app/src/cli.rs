use std::path::PathBuf;

use clap::{Parser, Subcommand};
use liftlog_web_app::{Theme, chart, settings::DEFAULT_CATALOG_PATH};

#[derive(Parser, Debug)]
#[command(name = "liftlog")]
#[command(author, version, about = "Workout log dashboard", long_about = None)]
pub struct Cli {
    /// Path to the exercise catalog
    #[arg(long, default_value = DEFAULT_CATALOG_PATH)]
    pub catalog: PathBuf,

    /// Color theme of the rendered page
    #[arg(long, value_enum, default_value_t = Theme::Light)]
    pub theme: Theme,

    /// Increase log verbosity (-v: debug, -vv: trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render the dashboard of a user as HTML
    Render {
        #[arg(long)]
        user: String,

        /// Write the page to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Width of the charts in pixels
        #[arg(long, default_value_t = chart::DEFAULT_WIDTH)]
        width: u32,
    },

    /// Record a new entry
    AddEntry {
        #[arg(long)]
        user: String,

        #[arg(long)]
        exercise: String,

        #[arg(long)]
        weight: String,

        /// Date of the entry as YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,

        /// Render the updated dashboard into a file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Add an exercise to a muscle group
    AddExercise { group: String, name: String },

    /// Remove an exercise from a muscle group
    RemoveExercise { group: String, name: String },

    /// Add a muscle group
    AddGroup { group: String },

    /// Remove a muscle group with all its exercises
    RemoveGroup { group: String },

    /// List the users present in the store
    Users,
}
