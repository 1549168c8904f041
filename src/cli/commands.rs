use std::path::PathBuf;

use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "noir")]
#[command(version, about = "A professional note management CLI tool")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path of the notes database file [default: data/notes.json]
    #[arg(long, global = true, env = "NOIR_DB", value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Log debug diagnostics to stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a new note
    Add {
        /// Note title
        title: String,

        /// Type of note (PROJECT, INFRA, PERSONAL)
        #[arg(long, short = 't', default_value = "PERSONAL")]
        note_type: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Display notes with optional filtering
    List {
        /// Filter by note type (takes precedence over --completed)
        #[arg(long, short = 't')]
        note_type: Option<String>,

        /// Filter by completion status
        #[arg(long, value_name = "BOOL", action = ArgAction::Set, value_parser = BoolishValueParser::new())]
        completed: Option<bool>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a single note
    Get {
        /// Note ID
        id: u64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Update the title and/or type of an existing note
    Update {
        /// The ID of the note to update
        id: u64,

        /// The new title for the note
        #[arg(long, short = 't')]
        title: Option<String>,

        /// The new type for the note (PERSONAL, PROJECT, INFRA)
        #[arg(long, short = 'n')]
        note_type: Option<String>,
    },

    /// Mark a note as completed
    Complete {
        /// Note ID
        id: u64,
    },

    /// Delete a note
    Delete {
        /// Note ID
        id: u64,

        /// Skip the confirmation prompt
        #[arg(long, short = 'f')]
        force: bool,
    },
}
