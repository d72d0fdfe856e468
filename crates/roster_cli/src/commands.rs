use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "roster", version, about = "Keep a small table of persons")]
pub struct Args {
    /// SQLite file holding the persisted persons
    #[arg(long, global = true, env = "ROSTER_DB_PATH")]
    pub db: Option<PathBuf>,

    /// Directory for rolling log files
    #[arg(long, global = true, env = "ROSTER_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// One of trace|debug|info|warn|error
    #[arg(long, global = true, env = "ROSTER_LOG_LEVEL")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the person table
    List,
    /// Print one person
    Show {
        id: u32,
    },
    /// Add a person at the end of the table
    Add {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        /// Display text, DD.MM.YYYY
        #[arg(long)]
        birth_date: String,
        /// Avatar key (see `roster avatars`) or any glyph
        #[arg(long, default_value = "default")]
        avatar: String,
    },
    /// Edit a person; omitted fields keep their current value
    Edit {
        id: u32,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        birth_date: Option<String>,
        #[arg(long)]
        avatar: Option<String>,
    },
    /// Remove a person after confirmation
    Remove {
        id: u32,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// List selectable avatars
    Avatars,
}

impl Commands {
    pub fn name(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Show { .. } => "show",
            Self::Add { .. } => "add",
            Self::Edit { .. } => "edit",
            Self::Remove { .. } => "remove",
            Self::Avatars => "avatars",
        }
    }
}
