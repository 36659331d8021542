use clap::{Parser, Subcommand, ValueEnum};
use quicknote_core::ViewMode;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "quicknote")]
#[command(about = "Local note-taking with tags, search, and a persisted view mode")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Directory holding the database and logs
    #[arg(long, global = true, env = "QUICKNOTE_DATA_DIR", default_value = ".quicknote")]
    pub data_dir: PathBuf,

    /// Log level (trace, debug, info, warn, error); defaults by build mode
    #[arg(long, global = true, env = "QUICKNOTE_LOG")]
    pub log_level: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a note
    Add {
        /// Title; blank becomes "Untitled"
        #[arg(short, long, default_value = "")]
        title: String,
        #[arg(short, long, default_value = "")]
        content: String,
        /// Comma-separated tags
        #[arg(long, default_value = "")]
        tags: String,
    },
    /// Edit a note; omitted fields keep their current value
    Edit {
        id: String,
        #[arg(short, long)]
        title: Option<String>,
        #[arg(short, long)]
        content: Option<String>,
        #[arg(long)]
        tags: Option<String>,
    },
    /// Delete a note
    Rm { id: String },
    /// List notes, newest update first
    List {
        /// Free search over title, content, and tags
        #[arg(short, long, default_value = "")]
        search: String,
        /// Exact tag filter (case-insensitive)
        #[arg(long, default_value = "")]
        tag: String,
    },
    /// Show all known tags
    Tags,
    /// Show or set the list layout
    View { mode: Option<ViewArg> },
    /// Record who is using this notebook
    Login {
        email: String,
        #[arg(short, long)]
        name: Option<String>,
    },
    /// Forget the recorded identity
    Logout,
    /// Show the recorded identity
    Whoami,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ViewArg {
    Grid,
    List,
}

impl From<ViewArg> for ViewMode {
    fn from(value: ViewArg) -> Self {
        match value {
            ViewArg::Grid => ViewMode::Grid,
            ViewArg::List => ViewMode::List,
        }
    }
}
