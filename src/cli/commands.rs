//! CLI command definitions

use clap::{ArgGroup, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "travelog")]
#[command(about = "Photo travel journal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// More log output (-v info, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new journal
    Init {
        /// Directory to initialize (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Capture a new entry from a photo
    #[command(group(ArgGroup::new("source").required(true).args(["image", "camera"])))]
    Add {
        /// Photo to use
        #[arg(short, long)]
        image: Option<PathBuf>,

        /// Take the photo with the configured camera command
        #[arg(long)]
        camera: bool,

        /// Entry title
        #[arg(short, long)]
        title: String,

        /// Entry caption
        #[arg(short, long)]
        description: String,

        /// Latitude in decimal degrees
        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,

        /// Longitude in decimal degrees
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,
    },

    /// Show the feed, newest first
    Feed {
        /// Only entries with this hashtag
        #[arg(long)]
        tag: Option<String>,

        /// Only entries flagged liked, commented, shared or saved
        #[arg(long)]
        only: Option<String>,
    },

    /// Show one entry
    Show { id: String },

    /// Delete an entry
    Delete {
        id: String,

        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Toggle the like flag on an entry
    Like { id: String },

    /// Toggle the comment flag on an entry
    Comment { id: String },

    /// Toggle the share flag on an entry
    Share { id: String },

    /// Toggle the saved flag on an entry
    Save { id: String },

    /// List hashtags used in entries
    Tags,

    /// View or modify configuration
    Config {
        /// Config key to get or set
        key: Option<String>,

        /// Value to set (if provided, sets the key)
        value: Option<String>,

        /// List all configuration
        #[arg(short, long)]
        list: bool,
    },

    /// Delete all entries and interaction flags
    Reset {
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
}
