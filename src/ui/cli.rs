use clap::{Parser, Subcommand};

/// vibenav - Find the vibe of a place from your terminal
#[derive(Parser, Debug)]
#[command(name = "vibenav")]
#[command(about = "A terminal map and search client for exploring the vibe of places", long_about = None)]
#[command(version)]
#[command(subcommand_required = false)]
#[command(arg_required_else_help = false)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Backend base URL (default: $VIBENAV_API_URL or http://127.0.0.1:8000)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Custom base directory for logs (default: ~/.vibenav)
    #[arg(long, global = true)]
    pub base_dir: Option<String>,

    /// Give up on a request after this many seconds (default: no limit)
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open the interactive map (the default)
    Tui,
    /// Show the vibe of a place
    Vibe {
        /// Place name, e.g. "India Gate"
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
        /// Also print the reviews the vibe is based on
        #[arg(short, long)]
        citations: bool,
    },
    /// List the places that match a vibe tag
    Tag {
        /// Vibe tag, e.g. "cozy"
        tag: String,
    },
    /// List every place on the map
    Locations,
}
