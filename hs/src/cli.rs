//! CLI argument parsing for hadithstore

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "hs")]
#[command(author, version, about = "Read-only hadith collection API", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Data directory (overrides config and HADITH_DATA_DIR)
    #[arg(short, long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP API server
    Serve {
        /// Address to listen on (overrides config)
        #[arg(short, long)]
        listen: Option<String>,
    },

    /// List available narrators
    Narrators,

    /// Show one page of a narrator's hadiths
    List {
        /// Narrator key, e.g. bukhari
        #[arg(required = true)]
        narrator: String,

        #[command(flatten)]
        page: PageArgs,
    },

    /// Show one page across all narrators
    All {
        #[command(flatten)]
        page: PageArgs,
    },

    /// Show a single hadith
    Get {
        /// Narrator key
        #[arg(required = true)]
        narrator: String,

        /// Hadith number
        #[arg(required = true)]
        number: u32,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },
}

/// Paging and search options shared by list commands
#[derive(Args, Debug)]
pub struct PageArgs {
    /// Page number (default: 1)
    #[arg(short, long, allow_negative_numbers = true)]
    pub page: Option<i64>,

    /// Hadiths per page, 1-100 (default: 10)
    #[arg(short, long, allow_negative_numbers = true)]
    pub limit: Option<i64>,

    /// Case-insensitive search text
    #[arg(short, long)]
    pub query: Option<String>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Output format for query commands
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown format: {}. Use: text or json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}
