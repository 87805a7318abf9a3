use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.3.2" for releases, "0.3.2@abc1234 2024-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "parent-hub", bin_name = "parent-hub", version = get_version())]
#[command(about = "Browse and filter licensed Ohio childcare programs", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory snapshot to read (JSON array of program records)
    #[arg(long, global = true, value_name = "FILE", help_heading = "Options")]
    pub data: Option<PathBuf>,

    /// Verbose output (debug logging)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Filter the directory and list matching programs
    #[command(alias = "ls", display_order = 1)]
    Browse(BrowseArgs),

    /// List cities with their program counts
    #[command(display_order = 2)]
    Cities {
        /// Only cities whose name contains this text
        query: Option<String>,
    },

    /// Show the values available for each filter
    #[command(display_order = 3)]
    Facets,

    /// Show one program by its program number
    #[command(display_order = 4)]
    Show {
        /// Program number
        id: String,
    },

    /// Get or set configuration
    #[command(display_order = 5)]
    Config {
        /// Configuration key (e.g., page-size)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[derive(Args, Debug, Default, Clone)]
pub struct BrowseArgs {
    /// Match program name, street address or ZIP code
    #[arg(short, long)]
    pub search: Option<String>,

    /// Only programs in this city
    #[arg(long)]
    pub city: Option<String>,

    /// Only programs in this county
    #[arg(long)]
    pub county: Option<String>,

    /// Only programs accepting publicly funded child care
    #[arg(long)]
    pub pfcc: bool,

    /// SUTQ rating to include: 3/gold, 2/silver, 1/bronze, 0/unrated (repeatable)
    #[arg(short, long = "rating", value_name = "RATING", value_parser = parse_rating)]
    pub ratings: Vec<String>,

    /// Program type to include (repeatable)
    #[arg(short = 't', long = "program-type", value_name = "TYPE")]
    pub program_types: Vec<String>,

    /// Maximum number of programs to list
    #[arg(short = 'n', long, value_parser = clap::value_parser!(u64).range(1..))]
    pub limit: Option<u64>,

    /// Also print map markers for every match
    #[arg(long)]
    pub markers: bool,

    /// Filter on a background worker thread
    #[arg(long)]
    pub worker: bool,
}

/// Accepts rating tokens or their badge names.
fn parse_rating(raw: &str) -> Result<String, String> {
    let token = match raw.trim().to_lowercase().as_str() {
        "3" | "gold" => "3",
        "2" | "silver" => "2",
        "1" | "bronze" => "1",
        "0" | "unrated" | "none" | "not-rated" => "0",
        other => {
            return Err(format!(
                "unknown rating '{}' (expected 3, 2, 1, 0, gold, silver, bronze or unrated)",
                other
            ))
        }
    };
    Ok(token.to_string())
}
