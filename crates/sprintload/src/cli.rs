//! Clap CLI definitions for the `sprintload` command.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// sprintload -- per-person sprint time-allocation reports.
///
/// Reconstructs when each sprint item was actually worked on from its status
/// changelog, and reports every team member's hours as a share of their sprint.
#[derive(Parser, Debug)]
#[command(
    name = "sprintload",
    about = "Per-person sprint time-allocation reports",
    long_about = "Reconstructs when each sprint item was worked on from its status changelog and reports, per team member, the share of their sprint time each item took.",
    version,
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Global flags available to all subcommands.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Project directory (default: auto-discover .sprintload/ or $SPRINTLOAD_DIR).
    #[arg(long, global = true)]
    pub dir: Option<PathBuf>,

    /// Output in JSON format.
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose/debug output on stderr.
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output (errors only).
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,
}

/// All available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    // ===== Reports =====
    /// Build the time-allocation report for a sprint.
    Report(ReportArgs),

    /// Show raw per-person hour totals for a sprint.
    Totals(TotalsArgs),

    /// Show how one item's work interval was reconstructed.
    Interval(IntervalArgs),

    // ===== Setup =====
    /// Manage team rosters.
    Team(TeamArgs),

    /// Create a .sprintload/ directory in the current directory.
    Init(InitArgs),

    /// Inspect configuration.
    Config(ConfigArgs),

    // ===== Utilities =====
    /// Generate shell completion scripts.
    Completion(CompletionArgs),

    /// Print version information.
    Version,
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

/// Where sprint items come from, and how they are credited.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Sprint identifier (default: the last sprint reported for the project).
    #[arg(long, short = 's')]
    pub sprint: Option<String>,

    /// Project whose roster to use (default: config `default_project`).
    #[arg(long, short = 'p')]
    pub project: Option<String>,

    /// Manual hour overrides as a JSON object of item key to hours,
    /// or `@FILE` to read them from a file.
    #[arg(long)]
    pub overrides: Option<String>,

    /// Read items from a snapshot file (JSON array or JSON Lines) instead of the tracker.
    #[arg(long)]
    pub snapshot: Option<PathBuf>,

    /// Evaluate still-open work as of this instant (RFC 3339; default: now).
    #[arg(long)]
    pub as_of: Option<String>,

    /// Also save the fetched items as a JSON Lines snapshot for later runs.
    #[arg(long, value_name = "FILE")]
    pub save_snapshot: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ReportArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Write the CSV here (default: `output_dir/<sprint>.csv`, else stdout).
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct TotalsArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(Args, Debug)]
pub struct IntervalArgs {
    /// Item key, e.g. `SL-42`.
    pub key: String,

    /// Snapshot file holding the item (default: config `snapshot`).
    #[arg(long)]
    pub snapshot: Option<PathBuf>,

    /// Manual hour overrides (JSON object or `@FILE`).
    #[arg(long)]
    pub overrides: Option<String>,

    /// Evaluate still-open work as of this instant (RFC 3339; default: now).
    #[arg(long)]
    pub as_of: Option<String>,
}

// ---------------------------------------------------------------------------
// Team
// ---------------------------------------------------------------------------

#[derive(Args, Debug)]
pub struct TeamArgs {
    #[command(subcommand)]
    pub command: TeamCommands,
}

#[derive(Subcommand, Debug)]
pub enum TeamCommands {
    /// Add members to a project roster (creates the roster if needed).
    Add {
        /// Project name.
        project: String,
        /// Member display names, as the tracker shows them.
        #[arg(required = true)]
        members: Vec<String>,
    },

    /// Remove members, or the whole roster when no members are given.
    #[command(alias = "rm")]
    Remove {
        /// Project name.
        project: String,
        /// Member display names.
        members: Vec<String>,
    },

    /// Show a project roster.
    Show {
        /// Project name.
        project: String,
    },

    /// List all projects with rosters.
    #[command(alias = "ls")]
    List,
}

// ---------------------------------------------------------------------------
// Init / Config
// ---------------------------------------------------------------------------

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Default project for reports.
    #[arg(long)]
    pub project: Option<String>,

    /// Tracker base URL, e.g. `https://acme.atlassian.net`.
    #[arg(long)]
    pub tracker_url: Option<String>,

    /// Tracker account e-mail.
    #[arg(long)]
    pub email: Option<String>,

    /// Overwrite an existing config.yaml.
    #[arg(long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the effective configuration (file layered with environment).
    Show,

    /// Print the path of the project directory.
    Path,
}

// ---------------------------------------------------------------------------
// Completion
// ---------------------------------------------------------------------------

#[derive(Args, Debug)]
pub struct CompletionArgs {
    #[command(subcommand)]
    pub command: CompletionCommands,
}

/// Completion subcommands.
#[derive(Subcommand, Debug)]
pub enum CompletionCommands {
    /// Generate Bash completions.
    Bash,
    /// Generate Zsh completions.
    Zsh,
    /// Generate Fish completions.
    Fish,
    /// Generate PowerShell completions.
    Powershell,
}
