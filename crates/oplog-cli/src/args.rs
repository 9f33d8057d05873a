use crate::types::OutputMode;
use clap::Parser;

#[derive(Parser)]
#[command(name = "oplog")]
#[command(about = "Query and follow accelerator operations logs through Loki", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Accelerator to filter on; DEV selects the development job (repeatable)
    #[arg(short = 'a', long)]
    pub accelerator: Vec<String>,

    /// Origin host/IOC to filter on (repeatable)
    #[arg(long)]
    pub origin: Vec<String>,

    /// User to filter on (repeatable)
    #[arg(long)]
    pub user: Vec<String>,

    /// Facility to filter on (repeatable)
    #[arg(long)]
    pub facility: Vec<String>,

    /// Process name to filter on (repeatable)
    #[arg(long)]
    pub proc: Vec<String>,

    /// Severity to filter on (repeatable)
    #[arg(long)]
    pub severity: Vec<String>,

    /// Only show lines matching this regex
    #[arg(short = 'e', long = "regex")]
    pub regex: Option<String>,

    /// Drop lines matching this regex
    #[arg(short = 'v', long = "exclude")]
    pub exclude: Option<String>,

    /// Lookback window as duration shorthand (e.g. 24h, 2d), passed to the
    /// backend as a canonical hour count
    #[arg(long)]
    pub since: Option<String>,

    /// Range start, absolute timestamp or relative offset like -10h
    #[arg(long)]
    pub from: Option<String>,

    /// Range end, absolute timestamp or relative offset like -10h
    #[arg(long)]
    pub to: Option<String>,

    /// Keep change-log entries (suppressed by default)
    #[arg(long)]
    pub changelog: bool,

    /// Keep put-log entries (suppressed by default)
    #[arg(long)]
    pub putlog: bool,

    /// Keep watcher entries (suppressed by default)
    #[arg(long)]
    pub watcher: bool,

    /// Disable consecutive-duplicate compaction
    #[arg(long = "no-like")]
    pub no_like: bool,

    /// Maximum number of entries the backend returns
    #[arg(long, default_value_t = 100)]
    pub limit: usize,

    /// Render records as fixed-width table rows
    #[arg(long, conflicts_with = "json")]
    pub table: bool,

    /// Follow the live stream, reconnecting across backend cutoffs
    #[arg(short = 'f', long)]
    pub tail: bool,

    /// Reshape jsonl backend output into flat structured records
    #[arg(long)]
    pub json: bool,

    /// Show exactly what the backend returned: no compaction, no reversal
    #[arg(long)]
    pub invert: bool,

    /// Suppress backend progress output (forwarded as -q)
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Backend output encoding, forwarded verbatim
    #[arg(long, default_value_t = OutputMode::Default)]
    pub output: OutputMode,

    /// Backend program to invoke (also OPLOG_BACKEND)
    #[arg(long)]
    pub backend: Option<String>,

    /// Print the backend command line instead of running it
    #[arg(long)]
    pub dry_run: bool,

    /// Extra flags forwarded verbatim to the backend
    #[arg(last = true)]
    pub backend_args: Vec<String>,
}
