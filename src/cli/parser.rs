use crate::export::ExportFormat;
use crate::models::attendee::Status;
use clap::{Parser, Subcommand, ValueEnum};

/// Command-line interface definition for eqc
/// Event check-in CLI backed by a remote roster
#[derive(Parser)]
#[command(
    name = "eqc",
    version = env!("CARGO_PKG_VERSION"),
    about = "Event check-in from the terminal: scan codes at the door, keep attendance locally, sync a remote roster",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the local store and configuration
    Init,

    /// Manage the configuration file (view, set values or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "url", value_name = "URL", help = "Set the remote webapp URL")]
        url: Option<String>,

        #[arg(long = "token", value_name = "TOKEN", help = "Set the remote API token")]
        token: Option<String>,

        #[arg(
            long = "event-code",
            value_name = "CODE",
            help = "Set the expected event code prefix (empty accepts any)"
        )]
        event_code: Option<String>,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/vim/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Test the connection to the remote backend
    Ping {
        #[arg(
            long = "adopt",
            help = "Save the server-reported event code into the config"
        )]
        adopt: bool,
    },

    /// Pull the authoritative roster from the remote backend
    Sync,

    /// Import attendees from CSV and push them to the remote roster
    Import {
        /// CSV file to read, or '-' for stdin (columns: name,email,note)
        file: String,

        #[arg(
            long = "dry-run",
            help = "Parse and preview the rows without touching the network"
        )]
        dry_run: bool,
    },

    /// Interactive check-in session reading decoded payloads line by line
    Scan {
        #[arg(
            long = "hold-ms",
            value_name = "MS",
            help = "Override the result hold window in milliseconds"
        )]
        hold_ms: Option<u64>,
    },

    /// Check in a single attendee by id
    Checkin {
        /// Attendee id
        id: String,
    },

    /// Undo the most recent check-in of the current session
    Undo {
        #[arg(long = "yes", short = 'y', help = "Skip the confirmation prompt")]
        yes: bool,
    },

    /// List the roster
    List {
        #[arg(
            long = "filter",
            value_enum,
            default_value = "all",
            help = "Filter by attendance status"
        )]
        filter: ListFilter,

        #[arg(
            long = "search",
            value_name = "QUERY",
            help = "Substring search on name, email and id"
        )]
        search: Option<String>,
    },

    /// Print the activity log (newest first)
    Log {
        #[arg(long = "limit", value_name = "N", help = "Show at most N entries")]
        limit: Option<usize>,

        #[arg(long = "clear", help = "Clear the locally stored activity entries")]
        clear: bool,
    },

    /// Show configuration, roster tally and sync freshness
    Status,

    /// Export the roster snapshot
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, short = 'f')]
        force: bool,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ListFilter {
    All,
    #[value(name = "not_yet")]
    NotYet,
    #[value(name = "checked_in")]
    CheckedIn,
    Inactive,
}

impl ListFilter {
    pub fn matches(&self, status: Status) -> bool {
        match self {
            ListFilter::All => true,
            ListFilter::NotYet => status == Status::NotYet,
            ListFilter::CheckedIn => status == Status::CheckedIn,
            ListFilter::Inactive => status == Status::Inactive,
        }
    }
}
