//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use window_engine::ContentType;

#[derive(Parser)]
#[command(
    name = "wincheck",
    version,
    about = "Check content date windows and convert timestamps",
    long_about = "Check the publish/application/event date windows of a content form.\n\n\
                  Snapshots are JSON: {\"values\": {\"publish.start\": \"2024-01-10T09:00\"}, \
                  \"unlimited\": {\"publish\": true}}. Values are local wall-clock times."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Increase log verbosity (-v for debug, -vv for trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// JSON settings file with `utc_offset` and `sentinel_year`.
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// UTC offset of local values (overrides the settings file), e.g. "+09:00".
    #[arg(long, value_name = "OFFSET", global = true, allow_hyphen_values = true)]
    pub offset: Option<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate a form snapshot and print its violations as JSON.
    Validate(ValidateArgs),

    /// Convert a local wall-clock value to an absolute timestamp.
    ToAbsolute {
        #[arg(value_name = "LOCAL")]
        local: String,
    },

    /// Convert an absolute timestamp to a local wall-clock value.
    ToLocal {
        #[arg(value_name = "ABSOLUTE")]
        absolute: String,
    },

    /// Print the rule table for a content type.
    Rules {
        #[arg(long = "type", value_name = "TYPE")]
        content_type: ContentType,
    },
}

#[derive(Args)]
pub struct ValidateArgs {
    /// Content type whose rules apply.
    #[arg(long = "type", value_name = "TYPE")]
    pub content_type: ContentType,

    /// Snapshot file (reads stdin when omitted).
    #[arg(value_name = "FILE")]
    pub input: Option<PathBuf>,
}
