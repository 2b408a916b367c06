use crate::domain::model::{MU_AUTH_ALLOWED_GROUPS, MU_AUTH_USED_GROUPS, MU_CALL_ID, MU_SESSION_ID};
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "mu-sparql")]
#[command(about = "Run SPARQL statements against the mu triple store")]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,

    #[arg(long, global = true, help = "MU-SESSION-ID to forward")]
    pub session_id: Option<String>,

    #[arg(long, global = true, help = "MU-CALL-ID to forward")]
    pub call_id: Option<String>,

    #[arg(long, global = true, help = "MU-AUTH-ALLOWED-GROUPS to forward")]
    pub allowed_groups: Option<String>,

    #[arg(long, global = true, help = "MU-AUTH-USED-GROUPS to forward")]
    pub used_groups: Option<String>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Run a query and print the JSON results
    Query { statement: String },
    /// Run an update statement
    Update { statement: String },
    /// Set dct:modified of a subject in the application graph
    Touch {
        subject: String,
        #[arg(long, help = "RFC 3339 timestamp, defaults to now")]
        at: Option<String>,
    },
    /// Print a new identifier
    Uuid {
        #[arg(long, help = "Random (v4) instead of time-based (v1)")]
        random: bool,
    },
}

impl CliArgs {
    /// mu headers given on the command line, as (name, value) pairs.
    pub fn header_pairs(&self) -> Vec<(&str, &str)> {
        [
            (MU_SESSION_ID, &self.session_id),
            (MU_CALL_ID, &self.call_id),
            (MU_AUTH_ALLOWED_GROUPS, &self.allowed_groups),
            (MU_AUTH_USED_GROUPS, &self.used_groups),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.as_deref().map(|v| (name, v)))
        .collect()
    }
}
