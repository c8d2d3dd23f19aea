use std::path::PathBuf;

use alum_http::SortDirection;
use clap::{Args, Subcommand, ValueEnum};

use crate::cli::subcommands::{CacheCommands, ModeCommands, SettingsCommands, TokenCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// List one page of records.
    List(ListArgs),
    /// Fetch a single record.
    Get(RecordArgs),
    /// Delete a single record.
    Delete(RecordArgs),
    /// Apply a lifecycle action to one record (publish, approve, verify, ...).
    Action(ActionArgs),
    /// Apply an action to many records, isolating per-id failures.
    Bulk(BulkArgs),
    /// Aggregate statistics for an entity.
    Stats(StatsArgs),
    /// Inspect or override the mock/real backend choice.
    Mode {
        #[command(subcommand)]
        action: ModeCommands,
    },
    /// Per-user settings and profile preferences.
    Settings {
        #[command(subcommand)]
        action: SettingsCommands,
    },
    /// Probe the backends and the cache.
    Health(HealthArgs),
    /// Manage the bearer token sent to the real backend.
    Token {
        #[command(subcommand)]
        action: TokenCommands,
    },
    /// Mock collection cache management.
    Cache {
        #[command(subcommand)]
        action: CacheCommands,
    },
    /// Serve a JSON document as the mock backend.
    Serve(ServeArgs),
    /// Print the JSON schema of a record type.
    Schema(SchemaArgs),
}

/// Record kinds addressable from the command line.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum Entity {
    Events,
    Sponsors,
    Partners,
    Chapters,
    Mentorships,
    Questions,
    Opportunities,
    Spotlights,
    Users,
    /// Users mapped to display profiles.
    Profiles,
}

#[derive(Clone, Debug, Args)]
pub struct ListArgs {
    pub entity: Entity,

    /// Page number, starting at 1
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Exact-match filter, repeatable (`--filter status=published`)
    #[arg(long = "filter", value_parser = parse_key_value)]
    pub filters: Vec<(String, String)>,

    /// Field to sort by
    #[arg(long)]
    pub sort: Option<String>,

    /// Sort direction: asc or desc
    #[arg(long, default_value = "asc", requires = "sort")]
    pub order: SortDirection,
}

#[derive(Clone, Debug, Args)]
pub struct RecordArgs {
    pub entity: Entity,
    pub id: String,
}

#[derive(Clone, Debug, Args)]
pub struct ActionArgs {
    pub entity: Entity,
    pub id: String,
    pub action: String,

    /// User the action applies to (register, apply, add-member, ...)
    #[arg(long)]
    pub user: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct BulkArgs {
    pub entity: Entity,
    pub action: String,
    #[arg(required = true, num_args = 1..)]
    pub ids: Vec<String>,
}

#[derive(Clone, Debug, Args)]
pub struct StatsArgs {
    pub entity: Entity,
}

#[derive(Clone, Debug, Args)]
pub struct HealthArgs {
    /// Re-probe this many times while the active backend is unreachable
    #[arg(long, default_value_t = 0)]
    pub retries: u32,

    /// Delay between probes, in milliseconds
    #[arg(long, default_value_t = 1000, requires = "retries")]
    pub interval_ms: u64,
}

#[derive(Clone, Debug, Args)]
pub struct ServeArgs {
    /// Listen address
    #[arg(long, default_value = "127.0.0.1:3001")]
    pub addr: String,

    /// JSON document to serve instead of the bundled demo data
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Persist writes back to `--data`
    #[arg(long, requires = "data")]
    pub write_back: bool,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum SchemaType {
    Event,
    Sponsor,
    Partner,
    Chapter,
    Mentorship,
    Session,
    Question,
    Answer,
    Opportunity,
    Spotlight,
    User,
    Profile,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    #[arg(value_name = "TYPE")]
    pub type_name: SchemaType,
}

/// Parse `key=value`. The value may itself contain `=`.
pub fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in '{raw}'"));
    }
    Ok((key.to_string(), value.to_string()))
}
