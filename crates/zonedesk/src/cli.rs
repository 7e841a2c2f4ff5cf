//! Clap derive structures for the `zonedesk` CLI.
//!
//! Defines the command tree, global flags, and shared value enums.

use clap::{Args, Parser, Subcommand, ValueEnum};

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// ── Top-Level CLI ────────────────────────────────────────────────────

/// zonedesk -- manage NSD-backed DNS zones from the terminal
#[derive(Debug, Parser)]
#[command(
    name = "zonedesk",
    version,
    about = "Manage DNS zones and records on a zonedesk server",
    long_about = "Administer zones and resource records through the zonedesk web API.\n\n\
        Each invocation signs in, runs one command, and signs out again.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Server profile to use
    #[arg(long, short = 'p', env = "ZONEDESK_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Server URL (overrides profile)
    #[arg(long, short = 's', env = "ZONEDESK_SERVER", global = true)]
    pub server: Option<String>,

    /// Login name (overrides profile)
    #[arg(long, short = 'u', env = "ZONEDESK_USERNAME", global = true)]
    pub user: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "ZONEDESK_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "ZONEDESK_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, env = "ZONEDESK_TIMEOUT", default_value_t = DEFAULT_TIMEOUT_SECS, global = true)]
    pub timeout: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    JsonCompact,
    Yaml,
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List, create, and delete zones
    #[command(alias = "z")]
    Zones(ZonesArgs),

    /// Manage resource records in a zone
    #[command(alias = "r")]
    Records(RecordsArgs),

    /// Push a zone to the name server and reload it
    Sync(SyncArgs),

    /// Name server daemon status
    Nsd(NsdArgs),

    /// Change the signed-in user's password
    Password,

    /// Manage profiles and stored credentials
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Zones ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ZonesArgs {
    #[command(subcommand)]
    pub command: ZonesCommand,
}

#[derive(Debug, Subcommand)]
pub enum ZonesCommand {
    /// List zones visible to the signed-in user
    #[command(alias = "ls")]
    List,

    /// Create a zone
    Create(ZoneCreateArgs),

    /// Delete a zone and all of its records
    #[command(alias = "rm")]
    Delete {
        /// Zone name or numeric ID
        zone: String,
    },
}

/// Zone creation fields. Which ones are sent depends on the role in the
/// active profile; blank SOA timers fall back to the server defaults.
#[derive(Debug, Args)]
pub struct ZoneCreateArgs {
    /// Zone name (e.g. example.com)
    pub name: String,

    /// SOA contact mailbox
    #[arg(long, default_value = "")]
    pub email: String,

    /// Primary name server for the SOA record (admin)
    #[arg(long, default_value = "")]
    pub primary_ns: String,

    /// SOA refresh in seconds (admin)
    #[arg(long, default_value = "")]
    pub refresh: String,

    /// SOA retry in seconds (admin)
    #[arg(long, default_value = "")]
    pub retry: String,

    /// SOA expire in seconds (admin)
    #[arg(long, default_value = "")]
    pub expire: String,

    /// SOA minimum TTL in seconds (admin)
    #[arg(long, default_value = "")]
    pub minimum: String,

    /// Allow users to create NS records in this zone (admin)
    #[arg(long)]
    pub create_ns: bool,

    /// Allow users to create A records in this zone (admin)
    #[arg(long)]
    pub create_a: bool,

    /// IPv4 address for the apex A record (user)
    #[arg(long, default_value = "")]
    pub ip: String,
}

// ── Records ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct RecordsArgs {
    #[command(subcommand)]
    pub command: RecordsCommand,
}

#[derive(Debug, Subcommand)]
pub enum RecordsCommand {
    /// List the records of a zone
    #[command(alias = "ls")]
    List {
        /// Zone name or numeric ID
        zone: String,
    },

    /// Add a record to a zone
    Add(RecordAddArgs),

    /// Edit an existing record
    Edit(RecordEditArgs),

    /// Delete a record
    #[command(alias = "rm")]
    Delete {
        /// Zone name or numeric ID
        zone: String,
        /// Record ID
        id: i64,
    },
}

#[derive(Debug, Args)]
pub struct RecordAddArgs {
    /// Zone name or numeric ID
    pub zone: String,

    /// Record type (A, AAAA, CNAME, MX, NS, TXT, SRV, PTR, CAA)
    #[arg(long = "type", short = 't')]
    pub record_type: Option<String>,

    /// Owner name relative to the zone; omit for the apex
    #[arg(long, short = 'n', default_value = "")]
    pub name: String,

    /// Record data
    #[arg(long, short = 'c')]
    pub content: String,

    /// Time to live in seconds
    #[arg(long)]
    pub ttl: String,

    /// MX preference
    #[arg(long, default_value = "")]
    pub priority: String,
}

#[derive(Debug, Args)]
pub struct RecordEditArgs {
    /// Zone name or numeric ID
    pub zone: String,

    /// Record ID
    pub id: i64,

    /// New record type (admins only)
    #[arg(long = "type", short = 't')]
    pub record_type: Option<String>,

    #[arg(long, short = 'n')]
    pub name: Option<String>,

    #[arg(long, short = 'c')]
    pub content: Option<String>,

    #[arg(long)]
    pub ttl: Option<String>,

    #[arg(long)]
    pub priority: Option<String>,
}

// ── Sync / NSD ───────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct SyncArgs {
    /// Zone name or numeric ID
    pub zone: String,
}

#[derive(Debug, Args)]
pub struct NsdArgs {
    #[command(subcommand)]
    pub command: NsdCommand,
}

#[derive(Debug, Subcommand)]
pub enum NsdCommand {
    /// Show whether the daemon is running and what the server may do to it
    Status,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Interactive profile setup
    Init,

    /// Print the configuration with secrets masked
    Show,

    /// Store a profile's password in the system keyring
    SetPassword,

    /// Make a profile the default
    Use {
        /// Profile name
        name: String,
    },
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
