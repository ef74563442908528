//! Clap derive structures for the `aoss` CLI.
//!
//! Defines the command tree, global flags, and shared value enums. Also
//! compiled by `build.rs` for man page generation, so it may only depend
//! on clap and clap_complete.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// aoss -- VLAN, uplink and PoE administration for Aruba AOS-S switches
#[derive(Debug, Parser)]
#[command(
    name = "aoss",
    version,
    about = "Administer Aruba AOS-S switches over the REST API",
    long_about = "Create VLANs, tag them onto uplinks, and switch PoE on ports of\n\
        Aruba AOS-S switches through their REST interface (schema v6+).\n\n\
        Every command opens one session, runs, and logs out again.",
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
    /// Switch profile to use
    #[arg(long, short = 'p', env = "AOSS_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Switch IP or DNS name, optionally with :port (overrides profile)
    #[arg(long = "switch", short = 'S', env = "AOSS_SWITCH", global = true)]
    pub switch: Option<String>,

    /// Login user with manager rights [default: manager]
    #[arg(long, short = 'u', env = "AOSS_USERNAME", global = true)]
    pub username: Option<String>,

    /// Login password
    #[arg(long, env = "AOSS_PASSWORD", hide_env_values = true, global = true)]
    pub password: Option<String>,

    /// Web management protocol [default: http]
    #[arg(long, env = "AOSS_PROTOCOL", global = true)]
    pub protocol: Option<ProtocolArg>,

    /// REST API schema version [default: v6]
    #[arg(long, env = "AOSS_API_VERSION", global = true)]
    pub api_version: Option<String>,

    /// Path to a CA certificate for HTTPS
    #[arg(long, env = "AOSS_CA_CERT", global = true)]
    pub ca_cert: Option<PathBuf>,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "AOSS_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds [default: 5]
    #[arg(long, env = "AOSS_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Minimum gap between requests in milliseconds [default: 500]
    #[arg(long, env = "AOSS_REQUEST_INTERVAL", global = true)]
    pub request_interval: Option<u64>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "AOSS_OUTPUT",
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
}

// ── Value Enums ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ProtocolArg {
    /// web-management plaintext
    Http,
    /// web-management ssl
    Https,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum PoeActionArg {
    /// Enable PoE
    On,
    /// Disable PoE
    Off,
    /// Invert the current state
    #[default]
    Toggle,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List and create VLANs
    #[command(alias = "vlan", alias = "v")]
    Vlans(VlansArgs),

    /// Show uplink ports and tag VLANs onto them
    #[command(alias = "up")]
    Uplinks(UplinksArgs),

    /// Read and switch Power over Ethernet on a port
    Poe(PoeArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  VLANS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct VlansArgs {
    #[command(subcommand)]
    pub command: VlansCommand,
}

#[derive(Debug, Subcommand)]
pub enum VlansCommand {
    /// List configured VLANs
    #[command(alias = "ls")]
    List,

    /// Create a VLAN, optionally tagging it onto every uplink
    Create {
        /// VLAN ID; 0 picks the lowest free ID
        #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u16).range(0..=4095))]
        id: u16,

        /// VLAN name (must be unique on the switch)
        #[arg(long, short = 'n', default_value = "")]
        name: String,

        /// Tag the new VLAN onto all uplink ports afterwards
        #[arg(long)]
        tag_uplinks: bool,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  UPLINKS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct UplinksArgs {
    #[command(subcommand)]
    pub command: UplinksCommand,
}

#[derive(Debug, Subcommand)]
pub enum UplinksCommand {
    /// List ports carrying more than one statically tagged VLAN
    #[command(alias = "ls")]
    List,

    /// Tag an existing VLAN onto every uplink port
    Tag {
        /// VLAN ID to tag
        #[arg(long, value_parser = clap::value_parser!(u16).range(1..=4095))]
        vlan: u16,

        /// Only show which ports would be tagged
        #[arg(long)]
        dry_run: bool,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  POE
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct PoeArgs {
    #[command(subcommand)]
    pub command: PoeCommand,
}

#[derive(Debug, Subcommand)]
pub enum PoeCommand {
    /// Show whether PoE is enabled on a port
    Get {
        /// Port ID, e.g. 5 or A1
        #[arg(long)]
        port: String,
    },

    /// Enable, disable or toggle PoE on a port
    Set {
        /// Port ID, e.g. 5 or A1
        #[arg(long)]
        port: String,

        #[arg(long, value_enum, default_value_t)]
        action: PoeActionArg,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current configuration (secrets masked)
    Show,

    /// Print the config file location
    Path,

    /// Set a value on the active profile
    Set {
        /// Profile key, e.g. "switch", "username", "timeout"
        key: String,

        /// Value to set
        value: String,
    },

    /// Store a switch password in the system keyring
    SetPassword {
        /// Profile name
        #[arg(long)]
        profile: Option<String>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
