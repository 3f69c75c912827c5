//! CLI argument definitions using clap

use clap::{Args, Parser, Subcommand, ValueHint};

use crate::application::structured::OutputFormat;

/// Read-only inspector for search cluster admin API output: sortable, filterable tables
#[derive(Parser, Debug)]
#[command(name = "esctl")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file (default: $XDG_CONFIG_HOME/esctl/esctl.yml)
    #[arg(long, env = "ESCTL_CONFIG", global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<String>,

    /// Output format (default: from config, else table)
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List cluster resources as a table
    Get {
        #[command(subcommand)]
        command: GetCommands,
    },

    /// Count documents per index, optionally grouped by a field
    Count {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        render: RenderArgs,
        /// Split counts by this field's terms aggregation
        #[arg(short = 'g', long)]
        group_by: Option<String>,
        /// Only this index
        #[arg(long)]
        index: Option<String>,
    },

    /// Pretty-print a JSON document (cluster health, stats, settings)
    Describe {
        /// JSON file, or `-` for stdin
        #[arg(default_value = "-", value_hint = ValueHint::FilePath)]
        file: String,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Where `get` reads its payload from.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// JSON input: a file, a snapshot directory, or `-` for stdin
    #[arg(short = 'f', long = "file", default_value = "-", value_hint = ValueHint::AnyPath)]
    pub input: String,
}

/// Column and sort options shared by every `get` subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct RenderArgs {
    /// Sort by these columns, comma-separated, in priority order
    #[arg(short = 's', long = "sort-by", value_delimiter = ',')]
    pub sort_by: Vec<String>,

    /// Show only these columns, comma-separated, or `all`
    #[arg(short = 'c', long, value_delimiter = ',')]
    pub columns: Vec<String>,
}

/// Shard filters; role and state flags combine with OR inside their group.
#[derive(Args, Debug, Clone, Default)]
pub struct ShardFilterArgs {
    /// Only shards of this index
    #[arg(long)]
    pub index: Option<String>,

    /// Only shards on this node
    #[arg(long)]
    pub node: Option<String>,

    /// Only this shard number
    #[arg(long)]
    pub shard: Option<u32>,

    /// Include primary shards
    #[arg(long)]
    pub primary: bool,

    /// Include replica shards
    #[arg(long)]
    pub replica: bool,

    /// Include started shards
    #[arg(long)]
    pub started: bool,

    /// Include relocating shards
    #[arg(long)]
    pub relocating: bool,

    /// Include initializing shards
    #[arg(long)]
    pub initializing: bool,

    /// Include unassigned shards
    #[arg(long)]
    pub unassigned: bool,
}

#[derive(Subcommand, Debug)]
pub enum GetCommands {
    /// List nodes (`_cat/nodes`)
    Nodes {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        render: RenderArgs,
    },

    /// List indices (`_cat/indices`)
    Indices {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        render: RenderArgs,
        /// Only this index
        #[arg(long)]
        index: Option<String>,
    },

    /// List shards (`_cat/shards`)
    Shards {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        render: RenderArgs,
        #[command(flatten)]
        filter: ShardFilterArgs,
    },

    /// List aliases (`_alias`)
    Aliases {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        render: RenderArgs,
        /// Only aliases of this index
        #[arg(long)]
        index: Option<String>,
    },

    /// List running tasks (`_tasks`)
    Tasks {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        render: RenderArgs,
        /// Only tasks whose action matches, `*` is a wildcard (repeatable)
        #[arg(long, value_delimiter = ',')]
        actions: Vec<String>,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration
    Show,

    /// Show config file location
    Path,

    /// Create a config file template
    Init,
}
