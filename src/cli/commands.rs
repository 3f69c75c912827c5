//! Command dispatch

use std::io::{self, Write};

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::filters::{ActionFilter, IndexFilter, RecordFilter, ShardFilter};
use crate::application::render::render_table;
use crate::application::services::RenderOptions;
use crate::application::structured::{format_table, OutputFormat};
use crate::cli::args::{
    Cli, Commands, ConfigCommands, GetCommands, RenderArgs, ShardFilterArgs, SourceArgs,
};
use crate::cli::error::CliResult;
use crate::cli::output;
use crate::config::{config_path, Settings};
use crate::domain::{Entity, Table};
use crate::infrastructure::{InfraError, ServiceContainer};

/// Shown on stderr when a listing has no rows.
pub const NO_RESOURCES: &str = "No resources found.";

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Get { command }) => cmd_get(cli, command),
        Some(Commands::Count {
            source,
            render,
            group_by,
            index,
        }) => cmd_count(cli, source, render, group_by.as_deref(), index.as_deref()),
        Some(Commands::Describe { file }) => cmd_describe(cli, file),
        Some(Commands::Config { command }) => cmd_config(cli, command),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => {
            Cli::command()
                .print_help()
                .map_err(|e| InfraError::io("print help", e))?;
            Ok(())
        }
    }
}

/// Everything one `get` subcommand contributes.
struct GetRequest<'a> {
    entity: Entity,
    source: &'a SourceArgs,
    render: &'a RenderArgs,
    filter: RecordFilter,
}

impl<'a> GetRequest<'a> {
    fn from_command(command: &'a GetCommands) -> CliResult<Self> {
        let request = match command {
            GetCommands::Nodes { source, render } => Self {
                entity: Entity::Node,
                source,
                render,
                filter: RecordFilter::All,
            },
            GetCommands::Indices {
                source,
                render,
                index,
            } => Self {
                entity: Entity::Index,
                source,
                render,
                filter: RecordFilter::Index(IndexFilter::new(index.clone())),
            },
            GetCommands::Shards {
                source,
                render,
                filter,
            } => Self {
                entity: Entity::Shard,
                source,
                render,
                filter: RecordFilter::Shard(shard_filter(filter)),
            },
            GetCommands::Aliases {
                source,
                render,
                index,
            } => Self {
                entity: Entity::Alias,
                source,
                render,
                filter: RecordFilter::Index(IndexFilter::new(index.clone())),
            },
            GetCommands::Tasks {
                source,
                render,
                actions,
            } => Self {
                entity: Entity::Task,
                source,
                render,
                filter: RecordFilter::Task(ActionFilter::new(actions)?),
            },
        };
        Ok(request)
    }
}

fn shard_filter(args: &ShardFilterArgs) -> ShardFilter {
    ShardFilter {
        index: args.index.clone(),
        node: args.node.clone(),
        shard: args.shard,
        primary: args.primary,
        replica: args.replica,
        started: args.started,
        relocating: args.relocating,
        initializing: args.initializing,
        unassigned: args.unassigned,
    }
}

fn effective_format(cli: &Cli, settings: &Settings) -> OutputFormat {
    cli.output.unwrap_or(settings.output)
}

#[instrument(skip(cli))]
fn cmd_get(cli: &Cli, command: &GetCommands) -> CliResult<()> {
    let request = GetRequest::from_command(command)?;
    let settings = Settings::load(cli.config.as_deref())?;
    let format = effective_format(cli, &settings);
    let options = render_options(request.render);

    let container = ServiceContainer::new(settings, &request.source.input);
    let table = container.table_service().list(
        request.entity,
        &request.filter,
        &options,
        container.settings.configured_columns(request.entity),
    )?;
    debug!("cmd_get: {} rows, format {}", table.len(), format);

    write_table(&table, format)
}

#[instrument(skip(cli, source, render))]
fn cmd_count(
    cli: &Cli,
    source: &SourceArgs,
    render: &RenderArgs,
    group_by: Option<&str>,
    index: Option<&str>,
) -> CliResult<()> {
    let settings = Settings::load(cli.config.as_deref())?;
    let format = effective_format(cli, &settings);
    let container = ServiceContainer::new(settings, &source.input);
    let table = container.table_service().count(
        group_by,
        &IndexFilter::new(index.map(str::to_string)),
        &render_options(render),
    )?;
    debug!("cmd_count: {} rows, format {}", table.len(), format);

    write_table(&table, format)
}

fn render_options(render: &RenderArgs) -> RenderOptions {
    RenderOptions {
        columns: render.columns.clone(),
        sort_by: render.sort_by.clone(),
    }
}

fn write_table(table: &Table, format: OutputFormat) -> CliResult<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Table => {
            if table.is_empty() {
                output::note(NO_RESOURCES);
                return Ok(());
            }
            render_table(table, &mut out).map_err(|e| InfraError::io("write table", e))?;
        }
        OutputFormat::Json | OutputFormat::Yaml => {
            let text = format_table(table, format)?;
            write_text(&mut out, &text)?;
        }
    }
    Ok(())
}

fn write_text(out: &mut impl Write, text: &str) -> CliResult<()> {
    out.write_all(text.as_bytes())
        .and_then(|_| {
            if text.ends_with('\n') {
                Ok(())
            } else {
                out.write_all(b"\n")
            }
        })
        .map_err(|e| InfraError::io("write output", e))?;
    Ok(())
}

#[instrument(skip(cli))]
fn cmd_describe(cli: &Cli, file: &str) -> CliResult<()> {
    let settings = Settings::load(cli.config.as_deref())?;
    let format = effective_format(cli, &settings);
    let container = ServiceContainer::new(settings, file);
    let text = container.describe_service().describe(format)?;
    write_text(&mut io::stdout().lock(), &text)
}

fn cmd_config(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = Settings::load(cli.config.as_deref())?;
            write_text(&mut io::stdout().lock(), &settings.to_yaml()?)
        }
        ConfigCommands::Path => {
            let path = config_path(cli.config.as_deref())?.ok_or(InfraError::NoConfigDir)?;
            let state = if path.exists() { "" } else { " (not found)" };
            write_text(
                &mut io::stdout().lock(),
                &format!("{}{}", path.display(), state),
            )
        }
        ConfigCommands::Init => {
            let path = config_path(cli.config.as_deref())?.ok_or(InfraError::NoConfigDir)?;
            if path.exists() {
                return Err(InfraError::ConfigExists(path).into());
            }
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| InfraError::io(format!("create {}", parent.display()), e))?;
            }
            std::fs::write(&path, Settings::template())
                .map_err(|e| InfraError::io(format!("write {}", path.display()), e))?;
            output::action("Created", &path.display());
            Ok(())
        }
    }
}
