//! Command dispatch

use std::io;
use std::path::PathBuf;
use std::sync::{Arc, LazyLock};

use clap::CommandFactory;
use clap_complete::generate;
use itertools::Itertools;
use regex::Regex;
use tracing::{debug, instrument};

use crate::application::{MoveOutcome, NodeFile, NodeFileService, TreeSession};
use crate::cli::args::{Cli, Commands, ConfigCommands, FileArg};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::{
    layout_rows, visible_rows, ExpandedSet, Forest, NodeId, Point, TreeNodeConvert, VisibleRow,
};
use crate::exitcode;
use crate::infrastructure::traits::RealFileSystem;
use crate::infrastructure::InfraError;

/// Execute the parsed command, returning the process exit code.
pub fn execute_command(cli: &Cli) -> CliResult<i32> {
    let cwd = std::env::current_dir().ok();
    let settings = Settings::load(cwd.as_deref())?;
    debug!("settings: {:?}", settings);

    match &cli.command {
        Some(Commands::Show { file }) => cmd_show(&settings, file),
        Some(Commands::Rows { file, expand, all }) => cmd_rows(&settings, file, expand, *all),
        Some(Commands::Move { file, node, parent }) => cmd_move(&settings, file, *node, *parent),
        Some(Commands::Root { file, node }) => cmd_root(&settings, file, *node),
        Some(Commands::Drop {
            file,
            payload,
            target,
            at,
            rows,
        }) => cmd_drop(&settings, file, payload, *target, *at, rows),
        Some(Commands::Flat { file }) => cmd_flat(&settings, file),
        Some(Commands::Config { command }) => cmd_config(&settings, command),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(exitcode::OK)
        }
        None => Err(CliError::Usage(
            "no command given, see --help".to_string(),
        )),
    }
}

fn resolve_file(settings: &Settings, arg: &FileArg) -> CliResult<PathBuf> {
    let path = arg
        .file
        .clone()
        .or_else(|| settings.default_file.clone())
        .ok_or_else(|| {
            CliError::Usage("no node file given and no default_file configured".to_string())
        })?;
    path.canonicalize()
        .map_err(|source| CliError::Infra(InfraError::Io { path, source }))
}

fn load_session(settings: &Settings, arg: &FileArg) -> CliResult<TreeSession<String>> {
    let path = resolve_file(settings, arg)?;
    let service = NodeFileService::new(Arc::new(RealFileSystem));
    let forest = service.load_forest(&path)?;
    Ok(TreeSession::new(forest))
}

fn initial_expansion(settings: &Settings, forest: &Forest<String>) -> ExpandedSet {
    let mut expanded = ExpandedSet::new();
    if settings.expand_all {
        expanded.expand_all(forest);
    }
    expanded
}

fn print_forest(settings: &Settings, forest: &Forest<String>) {
    output::info(&forest.to_tree_string(settings.show_ids));
}

/// Report the outcome of a mutation and pick the exit code.
/// A no-op is a normal gesture outcome: warn, but still exit OK.
fn report(settings: &Settings, session: &TreeSession<String>, outcome: MoveOutcome, what: &str) -> i32 {
    match outcome {
        MoveOutcome::Moved => output::success(what),
        MoveOutcome::Unchanged(Some(reason)) => output::warning(&format!("unchanged: {}", reason)),
        MoveOutcome::Unchanged(None) => output::warning("unchanged: nothing to do"),
    }
    print_forest(settings, session.forest());
    exitcode::OK
}

#[instrument(skip(settings))]
fn cmd_show(settings: &Settings, file: &FileArg) -> CliResult<i32> {
    let session = load_session(settings, file)?;
    print_forest(settings, session.forest());
    Ok(exitcode::OK)
}

#[instrument(skip(settings))]
fn cmd_rows(settings: &Settings, file: &FileArg, expand: &[NodeId], all: bool) -> CliResult<i32> {
    let session = load_session(settings, file)?;
    let forest = session.forest();

    let expanded = if all || (expand.is_empty() && settings.expand_all) {
        let mut expanded = ExpandedSet::new();
        expanded.expand_all(forest);
        expanded
    } else {
        expand.iter().copied().collect()
    };

    let rows = visible_rows(forest, &expanded);
    for (row, placed) in rows.iter().zip(layout_rows(&rows, settings.row_height)) {
        let marker = match (row.has_children(), row.expanded) {
            (false, _) => " ",
            (true, true) => "-",
            (true, false) => "+",
        };
        let label = if settings.show_ids {
            format!("[{}] {}", row.id(), row.node.data)
        } else {
            row.node.data.clone()
        };
        output::info(&format!(
            "{}{} {}  @{}",
            "  ".repeat(row.depth),
            marker,
            label,
            placed.position
        ));
    }
    Ok(exitcode::OK)
}

#[instrument(skip(settings))]
fn cmd_move(settings: &Settings, file: &FileArg, node: NodeId, parent: NodeId) -> CliResult<i32> {
    let mut session = load_session(settings, file)?;
    let outcome = session.move_node(node, parent);
    Ok(report(
        settings,
        &session,
        outcome,
        &format!("moved {} under {}", node, parent),
    ))
}

#[instrument(skip(settings))]
fn cmd_root(settings: &Settings, file: &FileArg, node: NodeId) -> CliResult<i32> {
    let mut session = load_session(settings, file)?;
    let outcome = session.move_node_to_root(node);
    Ok(report(settings, &session, outcome, &format!("moved {} to root", node)))
}

static ROW_RE: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^\s*(-?\d+)\s*@\s*(.+)$"));

/// Parse a visible row given as `ID@X,Y`.
pub fn parse_row(spec: &str) -> CliResult<VisibleRow> {
    let re = ROW_RE
        .as_ref()
        .map_err(|e| CliError::InvalidArgs(e.to_string()))?;
    let invalid = || CliError::InvalidArgs(format!("row must look like ID@X,Y, got `{}`", spec));
    let caps = re.captures(spec).ok_or_else(invalid)?;
    let id = caps[1].parse::<NodeId>().map_err(|_| invalid())?;
    let position = caps[2].parse::<Point>().map_err(|_| invalid())?;
    Ok(VisibleRow::new(id, position))
}

#[instrument(skip(settings))]
fn cmd_drop(
    settings: &Settings,
    file: &FileArg,
    payload: &str,
    target: Option<NodeId>,
    at: Point,
    rows: &[String],
) -> CliResult<i32> {
    let mut session = load_session(settings, file)?;

    let visible: Vec<VisibleRow> = if rows.is_empty() {
        let forest = session.forest();
        let expanded = initial_expansion(settings, forest);
        layout_rows(&visible_rows(forest, &expanded), settings.row_height)
    } else {
        rows.iter()
            .map(|r| parse_row(r))
            .collect::<CliResult<Vec<_>>>()?
    };
    debug!(
        "visible rows: {}",
        visible.iter().map(|r| format!("{}@{}", r.id, r.position)).join(" ")
    );

    let outcome = session.handle_drop(payload, target, at, &visible);
    Ok(report(
        settings,
        &session,
        outcome,
        &format!("dropped {} at {}", payload.trim(), at),
    ))
}

#[instrument(skip(settings))]
fn cmd_flat(settings: &Settings, file: &FileArg) -> CliResult<i32> {
    let session = load_session(settings, file)?;
    let toml = NodeFile::from_forest(session.forest()).to_toml()?;
    output::info(&toml);
    Ok(exitcode::OK)
}

fn cmd_config(settings: &Settings, command: &ConfigCommands) -> CliResult<i32> {
    match command {
        ConfigCommands::Show => output::info(&settings.to_toml()?),
        ConfigCommands::Template => output::info(&Settings::template()),
        ConfigCommands::Path => {
            output::header("Config locations");
            match global_config_path() {
                Some(path) => output::action("global", &path.display()),
                None => output::detail("global: unavailable"),
            }
            if let Ok(cwd) = std::env::current_dir() {
                output::action("local", &local_config_path(&cwd).display());
            }
        }
    }
    Ok(exitcode::OK)
}
