//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueHint};

use crate::domain::{NodeId, Point};

/// Hierarchical tree view core: build, expand/collapse and drag-and-drop reparenting
#[derive(Parser, Debug)]
#[command(name = "dndtree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug level, repeat for more (-d info, -dd debug, -ddd trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub debug: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Node file argument shared by tree commands.
#[derive(Args, Debug, Clone)]
pub struct FileArg {
    /// Node file (TOML); falls back to `default_file` from settings
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the forest as a tree
    Show {
        #[command(flatten)]
        file: FileArg,
    },

    /// Print the rows a list would render
    Rows {
        #[command(flatten)]
        file: FileArg,
        /// Expand these nodes
        #[arg(short, long = "expand", value_name = "ID")]
        expand: Vec<NodeId>,
        /// Expand every node with children
        #[arg(long, conflicts_with = "expand")]
        all: bool,
    },

    /// Move a node under a new parent
    Move {
        #[command(flatten)]
        file: FileArg,
        /// Node to move
        node: NodeId,
        /// New parent
        parent: NodeId,
    },

    /// Move a node to the root level
    Root {
        #[command(flatten)]
        file: FileArg,
        /// Node to move
        node: NodeId,
    },

    /// Run a complete drop gesture
    Drop {
        #[command(flatten)]
        file: FileArg,
        /// Drag payload: the dragged node id as text
        #[arg(short, long)]
        payload: String,
        /// Node under the pointer; omit for a drop outside every node
        #[arg(short, long)]
        target: Option<NodeId>,
        /// Drop point as `x,y`
        #[arg(long, value_name = "X,Y", allow_hyphen_values = true)]
        at: Point,
        /// Visible row as `ID@X,Y`; repeatable. Default: lay out every visible row of the forest
        #[arg(long = "row", value_name = "ID@X,Y", allow_hyphen_values = true)]
        rows: Vec<String>,
    },

    /// Print the pre-order flat node list as TOML
    Flat {
        #[command(flatten)]
        file: FileArg,
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

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration
    Show,
    /// Print a template config file
    Template,
    /// Show config file locations
    Path,
}
