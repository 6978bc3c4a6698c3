//! dndtree: hierarchical tree view core
//!
//! Builds nested forests from flat node lists and reparents nodes in
//! response to drag-and-drop gestures, one immutable snapshot at a time.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
