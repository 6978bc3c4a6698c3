//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (FileSystem) but are themselves
//! concrete structs, not traits.

mod node_file;
mod session;

pub use node_file::{NodeFile, NodeFileService};
pub use session::{MoveOutcome, TreeSession};
