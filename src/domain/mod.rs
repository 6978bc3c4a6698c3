//! Domain layer: tree entities and mutation logic
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod builder;
pub mod drop;
pub mod error;
pub mod forest;
pub mod node;
pub mod render;
pub mod view;

pub use builder::{build_tree, TreeBuilder};
pub use drop::{find_closest_child, parse_drag_payload, resolve_drop, DropAction, Point, VisibleRow};
pub use error::{DomainError, DomainResult};
pub use forest::{Forest, PreOrderIter};
pub use node::{Node, NodeId};
pub use render::TreeNodeConvert;
pub use view::{layout_rows, visible_rows, ExpandedSet, RowView};
