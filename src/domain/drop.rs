//! Drop target resolution for drag-and-drop gestures.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tracing::{debug, trace};

use crate::domain::forest::Forest;
use crate::domain::node::{Node, NodeId};

/// Screen-space coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(&self, other: &Point) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

/// Error parsing a `x,y` coordinate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("expected `x,y` with finite numbers, got `{input}`")]
pub struct PointParseError {
    pub input: String,
}

impl FromStr for Point {
    type Err = PointParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || PointParseError {
            input: s.to_string(),
        };
        let (x, y) = s.split_once(',').ok_or_else(err)?;
        let x = x.trim().parse::<f32>().map_err(|_| err())?;
        let y = y.trim().parse::<f32>().map_err(|_| err())?;
        if !(x.is_finite() && y.is_finite()) {
            return Err(err());
        }
        Ok(Point::new(x, y))
    }
}

/// A row currently rendered by the host list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleRow {
    pub id: NodeId,
    pub position: Point,
}

impl VisibleRow {
    pub fn new(id: NodeId, position: Point) -> Self {
        Self { id, position }
    }
}

/// Decode a drag payload: the node id as plain text.
pub fn parse_drag_payload(payload: &str) -> Option<NodeId> {
    payload.trim().parse().ok()
}

/// Among the visible direct children of `target`, the one nearest to `drop_point`.
///
/// Ties go to the row listed first, and a NaN distance never beats an earlier
/// row. None when no child of `target` is visible.
pub fn find_closest_child<'a, T>(
    target: &'a Node<T>,
    drop_point: Point,
    visible_rows: &[VisibleRow],
) -> Option<&'a Node<T>> {
    visible_rows
        .iter()
        .filter_map(|row| {
            target
                .child(row.id)
                .map(|child| (child, row.position.distance(&drop_point)))
        })
        .fold(None, |best: Option<(&'a Node<T>, f32)>, (child, distance)| match best {
            Some((_, best_distance)) if !is_closer(distance, best_distance) => best,
            _ => Some((child, distance)),
        })
        .map(|(child, distance)| {
            trace!("closest child of {}: {} at {}", target.id, child.id, distance);
            child
        })
}

fn is_closer(candidate: f32, best: f32) -> bool {
    candidate < best || (best.is_nan() && !candidate.is_nan())
}

/// What a drop gesture resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropAction {
    /// Degenerate drop, nothing to do
    Ignore,
    /// Dropped outside any node
    MoveToRoot(NodeId),
    /// Dropped onto a node or one of its visible children
    MoveUnder { node: NodeId, parent: NodeId },
}

/// Resolve a drop of `dragged` onto `target` at `drop_point`.
///
/// A drop without a target, or onto a target that no longer exists, moves the
/// node to the root level. Otherwise the node goes under the nearest visible
/// child of the target, or under the target itself when none is visible.
pub fn resolve_drop<T>(
    forest: &Forest<T>,
    dragged: NodeId,
    target: Option<NodeId>,
    drop_point: Point,
    visible_rows: &[VisibleRow],
) -> DropAction {
    if !forest.contains(dragged) {
        debug!("dropped node {} not in forest", dragged);
        return DropAction::Ignore;
    }

    let Some(target) = target.and_then(|id| forest.find_node(id)) else {
        debug!("dropped {} outside the tree", dragged);
        return DropAction::MoveToRoot(dragged);
    };

    if target.id == dragged {
        return DropAction::Ignore;
    }

    let parent = find_closest_child(target, drop_point, visible_rows)
        .map_or(target.id, |closest| closest.id);
    DropAction::MoveUnder {
        node: dragged,
        parent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_euclidean() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.distance(&b), 5.0);
    }

    #[test]
    fn point_parses_from_comma_pair() {
        assert_eq!("1.5, -2".parse::<Point>(), Ok(Point::new(1.5, -2.0)));
        assert!("12".parse::<Point>().is_err());
        assert!("a,b".parse::<Point>().is_err());
    }

    #[test]
    fn payload_is_trimmed_integer_text() {
        assert_eq!(parse_drag_payload(" 42\n"), Some(42));
        assert_eq!(parse_drag_payload("node-42"), None);
        assert_eq!(parse_drag_payload(""), None);
    }
}
