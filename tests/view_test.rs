//! Tests for expand/collapse state and row flattening

use dndtree::domain::{layout_rows, visible_rows, ExpandedSet, Point};
use dndtree::util::testing::{init_test_setup, sample_forest};

#[test]
fn given_nothing_expanded_when_listing_rows_then_only_roots_show() {
    init_test_setup();
    let forest = sample_forest();

    let rows = visible_rows(&forest, &ExpandedSet::new());

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id(), 1);
    assert!(rows[0].has_children());
    assert!(!rows[0].expanded);
}

#[test]
fn given_partial_expansion_when_listing_rows_then_skips_collapsed_children() {
    let forest = sample_forest();
    let expanded: ExpandedSet = [1].into_iter().collect();

    let rows = visible_rows(&forest, &expanded);

    let listed: Vec<_> = rows.iter().map(|r| (r.id(), r.depth)).collect();
    assert_eq!(listed, vec![(1, 0), (2, 1), (3, 1)]);
}

#[test]
fn given_expand_all_when_listing_rows_then_every_node_shows_in_pre_order() {
    let forest = sample_forest();
    let mut expanded = ExpandedSet::new();
    expanded.expand_all(&forest);

    let rows = visible_rows(&forest, &expanded);

    let ids: Vec<_> = rows.iter().map(|r| r.id()).collect();
    assert_eq!(ids, vec![1, 2, 4, 5, 6, 3]);
    // only nodes with children are recorded
    assert_eq!(expanded.len(), 2);
}

#[test]
fn given_toggle_when_called_twice_then_returns_to_collapsed() {
    let mut expanded = ExpandedSet::new();

    assert!(expanded.toggle(7));
    assert!(expanded.is_expanded(7));
    assert!(!expanded.toggle(7));
    assert!(expanded.is_empty());
}

#[test]
fn given_stale_ids_when_retaining_then_drops_missing_nodes() {
    let forest = sample_forest();
    let mut expanded: ExpandedSet = [1, 2, 99].into_iter().collect();

    expanded.retain_present(&forest);

    assert!(expanded.is_expanded(1));
    assert!(expanded.is_expanded(2));
    assert!(!expanded.is_expanded(99));
}

#[test]
fn given_rows_when_laying_out_then_stacks_them_vertically() {
    let forest = sample_forest();
    let expanded: ExpandedSet = [1].into_iter().collect();
    let rows = visible_rows(&forest, &expanded);

    let placed = layout_rows(&rows, 40.0);

    assert_eq!(placed.len(), 3);
    assert_eq!(placed[0].position, Point::new(0.0, 0.0));
    assert_eq!(placed[2].id, 3);
    assert_eq!(placed[2].position, Point::new(0.0, 80.0));
}
