//! Tests for CLI argument parsing and exit codes

use clap::Parser;
use rstest::rstest;
use tempfile::TempDir;

use dndtree::cli::commands::parse_row;
use dndtree::cli::{execute_command, Cli, CliError, Commands};
use dndtree::domain::Point;
use dndtree::exitcode;

#[test]
fn given_drop_args_when_parsing_then_fields_are_typed() {
    let cli = Cli::try_parse_from([
        "dndtree", "drop", "-f", "nodes.toml", "--payload", "4", "--target", "1", "--at", "0,230",
        "--row", "2@0,48", "--row", "3@0,240",
    ])
    .unwrap();

    match cli.command {
        Some(Commands::Drop {
            payload,
            target,
            at,
            rows,
            ..
        }) => {
            assert_eq!(payload, "4");
            assert_eq!(target, Some(1));
            assert_eq!(at, Point::new(0.0, 230.0));
            assert_eq!(rows, vec!["2@0,48", "3@0,240"]);
        }
        other => panic!("unexpected command: {:?}", other),
    }
}

#[test]
fn given_bad_point_when_parsing_then_rejected() {
    let result = Cli::try_parse_from(["dndtree", "drop", "--payload", "4", "--at", "nowhere"]);
    assert!(result.is_err());
}

#[test]
fn given_repeated_debug_flag_when_parsing_then_counts() {
    let cli = Cli::try_parse_from(["dndtree", "-dd", "show"]).unwrap();
    assert_eq!(cli.debug, 2);
}

#[rstest]
#[case("4@0,48", 4, Point::new(0.0, 48.0))]
#[case(" 12 @ -3.5, 7 ", 12, Point::new(-3.5, 7.0))]
fn given_row_spec_when_parsing_then_returns_visible_row(
    #[case] spec: &str,
    #[case] id: i64,
    #[case] position: Point,
) {
    let row = parse_row(spec).unwrap();
    assert_eq!(row.id, id);
    assert_eq!(row.position, position);
}

#[rstest]
#[case("4")]
#[case("@0,0")]
#[case("x@0,0")]
#[case("4@0")]
fn given_malformed_row_spec_when_parsing_then_invalid_args(#[case] spec: &str) {
    let err = parse_row(spec).unwrap_err();
    assert!(matches!(err, CliError::InvalidArgs(_)));
    assert_eq!(err.exit_code(), exitcode::USAGE);
}

#[rstest]
#[case::self_parent(&["move", "3", "3"])]
#[case::already_child(&["move", "2", "1"])]
#[case::cycle(&["move", "1", "2"])]
#[case::garbage_payload(&["drop", "--payload", "two", "--target", "1", "--at", "0,0"])]
#[case::onto_itself(&["drop", "--payload", "3", "--target", "3", "--at", "0,0"])]
#[case::valid_move(&["move", "3", "2"])]
fn given_gesture_when_executed_then_exits_ok_even_if_unchanged(#[case] args: &[&str]) {
    // Arrange
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nodes.toml");
    std::fs::write(
        &path,
        "[[nodes]]\nid = 1\ndata = \"a\"\n\n[[nodes]]\nid = 2\nparent_id = 1\ndata = \"b\"\n\n[[nodes]]\nid = 3\nparent_id = 1\ndata = \"c\"\n",
    )
    .unwrap();
    let path = path.to_string_lossy().into_owned();
    let mut argv = vec!["dndtree", args[0], "-f", path.as_str()];
    argv.extend_from_slice(&args[1..]);
    let cli = Cli::try_parse_from(argv).unwrap();

    // Act
    let code = execute_command(&cli).unwrap();

    // Assert
    assert_eq!(code, exitcode::OK);
}
