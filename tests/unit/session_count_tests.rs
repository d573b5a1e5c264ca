//! Unit tests for lenient session-count resolution.

use drop_farmer::orchestrator::resolve_session_count;

#[test]
fn absent_count_defaults_to_one() {
    assert_eq!(resolve_session_count(None), 1);
}

#[test]
fn positive_count_is_kept() {
    assert_eq!(resolve_session_count(Some("4")), 4);
    assert_eq!(resolve_session_count(Some("1")), 1);
    assert_eq!(resolve_session_count(Some("100")), 100);
}

#[test]
fn zero_collapses_to_one() {
    assert_eq!(resolve_session_count(Some("0")), 1);
}

#[test]
fn negative_collapses_to_one() {
    assert_eq!(resolve_session_count(Some("-3")), 1);
}

#[test]
fn garbage_collapses_to_one() {
    assert_eq!(resolve_session_count(Some("lots")), 1);
    assert_eq!(resolve_session_count(Some("")), 1);
    assert_eq!(resolve_session_count(Some("3.5")), 1);
}

#[test]
fn surrounding_whitespace_is_tolerated() {
    assert_eq!(resolve_session_count(Some(" 7 ")), 7);
}
