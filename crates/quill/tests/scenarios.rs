mod common;

use common::Harness;
use core_text::Position;
use pretty_assertions::assert_eq;
use quill::{EditorConfig, KeyEvent};

fn numbered(n: usize) -> String {
    (0..n).map(|i| format!("line {i}")).collect::<Vec<_>>().join("\n")
}

#[test]
fn double_d_deletes_the_cursor_line() {
    let mut h = Harness::with_text("Line 1\nLine 2\nLine 3");
    h.type_str("j");
    h.type_str("dd");
    assert_eq!(h.lines(), vec!["Line 1", "Line 3"]);
    assert_eq!(h.editor.model().cursor().row, 1);
}

#[test]
fn slow_second_d_does_not_delete() {
    let mut h = Harness::with_text("Line 1\nLine 2");
    h.type_str("d");
    h.advance(600);
    h.type_str("d");
    assert_eq!(h.lines(), vec!["Line 1", "Line 2"]);
    h.type_str("d");
    assert_eq!(h.lines(), vec!["Line 2"]);
}

#[test]
fn typewriter_forward_motion_pins_and_backward_motion_holds() {
    let cfg = EditorConfig {
        typewriter_mode: true,
        ..EditorConfig::default()
    };
    let mut h = Harness::new(cfg);
    h.editor.load_text(&numbered(60));
    h.editor.resize(80, 20);
    for _ in 0..25 {
        h.type_str("j");
    }
    assert_eq!(h.editor.model().viewport.scroll_y, 12);
    for _ in 0..5 {
        h.type_str("j");
    }
    assert_eq!(h.editor.model().cursor().row, 30);
    assert_eq!(h.editor.model().viewport.scroll_y, 17);
    h.type_str("kk");
    assert_eq!(h.editor.model().cursor().row, 28);
    assert_eq!(h.editor.model().viewport.scroll_y, 17);
}

#[test]
fn deleting_the_only_line_leaves_one_empty_line() {
    let mut h = Harness::with_text("only");
    h.type_str("dd");
    assert_eq!(h.lines(), vec![""]);
    assert_eq!(h.editor.model().cursor(), Position::origin());
}

#[test]
fn find_is_case_insensitive_by_default() {
    let mut h = Harness::with_text("This is a Test case");
    h.key(KeyEvent::ctrl('f'));
    h.type_str("test");
    h.enter();
    assert!(h.editor.state().prompt.is_none());
    assert_eq!(h.editor.model().cursor(), Position::new(0, 10));
}

#[test]
fn replace_all_then_single_undo() {
    let mut h = Harness::with_text("banana");
    h.key(KeyEvent::ctrl('h'));
    h.type_str("a");
    h.enter();
    h.type_str("X");
    h.enter();
    assert_eq!(h.lines(), vec!["bXnXnX"]);
    assert_eq!(h.status().as_deref(), Some("Replaced 3 occurrences"));
    h.type_str("u");
    assert_eq!(h.lines(), vec!["banana"]);
}
