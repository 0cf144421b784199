mod common;

use common::{Harness, MemoryFiles, SharedConfigStore, capture_logs};
use core_state::Mode;
use core_text::Position;
use pretty_assertions::assert_eq;
use quill::{
    Control, EditorConfig, Event, FileFormat, FrameRenderer, KeyCode, KeyEvent, LineEnding,
    TickAction,
};
use std::time::Duration;

fn numbered(n: usize) -> String {
    (0..n).map(|i| format!("line {i}")).collect::<Vec<_>>().join("\n")
}

fn opened(path: &str, lines: &[&str], config: EditorConfig) -> Harness {
    let files = MemoryFiles::with_file(path, lines);
    let mut h = Harness::with_parts(config, files, SharedConfigStore::default());
    let now = h.now;
    h.editor.open(path, now).unwrap();
    h
}

#[test]
fn open_missing_file_starts_empty_named_document() {
    let mut h = Harness::new(EditorConfig::default());
    let now = h.now;
    h.editor.open("notes.md", now).unwrap();
    assert_eq!(h.lines(), vec![""]);
    assert_eq!(h.status().as_deref(), Some("New file: notes.md"));
    h.type_str("ihi");
    h.key(KeyEvent::ctrl('s'));
    assert_eq!(h.files.get("notes.md"), Some(vec!["hi".to_string()]));
    assert!(!h.editor.state().buffer.is_dirty());
}

#[test]
fn insert_burst_is_one_undo_step() {
    let mut h = Harness::with_text("draft");
    h.type_str("A, revised");
    h.esc();
    assert_eq!(h.lines(), vec!["draft, revised"]);
    assert_eq!(h.editor.state().mode, Mode::Navigation);
    h.type_str("u");
    assert_eq!(h.lines(), vec!["draft"]);
    h.key(KeyEvent::ctrl('r'));
    assert_eq!(h.lines(), vec!["draft, revised"]);
}

#[test]
fn enter_closes_the_undo_record() {
    let mut h = Harness::with_text("");
    h.type_str("iab");
    h.enter();
    h.type_str("cd");
    h.esc();
    assert_eq!(h.lines(), vec!["ab", "cd"]);
    h.type_str("u");
    assert_eq!(h.lines(), vec!["ab", ""]);
}

#[test]
fn save_writes_and_marks_clean() {
    let mut h = opened("ch1.md", &["It was late."], EditorConfig::default());
    h.type_str("A Again.");
    h.esc();
    assert!(h.editor.state().buffer.is_dirty());
    h.key(KeyEvent::ctrl('s'));
    assert_eq!(h.files.get("ch1.md"), Some(vec!["It was late. Again.".to_string()]));
    assert!(!h.editor.state().buffer.is_dirty());
    assert_eq!(h.status().as_deref(), Some("Saved ch1.md"));
}

#[test]
fn failed_save_keeps_buffer_and_history() {
    let mut h = opened("ch1.md", &["text"], EditorConfig::default());
    h.type_str("x");
    let depth = h.editor.state().undo_depth();
    h.files.set_fail_writes(true);
    h.key(KeyEvent::ctrl('s'));
    assert!(h.status().unwrap().starts_with("Save failed"));
    assert!(h.editor.state().buffer.is_dirty());
    assert_eq!(h.lines(), vec!["ext"]);
    assert_eq!(h.editor.state().undo_depth(), depth);
    assert_eq!(h.files.get("ch1.md"), Some(vec!["text".to_string()]));
}

#[test]
fn save_without_path_reports() {
    let mut h = Harness::with_text("scratch");
    let now = h.now;
    assert!(!h.editor.save(now).unwrap());
    assert_eq!(h.status().as_deref(), Some("No file name; nothing saved"));
}

#[test]
fn auto_save_only_when_dirty_and_named() {
    let cfg = EditorConfig {
        auto_save_interval_ms: 1_000,
        ..EditorConfig::default()
    };
    let mut h = opened("a.md", &["one"], cfg);
    let now = h.now;
    h.editor.tick(now);
    h.advance(1_000);
    let actions = h.editor.tick(h.now);
    assert!(!actions.iter().any(|a| matches!(a, TickAction::AutoSave { .. })));
    assert_eq!(h.files.write_count(), 0);

    h.type_str("x");
    h.advance(1_000);
    let actions = h.editor.tick(h.now);
    assert!(actions.contains(&TickAction::AutoSave { ok: true }));
    assert_eq!(h.files.get("a.md"), Some(vec!["ne".to_string()]));
    assert!(!h.editor.state().buffer.is_dirty());
}

#[test]
fn auto_save_skips_unnamed_buffer() {
    let cfg = EditorConfig {
        auto_save_interval_ms: 1_000,
        ..EditorConfig::default()
    };
    let mut h = Harness::new(cfg);
    h.editor.load_text("abc");
    h.type_str("x");
    let now = h.now;
    h.editor.tick(now);
    h.advance(1_000);
    let actions = h.editor.tick(h.now);
    assert!(!actions.iter().any(|a| matches!(a, TickAction::AutoSave { .. })));
    assert!(h.editor.state().buffer.is_dirty());
}

#[test]
fn tick_expires_status_and_undo_record() {
    let mut h = Harness::with_text("abc");
    h.type_str("ix");
    h.key(KeyEvent::ctrl('c'));
    assert_eq!(h.status().as_deref(), Some("Copied to clipboard"));
    h.advance(3_500);
    let actions = h.editor.tick(h.now);
    assert!(actions.contains(&TickAction::StatusCleared));
    assert!(actions.contains(&TickAction::UndoRecordClosed));
    assert_eq!(h.status(), None);

    // A new burst after the idle close is its own undo step.
    h.type_str("y");
    h.esc();
    h.type_str("u");
    assert_eq!(h.lines(), vec!["xabc"]);
}

#[test]
fn cursor_blinks_and_keys_show_it() {
    let mut h = Harness::with_text("abc");
    let now = h.now;
    h.editor.tick(now);
    h.advance(530);
    let actions = h.editor.tick(h.now);
    assert!(actions.contains(&TickAction::CursorBlink { visible: false }));
    assert!(!h.editor.cursor_visible());
    h.type_str("l");
    assert!(h.editor.cursor_visible());
}

#[test]
fn quit_guard_requires_second_press_on_dirty_buffer() {
    let mut h = Harness::with_text("abc");
    h.type_str("x");
    assert_eq!(h.key(KeyEvent::ctrl('q')), Control::Continue);
    assert!(h.status().unwrap().starts_with("Unsaved changes"));
    assert!(!h.editor.is_shut_down());
    assert_eq!(h.key(KeyEvent::ctrl('q')), Control::Quit);
    assert!(h.editor.is_shut_down());
    assert!(h.editor.tick(h.now + Duration::from_secs(60)).is_empty());
}

#[test]
fn quit_guard_disarms_on_other_keys_and_timeout() {
    let mut h = Harness::with_text("abc");
    h.type_str("x");
    h.key(KeyEvent::ctrl('q'));
    h.type_str("l");
    assert_eq!(h.key(KeyEvent::ctrl('q')), Control::Continue);
    h.advance(600);
    assert_eq!(h.key(KeyEvent::ctrl('q')), Control::Continue);
}

#[test]
fn clean_buffer_quits_immediately() {
    let mut h = Harness::with_text("abc");
    assert_eq!(h.key(KeyEvent::ctrl('q')), Control::Quit);
    let now = h.now;
    assert_eq!(h.editor.handle_event(Event::Key(KeyEvent::char('x')), now), Control::Quit);
    assert_eq!(h.lines(), vec!["abc"]);
}

#[test]
fn prompts_swallow_editing_keys() {
    let mut h = Harness::with_text("keep me");
    h.key(KeyEvent::ctrl('f'));
    h.type_str("ddxu");
    assert_eq!(h.lines(), vec!["keep me"]);
    assert_eq!(h.editor.state().prompt.as_ref().map(|p| p.input().to_string()).as_deref(), Some("ddxu"));
    h.esc();
    assert!(h.editor.state().prompt.is_none());
    assert_eq!(h.editor.state().mode, Mode::Navigation);
    assert_eq!(h.lines(), vec!["keep me"]);
}

#[test]
fn info_dialog_consumes_one_key() {
    let mut h = Harness::with_text("three little words");
    h.key(KeyEvent::ctrl('w'));
    let prompt = h.editor.state().prompt.clone().unwrap();
    assert_eq!(prompt.title, "Word Count");
    assert_eq!(prompt.body[0], "Words: 3");
    h.type_str("x");
    assert!(h.editor.state().prompt.is_none());
    assert_eq!(h.lines(), vec!["three little words"]);
}

#[test]
fn goto_line_prompt_moves_cursor() {
    let mut h = Harness::with_text(&numbered(50));
    h.key(KeyEvent::ctrl('g'));
    h.type_str("40");
    h.enter();
    assert_eq!(h.editor.model().cursor(), Position::new(39, 0));
    let vp = &h.editor.model().viewport;
    assert!(39 >= vp.scroll_y && 39 < vp.scroll_y + vp.height);
}

#[test]
fn cut_and_paste_through_keys() {
    let mut h = Harness::with_text("alpha\nbeta");
    h.key(KeyEvent::ctrl('l'));
    h.key(KeyEvent::ctrl('x'));
    assert_eq!(*h.clipboard.text.borrow(), "alpha");
    assert_eq!(h.lines(), vec!["", "beta"]);
    h.type_str("jp");
    assert_eq!(h.lines(), vec!["", "alphabeta"]);
    h.type_str("u");
    assert_eq!(h.lines(), vec!["", "beta"]);
}

#[test]
fn typewriter_toggle_recenters_and_persists() {
    let mut h = Harness::with_text(&numbered(60));
    h.key(KeyEvent::ctrl('g'));
    h.type_str("21");
    h.enter();
    assert_eq!(h.editor.model().viewport.scroll_y, 1);
    h.key(KeyEvent::ctrl('t'));
    assert!(h.editor.config().typewriter_mode);
    assert_eq!(h.editor.model().viewport.scroll_y, 20 - 13);
    assert!(h.store.saved.borrow().last().is_some_and(|c| c.typewriter_mode));
    h.key(KeyEvent::plain(KeyCode::F(9)));
    assert!(!h.editor.config().typewriter_mode);
    assert_eq!(h.store.saved.borrow().len(), 2);
}

#[test]
fn focus_toggle_dims_other_rows() {
    let mut h = Harness::with_text("a\nb\nc\nd\ne");
    h.type_str("jj");
    h.key(KeyEvent::plain(KeyCode::F(3)));
    assert!(h.editor.focus().enabled);
    assert!(h.editor.config().focus_mode);
    let snap = h.editor.snapshot();
    let focused: Vec<usize> = snap.visible_lines.iter().filter(|l| l.focused).map(|l| l.row).collect();
    assert_eq!(focused, vec![1, 2, 3]);
    let mut renderer = FrameRenderer::default();
    h.editor.render(&mut renderer);
    assert_eq!(renderer.frames, 1);
    assert_eq!(renderer.last[0], "~ a");
}

#[test]
fn config_persist_failure_is_reported() {
    let store = SharedConfigStore {
        fail: true,
        ..SharedConfigStore::default()
    };
    let mut h = Harness::with_parts(EditorConfig::default(), MemoryFiles::default(), store);
    h.key(KeyEvent::ctrl('t'));
    assert!(h.editor.config().typewriter_mode);
    assert!(h.status().unwrap().starts_with("Could not save settings"));
}

#[test]
fn resize_event_keeps_cursor_visible() {
    let mut h = Harness::with_text(&numbered(40));
    h.type_str("G");
    let now = h.now;
    h.editor.handle_event(Event::Resize(80, 5), now);
    let vp = &h.editor.model().viewport;
    assert_eq!(vp.height, 5);
    assert_eq!(vp.scroll_y, 35);
}

#[test]
fn save_is_logged_on_session_target() {
    let mut h = opened("log.md", &["x"], EditorConfig::default());
    h.type_str("x");
    let now = h.now;
    let logs = capture_logs(|| {
        h.editor.save(now).unwrap();
    });
    assert!(logs.contains("save_ok"), "logs: {logs}");
    assert!(logs.contains("log.md"));
}

#[test]
fn unedited_crlf_document_saves_in_its_own_format() {
    let format = FileFormat {
        line_ending: LineEnding::Crlf,
        trailing_newline: false,
    };
    let files = MemoryFiles::with_formatted_file("win.txt", &["a", "b"], format);
    let mut h = Harness::with_parts(EditorConfig::default(), files, SharedConfigStore::default());
    let now = h.now;
    h.editor.open("win.txt", now).unwrap();
    assert_eq!(h.editor.file_format(), format);
    h.key(KeyEvent::ctrl('s'));
    assert_eq!(h.files.write_count(), 1);
    assert_eq!(h.files.format_of("win.txt"), Some(format));
    assert_eq!(h.files.get("win.txt"), Some(vec!["a".to_string(), "b".to_string()]));
}

#[test]
fn new_document_saves_with_lf_and_trailing_newline() {
    let mut h = Harness::new(EditorConfig::default());
    let now = h.now;
    h.editor.open("fresh.md", now).unwrap();
    h.type_str("ix");
    h.key(KeyEvent::ctrl('s'));
    assert_eq!(h.files.format_of("fresh.md"), Some(FileFormat::default()));
}

#[test]
fn out_of_range_typewriter_position_is_repaired() {
    let config = EditorConfig {
        typewriter_mode: true,
        typewriter_position: 1.5,
        ..EditorConfig::default()
    };
    let mut h = Harness::new(config);
    h.editor.load_text(&numbered(60));
    h.editor.resize(80, 10);
    assert_eq!(h.editor.config().typewriter_position, 0.66);
    h.type_str("G");
    let vp = &h.editor.model().viewport;
    let row = h.editor.model().cursor().row;
    assert_eq!(row, 59);
    assert!(row >= vp.scroll_y && row < vp.scroll_y + vp.height);
    assert_eq!(vp.scroll_y, 59 - 6);
}

#[test]
fn failed_save_from_key_is_logged() {
    let mut h = opened("ro.md", &["x"], EditorConfig::default());
    h.files.set_fail_writes(true);
    h.type_str("x");
    let logs = capture_logs(|| {
        h.key(KeyEvent::ctrl('s'));
    });
    assert!(logs.contains("save_failed"), "logs: {logs}");
    assert!(logs.contains("save_request_failed"), "logs: {logs}");
    assert!(h.status().unwrap().starts_with("Save failed"));
}
