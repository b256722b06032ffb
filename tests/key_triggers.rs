//! Integration tests for key clicks, key drags and key double-clicks

mod common;

use std::time::{Duration, Instant};

use common::Harness;
use gesture_dispatch::event::{InputEvent, KeyEvent};
use gesture_dispatch::trigger::{KeyCode, Modifiers, MouseButton};

// ============================================================================
// Key clicks
// ============================================================================

#[test]
fn test_alternative_triggers_for_one_click() {
    let mut h = Harness::new();
    h.click_behaviour("click c", &["shift A | G"]);
    h.move_to(5, 6);

    h.tap("g", 0);
    assert_eq!(h.take_log(), ["click c: click(5, 6)"]);

    // "A" needs shift, "G" must not have it
    h.tap("a", 1000);
    assert!(h.take_log().is_empty());

    h.key_down("shift", 2000);
    h.tap("a", 2000);
    h.tap("g", 3000);
    h.key_up("shift");
    assert_eq!(h.take_log(), ["click c: click(5, 6)"]);
}

#[test]
fn test_key_click_uses_last_pointer_position() {
    let mut h = Harness::new();
    h.click_behaviour("mark", &["M"]);

    h.tap("m", 0);
    h.press(MouseButton::Primary, 10, 20);
    h.release(MouseButton::Primary, 11, 21);
    h.tap("m", 1000);
    h.scroll(30, 40, 0.0, 1.0);
    h.tap("m", 2000);

    assert_eq!(
        h.take_log(),
        ["mark: click(0, 0)", "mark: click(11, 21)", "mark: click(30, 40)"]
    );
}

#[test]
fn test_two_key_chord() {
    let mut h = Harness::new();
    h.click_behaviour("chord", &["A B"]);

    h.key_down("a", 0);
    h.key_down("b", 10);
    h.key_up("b");
    h.key_up("a");
    // B alone no longer completes the chord
    h.tap("b", 1000);

    assert_eq!(h.take_log(), ["chord: click(0, 0)"]);
}

#[test]
fn test_named_keys() {
    let mut h = Harness::new();
    h.click_behaviour("next", &["SPACE | ctrl F5"]);

    h.tap("space", 0);
    h.key_down("ctrl", 100);
    h.tap("F5", 100);
    h.key_up("ctrl");

    assert_eq!(h.take_log(), ["next: click(0, 0)", "next: click(0, 0)"]);
}

// ============================================================================
// Key double-click
// ============================================================================

#[test]
fn test_key_double_click() {
    let mut h = Harness::new();
    h.click_behaviour("single", &["K"]);
    h.click_behaviour("double", &["double-click K"]);

    h.tap("k", 0);
    assert_eq!(h.take_log(), ["single: click(0, 0)"]);

    h.tap("k", 100);
    assert_eq!(h.take_log(), ["single: click(0, 0)", "double: click(0, 0)"]);

    h.tap("k", 1000);
    assert_eq!(h.take_log(), ["single: click(0, 0)"]);
}

#[test]
fn test_double_click_interval_is_configurable() {
    let mut h = Harness::new();
    h.handler.set_double_click_interval(Duration::from_millis(50));
    h.click_behaviour("double", &["double-click K"]);

    h.tap("k", 0);
    h.tap("k", 100);
    assert!(h.take_log().is_empty());

    h.tap("k", 120);
    assert_eq!(h.take_log(), ["double: click(0, 0)"]);
}

#[test]
fn test_double_click_is_per_key() {
    let mut h = Harness::new();
    h.click_behaviour("double", &["double-click K"]);

    h.tap("j", 0);
    h.tap("k", 50);
    assert!(h.take_log().is_empty());
}

#[test]
fn test_auto_repeat_refires_without_double_click() {
    let mut h = Harness::new();
    h.click_behaviour("single", &["K"]);
    h.click_behaviour("double", &["double-click K"]);

    h.key_down("k", 0);
    h.key_down("k", 30);
    h.key_down("k", 60);
    h.key_up("k");

    assert_eq!(
        h.take_log(),
        [
            "single: click(0, 0)",
            "single: click(0, 0)",
            "single: click(0, 0)",
        ]
    );
}

// ============================================================================
// Key drags
// ============================================================================

#[test]
fn test_key_drag_follows_pointer() {
    let mut h = Harness::new();
    h.drag_behaviour("drag k", &["K"]);

    h.move_to(1, 1);
    h.key_down("k", 0);
    h.move_to(4, 5);
    h.move_to(6, 7);
    h.key_up("k");
    h.move_to(9, 9);

    assert_eq!(
        h.take_log(),
        [
            "drag k: init(1, 1)",
            "drag k: drag(4, 5)",
            "drag k: drag(6, 7)",
            "drag k: end(6, 7)",
        ]
    );
}

#[test]
fn test_auto_repeat_does_not_restart_key_drag() {
    let mut h = Harness::new();
    h.drag_behaviour("drag k", &["K"]);

    h.key_down("k", 0);
    h.key_down("k", 30);
    h.key_up("k");

    assert_eq!(h.take_log(), ["drag k: init(0, 0)", "drag k: end(0, 0)"]);
}

#[test]
fn test_releasing_modifier_ends_key_drag() {
    let mut h = Harness::new();
    h.drag_behaviour("drag k", &["shift K"]);

    h.key_down("shift", 0);
    h.key_down("k", 10);
    h.move_to(2, 2);
    h.key_up("shift");
    h.move_to(3, 3);
    h.key_up("k");

    assert_eq!(
        h.take_log(),
        [
            "drag k: init(0, 0)",
            "drag k: drag(2, 2)",
            "drag k: end(2, 2)",
        ]
    );
}

#[test]
fn test_extra_key_does_not_end_key_drag() {
    let mut h = Harness::new();
    h.drag_behaviour("drag k", &["K"]);

    h.key_down("k", 0);
    h.tap("j", 10);
    h.move_to(1, 1);
    h.key_up("k");

    assert_eq!(
        h.take_log(),
        ["drag k: init(0, 0)", "drag k: drag(1, 1)", "drag k: end(1, 1)"]
    );
}

#[test]
fn test_key_drag_fires_before_key_click() {
    let mut h = Harness::new();
    h.click_behaviour("click", &["K"]);
    h.drag_behaviour("drag", &["K"]);

    h.tap("k", 0);

    assert_eq!(
        h.take_log(),
        ["drag: init(0, 0)", "click: click(0, 0)", "drag: end(0, 0)"]
    );
}

#[test]
fn test_key_drag_and_button_drag_run_side_by_side() {
    let mut h = Harness::new();
    h.drag_behaviour("drag k", &["K"]);
    h.drag_behaviour("drag1", &["K button1"]);

    h.key_down("k", 0);
    h.press(MouseButton::Primary, 1, 1);
    h.drag_to(2, 2);
    h.release(MouseButton::Primary, 3, 3);
    h.key_up("k");

    assert_eq!(
        h.take_log(),
        [
            "drag k: init(0, 0)",
            "drag1: init(1, 1)",
            "drag1: drag(2, 2)",
            "drag1: end(3, 3)",
            "drag k: end(3, 3)",
        ]
    );
}

// ============================================================================
// AltGraph, Windows and unidentified keys
// ============================================================================

#[test]
fn test_alt_graph_is_tracked_from_key_events() {
    let mut h = Harness::new();
    h.click_behaviour("special", &["altgraph K"]);

    h.key_down("ALT_GRAPH", 0);
    assert!(h.handler.tracker().alt_graph_pressed());
    h.tap("k", 10);
    h.key_up("ALT_GRAPH");
    assert!(!h.handler.tracker().alt_graph_pressed());
    h.tap("k", 1000);

    assert_eq!(h.take_log(), ["special: click(0, 0)"]);
}

#[test]
fn test_windows_key_is_tracked_from_key_events() {
    let mut h = Harness::new();
    h.drag_behaviour("snap", &["win button1"]);

    h.key_down("WINDOWS", 0);
    h.press(MouseButton::Primary, 4, 4);
    h.key_up("WINDOWS");
    h.release(MouseButton::Primary, 5, 5);

    assert_eq!(h.take_log(), ["snap: init(4, 4)", "snap: end(5, 5)"]);
}

#[test]
fn test_unidentified_key_is_ignored() {
    let mut h = Harness::new();
    h.click_behaviour("any", &["K"]);
    let now = Instant::now();

    let unknown = KeyEvent::new(KeyCode::Unidentified, Modifiers::NONE);
    h.handler.handle_event_at(&InputEvent::KeyPressed(unknown), now);
    h.handler.handle_event_at(&InputEvent::KeyReleased(unknown), now);

    assert!(h.take_log().is_empty());
    assert!(h.handler.tracker().is_empty());
}

// ============================================================================
// Rebinding
// ============================================================================

#[test]
fn test_rebinding_takes_effect_on_next_event() {
    let mut h = Harness::new();
    h.click_behaviour("mark", &["M"]);

    h.tap("m", 0);
    h.click_behaviour("mark", &["N"]);
    h.tap("m", 1000);
    h.tap("n", 2000);

    assert_eq!(h.take_log(), ["mark: click(0, 0)", "mark: click(0, 0)"]);
    let triggers: Vec<String> = h
        .behaviours
        .input_map()
        .borrow()
        .triggers_for("mark")
        .iter()
        .map(|t| t.to_string())
        .collect();
    assert_eq!(triggers, ["N"]);
}
