//! Integration tests for button drags, pointer clicks and scrolling

mod common;

use common::Harness;
use gesture_dispatch::trigger::MouseButton;

// ============================================================================
// Button drags
// ============================================================================

#[test]
fn test_button1_drag_lifecycle() {
    let mut h = Harness::new();
    h.drag_behaviour("drag1", &["button1"]);

    h.press(MouseButton::Primary, 10, 10);
    h.drag_to(12, 14);
    h.drag_to(20, 30);
    h.release(MouseButton::Primary, 21, 31);

    assert_eq!(
        h.take_log(),
        [
            "drag1: init(10, 10)",
            "drag1: drag(12, 14)",
            "drag1: drag(20, 30)",
            "drag1: end(21, 31)",
        ]
    );
    assert!(!h.handler.has_active_gestures());
}

#[test]
fn test_wrong_button_does_not_start_drag() {
    let mut h = Harness::new();
    h.drag_behaviour("drag1", &["button1"]);

    h.press(MouseButton::Secondary, 0, 0);
    h.drag_to(5, 5);
    h.release(MouseButton::Secondary, 5, 5);

    assert!(h.take_log().is_empty());
}

#[test]
fn test_every_matching_drag_starts_and_ends_once() {
    let mut h = Harness::new();
    h.drag_behaviour("pan", &["button1"]);
    h.drag_behaviour("select", &["button1"]);

    h.press(MouseButton::Primary, 1, 1);
    h.drag_to(2, 2);
    h.release(MouseButton::Primary, 3, 3);
    // A stray second release has nothing left to end
    h.release(MouseButton::Primary, 4, 4);

    let log = h.take_log();
    assert_eq!(log.len(), 6);
    for name in ["pan", "select"] {
        let calls: Vec<_> = log.iter().filter(|l| l.starts_with(name)).collect();
        assert_eq!(
            calls,
            [
                &format!("{}: init(1, 1)", name),
                &format!("{}: drag(2, 2)", name),
                &format!("{}: end(3, 3)", name),
            ]
        );
    }
}

#[test]
fn test_same_behaviour_under_two_triggers() {
    let mut h = Harness::new();
    h.drag_behaviour("pan", &["button1 | button3"]);

    h.press(MouseButton::Secondary, 0, 0);
    h.release(MouseButton::Secondary, 1, 1);

    assert_eq!(h.take_log(), ["pan: init(0, 0)", "pan: end(1, 1)"]);
}

#[test]
fn test_drag_survives_release_of_extra_button() {
    let mut h = Harness::new();
    h.drag_behaviour("drag1", &["button1"]);

    h.press(MouseButton::Primary, 0, 0);
    h.press(MouseButton::Secondary, 1, 1);
    h.release(MouseButton::Secondary, 2, 2);
    h.drag_to(3, 3);
    h.release(MouseButton::Primary, 4, 4);

    assert_eq!(
        h.take_log(),
        ["drag1: init(0, 0)", "drag1: drag(3, 3)", "drag1: end(4, 4)"]
    );
}

#[test]
fn test_chord_drag_ends_when_either_button_is_released() {
    let mut h = Harness::new();
    h.drag_behaviour("chord", &["button1 button3"]);

    h.press(MouseButton::Primary, 0, 0);
    assert!(h.take_log().is_empty());

    h.press(MouseButton::Secondary, 1, 1);
    h.release(MouseButton::Primary, 2, 2);

    assert_eq!(h.take_log(), ["chord: init(1, 1)", "chord: end(2, 2)"]);
}

#[test]
fn test_modifier_drag_needs_exact_modifiers() {
    let mut h = Harness::new();
    h.drag_behaviour("rotate", &["ctrl button1"]);

    h.press(MouseButton::Primary, 0, 0);
    h.release(MouseButton::Primary, 0, 0);
    assert!(h.take_log().is_empty());

    h.key_down("ctrl", 0);
    h.press(MouseButton::Primary, 5, 5);
    h.drag_to(6, 6);
    // Letting go of ctrl mid-drag is only noticed at release
    h.key_up("ctrl");
    h.drag_to(7, 7);
    h.release(MouseButton::Primary, 8, 8);

    assert_eq!(
        h.take_log(),
        [
            "rotate: init(5, 5)",
            "rotate: drag(6, 6)",
            "rotate: drag(7, 7)",
            "rotate: end(8, 8)",
        ]
    );
}

#[test]
fn test_key_held_during_button_drag() {
    let mut h = Harness::new();
    h.drag_behaviour("measure", &["M button1"]);

    h.key_down("m", 0);
    h.press(MouseButton::Primary, 1, 2);
    h.key_up("m");
    h.release(MouseButton::Primary, 3, 4);

    assert_eq!(h.take_log(), ["measure: init(1, 2)", "measure: end(3, 4)"]);
}

#[test]
fn test_double_click_drag_starts_on_second_press() {
    let mut h = Harness::new();
    h.drag_behaviour("box", &["double-click button1"]);
    h.drag_behaviour("drag1", &["button1"]);

    h.press_n(MouseButton::Primary, 0, 0, 1);
    h.release(MouseButton::Primary, 0, 0);
    h.press_n(MouseButton::Primary, 0, 0, 2);
    h.drag_to(9, 9);
    h.release(MouseButton::Primary, 9, 9);

    assert_eq!(
        h.take_log(),
        [
            "drag1: init(0, 0)",
            "drag1: end(0, 0)",
            "box: init(0, 0)",
            "box: drag(9, 9)",
            "box: end(9, 9)",
        ]
    );
}

#[test]
fn test_pointer_move_does_not_drive_button_drags() {
    let mut h = Harness::new();
    h.drag_behaviour("drag1", &["button1"]);

    h.press(MouseButton::Primary, 0, 0);
    h.move_to(5, 5);
    h.release(MouseButton::Primary, 6, 6);

    assert_eq!(h.take_log(), ["drag1: init(0, 0)", "drag1: end(6, 6)"]);
}

// ============================================================================
// Clicks
// ============================================================================

#[test]
fn test_button_click() {
    let mut h = Harness::new();
    h.click_behaviour("select", &["button1"]);
    h.click_behaviour("menu", &["button3"]);

    h.click(MouseButton::Primary, 3, 4, 1);
    h.click(MouseButton::Secondary, 5, 6, 1);

    assert_eq!(h.take_log(), ["select: click(3, 4)", "menu: click(5, 6)"]);
}

#[test]
fn test_double_click_also_fires_single_click_binding() {
    let mut h = Harness::new();
    h.click_behaviour("select", &["button1"]);
    h.click_behaviour("open", &["double-click button1"]);

    h.click(MouseButton::Primary, 1, 1, 1);
    assert_eq!(h.take_log(), ["select: click(1, 1)"]);

    h.click(MouseButton::Primary, 1, 1, 2);
    assert_eq!(h.take_log(), ["select: click(1, 1)", "open: click(1, 1)"]);
}

#[test]
fn test_click_with_modifier_and_key() {
    let mut h = Harness::new();
    h.click_behaviour("extend", &["shift button1"]);
    h.click_behaviour("pick", &["P button1"]);

    h.click(MouseButton::Primary, 0, 0, 1);
    assert!(h.take_log().is_empty());

    h.key_down("shift", 0);
    h.click(MouseButton::Primary, 1, 1, 1);
    h.key_up("shift");

    h.key_down("p", 10);
    h.click(MouseButton::Primary, 2, 2, 1);
    h.key_up("p");

    assert_eq!(h.take_log(), ["extend: click(1, 1)", "pick: click(2, 2)"]);
}

// ============================================================================
// Scrolling
// ============================================================================

#[test]
fn test_scroll_axis_and_amount() {
    let mut h = Harness::new();
    h.scroll_behaviour("scroll", &["scroll"]);

    h.scroll(1, 2, 0.0, -3.0);
    h.scroll(1, 2, 2.0, 0.5);

    assert_eq!(
        h.take_log(),
        [
            "scroll: scroll(-3, false, 1, 2)",
            "scroll: scroll(2, true, 1, 2)",
        ]
    );
}

#[test]
fn test_scroll_modifiers_select_behaviour() {
    let mut h = Harness::new();
    h.scroll_behaviour("scroll", &["scroll"]);
    h.scroll_behaviour("zoom", &["ctrl scroll"]);

    h.key_down("ctrl", 0);
    h.scroll(0, 0, 0.0, 1.0);
    h.key_up("ctrl");
    h.scroll(0, 0, 0.0, 1.0);

    assert_eq!(
        h.take_log(),
        ["zoom: scroll(1, false, 0, 0)", "scroll: scroll(1, false, 0, 0)"]
    );
}

#[test]
fn test_scroll_ignores_held_buttons() {
    let mut h = Harness::new();
    h.scroll_behaviour("scroll", &["scroll"]);

    h.press(MouseButton::Primary, 0, 0);
    h.scroll(0, 0, 0.0, 1.0);

    assert_eq!(h.take_log(), ["scroll: scroll(1, false, 0, 0)"]);
}
