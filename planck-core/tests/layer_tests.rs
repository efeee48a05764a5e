mod common;

use common::*;
use planck_core::{Action, Keycode, Layer, Layout, TriLayer};

const LOWER: usize = 1;
const RAISE: usize = 2;
const ADJUST: usize = 3;

/// Base row: plain key, lower switch, raise switch, a key shadowed per layer.
/// Mirrors the lower/raise/adjust arrangement of a planck-style board.
fn tri_layout() -> Layout {
    let base = Layer::new(
        "base",
        vec![vec![
            Action::Key(Keycode::A),
            Action::Momentary(LOWER),
            Action::Momentary(RAISE),
            Action::Key(Keycode::D),
        ]],
    );
    let lower = Layer::new(
        "lower",
        vec![vec![
            Action::Key(Keycode::Num1),
            Action::Transparent,
            Action::Transparent,
            Action::Transparent,
        ]],
    );
    let raise = Layer::new(
        "raise",
        vec![vec![
            Action::Key(Keycode::Num2),
            Action::Transparent,
            Action::Transparent,
            Action::Key(Keycode::Equal),
        ]],
    );
    let adjust = Layer::new(
        "adjust",
        vec![vec![
            Action::Key(Keycode::F1),
            Action::Transparent,
            Action::Transparent,
            Action::NoOp,
        ]],
    );
    let mut layout = Layout::new(vec![base, lower, raise, adjust]);
    layout.tri_layer = Some(TriLayer { lower: LOWER, raise: RAISE, adjust: ADJUST });
    layout
}

#[test]
fn highest_active_layer_wins() {
    let mut engine = engine(tri_layout());
    press(&mut engine, 0, 1, 0); // hold lower
    tap(&mut engine, 0, 0, 10);
    assert_eq!(emitted(&engine), vec![down(Keycode::Num1), up(Keycode::Num1)]);
}

#[test]
fn transparent_defers_to_next_lower_layer() {
    let mut engine = engine(tri_layout());
    press(&mut engine, 0, 1, 0); // lower is transparent at col 3
    tap(&mut engine, 0, 3, 10);
    assert_eq!(emitted(&engine), vec![down(Keycode::D), up(Keycode::D)]);
}

#[test]
fn unmapped_position_is_a_noop() {
    let mut engine = engine(tri_layout());
    tap(&mut engine, 5, 9, 0);
    assert!(emitted(&engine).is_empty());
}

#[test]
fn adjust_follows_lower_and_raise_in_all_permutations() {
    let mut engine = engine(tri_layout());
    for (i, (lower, raise)) in [(false, false), (true, false), (false, true), (true, true)]
        .into_iter()
        .enumerate()
    {
        let mut t = i as u64 * 100;
        if lower {
            press(&mut engine, 0, 1, t);
            t += 10;
        }
        if raise {
            press(&mut engine, 0, 2, t);
            t += 10;
        }
        assert_eq!(engine.layers().is_active(ADJUST), lower && raise);
        if lower {
            release(&mut engine, 0, 1, t);
            t += 10;
        }
        if raise {
            release(&mut engine, 0, 2, t);
        }
        assert!(!engine.layers().is_active(ADJUST));
    }
}

#[test]
fn adjust_appears_and_disappears_with_the_held_pair() {
    let mut engine = engine(tri_layout());

    press(&mut engine, 0, 1, 0);
    assert!(engine.layers().is_active(LOWER));
    assert!(!engine.layers().is_active(ADJUST));

    press(&mut engine, 0, 2, 10);
    assert!(engine.layers().is_active(ADJUST));

    // the adjust layer's own bindings resolve while both are held
    tap(&mut engine, 0, 0, 20);
    assert_eq!(emitted(&engine), vec![down(Keycode::F1), up(Keycode::F1)]);

    release(&mut engine, 0, 1, 40);
    assert!(!engine.layers().is_active(ADJUST));
    assert!(engine.layers().is_active(RAISE));

    release(&mut engine, 0, 2, 50);
    assert!(!engine.layers().is_active(RAISE));
}

#[test]
fn toggling_twice_restores_the_original_mapping() {
    let base = Layer::new(
        "base",
        vec![vec![Action::Toggle(1), Action::Key(Keycode::A)]],
    );
    let numpad = Layer::new(
        "numpad",
        vec![vec![Action::Transparent, Action::Key(Keycode::Num7)]],
    );
    let mut engine = engine(Layout::new(vec![base, numpad]));

    tap(&mut engine, 0, 0, 0);
    tap(&mut engine, 0, 1, 20);
    assert_eq!(emitted(&engine), vec![down(Keycode::Num7), up(Keycode::Num7)]);

    clear_emitted(&mut engine);
    tap(&mut engine, 0, 0, 40);
    tap(&mut engine, 0, 1, 60);
    assert_eq!(emitted(&engine), vec![down(Keycode::A), up(Keycode::A)]);
}

#[test]
fn one_shot_layer_applies_to_exactly_the_next_keypress() {
    let base = Layer::new(
        "base",
        vec![vec![
            Action::OneShotLayer(1),
            Action::Key(Keycode::A),
            Action::Key(Keycode::C),
        ]],
    );
    let overlay = Layer::new(
        "overlay",
        vec![vec![
            Action::Transparent,
            Action::Key(Keycode::B),
            Action::Transparent,
        ]],
    );
    let mut engine = engine(Layout::new(vec![base, overlay]));

    tap(&mut engine, 0, 0, 0);
    assert!(engine.layers().is_active(1));

    tap(&mut engine, 0, 1, 20);
    assert_eq!(emitted(&engine), vec![down(Keycode::B), up(Keycode::B)]);
    assert!(!engine.layers().is_active(1));

    clear_emitted(&mut engine);
    tap(&mut engine, 0, 1, 40);
    assert_eq!(emitted(&engine), vec![down(Keycode::A), up(Keycode::A)]);
}

#[test]
fn one_shot_layer_is_consumed_even_through_transparency() {
    let base = Layer::new(
        "base",
        vec![vec![
            Action::OneShotLayer(1),
            Action::Key(Keycode::A),
            Action::Key(Keycode::C),
        ]],
    );
    let overlay = Layer::new(
        "overlay",
        vec![vec![
            Action::Transparent,
            Action::Key(Keycode::B),
            Action::Transparent,
        ]],
    );
    let mut engine = engine(Layout::new(vec![base, overlay]));

    tap(&mut engine, 0, 0, 0);
    // col 2 is transparent on the overlay: the press falls through to the
    // base, but it still was the next keypress
    tap(&mut engine, 0, 2, 20);
    assert_eq!(emitted(&engine), vec![down(Keycode::C), up(Keycode::C)]);
    assert!(!engine.layers().is_active(1));
}

#[test]
fn default_layer_switch_persists() {
    let qwerty = Layer::new("qwerty", vec![vec![Action::Key(Keycode::A)]]);
    let colemak = Layer::new("colemak", vec![vec![Action::Key(Keycode::Q)]]);
    let mut engine = engine(Layout::new(vec![qwerty, colemak]));

    engine.set_default_layer(1).unwrap();
    assert_eq!(engine.host().stored, Some(1));

    tap(&mut engine, 0, 0, 0);
    assert_eq!(emitted(&engine), vec![down(Keycode::Q), up(Keycode::Q)]);
}

#[test]
fn momentary_release_uses_the_press_time_binding() {
    // while lower is held, its own switch position is transparent on the
    // overlay; the release must still deactivate lower rather than
    // re-resolving through the changed stack
    let mut engine = engine(tri_layout());
    press(&mut engine, 0, 1, 0);
    assert!(engine.layers().is_active(LOWER));
    release(&mut engine, 0, 1, 500);
    assert!(!engine.layers().is_active(LOWER));
}
