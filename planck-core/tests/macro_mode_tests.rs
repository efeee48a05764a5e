mod common;

use common::*;
use planck_core::{
    Action, Keycode, Layer, Layout, MacroDef, MacroStep, ModeKind, PlanckEngine,
};
use pretty_assertions::assert_eq;

#[test]
fn macro_steps_are_emitted_in_listed_order() {
    // ctrl+alt+del, spelled out as explicit down/up pairs
    let base = Layer::new("base", vec![vec![Action::Macro(0)]]);
    let mut layout = Layout::new(vec![base]);
    layout.macros = vec![MacroDef {
        steps: vec![
            MacroStep::Down(Keycode::LeftCtrl),
            MacroStep::Down(Keycode::LeftAlt),
            MacroStep::Down(Keycode::Delete),
            MacroStep::Up(Keycode::Delete),
            MacroStep::Up(Keycode::LeftAlt),
            MacroStep::Up(Keycode::LeftCtrl),
        ],
    }];
    let mut engine = engine(layout);

    press(&mut engine, 0, 0, 0);
    assert_eq!(
        emitted(&engine),
        vec![
            down(Keycode::LeftCtrl),
            down(Keycode::LeftAlt),
            down(Keycode::Delete),
            up(Keycode::Delete),
            up(Keycode::LeftAlt),
            up(Keycode::LeftCtrl),
        ]
    );

    // the release of the trigger key adds nothing
    release(&mut engine, 0, 0, 50);
    assert_eq!(emitted(&engine).len(), 6);
}

fn default_mode_layout() -> Layout {
    let qwerty = Layer::new(
        "qwerty",
        vec![vec![Action::Mode(0), Action::Key(Keycode::A)]],
    );
    let colemak = Layer::new(
        "colemak",
        vec![vec![Action::Transparent, Action::Key(Keycode::Q)]],
    );
    let mut layout = Layout::new(vec![qwerty, colemak]);
    layout.modes = vec![ModeKind::Default(1)];
    layout
}

#[test]
fn default_mode_switches_and_persists_the_base_layer() {
    let mut engine = engine(default_mode_layout());
    tap(&mut engine, 0, 0, 0);
    assert_eq!(engine.host().stored, Some(1));
    assert_eq!(engine.host().entered, vec![0]);

    tap(&mut engine, 0, 1, 30);
    assert_eq!(emitted(&engine), vec![down(Keycode::Q), up(Keycode::Q)]);
}

#[test]
fn persisted_base_layer_survives_a_restart() {
    let mut engine = engine(default_mode_layout());
    tap(&mut engine, 0, 0, 0);

    // restart: same storage, fresh engine
    let host = engine.into_host();
    let mut engine = PlanckEngine::new(default_mode_layout(), host).unwrap();
    assert_eq!(engine.layers().default_layer(), 1);

    tap(&mut engine, 0, 1, 0);
    assert_eq!(emitted(&engine), vec![down(Keycode::Q), up(Keycode::Q)]);
}

#[test]
fn storage_failure_is_not_fatal() {
    let mut engine = engine(default_mode_layout());
    engine.host_mut().fail_store = true;

    tap(&mut engine, 0, 0, 0);
    assert_eq!(engine.host().stored, None);

    // the in-memory switch stands and the engine keeps processing
    tap(&mut engine, 0, 1, 30);
    assert_eq!(emitted(&engine), vec![down(Keycode::Q), up(Keycode::Q)]);
}

#[test]
fn out_of_range_persisted_layer_falls_back_to_the_layout_default() {
    let host = TestHost { stored: Some(99), ..TestHost::default() };
    let engine = PlanckEngine::new(default_mode_layout(), host).unwrap();
    assert_eq!(engine.layers().default_layer(), 0);
}

#[test]
fn enter_and_exit_modes_drive_feedback_notifications() {
    // a steno-style regime: enter activates its layer, the layer carries
    // its own exit key
    let base = Layer::new(
        "base",
        vec![vec![Action::Mode(0), Action::Key(Keycode::A)]],
    );
    let steno = Layer::new(
        "steno",
        vec![vec![Action::Mode(1), Action::Key(Keycode::S)]],
    );
    let mut layout = Layout::new(vec![base, steno]);
    layout.modes = vec![
        ModeKind::Enter { layer: 1, suspend: vec![] },
        ModeKind::Exit { layer: 1 },
    ];
    let mut engine = engine(layout);

    tap(&mut engine, 0, 0, 0);
    assert!(engine.layers().is_active(1));
    assert_eq!(engine.host().entered, vec![0]);

    tap(&mut engine, 0, 1, 30);
    assert_eq!(emitted(&engine), vec![down(Keycode::S), up(Keycode::S)]);

    tap(&mut engine, 0, 0, 60);
    assert!(!engine.layers().is_active(1));
    assert_eq!(engine.host().exited, vec![1]);

    clear_emitted(&mut engine);
    tap(&mut engine, 0, 1, 90);
    assert_eq!(emitted(&engine), vec![down(Keycode::A), up(Keycode::A)]);
}

#[test]
fn entering_a_mode_suspends_the_listed_layers() {
    let base = Layer::new(
        "base",
        vec![vec![Action::Toggle(1), Action::Mode(0), Action::Key(Keycode::A)]],
    );
    let overlay = Layer::new(
        "overlay",
        vec![vec![Action::Transparent, Action::Transparent, Action::Key(Keycode::B)]],
    );
    let steno = Layer::new(
        "steno",
        vec![vec![Action::Transparent, Action::Transparent, Action::Key(Keycode::C)]],
    );
    let mut layout = Layout::new(vec![base, overlay, steno]);
    layout.modes = vec![ModeKind::Enter { layer: 2, suspend: vec![1] }];
    let mut engine = engine(layout);

    tap(&mut engine, 0, 0, 0);
    assert!(engine.layers().is_active(1));

    tap(&mut engine, 0, 1, 30);
    assert!(!engine.layers().is_active(1));
    assert!(engine.layers().is_active(2));

    tap(&mut engine, 0, 2, 60);
    assert_eq!(emitted(&engine), vec![down(Keycode::C), up(Keycode::C)]);
}
