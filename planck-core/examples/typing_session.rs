//! Simulates a short typing session against a planck-style layout and
//! prints everything the engine emits.
//!
//! Run with `RUST_LOG=debug` to watch the state machines resolve.

use planck_core::{
    Action, Feedback, KeyDirection, KeyEvent, Keycode, KeyPos, Layer, LayerId, Layout,
    LeaderEntry, MacroDef, MacroStep, Modifiers, Persistence, PlanckEngine, TapDanceDef,
    TriLayer,
};

struct ConsoleHost {
    default_layer: Option<LayerId>,
}

impl Feedback for ConsoleHost {
    fn emit_key(&mut self, code: Keycode, direction: KeyDirection) {
        println!("    {direction:?} {code:?}");
    }

    fn mode_entered(&mut self, mode: usize) {
        println!("    mode {mode} entered");
    }

    fn mode_exited(&mut self, mode: usize) {
        println!("    mode {mode} exited");
    }
}

impl Persistence for ConsoleHost {
    fn store_default_layer(&mut self, layer: LayerId) -> planck_core::Result<()> {
        self.default_layer = Some(layer);
        Ok(())
    }

    fn load_default_layer(&mut self) -> Option<LayerId> {
        self.default_layer
    }
}

/// A 2x4 slice of a planck-style keymap: letters, lower/raise switches with
/// a tri-layer, a colon tap dance, a leader key and a one-shot shift.
fn demo_layout() -> Layout {
    use Action::{Key, Leader, Momentary, NoOp, OneShotMods, TapDance, Transparent};

    let base = Layer::new(
        "base",
        vec![
            vec![Key(Keycode::A), Key(Keycode::R), Key(Keycode::S), TapDance(0)],
            vec![Momentary(1), Momentary(2), Leader, OneShotMods(Modifiers::SHIFT)],
        ],
    );
    let lower = Layer::new(
        "lower",
        vec![
            vec![Key(Keycode::Num1), Key(Keycode::Num2), Key(Keycode::Num3), Transparent],
            vec![Transparent, Transparent, Transparent, Transparent],
        ],
    );
    let raise = Layer::new(
        "raise",
        vec![
            vec![Key(Keycode::F1), Key(Keycode::F2), Key(Keycode::F3), Transparent],
            vec![Transparent, Transparent, Transparent, Transparent],
        ],
    );
    let adjust = Layer::new(
        "adjust",
        vec![
            vec![Key(Keycode::Power), NoOp, NoOp, Transparent],
            vec![Transparent, Transparent, Transparent, Transparent],
        ],
    );

    let mut layout = Layout::new(vec![base, lower, raise, adjust]);
    layout.tri_layer = Some(TriLayer { lower: 1, raise: 2, adjust: 3 });
    layout.tap_dances = vec![TapDanceDef {
        actions: vec![Action::Key(Keycode::Semicolon), Action::Macro(0)],
    }];
    layout.macros = vec![
        // shifted semicolon: a colon
        MacroDef {
            steps: vec![
                MacroStep::Down(Keycode::LeftShift),
                MacroStep::Down(Keycode::Semicolon),
                MacroStep::Up(Keycode::Semicolon),
                MacroStep::Up(Keycode::LeftShift),
            ],
        },
        // the "new window" chord bound to the leader sequence below
        MacroDef {
            steps: vec![
                MacroStep::Down(Keycode::LeftCtrl),
                MacroStep::Down(Keycode::LeftAlt),
                MacroStep::Down(Keycode::LeftShift),
                MacroStep::Down(Keycode::E),
                MacroStep::Up(Keycode::E),
                MacroStep::Up(Keycode::LeftShift),
                MacroStep::Up(Keycode::LeftAlt),
                MacroStep::Up(Keycode::LeftCtrl),
            ],
        },
    ];
    layout.leader = vec![LeaderEntry {
        sequence: vec![Keycode::A, Keycode::S],
        action: Action::Macro(1),
    }];
    layout
}

fn main() {
    env_logger::init();

    let host = ConsoleHost { default_layer: None };
    let mut engine = PlanckEngine::new(demo_layout(), host).expect("demo layout is valid");

    let tap = |engine: &mut PlanckEngine<ConsoleHost>, row, col, t| {
        engine.feed(KeyEvent::press(KeyPos::new(row, col), t));
        engine.feed(KeyEvent::release(KeyPos::new(row, col), t + 30));
    };

    println!("plain key:");
    tap(&mut engine, 0, 0, 0);

    println!("lower layer while held:");
    engine.feed(KeyEvent::press(KeyPos::new(1, 0), 100));
    tap(&mut engine, 0, 1, 130);
    engine.feed(KeyEvent::release(KeyPos::new(1, 0), 180));

    println!("lower+raise derive the adjust layer:");
    engine.feed(KeyEvent::press(KeyPos::new(1, 0), 300));
    engine.feed(KeyEvent::press(KeyPos::new(1, 1), 320));
    tap(&mut engine, 0, 0, 340);
    engine.feed(KeyEvent::release(KeyPos::new(1, 1), 390));
    engine.feed(KeyEvent::release(KeyPos::new(1, 0), 400));

    println!("double-struck tap dance:");
    tap(&mut engine, 0, 3, 500);
    tap(&mut engine, 0, 3, 560);
    engine.tick(800);

    println!("leader sequence a-s:");
    tap(&mut engine, 1, 2, 900);
    tap(&mut engine, 0, 0, 950);
    tap(&mut engine, 0, 2, 1000);

    println!("one-shot shift:");
    tap(&mut engine, 1, 3, 1200);
    tap(&mut engine, 0, 1, 1250);
}
