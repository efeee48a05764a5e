//! Shared helpers: a recording host and event shorthand.

#![allow(dead_code)]

use planck_core::{
    Error, Feedback, KeyDirection, KeyEvent, KeyPos, Keycode, LayerId, ModeId, Persistence,
    PlanckEngine, Result, TimeMs,
};

/// Records everything the engine pushes across the external interfaces.
#[derive(Debug, Default)]
pub struct TestHost {
    pub emitted: Vec<(Keycode, KeyDirection)>,
    pub entered: Vec<ModeId>,
    pub exited: Vec<ModeId>,
    pub stored: Option<LayerId>,
    pub fail_store: bool,
}

impl Feedback for TestHost {
    fn emit_key(&mut self, code: Keycode, direction: KeyDirection) {
        self.emitted.push((code, direction));
    }

    fn mode_entered(&mut self, mode: ModeId) {
        self.entered.push(mode);
    }

    fn mode_exited(&mut self, mode: ModeId) {
        self.exited.push(mode);
    }
}

impl Persistence for TestHost {
    fn store_default_layer(&mut self, layer: LayerId) -> Result<()> {
        if self.fail_store {
            return Err(Error::Storage("eeprom write failed".into()));
        }
        self.stored = Some(layer);
        Ok(())
    }

    fn load_default_layer(&mut self) -> Option<LayerId> {
        self.stored
    }
}

pub fn engine(layout: planck_core::Layout) -> PlanckEngine<TestHost> {
    PlanckEngine::new(layout, TestHost::default()).expect("layout should validate")
}

pub fn press(engine: &mut PlanckEngine<TestHost>, row: u8, col: u8, time: TimeMs) {
    engine.feed(KeyEvent::press(KeyPos::new(row, col), time));
}

pub fn release(engine: &mut PlanckEngine<TestHost>, row: u8, col: u8, time: TimeMs) {
    engine.feed(KeyEvent::release(KeyPos::new(row, col), time));
}

/// Press and release in quick succession.
pub fn tap(engine: &mut PlanckEngine<TestHost>, row: u8, col: u8, time: TimeMs) {
    press(engine, row, col, time);
    release(engine, row, col, time + 10);
}

pub fn emitted(engine: &PlanckEngine<TestHost>) -> Vec<(Keycode, KeyDirection)> {
    engine.host().emitted.clone()
}

pub fn clear_emitted(engine: &mut PlanckEngine<TestHost>) {
    engine.host_mut().emitted.clear();
}

pub fn down(code: Keycode) -> (Keycode, KeyDirection) {
    (code, KeyDirection::Down)
}

pub fn up(code: Keycode) -> (Keycode, KeyDirection) {
    (code, KeyDirection::Up)
}
