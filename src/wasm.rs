use std::rc::Rc;

use wasm_bindgen::prelude::*;

use crate::clock::TickClock;
use crate::config::EngineConfig;
use crate::events::EventLog;
use crate::game::Engine;
use crate::types::Input;

/// Browser-facing handle: feeds key names to the engine and hands back
/// serialized state and events.
#[wasm_bindgen]
pub struct ReversiGame {
    engine: Engine,
    events: Rc<EventLog>,
    clock: TickClock,
}

#[wasm_bindgen]
impl ReversiGame {
    #[wasm_bindgen(constructor)]
    pub fn new(width: usize, height: usize) -> Result<ReversiGame, JsValue> {
        let config = EngineConfig::new(width, height);
        let mut engine = Engine::new(config).map_err(to_js_error)?;
        let events = Rc::new(EventLog::new());
        engine.add_observer(events.clone());
        let clock = TickClock::new(engine.update_speed_ms());
        Ok(Self {
            engine,
            events,
            clock,
        })
    }

    /// Feeds one `KeyboardEvent.key` to the engine and returns the events it
    /// produced. Throws once the game is over.
    pub fn press(&mut self, key: &str) -> Result<JsValue, JsValue> {
        self.engine
            .update(Input::from_key(key))
            .map_err(to_js_error)?;
        to_js(&self.events.take())
    }

    pub fn state(&self) -> Result<JsValue, JsValue> {
        to_js(&self.engine.to_game_state())
    }

    pub fn tile(&self, x: usize, y: usize) -> Result<JsValue, JsValue> {
        let tile = self.engine.tile(x, y).map_err(to_js_error)?;
        to_js(&tile)
    }

    /// Final standings, or `undefined` while the game is running.
    pub fn result(&self) -> Result<JsValue, JsValue> {
        match self.engine.to_game_result() {
            Some(result) => to_js(&result),
            None => Ok(JsValue::UNDEFINED),
        }
    }

    /// Polled from the page's animation loop; true once per update interval.
    #[wasm_bindgen(js_name = tickDue)]
    pub fn tick_due(&mut self) -> bool {
        self.clock.is_due()
    }

    #[wasm_bindgen(js_name = updateSpeed)]
    pub fn update_speed(&self) -> u32 {
        u32::try_from(self.engine.update_speed_ms()).unwrap_or(u32::MAX)
    }
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(JsValue::from)
}

fn to_js_error(err: impl std::error::Error) -> JsValue {
    JsError::new(&err.to_string()).into()
}
