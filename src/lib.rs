// lyrics_core: LRC lyric sync engine for the browser.
// Parsing, active-line lookup and scroll policy live here; JS owns the audio element and the DOM.

mod clock;
mod cue_list;
mod error;
mod lrc;
mod scroll;
mod sync;
mod types;

use serde::Serialize;
use wasm_bindgen::prelude::*;

pub use clock::{Clock, JsClock, ManualClock};
pub use cue_list::CueList;
pub use error::EngineError;
pub use lrc::parse;
pub use scroll::{center_on, LineGeometry};
pub use sync::SyncController;
pub use types::*;

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Lyric engine exposed to JavaScript.
/// Every mutating call returns a JSON array of `ViewInstruction`s for the view to apply.
#[wasm_bindgen]
pub struct LyricsEngine {
    sync: SyncController<JsClock>,
}

#[wasm_bindgen]
impl LyricsEngine {
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Result<LyricsEngine, JsValue> {
        Self::from_config_json(config_json).map_err(to_js)
    }

    /// Parse LRC text and start a new session with it.
    pub fn load_source(&mut self, source: &str) -> Result<String, JsValue> {
        let instructions = self.sync.load(CueList::parse(source));
        to_json(&instructions).map_err(to_js)
    }

    /// Start a new session from an already-parsed JSON cue array.
    pub fn load_cues(&mut self, cues_json: &str) -> Result<String, JsValue> {
        self.load_cues_json(cues_json).map_err(to_js)
    }

    /// Playback update with the position in milliseconds.
    pub fn on_playback_tick(&mut self, position_ms: f64, is_playing: bool) -> Result<String, JsValue> {
        let playback = PlaybackState {
            position: Timestamp::from_millis_f64(position_ms),
            is_playing,
        };
        to_json(&self.sync.on_playback_tick(playback)).map_err(to_js)
    }

    /// Playback update with `HTMLMediaElement.currentTime` in seconds.
    pub fn on_playback_tick_secs(
        &mut self,
        current_time_secs: f64,
        is_playing: bool,
    ) -> Result<String, JsValue> {
        let playback = PlaybackState {
            position: Timestamp::from_secs_f64(current_time_secs),
            is_playing,
        };
        to_json(&self.sync.on_playback_tick(playback)).map_err(to_js)
    }

    pub fn on_playback_started(&mut self) {
        self.sync.on_playback_started();
    }

    /// Call on scroll, touchstart and wheel events from the lyrics viewport.
    pub fn on_user_scroll_intent(&mut self) {
        self.sync.on_user_scroll_intent();
    }

    /// Active line index, or -1 when nothing is highlighted.
    pub fn active_index(&self) -> i32 {
        self.sync
            .active_index()
            .map_or(-1, |i| i32::try_from(i).unwrap_or(i32::MAX))
    }

    pub fn cue_count(&self) -> usize {
        self.sync.cues().len()
    }

    pub fn cues_json(&self) -> Result<String, JsValue> {
        to_json(self.sync.cues()).map_err(to_js)
    }

    /// Session lifecycle as a JSON string: `"Empty"`, `"Loaded"` or `"Tracking"`.
    pub fn state_json(&self) -> Result<String, JsValue> {
        to_json(&self.sync.state()).map_err(to_js)
    }
}

impl LyricsEngine {
    fn from_config_json(config_json: &str) -> Result<LyricsEngine, EngineError> {
        let config: EngineConfig = serde_json::from_str(config_json)
            .map_err(|e| EngineError::InvalidConfig(e.to_string()))?;

        Ok(LyricsEngine {
            sync: SyncController::new(config.sync, JsClock),
        })
    }

    fn load_cues_json(&mut self, cues_json: &str) -> Result<String, EngineError> {
        let cues: CueList = serde_json::from_str(cues_json)
            .map_err(|e| EngineError::InvalidCues(e.to_string()))?;
        to_json(&self.sync.load(cues))
    }
}

/// Parse LRC text into a JSON cue array without touching any session.
#[wasm_bindgen]
pub fn parse_lrc(source: &str) -> Result<String, JsValue> {
    to_json(&lrc::parse(source)).map_err(to_js)
}

/// Scroll offset that centers a line in its container, for applying `ScrollIntoView`.
#[wasm_bindgen]
pub fn center_offset(line_top: f64, line_height: f64, container_height: f64) -> f64 {
    LineGeometry::new(line_top, line_height, container_height).center_offset()
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, EngineError> {
    Ok(serde_json::to_string(value)?)
}

fn to_js(err: EngineError) -> JsValue {
    JsValue::from_str(&err.to_string())
}
