// Strong typing over raw numbers. Newtypes for playback time; wire types for the JS view layer.

use serde::{Deserialize, Serialize};

/// Playback timestamp in milliseconds. Newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct Timestamp(u64);

impl Timestamp {
    pub const ZERO: Timestamp = Timestamp(0);

    pub fn from_millis(ms: u64) -> Self {
        Timestamp(ms)
    }

    /// Normalize a fractional millisecond value from JS.
    /// Rounds down so a position never reaches a cue early.
    /// Negative and NaN values saturate to zero.
    pub fn from_millis_f64(ms: f64) -> Self {
        Timestamp(ms.floor() as u64)
    }

    /// Normalize `HTMLMediaElement.currentTime` (fractional seconds).
    pub fn from_secs_f64(secs: f64) -> Self {
        Self::from_millis_f64(secs * 1000.0)
    }

    pub fn as_millis(&self) -> u64 {
        self.0
    }

    pub fn as_secs(&self) -> f64 {
        self.0 as f64 / 1000.0
    }

    pub fn saturating_add_millis(self, ms: u64) -> Self {
        Timestamp(self.0.saturating_add(ms))
    }
}

/// One timed lyric line. Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cue {
    #[serde(rename = "time_ms")]
    pub time: Timestamp,
    #[serde(default)]
    pub text: String,
}

impl Cue {
    pub fn new(time: Timestamp, text: impl Into<String>) -> Self {
        Cue {
            time,
            text: text.into(),
        }
    }
}

/// Snapshot reported by the external playback collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PlaybackState {
    pub position: Timestamp,
    pub is_playing: bool,
}

impl PlaybackState {
    pub fn playing(position: Timestamp) -> Self {
        PlaybackState {
            position,
            is_playing: true,
        }
    }

    pub fn paused(position: Timestamp) -> Self {
        PlaybackState {
            position,
            is_playing: false,
        }
    }
}

/// Session lifecycle, derived from the loaded cues and active index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SessionState {
    /// No cues loaded.
    Empty,
    /// Cues present, nothing highlighted yet.
    Loaded,
    /// A cue is active.
    Tracking,
}

/// Engine configuration passed from JS.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EngineConfig {
    #[serde(default)]
    pub sync: SyncSettings,
}

/// Lyric sync behavior settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncSettings {
    /// Quiet window after manual scroll/touch/wheel input (milliseconds).
    #[serde(default = "default_scroll_suppress_ms")]
    pub scroll_suppress_ms: u64,
    /// Request animated scrolling when centering the active line.
    #[serde(default = "default_true")]
    pub smooth_scroll: bool,
    /// Emit scroll-into-view instructions at all. Highlighting is unaffected.
    #[serde(default = "default_true")]
    pub auto_scroll: bool,
}

impl Default for SyncSettings {
    fn default() -> Self {
        SyncSettings {
            scroll_suppress_ms: default_scroll_suppress_ms(),
            smooth_scroll: true,
            auto_scroll: true,
        }
    }
}

fn default_scroll_suppress_ms() -> u64 {
    6_000 // 6s
}

fn default_true() -> bool {
    true
}

/// Vertical alignment of a scrolled-to line within the lyrics viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScrollAlign {
    /// Line midpoint on container midpoint.
    Center,
}

/// Scroll motion requested from the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScrollBehavior {
    Smooth,
    Instant,
}

/// Declarative instruction for the lyrics view collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ViewInstruction {
    /// Full redraw: one line per cue, all inactive.
    RenderCues { cues: Vec<Cue> },
    /// Reset the viewport scroll offset to zero.
    ScrollToStart,
    /// Mark exactly one line active, or none.
    Highlight { active: Option<usize> },
    /// Bring a line into view. `fallback` applies if `behavior` cannot be performed.
    ScrollIntoView {
        index: usize,
        align: ScrollAlign,
        behavior: ScrollBehavior,
        fallback: ScrollBehavior,
    },
}
