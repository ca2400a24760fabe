// Playback-synchronized lyric highlighting.
// Ticks arrive on the hot path: one binary search, no allocation unless the active line changes.

use tracing::{debug, trace};

use crate::clock::Clock;
use crate::cue_list::CueList;
use crate::scroll;
use crate::types::*;

/// Per-source state. Replaced wholesale on every load.
#[derive(Debug, Clone, Default)]
struct SyncSession {
    cues: CueList,
    active: Option<usize>,
    /// Auto-scroll quiet window as `[armed, until)` in clock time.
    suppress_scroll: Option<(Timestamp, Timestamp)>,
}

/// Tracks playback against a loaded cue list and emits view instructions.
pub struct SyncController<C: Clock> {
    settings: SyncSettings,
    clock: C,
    session: SyncSession,
}

impl<C: Clock> SyncController<C> {
    pub fn new(settings: SyncSettings, clock: C) -> Self {
        SyncController {
            settings,
            clock,
            session: SyncSession::default(),
        }
    }

    /// Replace the session with `cues` and redraw every line as inactive.
    pub fn load(&mut self, cues: impl Into<CueList>) -> Vec<ViewInstruction> {
        let cues = cues.into();
        debug!(cues = cues.len(), "loading lyric session");

        let render = ViewInstruction::RenderCues {
            cues: cues.as_slice().to_vec(),
        };
        self.session = SyncSession {
            cues,
            active: None,
            suppress_scroll: None,
        };

        vec![render, ViewInstruction::ScrollToStart]
    }

    /// Per-update entry point from the playback clock.
    ///
    /// Paused playback and empty sessions are ignored, so scrubbing while paused
    /// leaves the view alone. Otherwise the active line is re-resolved and, if it
    /// changed, highlighted and (outside the suppression window) centered.
    pub fn on_playback_tick(&mut self, playback: PlaybackState) -> Vec<ViewInstruction> {
        if !playback.is_playing || self.session.cues.is_empty() {
            return Vec::new();
        }

        let index = self.session.cues.resolve(playback.position);
        if index == self.session.active {
            return Vec::new();
        }

        trace!(
            position_ms = playback.position.as_millis(),
            from = ?self.session.active,
            to = ?index,
            "active cue changed"
        );
        self.session.active = index;

        let mut instructions = vec![ViewInstruction::Highlight { active: index }];
        if let Some(index) = index {
            if self.settings.auto_scroll && !self.is_scroll_suppressed() {
                instructions.push(scroll::center_on(index, self.settings.smooth_scroll));
            }
        }
        instructions
    }

    /// Playback moved from stopped/paused to playing. Forget the active line so
    /// the next tick re-evaluates from scratch.
    pub fn on_playback_started(&mut self) {
        self.session.active = None;
    }

    /// Manual scroll, touch or wheel on the lyrics viewport. Restarts the quiet window.
    pub fn on_user_scroll_intent(&mut self) {
        let armed = self.clock.now();
        let until = armed.saturating_add_millis(self.settings.scroll_suppress_ms);
        debug!(until_ms = until.as_millis(), "auto-scroll suppressed");
        self.session.suppress_scroll = Some((armed, until));
    }

    /// True while inside the quiet window. A clock reading before the arming
    /// time (wall clock stepped back) ends the window instead of stretching it.
    pub fn is_scroll_suppressed(&self) -> bool {
        let now = self.clock.now();
        self.session
            .suppress_scroll
            .is_some_and(|(armed, until)| armed <= now && now < until)
    }

    pub fn active_index(&self) -> Option<usize> {
        self.session.active
    }

    pub fn cues(&self) -> &CueList {
        &self.session.cues
    }

    pub fn settings(&self) -> &SyncSettings {
        &self.settings
    }

    pub fn state(&self) -> SessionState {
        match (self.session.cues.is_empty(), self.session.active) {
            (true, _) => SessionState::Empty,
            (false, None) => SessionState::Loaded,
            (false, Some(_)) => SessionState::Tracking,
        }
    }
}
