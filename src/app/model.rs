use std::path::PathBuf;

use crate::player::{PlayerCmd, PlayerEvent, TransportState};
use crate::session::{Emotion, Session};

/// Navigation direction for `advance`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

/// The main application model.
///
/// Mutating methods return the commands the playback service should receive
/// for the transition; the event loop forwards them. Keeping command emission
/// out of the model keeps every transition testable without an audio device.
pub struct App {
    pub session: Session,
    pub folder: PathBuf,
    pub transport: TransportState,
    pub position_ms: u64,

    pub trim_mode: bool,
    pub trim_input: String,

    pub status: Option<String>,
}

impl App {
    /// Create a new `App` over an opened session.
    pub fn new(session: Session, folder: PathBuf) -> Self {
        Self {
            session,
            folder,
            transport: TransportState::Stopped,
            position_ms: 0,
            trim_mode: false,
            trim_input: String::new(),
            status: None,
        }
    }

    /// Select `index` and start playing its clip from the top.
    pub fn activate(&mut self, index: usize) -> Vec<PlayerCmd> {
        self.session.select(index);
        let Some(record) = self.session.active() else {
            return Vec::new();
        };

        self.transport = TransportState::Playing;
        self.position_ms = 0;
        vec![PlayerCmd::Load(record.path.clone()), PlayerCmd::Play]
    }

    /// Replay the active clip from position zero.
    pub fn replay(&mut self) -> Vec<PlayerCmd> {
        self.activate(self.session.active_index())
    }

    /// Move to the neighboring clip, wrapping at both ends, and play it.
    pub fn advance(&mut self, direction: Direction) -> Vec<PlayerCmd> {
        if self.session.is_empty() {
            return Vec::new();
        }
        match direction {
            Direction::Next => self.session.select_next(),
            Direction::Previous => self.session.select_prev(),
        }
        self.activate(self.session.active_index())
    }

    /// Apply one play/pause toggle to the transport state machine.
    ///
    /// Stopped restarts the active clip from position zero; Playing pauses;
    /// Paused resumes.
    pub fn toggle_play_pause(&mut self) -> Vec<PlayerCmd> {
        match self.transport {
            TransportState::Stopped => {
                let Some(record) = self.session.active() else {
                    return Vec::new();
                };
                let path = record.path.clone();
                self.transport = TransportState::Playing;
                self.position_ms = 0;
                vec![PlayerCmd::Load(path), PlayerCmd::Play]
            }
            TransportState::Playing => {
                self.transport = TransportState::Paused;
                vec![PlayerCmd::Pause]
            }
            TransportState::Paused => {
                self.transport = TransportState::Playing;
                vec![PlayerCmd::Play]
            }
        }
    }

    /// Scrub the loaded clip by `delta_secs`, clamping at position zero.
    ///
    /// A no-op while stopped; the playback service clamps the far end against
    /// the clip itself.
    pub fn scrub(&mut self, delta_secs: i64) -> Vec<PlayerCmd> {
        if self.transport == TransportState::Stopped {
            return Vec::new();
        }

        let target = (self.position_ms as i64 + delta_secs * 1000).max(0) as u64;
        self.position_ms = target;
        vec![PlayerCmd::Seek(target)]
    }

    /// Apply one playback service notification.
    ///
    /// The service's reported state always wins over whatever the last toggle
    /// assumed, so an end-of-clip Stopped is reflected no matter what the
    /// listener pressed in the meantime. Duration reports are forwarded to the
    /// active record, newest observation winning.
    pub fn on_player_event(&mut self, event: PlayerEvent) {
        match event {
            PlayerEvent::StateChanged(state) => self.transport = state,
            PlayerEvent::PositionChanged(ms) => self.position_ms = ms,
            PlayerEvent::DurationChanged(ms) => {
                self.session.record_duration(ms as f64 / 1000.0);
            }
        }
    }

    /// Tag the active clip; `None` clears the label.
    pub fn set_label(&mut self, emotion: Option<Emotion>) {
        self.session.set_label(emotion);
    }

    /// Enter trim-input mode (collects "<start> <end>" in seconds).
    pub fn enter_trim_mode(&mut self) {
        self.trim_mode = true;
        self.trim_input.clear();
    }

    /// Leave trim-input mode, discarding the pending input.
    pub fn exit_trim_mode(&mut self) {
        self.trim_mode = false;
        self.trim_input.clear();
    }

    /// Append a character to the pending trim range.
    pub fn push_trim_char(&mut self, c: char) {
        self.trim_input.push(c);
    }

    /// Remove the last character of the pending trim range.
    pub fn pop_trim_char(&mut self) {
        self.trim_input.pop();
    }

    /// Parse the pending trim input as `(start_secs, end_secs)`.
    ///
    /// Accepts two whitespace-separated non-negative numbers with
    /// `start <= end`; anything else is `None`.
    pub fn parse_trim_input(&self) -> Option<(f64, f64)> {
        let mut parts = self.trim_input.split_whitespace();
        let start: f64 = parts.next()?.parse().ok()?;
        let end: f64 = parts.next()?.parse().ok()?;
        if parts.next().is_some() {
            return None;
        }
        if !start.is_finite() || !end.is_finite() || start < 0.0 || end < start {
            return None;
        }
        Some((start, end))
    }

    /// Replace the status line message.
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }
}
