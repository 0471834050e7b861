use std::path::PathBuf;

/// Stopped/Playing/Paused classification of the playback service.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TransportState {
    Stopped,
    Playing,
    Paused,
}

impl Default for TransportState {
    fn default() -> Self {
        Self::Stopped
    }
}

/// Commands accepted by the playback service.
#[derive(Debug)]
pub enum PlayerCmd {
    /// Decode `path` and hold it paused at position zero.
    Load(PathBuf),
    /// Begin or resume playback of the loaded clip.
    Play,
    /// Pause playback, keeping the position.
    Pause,
    /// Jump to the given position (milliseconds) in the loaded clip.
    Seek(u64),
    /// Shut the service down.
    Quit,
}

/// Notifications emitted by the playback service.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PlayerEvent {
    /// The service's transport state changed; end-of-clip reports Stopped.
    StateChanged(TransportState),
    /// Playback position in milliseconds.
    PositionChanged(u64),
    /// Duration of the loaded clip in milliseconds.
    DurationChanged(u64),
}
