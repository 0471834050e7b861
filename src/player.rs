//! The playback service: a rodio-backed worker thread.
//!
//! The service accepts commands over one mpsc channel and reports back over
//! another. State, position and duration notifications arrive asynchronously
//! relative to commands; the event loop drains them in order and applies
//! them last-write-wins.

mod engine;
mod types;

pub use engine::Player;
pub use types::{PlayerCmd, PlayerEvent, TransportState};
