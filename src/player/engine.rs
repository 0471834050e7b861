use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use lofty::file::AudioFile;
use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};

use super::types::{PlayerCmd, PlayerEvent, TransportState};

/// Handle to the playback worker thread.
pub struct Player {
    tx: Sender<PlayerCmd>,
    events: Receiver<PlayerEvent>,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl Player {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel::<PlayerCmd>();
        let (event_tx, event_rx) = mpsc::channel::<PlayerEvent>();

        let handle = spawn_player_thread(rx, event_tx);

        Self {
            tx,
            events: event_rx,
            join: Mutex::new(Some(handle)),
        }
    }

    pub fn send(&self, cmd: PlayerCmd) -> Result<(), mpsc::SendError<PlayerCmd>> {
        self.tx.send(cmd)
    }

    /// Pop the next pending notification, if any. Never blocks.
    pub fn try_event(&self) -> Option<PlayerEvent> {
        self.events.try_recv().ok()
    }

    /// Shut the worker down and wait for it to exit.
    pub fn quit(&self) {
        let _ = self.send(PlayerCmd::Quit);
        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }
}

/// Create a paused `Sink` for `path` starting at `start_at`, plus the decoded
/// total duration when the decoder knows it.
fn create_sink_at(handle: &OutputStream, path: &Path, start_at: Duration) -> (Sink, Option<Duration>) {
    let file = File::open(path).unwrap_or_else(|_| panic!("failed to open {:?}", path));

    let source =
        Decoder::new(BufReader::new(file)).unwrap_or_else(|_| panic!("failed to decode {:?}", path));
    let total = source.total_duration();
    // `skip_duration` is our seeking primitive; even Duration::ZERO is fine.
    let source = source.skip_duration(start_at);

    let sink = Sink::connect_new(handle.mixer());
    sink.append(source);
    sink.pause();
    (sink, total)
}

/// Duration of the clip at `path`: what the decoder reported, or the file's
/// tag properties when the decoder could not tell.
fn probe_duration(path: &Path, decoded: Option<Duration>) -> Option<Duration> {
    decoded.or_else(|| {
        lofty::read_from_path(path)
            .ok()
            .map(|tagged| tagged.properties().duration())
    })
}

fn spawn_player_thread(rx: Receiver<PlayerCmd>, events: Sender<PlayerEvent>) -> JoinHandle<()> {
    thread::spawn(move || {
        let stream =
            OutputStreamBuilder::open_default_stream().expect("ERR: No audio output device");
        // rodio logs to stderr when OutputStream is dropped. That's useful in debugging,
        // but noisy for a TUI app.
        let mut stream = stream;
        stream.log_on_drop(false);

        let mut sink: Option<Sink> = None;
        let mut loaded: Option<PathBuf> = None;
        let mut paused = true;

        // Position accounting: wall-clock start plus accumulated time while paused.
        let mut started_at: Option<Instant> = None;
        let mut accumulated = Duration::ZERO;

        loop {
            match rx.recv_timeout(Duration::from_millis(200)) {
                Ok(cmd) => match cmd {
                    PlayerCmd::Load(path) => {
                        if let Some(s) = sink.as_ref() {
                            s.stop();
                        }

                        let (new_sink, decoded_total) =
                            create_sink_at(&stream, &path, Duration::ZERO);
                        let total = probe_duration(&path, decoded_total);

                        sink = Some(new_sink);
                        paused = true;
                        started_at = None;
                        accumulated = Duration::ZERO;

                        if let Some(total) = total {
                            let _ = events
                                .send(PlayerEvent::DurationChanged(total.as_millis() as u64));
                        }
                        let _ = events.send(PlayerEvent::PositionChanged(0));
                        let _ = events.send(PlayerEvent::StateChanged(TransportState::Stopped));

                        loaded = Some(path);
                    }

                    PlayerCmd::Play => {
                        if let Some(ref s) = sink {
                            if paused {
                                s.play();
                                started_at = Some(Instant::now());
                                paused = false;
                                let _ = events
                                    .send(PlayerEvent::StateChanged(TransportState::Playing));
                            }
                        }
                    }

                    PlayerCmd::Pause => {
                        if let Some(ref s) = sink {
                            if !paused {
                                s.pause();
                                if let Some(st) = started_at {
                                    accumulated += Instant::now() - st;
                                }
                                started_at = None;
                                paused = true;
                                let _ = events
                                    .send(PlayerEvent::StateChanged(TransportState::Paused));
                            }
                        }
                    }

                    PlayerCmd::Seek(ms) => {
                        // Rebuild the sink and skip into the file; works for common formats.
                        let Some(path) = loaded.clone() else {
                            continue;
                        };
                        if let Some(s) = sink.as_ref() {
                            s.stop();
                        }

                        let target = Duration::from_millis(ms);
                        let (new_sink, _) = create_sink_at(&stream, &path, target);
                        if paused {
                            started_at = None;
                        } else {
                            new_sink.play();
                            started_at = Some(Instant::now());
                        }

                        sink = Some(new_sink);
                        accumulated = target;
                        let _ = events.send(PlayerEvent::PositionChanged(ms));
                    }

                    PlayerCmd::Quit => {
                        if let Some(ref s) = sink {
                            s.stop();
                        }
                        break;
                    }
                },
                Err(RecvTimeoutError::Timeout) => {
                    // Periodic tick: report position, detect end-of-clip.
                    if let Some(ref s) = sink {
                        if !paused {
                            if s.empty() {
                                sink = None;
                                paused = true;
                                started_at = None;
                                accumulated = Duration::ZERO;
                                let _ = events.send(PlayerEvent::PositionChanged(0));
                                let _ = events
                                    .send(PlayerEvent::StateChanged(TransportState::Stopped));
                            } else {
                                let elapsed = accumulated
                                    + started_at.map_or(Duration::ZERO, |st| st.elapsed());
                                let _ = events.send(PlayerEvent::PositionChanged(
                                    elapsed.as_millis() as u64,
                                ));
                            }
                        }
                    }
                    continue;
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}
