use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{App, Direction};
use crate::config::Settings;
use crate::labels;
use crate::player::{Player, PlayerCmd};
use crate::session::Emotion;
use crate::trim;
use crate::ui;

/// Main terminal event loop: drains playback service notifications, draws the
/// UI and handles key input. Returns `Ok(())` when shutdown is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &Settings,
    app: &mut App,
    player: &Player,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        // Apply pending playback notifications in arrival order; the last
        // state/position/duration report wins.
        while let Some(notification) = player.try_event() {
            app.on_player_event(notification);
        }

        terminal.draw(|f| ui::draw(f, app, &settings.ui, &settings.controls))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, settings, app, player) {
                    break;
                }
            }
        }
    }

    Ok(())
}

fn send_all(player: &Player, cmds: Vec<PlayerCmd>) {
    for cmd in cmds {
        let _ = player.send(cmd);
    }
}

/// Handle one key press. Returns `true` when the app should quit.
fn handle_key_event(key: KeyEvent, settings: &Settings, app: &mut App, player: &Player) -> bool {
    if app.trim_mode {
        match key.code {
            KeyCode::Esc => app.exit_trim_mode(),
            KeyCode::Backspace => app.pop_trim_char(),
            KeyCode::Enter => perform_trim(app),
            KeyCode::Char(c) => {
                if !c.is_control() {
                    app.push_trim_char(c);
                }
            }
            _ => {}
        }

        return false;
    }

    match key.code {
        KeyCode::Char('q') => {
            player.quit();
            return true;
        }
        KeyCode::Char('j') | KeyCode::Char('l') | KeyCode::Down => {
            send_all(player, app.advance(Direction::Next));
        }
        KeyCode::Char('k') | KeyCode::Char('h') | KeyCode::Up => {
            send_all(player, app.advance(Direction::Previous));
        }
        KeyCode::Enter => {
            send_all(player, app.replay());
        }
        KeyCode::Char('p') | KeyCode::Char(' ') => {
            send_all(player, app.toggle_play_pause());
        }
        KeyCode::Char('L') => {
            let secs = settings.controls.scrub_seconds.min(i32::MAX as u64) as i64;
            send_all(player, app.scrub(secs));
        }
        KeyCode::Char('H') => {
            let secs = settings.controls.scrub_seconds.min(i32::MAX as u64) as i64;
            send_all(player, app.scrub(-secs));
        }
        KeyCode::Char('1') => app.set_label(Some(Emotion::Happy)),
        KeyCode::Char('2') => app.set_label(Some(Emotion::Angry)),
        KeyCode::Char('3') => app.set_label(Some(Emotion::Sad)),
        KeyCode::Char('4') => app.set_label(Some(Emotion::Neutral)),
        KeyCode::Char('0') => app.set_label(None),
        KeyCode::Char('t') => {
            if !app.session.is_empty() {
                app.enter_trim_mode();
            }
        }
        KeyCode::Char('w') => save_labels(app, settings),
        _ => {}
    }

    false
}

/// Run the trim for the pending input against the active clip.
///
/// Bad input keeps trim mode open for correction; a completed attempt
/// (success or I/O failure) closes it and reports on the status line.
fn perform_trim(app: &mut App) {
    let Some((start, end)) = app.parse_trim_input() else {
        app.set_status("trim wants \"<start> <end>\" in seconds, start <= end");
        return;
    };
    let Some(record) = app.session.active() else {
        app.exit_trim_mode();
        return;
    };
    let source = record.path.clone();

    match trim::trim(&source, start, end) {
        Ok(out) => app.set_status(format!("trimmed to {}", out.display())),
        Err(e) => app.set_status(format!("trim failed: {e}")),
    }
    app.exit_trim_mode();
}

/// Export the session to the configured labels file inside the opened folder.
fn save_labels(app: &mut App, settings: &Settings) {
    if app.session.is_empty() {
        return;
    }

    let path = app.folder.join(&settings.labels.file_name);
    match labels::save(&path, &app.session.export()) {
        Ok(()) => app.set_status(format!("labels saved to {}", path.display())),
        Err(e) => app.set_status(format!("save failed: {e}")),
    }
}
