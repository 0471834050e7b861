//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph, Wrap},
};
use std::{collections::BTreeMap, sync::LazyLock};

use crate::app::App;
use crate::config::{ControlsSettings, UiSettings};
use crate::player::TransportState;
use crate::session::{ClipRecord, Emotion};

static CONTROLS_MAP: LazyLock<BTreeMap<String, String>> = LazyLock::new(|| {
    let mut map: BTreeMap<String, String> = BTreeMap::new();
    map.insert("j/k".to_string(), "next/previous clip".to_string());
    map.insert("enter".to_string(), "replay clip".to_string());
    map.insert("space/p".to_string(), "play/pause".to_string());
    // H/L is filled dynamically from config.
    map.insert("1-4".to_string(), "hap/ang/sad/neu".to_string());
    map.insert("0".to_string(), "clear label".to_string());
    map.insert("t".to_string(), "trim".to_string());
    map.insert("w".to_string(), "save labels".to_string());
    map.insert("q".to_string(), "quit".to_string());
    map
});

/// Render the controls help text, incorporating scrub seconds.
fn controls_text(scrub_seconds: u64) -> String {
    // Keep the rendered order stable and human-friendly.
    let order = ["j/k", "enter", "space/p", "H/L", "1-4", "0", "t", "w", "q"];
    order
        .iter()
        .filter_map(|k| {
            if *k == "H/L" {
                Some(format!("[H/L] scrub -/+{}s", scrub_seconds))
            } else {
                CONTROLS_MAP.get(*k).map(|v| format!("[{}] {}", k, v))
            }
        })
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Format a millisecond position as `HH:MM:SS`.
pub fn format_time(position_ms: u64) -> String {
    let total_secs = position_ms / 1000;

    let hours = total_secs / 3600;
    let remainder = total_secs % 3600;
    let minutes = remainder / 60;
    let seconds = remainder % 60;

    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// Display style for a clip record: one color per emotion, default when unset.
pub fn emotion_style(emotion: Option<Emotion>) -> Style {
    match emotion {
        Some(Emotion::Happy) => Style::default().fg(Color::Green),
        Some(Emotion::Angry) => Style::default().fg(Color::Red),
        Some(Emotion::Sad) => Style::default().fg(Color::Yellow),
        Some(Emotion::Neutral) => Style::default().fg(Color::Cyan),
        None => Style::default(),
    }
}

fn list_line(record: &ClipRecord) -> String {
    match record.emotion {
        Some(e) => format!("{}  [{}]", record.file_name(), e.as_code()),
        None => record.file_name().to_string(),
    }
}

fn transport_text(state: TransportState) -> &'static str {
    match state {
        TransportState::Stopped => "Stopped",
        TransportState::Playing => "Playing",
        TransportState::Paused => "Paused",
    }
}

/// Render the entire UI into the provided `frame` using `app` state and settings.
pub fn draw(
    frame: &mut Frame,
    app: &App,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Min(1),
            Constraint::Length(4),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" affetto ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Status box
    let status = {
        let mut parts: Vec<String> = Vec::new();

        parts.push(transport_text(app.transport).to_string());

        if let Some(record) = app.session.active() {
            let length = match record.length_secs {
                Some(secs) => format!("{:.1}s", secs),
                None => "-".to_string(),
            };
            parts.push(format!(
                "Clip: {} [{} / {}]",
                record.file_name(),
                format_time(app.position_ms),
                length
            ));
        }

        parts.push(format!(
            "Labeled: {}/{}",
            app.session.labeled_count(),
            app.session.len()
        ));

        if app.trim_mode {
            parts.push(format!("TRIM (start end, seconds): {}", app.trim_input));
        }

        if let Some(msg) = &app.status {
            parts.push(msg.clone());
        }

        parts.push(format!("Dir: {}", app.folder.display()));

        parts.join(" • ")
    };

    let status_par = Paragraph::new(status)
        .block(
            Block::bordered()
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .title(" status "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(status_par, chunks[1]);

    // Clip list, one line per record, colored by label
    {
        let items: Vec<ListItem> = app
            .session
            .records()
            .iter()
            .map(|record| ListItem::new(list_line(record)).style(emotion_style(record.emotion)))
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(" clips "))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");

        let mut state = ListState::default();
        if !app.session.is_empty() {
            state.select(Some(app.session.active_index()));
        }
        frame.render_stateful_widget(list, chunks[2], &mut state);
    }

    let footer = Paragraph::new(controls_text(controls_settings.scrub_seconds))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(footer, chunks[3]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn format_time_pads_and_divides_exactly() {
        assert_eq!(format_time(0), "00:00:00");
        assert_eq!(format_time(59_000), "00:00:59");
        assert_eq!(format_time(3_661_000), "01:01:01");
        // sub-second remainders truncate
        assert_eq!(format_time(999), "00:00:00");
        assert_eq!(format_time(60_500), "00:01:00");
    }

    #[test]
    fn emotion_style_assigns_one_color_per_label() {
        let styles: Vec<Style> = [
            Some(Emotion::Happy),
            Some(Emotion::Angry),
            Some(Emotion::Sad),
            Some(Emotion::Neutral),
        ]
        .into_iter()
        .map(emotion_style)
        .collect();

        for (i, a) in styles.iter().enumerate() {
            for b in &styles[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert_eq!(emotion_style(None), Style::default());
    }

    #[test]
    fn list_line_shows_label_code_when_set() {
        let mut record = ClipRecord::new(PathBuf::from("/clips/a.wav"));
        assert_eq!(list_line(&record), "a.wav");

        record.emotion = Some(Emotion::Neutral);
        assert_eq!(list_line(&record), "a.wav  [neu]");
    }
}
