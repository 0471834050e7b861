use std::path::PathBuf;

use crate::labels::LabelRecord;

/// The fixed set of emotion categories a clip can be tagged with.
///
/// The short codes (`hap`, `ang`, `sad`, `neu`) are the wire vocabulary used
/// by the labels JSON file.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Emotion {
    Happy,
    Angry,
    Sad,
    Neutral,
}

impl Emotion {
    /// The code this emotion is stored under in a labels file.
    pub fn as_code(self) -> &'static str {
        match self {
            Emotion::Happy => "hap",
            Emotion::Angry => "ang",
            Emotion::Sad => "sad",
            Emotion::Neutral => "neu",
        }
    }

    /// Parse a labels-file code. Unknown codes map to `None` (unset); the
    /// label set is closed and free-text values are never kept.
    pub fn from_code(code: &str) -> Option<Emotion> {
        match code {
            "hap" => Some(Emotion::Happy),
            "ang" => Some(Emotion::Angry),
            "sad" => Some(Emotion::Sad),
            "neu" => Some(Emotion::Neutral),
            _ => None,
        }
    }
}

/// Label state for one discovered audio clip.
#[derive(Debug, Clone)]
pub struct ClipRecord {
    /// Identifier: the clip's path as discovered at scan time. Immutable.
    pub path: PathBuf,
    /// Assigned emotion, `None` while unlabeled.
    pub emotion: Option<Emotion>,
    /// Clip duration in seconds, `None` until the playback service reports one.
    pub length_secs: Option<f64>,
}

impl ClipRecord {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            emotion: None,
            length_secs: None,
        }
    }

    /// The clip's file name, used for list display.
    pub fn file_name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("UNKNOWN")
    }
}

/// All label state for one opened folder plus the active selection.
///
/// A session is built fresh on folder-open and replaced wholly by the next
/// open. Every operation is a silent no-op on an empty session; out-of-range
/// selections clamp instead of failing, so a stray key can never crash an
/// interactive labeling run.
#[derive(Debug, Clone, Default)]
pub struct Session {
    records: Vec<ClipRecord>,
    active: usize,
}

impl Session {
    /// Create a session over `records`, selecting the first one.
    pub fn new(records: Vec<ClipRecord>) -> Self {
        Self { records, active: 0 }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn records(&self) -> &[ClipRecord] {
        &self.records
    }

    /// Index of the active record. Meaningless when the session is empty.
    pub fn active_index(&self) -> usize {
        self.active
    }

    /// The active record, if any.
    pub fn active(&self) -> Option<&ClipRecord> {
        self.records.get(self.active)
    }

    /// Select `index`, clamping out-of-range requests to the last record.
    pub fn select(&mut self, index: usize) {
        if self.records.is_empty() {
            return;
        }
        self.active = index.min(self.records.len() - 1);
    }

    /// Move the selection forward, wrapping from the last record to the first.
    pub fn select_next(&mut self) {
        if self.records.is_empty() {
            return;
        }
        self.active = if self.active + 1 >= self.records.len() {
            0
        } else {
            self.active + 1
        };
    }

    /// Move the selection backward, wrapping from the first record to the last.
    pub fn select_prev(&mut self) {
        if self.records.is_empty() {
            return;
        }
        self.active = if self.active == 0 {
            self.records.len() - 1
        } else {
            self.active - 1
        };
    }

    /// Tag the active record; `None` clears a previous label.
    pub fn set_label(&mut self, emotion: Option<Emotion>) {
        if let Some(record) = self.records.get_mut(self.active) {
            record.emotion = emotion;
        }
    }

    /// Store the duration last reported for the active record.
    ///
    /// Overwrites unconditionally: the clip file is immutable, so the newest
    /// observation is always at least as good as the previous one.
    pub fn record_duration(&mut self, secs: f64) {
        if let Some(record) = self.records.get_mut(self.active) {
            record.length_secs = Some(secs);
        }
    }

    /// Count of records that currently carry a label.
    pub fn labeled_count(&self) -> usize {
        self.records.iter().filter(|r| r.emotion.is_some()).count()
    }

    /// Flatten the session into labels-file records, in directory order.
    pub fn export(&self) -> Vec<LabelRecord> {
        self.records
            .iter()
            .map(|r| LabelRecord {
                clip: r.path.display().to_string(),
                length: r.length_secs,
                emotion: r.emotion.map(|e| e.as_code().to_string()),
            })
            .collect()
    }

    /// Merge a prior export onto the session by exact identifier match.
    ///
    /// Imported values always win over freshly scanned defaults. Entries
    /// whose identifier matches no current record are dropped.
    pub fn apply_labels(&mut self, entries: &[LabelRecord]) {
        for entry in entries {
            if let Some(record) = self
                .records
                .iter_mut()
                .find(|r| r.path.display().to_string() == entry.clip)
            {
                record.emotion = entry.emotion.as_deref().and_then(Emotion::from_code);
                record.length_secs = entry.length;
            }
        }
    }
}
