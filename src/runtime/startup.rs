use std::path::Path;

use crate::config::Settings;
use crate::labels;
use crate::session::{self, Session};

/// Build a fresh `Session` for `folder`.
///
/// Scans the directory for labelable clips, then merges a prior labels
/// export found in the same folder (when auto-import is on). A malformed
/// labels file fails the open; an unreadable folder just yields an empty
/// session.
pub fn open_folder(folder: &Path, settings: &Settings) -> Result<Session, Box<dyn std::error::Error>> {
    let records = session::scan(folder, &settings.library);
    let mut session = Session::new(records);

    if settings.labels.auto_import {
        if let Some(label_path) = labels::find_label_file(folder) {
            let entries = labels::load(&label_path)?;
            session.apply_labels(&entries);
        }
    }

    Ok(session)
}
