use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use super::schema::LabelRecord;

/// Locate a prior labels export in `dir`.
///
/// Any `.json` file qualifies; when several exist the lexicographically first
/// one wins, so repeated opens of the same folder import the same file.
pub fn find_label_file(dir: &Path) -> Option<PathBuf> {
    let entries = fs::read_dir(dir).ok()?;

    let mut candidates: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|e| e.path())
        .filter(|p| {
            p.is_file()
                && p.extension()
                    .and_then(|s| s.to_str())
                    .map(|ext| ext.eq_ignore_ascii_case("json"))
                    .unwrap_or(false)
        })
        .collect();

    candidates.sort();
    candidates.into_iter().next()
}

/// Read a labels file. Malformed JSON fails the whole load.
pub fn load(path: &Path) -> Result<Vec<LabelRecord>, Box<dyn std::error::Error>> {
    let file = File::open(path)?;
    let records: Vec<LabelRecord> = serde_json::from_reader(BufReader::new(file))?;
    Ok(records)
}

/// Write `records` to `path`, replacing any existing file.
pub fn save(path: &Path, records: &[LabelRecord]) -> Result<(), Box<dyn std::error::Error>> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), records)?;
    Ok(())
}
