use std::path::Path;

use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::model::ClipRecord;

fn is_clip_file(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Discover the labelable clips under `dir`.
///
/// Files are filtered to the configured extension allow-list and sorted
/// lexicographically by file name; that order is the session's navigation
/// order. An unreadable or empty directory yields an empty list.
pub fn scan(dir: &Path, settings: &LibrarySettings) -> Vec<ClipRecord> {
    let mut records: Vec<ClipRecord> = Vec::new();

    let mut walker = WalkDir::new(dir).follow_links(settings.follow_links);

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    for entry in walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if path.is_file()
            && (settings.include_hidden || !is_hidden(path))
            && is_clip_file(path, settings)
        {
            records.push(ClipRecord::new(path.to_path_buf()));
        }
    }

    records.sort_by(|a, b| a.path.file_name().cmp(&b.path.file_name()));
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn is_clip_file_matches_configured_extensions_case_insensitive() {
        let settings = LibrarySettings::default();
        assert!(is_clip_file(Path::new("/tmp/a.wav"), &settings));
        assert!(is_clip_file(Path::new("/tmp/a.WAV"), &settings));
        assert!(is_clip_file(Path::new("/tmp/a.mp4"), &settings));
        assert!(!is_clip_file(Path::new("/tmp/a.txt"), &settings));
        assert!(!is_clip_file(Path::new("/tmp/a.json"), &settings));
        assert!(!is_clip_file(Path::new("/tmp/a"), &settings));
    }

    #[test]
    fn scan_filters_non_clips_and_sorts_by_file_name() {
        let dir = tempdir().unwrap();

        fs::write(dir.path().join("b.wav"), b"not a real wav").unwrap();
        fs::write(dir.path().join("a.wav"), b"not a real wav").unwrap();
        fs::write(dir.path().join("labels.json"), b"[]").unwrap();

        let records = scan(dir.path(), &LibrarySettings::default());
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].file_name(), "a.wav");
        assert_eq!(records[1].file_name(), "b.wav");
        assert!(records.iter().all(|r| r.emotion.is_none()));
        assert!(records.iter().all(|r| r.length_secs.is_none()));
    }

    #[test]
    fn scan_is_non_recursive_by_default() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("root.wav"), b"not real").unwrap();
        let sub = dir.path().join("sub");
        fs::create_dir_all(&sub).unwrap();
        fs::write(sub.join("child.wav"), b"not real").unwrap();

        let records = scan(dir.path(), &LibrarySettings::default());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].file_name(), "root.wav");
    }

    #[test]
    fn scan_respects_recursive_with_max_depth() {
        let dir = tempdir().unwrap();
        let d1 = dir.path().join("d1");
        let d2 = d1.join("d2");
        fs::create_dir_all(&d2).unwrap();
        fs::write(dir.path().join("root.wav"), b"not real").unwrap();
        fs::write(d1.join("one.wav"), b"not real").unwrap();
        fs::write(d2.join("two.wav"), b"not real").unwrap();

        // WalkDir depth counts root as 0, children as 1, grandchildren as 2...
        // With max_depth=2 we should see root + d1/*, but not d1/d2/*.
        let settings = LibrarySettings {
            recursive: true,
            max_depth: Some(2),
            ..LibrarySettings::default()
        };
        let records = scan(dir.path(), &settings);

        let names: Vec<&str> = records.iter().map(|r| r.file_name()).collect();
        assert!(names.contains(&"root.wav"));
        assert!(names.contains(&"one.wav"));
        assert!(!names.contains(&"two.wav"));
    }

    #[test]
    fn scan_respects_include_hidden_false() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(".hidden.wav"), b"not real").unwrap();
        fs::write(dir.path().join("visible.wav"), b"not real").unwrap();

        let settings = LibrarySettings {
            include_hidden: false,
            ..LibrarySettings::default()
        };
        let records = scan(dir.path(), &settings);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].file_name(), "visible.wav");
    }

    #[test]
    fn scan_of_missing_directory_yields_empty_session() {
        let dir = tempdir().unwrap();
        let gone = dir.path().join("does-not-exist");

        let records = scan(&gone, &LibrarySettings::default());
        assert!(records.is_empty());
    }
}
