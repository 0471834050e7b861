//! Producing a time-sliced copy of a clip.
//!
//! The source clip is decoded fully into memory, sliced by millisecond range
//! and re-exported as a 32-bit-float `.wav` next to the original.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use rodio::{Decoder, Source};

/// Suffix appended to the source file stem when naming the trimmed copy.
pub const TRIM_SUFFIX: &str = "_____1";

/// Output path for a trim of `source`: stem + suffix, always `.wav`.
pub fn derived_path(source: &Path) -> PathBuf {
    let stem = source
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("clip");
    source.with_file_name(format!("{stem}{TRIM_SUFFIX}.wav"))
}

/// Slice `[start_secs, end_secs)` out of `source` and write it next to the
/// original. Returns the path of the new file.
///
/// Callers guarantee `0 <= start_secs <= end_secs`; ranges reaching past the
/// end of the clip are clamped to it. The source file and its session record
/// are left untouched.
pub fn trim(
    source: &Path,
    start_secs: f64,
    end_secs: f64,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let file = File::open(source)?;
    let decoder = Decoder::new(BufReader::new(file))?;
    let channels = decoder.channels();
    let sample_rate = decoder.sample_rate();
    let samples: Vec<f32> = decoder.collect();

    let start_ms = (start_secs * 1000.0) as u64;
    let end_ms = (end_secs * 1000.0) as u64;
    let sample_index =
        |ms: u64| (ms * sample_rate as u64 / 1000) as usize * channels as usize;

    let start = sample_index(start_ms).min(samples.len());
    let end = sample_index(end_ms).min(samples.len()).max(start);

    let out = derived_path(source);
    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let mut writer = hound::WavWriter::create(&out, spec)?;
    for &sample in &samples[start..end] {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write_test_wav(path: &Path, channels: u16, sample_rate: u32, samples: &[f32]) {
        let spec = hound::WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 32,
            sample_format: hound::SampleFormat::Float,
        };
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        for &s in samples {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();
    }

    fn read_wav(path: &Path) -> Vec<f32> {
        hound::WavReader::open(path)
            .unwrap()
            .samples::<f32>()
            .map(|s| s.unwrap())
            .collect()
    }

    #[test]
    fn derived_path_appends_suffix_and_wav_extension() {
        assert_eq!(
            derived_path(Path::new("/clips/take.mp4")),
            PathBuf::from("/clips/take_____1.wav")
        );
        assert_eq!(
            derived_path(Path::new("take.wav")),
            PathBuf::from("take_____1.wav")
        );
    }

    #[test]
    fn trim_extracts_the_requested_range() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("orig.wav");
        // 1000 Hz mono: one sample per millisecond.
        let samples: Vec<f32> = (0..10).map(|i| i as f32 / 10.0).collect();
        write_test_wav(&src, 1, 1000, &samples);

        let out = trim(&src, 0.002, 0.005).unwrap();

        assert_eq!(out, dir.path().join("orig_____1.wav"));
        assert_eq!(read_wav(&out), samples[2..5].to_vec());
    }

    #[test]
    fn trim_keeps_channel_frames_together() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("stereo.wav");
        // 1000 Hz stereo: two interleaved samples per millisecond.
        let samples: Vec<f32> = (0..12).map(|i| i as f32 / 12.0).collect();
        write_test_wav(&src, 2, 1000, &samples);

        let out = trim(&src, 0.001, 0.003).unwrap();

        assert_eq!(read_wav(&out), samples[2..6].to_vec());
    }

    #[test]
    fn trim_clamps_past_end_of_clip() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("short.wav");
        let samples: Vec<f32> = (0..4).map(|i| i as f32 / 4.0).collect();
        write_test_wav(&src, 1, 1000, &samples);

        let out = trim(&src, 0.0, 60.0).unwrap();

        assert_eq!(read_wav(&out), samples);
    }

    #[test]
    fn trim_of_empty_range_writes_an_empty_clip() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("orig.wav");
        let samples: Vec<f32> = (0..4).map(|i| i as f32 / 4.0).collect();
        write_test_wav(&src, 1, 1000, &samples);

        let out = trim(&src, 0.002, 0.002).unwrap();

        assert!(read_wav(&out).is_empty());
    }

    #[test]
    fn trim_does_not_touch_the_source_file() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("orig.wav");
        let samples: Vec<f32> = (0..4).map(|i| i as f32 / 4.0).collect();
        write_test_wav(&src, 1, 1000, &samples);

        trim(&src, 0.001, 0.002).unwrap();

        assert_eq!(read_wav(&src), samples);
    }
}
