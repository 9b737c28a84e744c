//! Input probing using ffprobe JSON output.
//!
//! Probing is diagnostic only: the pipeline logs what the source contains
//! (and warns up front when a video carries no audio track) but never
//! changes plan order based on it.

use std::path::{Path, PathBuf};
use std::process::Command;

use serde_json::Value;
use thiserror::Error;

/// Errors that can occur while probing a source file.
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to run ffprobe: {0}")]
    ExecutionFailed(#[from] std::io::Error),

    #[error("ffprobe failed with exit code {exit_code}: {message}")]
    ProbeFailed { exit_code: i32, message: String },

    #[error("Failed to parse ffprobe output: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// What ffprobe reported about a source file.
#[derive(Debug, Clone, Default)]
pub struct ProbeResult {
    /// Path that was probed.
    pub file_path: PathBuf,
    /// Container format name (e.g. "mov,mp4,m4a,3gp,3g2,mj2").
    pub container: String,
    /// Duration in seconds, if the container reports one.
    pub duration_secs: Option<f64>,
    /// At least one video stream is present.
    pub has_video: bool,
    /// At least one audio stream is present.
    pub has_audio: bool,
}

/// Probe a source file with ffprobe.
pub fn probe_file(ffprobe: &Path, path: &Path) -> Result<ProbeResult, ProbeError> {
    if !path.exists() {
        return Err(ProbeError::FileNotFound(path.to_path_buf()));
    }

    tracing::debug!("Probing file: {}", path.display());

    let output = Command::new(ffprobe)
        .args([
            "-v",
            "error",
            "-print_format",
            "json",
            "-show_format",
            "-show_streams",
        ])
        .arg(path)
        .output()?;

    if !output.status.success() {
        return Err(ProbeError::ProbeFailed {
            exit_code: output.status.code().unwrap_or(-1),
            message: String::from_utf8_lossy(&output.stderr).to_string(),
        });
    }

    let json: Value = serde_json::from_slice(&output.stdout)?;

    Ok(parse_probe_json(&json, path))
}

/// Parse the JSON output from ffprobe.
fn parse_probe_json(json: &Value, path: &Path) -> ProbeResult {
    let mut result = ProbeResult {
        file_path: path.to_path_buf(),
        ..Default::default()
    };

    if let Some(format) = json.get("format") {
        result.container = format
            .get("format_name")
            .and_then(|n| n.as_str())
            .unwrap_or("unknown")
            .to_string();

        // ffprobe reports duration as a decimal string
        result.duration_secs = format
            .get("duration")
            .and_then(|d| d.as_str())
            .and_then(|d| d.parse::<f64>().ok());
    }

    if let Some(streams) = json.get("streams").and_then(|s| s.as_array()) {
        for stream in streams {
            match stream.get("codec_type").and_then(|t| t.as_str()) {
                Some("video") => result.has_video = true,
                Some("audio") => result.has_audio = true,
                _ => {}
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_format_and_streams() {
        let value = json!({
            "format": {
                "format_name": "matroska,webm",
                "duration": "12.480000"
            },
            "streams": [
                { "codec_type": "video", "codec_name": "h264" },
                { "codec_type": "audio", "codec_name": "aac" }
            ]
        });

        let result = parse_probe_json(&value, Path::new("clip.mkv"));
        assert_eq!(result.container, "matroska,webm");
        assert_eq!(result.duration_secs, Some(12.48));
        assert!(result.has_video);
        assert!(result.has_audio);
    }

    #[test]
    fn detects_missing_audio() {
        let value = json!({
            "format": { "format_name": "mp4" },
            "streams": [
                { "codec_type": "video" }
            ]
        });

        let result = parse_probe_json(&value, Path::new("silent.mp4"));
        assert!(result.has_video);
        assert!(!result.has_audio);
        assert_eq!(result.duration_secs, None);
    }

    #[test]
    fn tolerates_empty_output() {
        let result = parse_probe_json(&json!({}), Path::new("odd.bin"));
        assert_eq!(result.container, "");
        assert!(!result.has_video);
        assert!(!result.has_audio);
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = probe_file(Path::new("ffprobe"), Path::new("/definitely/not/here.mp4"));
        assert!(matches!(err, Err(ProbeError::FileNotFound(_))));
    }
}
