//! Shared data models for conversion requests and outcomes.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A single conversion as requested by the caller.
///
/// `input_path` is externally supplied and immutable for the duration of
/// the operation. `output_path` is chosen by the caller up front; the
/// processor may rewrite its extension if it conflicts with the detected
/// input kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionRequest {
    /// Source file on disk.
    pub input_path: PathBuf,
    /// Destination for the final artifact.
    pub output_path: PathBuf,
    /// Whether Plan A (analog audio mix) should be attempted for videos.
    pub analog_audio: bool,
}

impl ConversionRequest {
    pub fn new(
        input_path: impl Into<PathBuf>,
        output_path: impl Into<PathBuf>,
        analog_audio: bool,
    ) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: output_path.into(),
            analog_audio,
        }
    }
}

/// Audio strategy that produced the final video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioPlan {
    /// Plan A: original audio low-passed and boosted, muxed with the render.
    AnalogMix,
    /// Plan B: original audio muxed unmodified (re-encoded to AAC).
    Passthrough,
    /// Plan C: rendered video stream only, no audio.
    Silent,
}

impl std::fmt::Display for AudioPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AudioPlan::AnalogMix => write!(f, "analog mix"),
            AudioPlan::Passthrough => write!(f, "passthrough"),
            AudioPlan::Silent => write!(f, "silent"),
        }
    }
}

/// Result of running one conversion through the processor.
///
/// The completion signal deliberately carries no success flag: the caller
/// gets the final output path whichever plan ran (or even if nothing was
/// produced) and can only learn more by inspecting the file. Step summaries
/// are included for logging.
#[derive(Debug, Clone)]
pub struct ConversionOutcome {
    /// Final output path (extension already corrected for image inputs).
    pub output_path: PathBuf,
    /// Steps that completed.
    pub steps_completed: Vec<String>,
    /// Steps that were skipped.
    pub steps_skipped: Vec<String>,
}

impl ConversionOutcome {
    /// Outcome for a conversion that never reached the pipeline.
    pub fn bare(output_path: PathBuf) -> Self {
        Self {
            output_path,
            steps_completed: Vec::new(),
            steps_skipped: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audio_plan_displays() {
        assert_eq!(AudioPlan::AnalogMix.to_string(), "analog mix");
        assert_eq!(AudioPlan::Silent.to_string(), "silent");
    }

    #[test]
    fn request_serializes() {
        let req = ConversionRequest::new("in.mp4", "out.mp4", true);
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains("\"analog_audio\":true"));
    }
}
