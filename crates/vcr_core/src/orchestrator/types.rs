//! Core types for the conversion pipeline.

use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::logging::JobLogger;
use crate::media::MediaKind;
use crate::models::{AudioPlan, ConversionRequest};
use crate::tools::ToolPaths;

/// Filename of the intermediate render inside the job work directory.
pub const INTERMEDIATE_FILENAME: &str = "render.mp4";

/// Progress callback type for reporting pipeline progress.
///
/// Arguments: (step_name, percent_complete, message)
pub type ProgressCallback = Box<dyn Fn(&str, u32, &str) + Send + Sync>;

/// Read-only context passed to pipeline steps.
///
/// Contains the conversion request and shared resources that steps can
/// read but not modify. Mutable state goes in `JobState`.
pub struct Context {
    /// The conversion being performed (output path already corrected).
    pub request: ConversionRequest,
    /// Input classification.
    pub kind: MediaKind,
    /// Application settings.
    pub settings: Settings,
    /// Resolved external tool paths.
    pub tools: ToolPaths,
    /// Job name/identifier.
    pub job_name: String,
    /// Job-specific working directory (unique per operation).
    pub work_dir: PathBuf,
    /// Per-job logger.
    pub logger: Arc<JobLogger>,
    /// Optional progress callback.
    progress_callback: Option<ProgressCallback>,
}

impl Context {
    /// Create a new context for a conversion.
    pub fn new(
        request: ConversionRequest,
        kind: MediaKind,
        settings: Settings,
        tools: ToolPaths,
        job_name: impl Into<String>,
        work_dir: PathBuf,
        logger: Arc<JobLogger>,
    ) -> Self {
        Self {
            request,
            kind,
            settings,
            tools,
            job_name: job_name.into(),
            work_dir,
            logger,
            progress_callback: None,
        }
    }

    /// Set the progress callback.
    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Report progress to callback (if set).
    pub fn report_progress(&self, step_name: &str, percent: u32, message: &str) {
        if let Some(ref callback) = self.progress_callback {
            callback(step_name, percent, message);
        }
    }

    /// Path of the intermediate render inside the work directory.
    pub fn intermediate_path(&self) -> PathBuf {
        self.work_dir.join(INTERMEDIATE_FILENAME)
    }
}

/// Mutable job state that accumulates results from pipeline steps.
///
/// Steps add their own section and do not overwrite earlier ones.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobState {
    /// Unique job identifier.
    pub job_id: String,
    /// When the job started.
    pub started_at: Option<String>,
    /// Render step results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub render: Option<RenderOutput>,
    /// Frame extraction results (image inputs).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frame: Option<FrameOutput>,
    /// Audio merge results (video inputs).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merge: Option<MergeOutput>,
}

impl JobState {
    /// Create a new job state with the given ID.
    pub fn new(job_id: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
            started_at: Some(chrono::Local::now().to_rfc3339()),
            ..Default::default()
        }
    }

    /// Check if the render step has run.
    pub fn has_render(&self) -> bool {
        self.render.is_some()
    }

    /// Whether the render step left a usable intermediate file.
    pub fn intermediate_produced(&self) -> bool {
        self.render.as_ref().map(|r| r.produced).unwrap_or(false)
    }
}

/// Output from the Render step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderOutput {
    /// Path of the intermediate render.
    pub intermediate: PathBuf,
    /// Renderer exit code (informational only).
    pub exit_code: i32,
    /// Whether the intermediate file exists after the run.
    pub produced: bool,
}

/// Output from the ExtractFrame step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameOutput {
    /// Path of the final image.
    pub output_path: PathBuf,
    /// ffmpeg exit code.
    pub exit_code: i32,
}

/// Output from the MergeAudio step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergeOutput {
    /// Path of the final video.
    pub output_path: PathBuf,
    /// Which audio plan produced the output.
    pub plan: AudioPlan,
    /// Exit code of the plan that ran last.
    pub exit_code: i32,
}

/// Result of executing a pipeline step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// Step completed.
    Success,
    /// Step was skipped (preconditions not met, but not an error).
    Skipped(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_state_tracks_render() {
        let mut state = JobState::new("test-123");
        assert!(!state.has_render());
        assert!(!state.intermediate_produced());

        state.render = Some(RenderOutput {
            intermediate: PathBuf::from("/tmp/job/render.mp4"),
            exit_code: 0,
            produced: true,
        });

        assert!(state.has_render());
        assert!(state.intermediate_produced());
    }

    #[test]
    fn job_state_serializes() {
        let state = JobState::new("test-456");
        let json = serde_json::to_string(&state).unwrap();
        assert!(json.contains("\"job_id\":\"test-456\""));
    }
}
