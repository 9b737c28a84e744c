//! Conversion pipeline orchestrator.
//!
//! This module provides the infrastructure for running the multi-step
//! conversion pipeline. Each conversion is a sequence of steps chosen by
//! the input kind:
//!
//! ```text
//! Image:  Render -> ExtractFrame
//! Video:  Render -> MergeAudio (Plan A/B, fallback Plan C)
//! ```
//!
//! External tool failures never abort a run: steps log them and either
//! fall back or skip, and the completion signal carries the final output
//! path regardless.
//!
//! # Example
//!
//! ```ignore
//! use vcr_core::orchestrator::ConversionProcessor;
//! use vcr_core::models::ConversionRequest;
//!
//! let processor = ConversionProcessor::new(settings, log_dir, temp_root);
//! let outcome = processor.process(
//!     ConversionRequest::new("clip.mp4", "out.mp4", true),
//!     None,
//!     None,
//! );
//! println!("Done: {}", outcome.output_path.display());
//! ```

mod errors;
mod pipeline;
mod processor;
mod step;
pub mod steps;
mod types;

pub use errors::{PipelineError, PipelineResult, StepError, StepResult};
pub use pipeline::{CancelHandle, Pipeline, PipelineRunResult};
pub use processor::ConversionProcessor;
pub use step::PipelineStep;
pub use steps::{ExtractFrameStep, MergeAudioStep, RenderStep};
pub use types::{
    Context, FrameOutput, JobState, MergeOutput, ProgressCallback, RenderOutput, StepOutcome,
    INTERMEDIATE_FILENAME,
};

use crate::media::MediaKind;

/// Create the conversion pipeline for the given input kind.
///
/// Both pipelines start with the render; what follows depends on whether
/// a single frame or a muxed video is wanted.
pub fn create_conversion_pipeline(kind: MediaKind) -> Pipeline {
    match kind {
        MediaKind::Image => Pipeline::new()
            .with_step(RenderStep::new())
            .with_step(ExtractFrameStep::new()),
        MediaKind::Video => Pipeline::new()
            .with_step(RenderStep::new())
            .with_step(MergeAudioStep::new()),
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Shared fixtures for orchestrator tests.

    use std::path::PathBuf;
    use std::sync::Arc;

    use tempfile::TempDir;

    use crate::config::Settings;
    use crate::logging::{JobLogger, LogConfig};
    use crate::media::MediaKind;
    use crate::models::ConversionRequest;
    use crate::tools::ToolPaths;

    use super::types::Context;

    /// Build a context rooted in a temp dir with a real input file and tool
    /// paths that point nowhere (spawns fail, which the steps must absorb).
    pub(crate) fn test_context(
        input_name: &str,
        output_name: &str,
        analog_audio: bool,
    ) -> (TempDir, Context) {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join(input_name);
        std::fs::write(&input, b"data").unwrap();
        let output = dir.path().join(output_name);

        let work_dir = dir.path().join("work");
        std::fs::create_dir_all(&work_dir).unwrap();

        let logger = Arc::new(
            JobLogger::new("test_job", dir.path().join("logs"), LogConfig::default(), None)
                .unwrap(),
        );
        let tools = ToolPaths {
            renderer: PathBuf::from("/nonexistent/ntsc-rs-cli"),
            ffmpeg: PathBuf::from("/nonexistent/ffmpeg"),
            ffprobe: PathBuf::from("/nonexistent/ffprobe"),
        };

        let kind = MediaKind::from_path(&input);
        let request = ConversionRequest::new(&input, &output, analog_audio);
        let ctx = Context::new(
            request,
            kind,
            Settings::default(),
            tools,
            "test_job",
            work_dir,
            logger,
        );

        (dir, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_pipeline_ends_with_frame_extraction() {
        let pipeline = create_conversion_pipeline(MediaKind::Image);
        assert_eq!(pipeline.step_names(), vec!["Render", "ExtractFrame"]);
    }

    #[test]
    fn video_pipeline_ends_with_audio_merge() {
        let pipeline = create_conversion_pipeline(MediaKind::Video);
        assert_eq!(pipeline.step_names(), vec!["Render", "MergeAudio"]);
    }
}
