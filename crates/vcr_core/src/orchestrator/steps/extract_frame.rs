//! ExtractFrame step - turns the intermediate render into a single image.

use std::fs;

use crate::orchestrator::errors::StepResult;
use crate::orchestrator::step::PipelineStep;
use crate::orchestrator::types::{Context, FrameOutput, JobState, StepOutcome};
use crate::tools::run_logged;
use crate::transcode::extract_frame_args;

/// Frame extraction step for image inputs.
///
/// Takes exactly one frame from the intermediate render as the final
/// output, then deletes the intermediate. When the render left nothing
/// behind the step is skipped and the operation produces no output.
pub struct ExtractFrameStep;

impl ExtractFrameStep {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ExtractFrameStep {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineStep for ExtractFrameStep {
    fn name(&self) -> &str {
        "ExtractFrame"
    }

    fn description(&self) -> &str {
        "Extract one frame from the render as the final image"
    }

    fn validate_input(&self, _ctx: &Context) -> StepResult<()> {
        Ok(())
    }

    fn execute(&self, ctx: &Context, state: &mut JobState) -> StepResult<StepOutcome> {
        let intermediate = ctx.intermediate_path();
        if !intermediate.exists() {
            return Ok(StepOutcome::Skipped(
                "no intermediate render to extract from".to_string(),
            ));
        }

        let output_path = ctx.request.output_path.clone();
        let args = extract_frame_args(&intermediate, &output_path);
        let output = run_logged(&ctx.tools.ffmpeg, &args, &ctx.logger);

        if let Err(e) = fs::remove_file(&intermediate) {
            ctx.logger
                .warn(&format!("Failed to remove intermediate render: {}", e));
        }

        if output.success() {
            ctx.logger
                .success(&format!("Frame written to {}", output_path.display()));
        } else {
            ctx.logger.show_tail("frame extraction");
            ctx.logger.warn(&format!(
                "Frame extraction exited with code {}",
                output.exit_code
            ));
        }

        state.frame = Some(FrameOutput {
            output_path,
            exit_code: output.exit_code,
        });

        Ok(StepOutcome::Success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestrator::testing::test_context;

    #[test]
    fn skips_when_intermediate_missing() {
        let (_dir, ctx) = test_context("photo.jpg", "out.png", true);
        let mut state = JobState::new("test");

        let step = ExtractFrameStep::new();
        let outcome = step.execute(&ctx, &mut state).unwrap();

        assert!(matches!(outcome, StepOutcome::Skipped(_)));
        assert!(state.frame.is_none());
        assert!(!ctx.request.output_path.exists());
    }

    #[test]
    fn removes_intermediate_even_when_ffmpeg_fails() {
        let (_dir, ctx) = test_context("photo.jpg", "out.png", true);
        let intermediate = ctx.intermediate_path();
        std::fs::write(&intermediate, b"fake video").unwrap();

        let mut state = JobState::new("test");
        let step = ExtractFrameStep::new();
        let outcome = step.execute(&ctx, &mut state).unwrap();

        assert_eq!(outcome, StepOutcome::Success);
        assert!(!intermediate.exists());

        let frame = state.frame.unwrap();
        assert_eq!(frame.exit_code, -1);
        assert!(!frame.output_path.exists());
    }
}
