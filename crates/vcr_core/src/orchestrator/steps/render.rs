//! Render step - applies the analog effect with the external renderer.

use crate::media::probe_file;
use crate::orchestrator::errors::{StepError, StepResult};
use crate::orchestrator::step::PipelineStep;
use crate::orchestrator::types::{Context, JobState, RenderOutput, StepOutcome};
use crate::tools::run_logged;
use crate::transcode::render_args;

/// Render step for producing the intermediate analog-effect video.
///
/// The renderer always emits a video, image and video inputs alike. A
/// renderer failure is not treated as a step failure: downstream steps
/// check whether the intermediate file exists instead.
pub struct RenderStep;

impl RenderStep {
    pub fn new() -> Self {
        Self
    }

    /// Probe the input and log what it contains. Diagnostic only.
    fn log_input_info(&self, ctx: &Context) {
        match probe_file(&ctx.tools.ffprobe, &ctx.request.input_path) {
            Ok(info) => {
                let duration = info
                    .duration_secs
                    .map(|d| format!("{:.1}s", d))
                    .unwrap_or_else(|| "unknown duration".to_string());
                ctx.logger.info(&format!(
                    "Input: {} ({}, {})",
                    ctx.request.input_path.display(),
                    info.container,
                    duration
                ));
                if ctx.kind == crate::media::MediaKind::Video && !info.has_audio {
                    ctx.logger.warn(
                        "Source has no audio track; expect the silent fallback for the final mux",
                    );
                }
            }
            Err(e) => {
                ctx.logger.debug(&format!("Probe failed: {}", e));
            }
        }
    }
}

impl Default for RenderStep {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineStep for RenderStep {
    fn name(&self) -> &str {
        "Render"
    }

    fn description(&self) -> &str {
        "Apply the analog effect with the external renderer"
    }

    fn validate_input(&self, ctx: &Context) -> StepResult<()> {
        if !ctx.request.input_path.exists() {
            return Err(StepError::invalid_input(format!(
                "Input file does not exist: {}",
                ctx.request.input_path.display()
            )));
        }

        if let Err(e) = std::fs::create_dir_all(&ctx.work_dir) {
            return Err(StepError::io_error("creating work directory", e));
        }

        Ok(())
    }

    fn execute(&self, ctx: &Context, state: &mut JobState) -> StepResult<StepOutcome> {
        self.log_input_info(ctx);

        let intermediate = ctx.intermediate_path();
        let args = render_args(&ctx.request.input_path, &intermediate);

        let output = run_logged(&ctx.tools.renderer, &args, &ctx.logger);

        let produced = intermediate.exists();
        if !output.success() {
            ctx.logger.warn(&format!(
                "Renderer exited with code {}",
                output.exit_code
            ));
        }
        if !produced {
            ctx.logger
                .warn("Renderer produced no intermediate file; later steps will be skipped");
        }

        state.render = Some(RenderOutput {
            intermediate,
            exit_code: output.exit_code,
            produced,
        });

        Ok(StepOutcome::Success)
    }
}
