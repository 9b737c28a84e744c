//! MergeAudio step - muxes the rendered video with audio, with fallback.

use std::fs;

use crate::models::AudioPlan;
use crate::orchestrator::errors::StepResult;
use crate::orchestrator::step::PipelineStep;
use crate::orchestrator::types::{Context, JobState, MergeOutput, StepOutcome};
use crate::tools::run_logged;
use crate::transcode::{analog_mix_args, passthrough_args, silent_args};

/// Audio merge step for video inputs.
///
/// The analog-audio option selects which plan runs first: Plan A (low-pass
/// + gain mix) when enabled, Plan B (audio passthrough) otherwise. If that
/// attempt fails - commonly because the source has no audio track - Plan C
/// re-exports the rendered video silently. The intermediate render is
/// deleted afterwards on every path.
pub struct MergeAudioStep;

impl MergeAudioStep {
    pub fn new() -> Self {
        Self
    }

    fn plan_args(
        plan: AudioPlan,
        ctx: &Context,
        intermediate: &std::path::Path,
    ) -> Vec<String> {
        let source = &ctx.request.input_path;
        let output = &ctx.request.output_path;
        match plan {
            AudioPlan::AnalogMix => analog_mix_args(intermediate, source, output),
            AudioPlan::Passthrough => passthrough_args(intermediate, source, output),
            AudioPlan::Silent => silent_args(intermediate, output),
        }
    }
}

impl Default for MergeAudioStep {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineStep for MergeAudioStep {
    fn name(&self) -> &str {
        "MergeAudio"
    }

    fn description(&self) -> &str {
        "Mux the rendered video with audio, falling back to a silent export"
    }

    fn validate_input(&self, _ctx: &Context) -> StepResult<()> {
        Ok(())
    }

    fn execute(&self, ctx: &Context, state: &mut JobState) -> StepResult<StepOutcome> {
        let intermediate = ctx.intermediate_path();
        if !intermediate.exists() {
            return Ok(StepOutcome::Skipped(
                "no intermediate render to mux".to_string(),
            ));
        }

        let mut plan = if ctx.request.analog_audio {
            AudioPlan::AnalogMix
        } else {
            AudioPlan::Passthrough
        };

        ctx.logger.section(&format!("Audio plan: {}", plan));
        let mut output = run_logged(
            &ctx.tools.ffmpeg,
            &Self::plan_args(plan, ctx, &intermediate),
            &ctx.logger,
        );

        if !output.success() {
            ctx.logger.show_tail("audio mux");
            ctx.logger.warn(&format!(
                "{} mux failed (exit {}); source may have no audio, exporting silent video",
                plan, output.exit_code
            ));
            ctx.logger.clear_tail();

            plan = AudioPlan::Silent;
            ctx.logger.section(&format!("Audio plan: {}", plan));
            output = run_logged(
                &ctx.tools.ffmpeg,
                &Self::plan_args(plan, ctx, &intermediate),
                &ctx.logger,
            );

            if !output.success() {
                ctx.logger.show_tail("silent export");
                ctx.logger.error(&format!(
                    "Silent export failed too (exit {}); no output produced",
                    output.exit_code
                ));
            }
        }

        if let Err(e) = fs::remove_file(&intermediate) {
            ctx.logger
                .warn(&format!("Failed to remove intermediate render: {}", e));
        }

        if output.success() {
            ctx.logger.success(&format!(
                "Muxed ({}) to {}",
                plan,
                ctx.request.output_path.display()
            ));
        }

        state.merge = Some(MergeOutput {
            output_path: ctx.request.output_path.clone(),
            plan,
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
        let (_dir, ctx) = test_context("clip.mp4", "out.mp4", true);
        let mut state = JobState::new("test");

        let step = MergeAudioStep::new();
        let outcome = step.execute(&ctx, &mut state).unwrap();

        assert!(matches!(outcome, StepOutcome::Skipped(_)));
        assert!(state.merge.is_none());
    }

    #[test]
    fn falls_back_to_silent_and_removes_intermediate() {
        // ffmpeg path in the test context points nowhere, so both the first
        // plan and the silent fallback fail; the step still records the
        // fallback plan and cleans up the intermediate.
        let (_dir, ctx) = test_context("clip.mp4", "out.mp4", true);
        let intermediate = ctx.intermediate_path();
        std::fs::write(&intermediate, b"fake video").unwrap();

        let mut state = JobState::new("test");
        let step = MergeAudioStep::new();
        let outcome = step.execute(&ctx, &mut state).unwrap();

        assert_eq!(outcome, StepOutcome::Success);
        assert!(!intermediate.exists());

        let merge = state.merge.unwrap();
        assert_eq!(merge.plan, AudioPlan::Silent);
    }

    #[test]
    fn passthrough_is_first_choice_without_analog_audio() {
        let (_dir, ctx) = test_context("clip.mp4", "out.mp4", false);
        let intermediate = ctx.intermediate_path();

        let args = MergeAudioStep::plan_args(AudioPlan::Passthrough, &ctx, &intermediate);
        assert!(args.contains(&"1:a".to_string()));
        assert!(!args.iter().any(|a| a.contains("lowpass")));

        let args = MergeAudioStep::plan_args(AudioPlan::AnalogMix, &ctx, &intermediate);
        assert!(args.iter().any(|a| a.contains("lowpass=f=3000")));
    }
}
