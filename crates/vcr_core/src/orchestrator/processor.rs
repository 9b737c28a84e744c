//! Conversion processor - one request in, one outcome out.
//!
//! The processor owns everything around a pipeline run: the scoped work
//! directory, the job logger, classification, tool resolution, and
//! cleanup. It never raises: whatever happens, the caller gets an outcome
//! carrying the (corrected) output path.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use uuid::Uuid;

use crate::config::Settings;
use crate::logging::{GuiLogCallback, JobLogger};
use crate::media::{correct_output_path, MediaKind};
use crate::models::{ConversionOutcome, ConversionRequest};
use crate::tools::ToolPaths;

use super::types::{Context, JobState, ProgressCallback};
use super::create_conversion_pipeline;

/// Processor for running a single conversion through the pipeline.
pub struct ConversionProcessor {
    /// Application settings.
    settings: Settings,
    /// Directory for log files.
    log_dir: PathBuf,
    /// Parent of per-job work directories.
    temp_root: PathBuf,
}

impl ConversionProcessor {
    /// Create a new conversion processor.
    pub fn new(settings: Settings, log_dir: PathBuf, temp_root: PathBuf) -> Self {
        Self {
            settings,
            log_dir,
            temp_root,
        }
    }

    /// Run one conversion.
    ///
    /// The returned outcome always carries the final output path, with no
    /// success flag - inspecting the file is the only way to learn more.
    ///
    /// # Arguments
    /// * `request` - The conversion to perform
    /// * `gui_callback` - Optional callback for GUI log output
    /// * `progress_callback` - Optional callback for progress updates
    pub fn process(
        &self,
        request: ConversionRequest,
        gui_callback: Option<GuiLogCallback>,
        progress_callback: Option<ProgressCallback>,
    ) -> ConversionOutcome {
        let kind = MediaKind::from_path(&request.input_path);
        let output_path = correct_output_path(kind, &request.output_path);
        if output_path != request.output_path {
            tracing::info!(
                "Output redirected for {} input: {} -> {}",
                kind,
                request.output_path.display(),
                output_path.display()
            );
        }
        let request = ConversionRequest {
            output_path: output_path.clone(),
            ..request
        };

        let job_id = Uuid::new_v4().to_string();
        let job_name = job_name_for(&request.input_path, &job_id);

        // Scoped work directory per operation, so concurrent runs cannot
        // collide on intermediate filenames.
        let work_dir = self.temp_root.join(format!("job-{}", job_id));
        if let Err(e) = fs::create_dir_all(&work_dir) {
            tracing::error!("Failed to create work directory: {}", e);
            return ConversionOutcome::bare(output_path);
        }

        let logger = match JobLogger::new(
            &job_name,
            &self.log_dir,
            self.settings.logging.to_log_config(),
            gui_callback,
        ) {
            Ok(l) => Arc::new(l),
            Err(e) => {
                tracing::error!("Failed to create job logger: {}", e);
                let _ = fs::remove_dir_all(&work_dir);
                return ConversionOutcome::bare(output_path);
            }
        };

        logger.info(&format!(
            "Starting conversion: {} ({}) -> {}",
            request.input_path.display(),
            kind,
            output_path.display()
        ));

        let tools = match ToolPaths::resolve(&self.settings.tools) {
            Ok(t) => t,
            Err(e) => {
                logger.error(&format!("Tool resolution failed: {}", e));
                let _ = fs::remove_dir_all(&work_dir);
                return ConversionOutcome::bare(output_path);
            }
        };

        if let Some(parent) = output_path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                logger.warn(&format!("Failed to create output directory: {}", e));
            }
        }

        let mut ctx = Context::new(
            request,
            kind,
            self.settings.clone(),
            tools,
            &job_name,
            work_dir.clone(),
            logger,
        );
        if let Some(callback) = progress_callback {
            ctx = ctx.with_progress_callback(callback);
        }

        let mut state = JobState::new(&job_id);
        let pipeline = create_conversion_pipeline(kind);

        let (steps_completed, steps_skipped) = match pipeline.run(&ctx, &mut state) {
            Ok(run) => (run.steps_completed, run.steps_skipped),
            Err(e) => {
                // Absorbed: the caller still gets the output path.
                ctx.logger.error(&format!("Pipeline aborted: {}", e));
                (Vec::new(), Vec::new())
            }
        };

        if let Err(e) = fs::remove_dir_all(&work_dir) {
            ctx.logger
                .warn(&format!("Failed to remove work directory: {}", e));
        }

        ctx.logger
            .info(&format!("Finished: {}", output_path.display()));

        ConversionOutcome {
            output_path,
            steps_completed,
            steps_skipped,
        }
    }
}

/// Derive a log-friendly job name from the input filename.
fn job_name_for(input_path: &std::path::Path, job_id: &str) -> String {
    let stem = input_path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "conversion".to_string());
    // Short id suffix keeps repeated conversions of one file apart.
    let short_id = &job_id[..8.min(job_id.len())];
    format!("{}-{}", stem, short_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn processor_in(dir: &std::path::Path) -> ConversionProcessor {
        let mut settings = Settings::default();
        // Point the required tools at real files so resolution succeeds but
        // execution fails (they are not executables worth running).
        let fake_tool = dir.join("fake-tool");
        std::fs::write(&fake_tool, b"").unwrap();
        let tool = fake_tool.to_string_lossy().to_string();
        settings.tools.renderer_path = tool.clone();
        settings.tools.ffmpeg_path = tool.clone();
        settings.tools.ffprobe_path = tool;

        ConversionProcessor::new(settings, dir.join("logs"), dir.join("temp"))
    }

    #[test]
    fn image_without_render_produces_no_output_and_no_error() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("photo.jpg");
        std::fs::write(&input, b"jpeg").unwrap();
        let requested_output = dir.path().join("out.mp4");

        let processor = processor_in(dir.path());
        let request = ConversionRequest::new(&input, &requested_output, true);
        let outcome = processor.process(request, None, None);

        // Video extension requested for an image input gets corrected.
        assert_eq!(outcome.output_path, dir.path().join("out.png"));
        // Renderer could not run, so nothing was produced - silently.
        assert!(!outcome.output_path.exists());
        assert_eq!(outcome.steps_completed, vec!["Render"]);
        assert_eq!(outcome.steps_skipped, vec!["ExtractFrame"]);
    }

    #[test]
    fn work_directory_is_removed_after_processing() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("clip.mp4");
        std::fs::write(&input, b"mp4").unwrap();

        let processor = processor_in(dir.path());
        let request = ConversionRequest::new(&input, dir.path().join("out.mp4"), false);
        let _ = processor.process(request, None, None);

        let temp_root = dir.path().join("temp");
        let leftovers: Vec<_> = std::fs::read_dir(&temp_root)
            .map(|entries| entries.filter_map(|e| e.ok()).collect())
            .unwrap_or_default();
        assert!(leftovers.is_empty(), "work dir not cleaned up");
    }

    #[test]
    fn missing_tools_still_yield_an_outcome() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("clip.mp4");
        std::fs::write(&input, b"mp4").unwrap();
        let output = dir.path().join("out.mp4");

        let mut settings = Settings::default();
        settings.tools.renderer_path = "/nonexistent/renderer".to_string();
        let processor =
            ConversionProcessor::new(settings, dir.path().join("logs"), dir.path().join("temp"));

        let outcome = processor.process(ConversionRequest::new(&input, &output, true), None, None);
        assert_eq!(outcome.output_path, output);
        assert!(outcome.steps_completed.is_empty());
    }

    #[test]
    fn job_names_embed_stem_and_id() {
        let name = job_name_for(std::path::Path::new("/media/clip.mp4"), "0123456789");
        assert!(name.starts_with("clip-"));
        assert_eq!(name.len(), "clip-".len() + 8);
    }
}
