//! Background conversion worker.
//!
//! The whole pipeline runs on one std thread; log lines, progress, and the
//! completion event are streamed back to the UI over a channel and mapped
//! into messages with `Task::run`.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use iced::futures::channel::mpsc;
use iced::futures::Stream;

use vcr_core::config::ConfigManager;
use vcr_core::logging::GuiLogCallback;
use vcr_core::models::ConversionRequest;
use vcr_core::orchestrator::{ConversionProcessor, ProgressCallback};

/// Events the conversion worker sends back to the UI.
#[derive(Debug, Clone)]
pub enum WorkerEvent {
    /// A job log line.
    Log(String),
    /// Pipeline progress update.
    Progress { percent: u32, message: String },
    /// Conversion finished; carries the final output path and nothing else.
    Finished { output_path: PathBuf },
}

/// Run a conversion on a background thread, streaming events to the UI.
pub fn spawn_conversion(
    request: ConversionRequest,
    config: &Arc<Mutex<ConfigManager>>,
) -> impl Stream<Item = WorkerEvent> {
    let (sender, receiver) = mpsc::unbounded();

    let (settings, log_dir, temp_root) = {
        let cfg = config.lock().unwrap();
        (cfg.settings().clone(), cfg.logs_folder(), cfg.temp_root())
    };

    std::thread::spawn(move || {
        let log_sender = sender.clone();
        let gui_callback: GuiLogCallback = Box::new(move |msg| {
            let _ = log_sender.unbounded_send(WorkerEvent::Log(msg.to_string()));
        });

        let progress_sender = sender.clone();
        let progress_callback: ProgressCallback = Box::new(move |_step, percent, message| {
            let _ = progress_sender.unbounded_send(WorkerEvent::Progress {
                percent,
                message: message.to_string(),
            });
        });

        let processor = ConversionProcessor::new(settings, log_dir, temp_root);
        let outcome = processor.process(request, Some(gui_callback), Some(progress_callback));

        let _ = sender.unbounded_send(WorkerEvent::Finished {
            output_path: outcome.output_path,
        });
    });

    receiver
}

/// Open the folder containing `path` in the platform file manager.
pub fn open_containing_folder(path: &Path) {
    let Some(folder) = path.parent() else {
        return;
    };

    #[cfg(target_os = "linux")]
    let program = "xdg-open";
    #[cfg(target_os = "macos")]
    let program = "open";
    #[cfg(target_os = "windows")]
    let program = "explorer";

    if let Err(e) = std::process::Command::new(program).arg(folder).spawn() {
        tracing::warn!("Failed to open folder {}: {}", folder.display(), e);
    }
}
