#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! VCR Manager - main entry point
//!
//! Handles application-level logging initialization, configuration
//! loading, directory creation, and the iced application launch.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use vcr_core::config::ConfigManager;
use vcr_core::logging::{init_tracing_with_file, LogLevel};

mod app;
mod theme;
mod workers;

use app::App;

/// Default config path: .config/settings.toml (relative to working directory)
fn default_config_path() -> PathBuf {
    PathBuf::from(".config").join("settings.toml")
}

fn main() -> iced::Result {
    // Load configuration first (needed for the logs directory path)
    let config_path = default_config_path();
    let mut config_manager = ConfigManager::new(&config_path);

    if let Err(e) = config_manager.load_or_create() {
        eprintln!("Warning: Failed to load config: {}. Using defaults.", e);
    }

    // Initialize application-level logging
    let logs_dir = config_manager.logs_folder();
    let _ = std::fs::create_dir_all(&logs_dir);
    let _log_guard = init_tracing_with_file(LogLevel::Info, &logs_dir);

    tracing::info!("VCR Manager starting");
    tracing::info!("Config: {}", config_path.display());
    tracing::info!("Core version: {}", vcr_core::version());

    // Ensure all configured directories exist
    if let Err(e) = config_manager.ensure_dirs_exist() {
        tracing::error!("Failed to create directories: {}", e);
        eprintln!("Warning: Failed to create directories: {}", e);
    }

    // Wrap config in Arc<Mutex> for sharing with the worker thread
    let config = Arc::new(Mutex::new(config_manager));

    iced::application(move || App::new(Arc::clone(&config)), App::update, App::view)
        .title("VCR Manager | Universal Edition")
        .theme(App::theme)
        .window(iced::window::Settings {
            size: iced::Size::new(620.0, 560.0),
            resizable: false,
            ..Default::default()
        })
        .run()
}
