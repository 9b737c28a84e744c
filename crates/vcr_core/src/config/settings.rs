//! Settings struct with TOML-based sections.
//!
//! Settings are organized into logical sections that map to TOML tables.
//! Each section can be updated independently for atomic section-level
//! updates.

use serde::{Deserialize, Serialize};

use crate::logging::LogConfig;

/// Root settings structure containing all configuration sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Path-related settings.
    #[serde(default)]
    pub paths: PathSettings,

    /// External tool locations.
    #[serde(default)]
    pub tools: ToolSettings,

    /// Audio processing options.
    #[serde(default)]
    pub audio: AudioSettings,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Path configuration for output, temp, and logs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathSettings {
    /// Output folder suggested for converted files.
    #[serde(default = "default_output_folder")]
    pub output_folder: String,

    /// Root folder for per-job work directories.
    #[serde(default = "default_temp_root")]
    pub temp_root: String,

    /// Folder for log files.
    #[serde(default = "default_logs_folder")]
    pub logs_folder: String,

    /// Last directory a source file was picked from.
    #[serde(default)]
    pub last_input_dir: String,

    /// Last directory an output file was saved to.
    #[serde(default)]
    pub last_output_dir: String,
}

fn default_output_folder() -> String {
    "vhs_output".to_string()
}

fn default_temp_root() -> String {
    ".temp".to_string()
}

fn default_logs_folder() -> String {
    ".logs".to_string()
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            output_folder: default_output_folder(),
            temp_root: default_temp_root(),
            logs_folder: default_logs_folder(),
            last_input_dir: String::new(),
            last_output_dir: String::new(),
        }
    }
}

/// External tool locations. Empty strings mean "discover on PATH".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolSettings {
    /// Explicit path to the analog-effect renderer binary.
    #[serde(default)]
    pub renderer_path: String,

    /// Explicit path to ffmpeg.
    #[serde(default)]
    pub ffmpeg_path: String,

    /// Explicit path to ffprobe.
    #[serde(default)]
    pub ffprobe_path: String,
}

/// Audio processing options.
///
/// Only the Plan A toggle lives here; filter, codec, and bitrate values are
/// fixed constants in the transcode module, not configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioSettings {
    /// Attempt the analog audio mix (Plan A) for video inputs.
    #[serde(default = "default_true")]
    pub analog_audio: bool,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self { analog_audio: true }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Use compact log format (filter subprocess output and progress).
    #[serde(default = "default_true")]
    pub compact: bool,

    /// Number of subprocess output lines kept for the error tail.
    #[serde(default = "default_error_tail")]
    pub error_tail: u32,

    /// Progress update step percentage.
    #[serde(default = "default_progress_step")]
    pub progress_step: u32,

    /// Show timestamps in job log output.
    #[serde(default = "default_true")]
    pub show_timestamps: bool,
}

fn default_true() -> bool {
    true
}

fn default_error_tail() -> u32 {
    20
}

fn default_progress_step() -> u32 {
    20
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            compact: true,
            error_tail: default_error_tail(),
            progress_step: default_progress_step(),
            show_timestamps: true,
        }
    }
}

impl LoggingSettings {
    /// Convert to the job logger's runtime configuration.
    pub fn to_log_config(&self) -> LogConfig {
        LogConfig {
            compact: self.compact,
            error_tail: self.error_tail as usize,
            progress_step: self.progress_step,
            show_timestamps: self.show_timestamps,
            ..LogConfig::default()
        }
    }
}

/// Identifies a settings section for atomic section-level updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSection {
    Paths,
    Tools,
    Audio,
    Logging,
}

impl ConfigSection {
    /// TOML table name for this section.
    pub fn table_name(&self) -> &'static str {
        match self {
            ConfigSection::Paths => "paths",
            ConfigSection::Tools => "tools",
            ConfigSection::Audio => "audio",
            ConfigSection::Logging => "logging",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let settings = Settings::default();
        assert_eq!(settings.paths.output_folder, "vhs_output");
        assert!(settings.audio.analog_audio);
        assert!(settings.tools.renderer_path.is_empty());
        assert!(settings.logging.compact);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let settings: Settings = toml::from_str("[audio]\nanalog_audio = false\n").unwrap();
        assert!(!settings.audio.analog_audio);
        assert_eq!(settings.paths.temp_root, ".temp");
        assert_eq!(settings.logging.error_tail, 20);
    }

    #[test]
    fn log_config_bridge_carries_values() {
        let mut logging = LoggingSettings::default();
        logging.compact = false;
        logging.error_tail = 50;

        let config = logging.to_log_config();
        assert!(!config.compact);
        assert_eq!(config.error_tail, 50);
    }

    #[test]
    fn section_table_names() {
        assert_eq!(ConfigSection::Paths.table_name(), "paths");
        assert_eq!(ConfigSection::Audio.table_name(), "audio");
    }
}
