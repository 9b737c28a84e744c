//! External tool discovery and execution.
//!
//! The renderer and transcoder are separate binaries; everything this crate
//! produces comes from shelling out to them. Tools are resolved from the
//! `[tools]` settings section first, then searched on PATH.

use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;

use crate::config::ToolSettings;
use crate::logging::JobLogger;

/// Default binary name of the analog-effect renderer.
pub const RENDERER_BIN: &str = "ntsc-rs-cli";
/// Default binary name of the transcoder.
pub const FFMPEG_BIN: &str = "ffmpeg";
/// Default binary name of the prober.
pub const FFPROBE_BIN: &str = "ffprobe";

/// Errors that can occur while resolving tool paths.
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Required tool '{0}' not found in PATH")]
    NotFound(String),

    #[error("Configured path for '{tool}' does not exist: {path}")]
    ConfiguredPathMissing { tool: String, path: String },
}

/// Resolved absolute paths to the external tools.
#[derive(Debug, Clone)]
pub struct ToolPaths {
    /// Analog-effect renderer (`ntsc-rs-cli`).
    pub renderer: PathBuf,
    /// Transcoder (`ffmpeg`).
    pub ffmpeg: PathBuf,
    /// Prober (`ffprobe`).
    pub ffprobe: PathBuf,
}

impl ToolPaths {
    /// Resolve all tools from settings overrides, falling back to PATH.
    ///
    /// The renderer additionally gets its execute bit repaired on Unix:
    /// bundled copies unpacked from an archive sometimes lose it.
    pub fn resolve(settings: &ToolSettings) -> Result<Self, ToolError> {
        let renderer = resolve_tool(&settings.renderer_path, RENDERER_BIN)?;
        let ffmpeg = resolve_tool(&settings.ffmpeg_path, FFMPEG_BIN)?;
        let ffprobe = resolve_tool(&settings.ffprobe_path, FFPROBE_BIN)?;

        ensure_executable(&renderer);

        Ok(Self {
            renderer,
            ffmpeg,
            ffprobe,
        })
    }
}

/// Resolve a single tool: explicit override first, then PATH search.
fn resolve_tool(override_path: &str, default_name: &str) -> Result<PathBuf, ToolError> {
    if !override_path.is_empty() {
        let path = PathBuf::from(override_path);
        if path.is_file() {
            return Ok(path);
        }
        return Err(ToolError::ConfiguredPathMissing {
            tool: default_name.to_string(),
            path: override_path.to_string(),
        });
    }

    find_in_path(default_name).ok_or_else(|| ToolError::NotFound(default_name.to_string()))
}

/// Search PATH for a tool binary.
pub fn find_in_path(tool: &str) -> Option<PathBuf> {
    let path_var = env::var_os("PATH")?;
    search_dirs(tool, env::split_paths(&path_var))
}

/// Search a list of directories for a tool binary.
fn search_dirs(tool: &str, dirs: impl Iterator<Item = PathBuf>) -> Option<PathBuf> {
    for dir in dirs {
        let full = dir.join(tool);
        if full.is_file() {
            return Some(full);
        }
        #[cfg(windows)]
        {
            let exe = dir.join(format!("{tool}.exe"));
            if exe.is_file() {
                return Some(exe);
            }
        }
    }
    None
}

/// Repair a missing execute bit on Unix. Best-effort; failures are logged.
#[cfg(unix)]
fn ensure_executable(path: &Path) {
    use std::os::unix::fs::PermissionsExt;

    let Ok(metadata) = std::fs::metadata(path) else {
        return;
    };
    let mut permissions = metadata.permissions();
    if permissions.mode() & 0o111 == 0 {
        permissions.set_mode(0o755);
        if let Err(e) = std::fs::set_permissions(path, permissions) {
            tracing::warn!("Failed to set execute bit on {}: {}", path.display(), e);
        }
    }
}

#[cfg(not(unix))]
fn ensure_executable(_path: &Path) {}

/// Captured result of one external tool invocation.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    /// Process exit code; -1 when the process could not be spawned at all.
    pub exit_code: i32,
    /// Captured stdout.
    pub stdout: String,
    /// Captured stderr.
    pub stderr: String,
}

impl ToolOutput {
    /// Whether the invocation exited successfully.
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Sentinel output for a process that failed to spawn.
    fn spawn_failed() -> Self {
        Self {
            exit_code: -1,
            stdout: String::new(),
            stderr: String::new(),
        }
    }
}

/// Run a tool with captured output, logging the command line and streaming
/// stdout/stderr lines into the job logger's tail buffer.
///
/// Spawn errors are absorbed into a sentinel failed output: the pipeline
/// treats "could not start" the same as a nonzero exit.
pub fn run_logged(tool: &Path, args: &[String], logger: &JobLogger) -> ToolOutput {
    logger.command(&format!("{} {}", tool.display(), args.join(" ")));

    let output = match Command::new(tool).args(args).output() {
        Ok(o) => o,
        Err(e) => {
            logger.error(&format!("Failed to execute {}: {}", tool.display(), e));
            return ToolOutput::spawn_failed();
        }
    };

    let exit_code = output.status.code().unwrap_or(-1);
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    for line in stdout.lines() {
        logger.output_line(line, false);
    }
    for line in stderr.lines() {
        logger.output_line(line, true);
    }

    ToolOutput {
        exit_code,
        stdout,
        stderr,
    }
}
