//! Invocation patterns for the renderer and transcoder.
//!
//! All filter, codec, and bitrate values are fixed constants. The builders
//! are pure so command shapes can be asserted in tests without spawning
//! processes.

use std::path::Path;

/// Low-pass cutoff applied to the original audio in the analog mix.
pub const LOWPASS_HZ: u32 = 3000;
/// Gain boost applied to the original audio in the analog mix.
pub const ANALOG_GAIN: &str = "1.5";
/// Audio codec for muxed outputs (universal MP4 compatibility).
pub const AUDIO_CODEC: &str = "aac";
/// Audio bitrate for the analog mix.
pub const AUDIO_BITRATE: &str = "192k";

fn arg(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

/// Renderer invocation: `<renderer> -i <input> -o <intermediate>`.
pub fn render_args(input: &Path, intermediate: &Path) -> Vec<String> {
    vec![
        "-i".to_string(),
        arg(input),
        "-o".to_string(),
        arg(intermediate),
    ]
}

/// Extract exactly one frame from the intermediate render.
pub fn extract_frame_args(intermediate: &Path, output: &Path) -> Vec<String> {
    vec![
        "-y".to_string(),
        "-i".to_string(),
        arg(intermediate),
        "-vframes".to_string(),
        "1".to_string(),
        arg(output),
    ]
}

/// Plan A: mux the render with low-passed, boosted original audio.
pub fn analog_mix_args(intermediate: &Path, source: &Path, output: &Path) -> Vec<String> {
    vec![
        "-y".to_string(),
        "-i".to_string(),
        arg(intermediate),
        "-i".to_string(),
        arg(source),
        "-filter_complex".to_string(),
        format!("[1:a]lowpass=f={},volume={}[a]", LOWPASS_HZ, ANALOG_GAIN),
        "-map".to_string(),
        "0:v".to_string(),
        "-map".to_string(),
        "[a]".to_string(),
        "-c:v".to_string(),
        "copy".to_string(),
        "-c:a".to_string(),
        AUDIO_CODEC.to_string(),
        "-b:a".to_string(),
        AUDIO_BITRATE.to_string(),
        arg(output),
    ]
}

/// Plan B: mux the render with the original audio unmodified.
pub fn passthrough_args(intermediate: &Path, source: &Path, output: &Path) -> Vec<String> {
    vec![
        "-y".to_string(),
        "-i".to_string(),
        arg(intermediate),
        "-i".to_string(),
        arg(source),
        "-map".to_string(),
        "0:v".to_string(),
        "-map".to_string(),
        "1:a".to_string(),
        "-c:v".to_string(),
        "copy".to_string(),
        "-c:a".to_string(),
        AUDIO_CODEC.to_string(),
        arg(output),
    ]
}

/// Plan C: re-export the rendered video stream only, silent.
pub fn silent_args(intermediate: &Path, output: &Path) -> Vec<String> {
    vec![
        "-y".to_string(),
        "-i".to_string(),
        arg(intermediate),
        "-c:v".to_string(),
        "copy".to_string(),
        "-an".to_string(),
        arg(output),
    ]
}
