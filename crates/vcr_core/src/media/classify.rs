//! Input classification by file extension.
//!
//! Classification never inspects file contents: the extension alone decides
//! whether a source is treated as a still image or handed to the video
//! path. Unknown or missing extensions fall through to video.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Extensions treated as still images. Everything else is a video/media file.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "webp", "tiff", "gif"];

/// Kind of media a source file holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Classify a path by its extension, case-insensitively.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()) => {
                MediaKind::Image
            }
            _ => MediaKind::Video,
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaKind::Image => write!(f, "image"),
            MediaKind::Video => write!(f, "video"),
        }
    }
}

/// Rewrite the requested output path when it conflicts with the input kind.
///
/// An image input with a non-image output extension (e.g. `out.mp4`) is
/// silently redirected to `out.png`. Video inputs are never rewritten.
pub fn correct_output_path(kind: MediaKind, output: &Path) -> PathBuf {
    if kind == MediaKind::Image && MediaKind::from_path(output) != MediaKind::Image {
        return output.with_extension("png");
    }
    output.to_path_buf()
}

/// Default output filename suggested for a given input kind.
pub fn default_output_name(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Image => "vhs_image.png",
        MediaKind::Video => "vhs_video.mp4",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_images_by_extension() {
        for ext in IMAGE_EXTENSIONS {
            let path = PathBuf::from(format!("photo.{}", ext));
            assert_eq!(MediaKind::from_path(&path), MediaKind::Image, "{}", ext);
        }
    }

    #[test]
    fn classification_is_case_insensitive() {
        assert_eq!(
            MediaKind::from_path(Path::new("SCAN.JPEG")),
            MediaKind::Image
        );
        assert_eq!(MediaKind::from_path(Path::new("clip.MP4")), MediaKind::Video);
    }

    #[test]
    fn unknown_or_missing_extension_is_video() {
        assert_eq!(MediaKind::from_path(Path::new("clip.mp4")), MediaKind::Video);
        assert_eq!(MediaKind::from_path(Path::new("tape.vob")), MediaKind::Video);
        assert_eq!(MediaKind::from_path(Path::new("no_extension")), MediaKind::Video);
    }

    #[test]
    fn image_output_with_video_extension_is_rewritten() {
        let out = correct_output_path(MediaKind::Image, Path::new("out.mp4"));
        assert_eq!(out, PathBuf::from("out.png"));
    }

    #[test]
    fn image_output_with_image_extension_is_kept() {
        let out = correct_output_path(MediaKind::Image, Path::new("out.webp"));
        assert_eq!(out, PathBuf::from("out.webp"));
    }

    #[test]
    fn video_output_is_never_rewritten() {
        let out = correct_output_path(MediaKind::Video, Path::new("out.mkv"));
        assert_eq!(out, PathBuf::from("out.mkv"));
    }

    #[test]
    fn default_names_match_kind() {
        assert_eq!(default_output_name(MediaKind::Image), "vhs_image.png");
        assert_eq!(default_output_name(MediaKind::Video), "vhs_video.mp4");
    }
}
