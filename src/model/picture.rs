use std::path::{Path, PathBuf};

/// The only media type the profile picture field accepts.
pub const PNG_MEDIA_TYPE: &str = "image/png";

/// A picked picture file: its path plus the media type declared by the file
/// name extension.
///
/// The declared type is what validation checks; the file contents are never
/// sniffed. This mirrors a file picker reporting a MIME type for a selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PictureFile {
    pub path: PathBuf,
    pub media_type: String,
}

impl PictureFile {
    /// Creates a picture descriptor from a path, deriving the declared media
    /// type from the extension (case-insensitive).
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let media_type = media_type_for(&path).to_string();
        Self { path, media_type }
    }
}

/// Maps a file extension to its declared media type.
///
/// Unknown or missing extensions map to `application/octet-stream`, which
/// never matches [`PNG_MEDIA_TYPE`].
fn media_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("png") => PNG_MEDIA_TYPE,
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("bmp") => "image/bmp",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}
