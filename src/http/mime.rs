//! MIME type detection module
//!
//! Guesses a Content-Type for a media asset from its file extension.

use std::path::Path;

/// Fallback for unknown or missing extensions
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Get MIME Content-Type for a file path, matching the extension case-insensitively
pub fn content_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    get_content_type(extension.as_deref())
}

/// Get MIME Content-Type based on a lowercase file extension
pub fn get_content_type(extension: Option<&str>) -> &'static str {
    match extension {
        // Images (cover art)
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("bmp") => "image/bmp",
        Some("heic") => "image/heic",
        Some("ico") => "image/x-icon",

        // Audio (tracks)
        Some("mp3") => "audio/mpeg",
        Some("m4a" | "mp4a") => "audio/mp4",
        Some("aac") => "audio/aac",
        Some("wav") => "audio/wav",
        Some("flac") => "audio/flac",
        Some("ogg" | "oga") => "audio/ogg",
        Some("opus") => "audio/opus",
        Some("aif" | "aiff") => "audio/aiff",

        // Video
        Some("mp4") => "video/mp4",
        Some("mov") => "video/quicktime",
        Some("webm") => "video/webm",

        // Text and data
        Some("json") => "application/json",
        Some("txt") => "text/plain",
        Some("lrc") => "text/plain",
        Some("html" | "htm") => "text/html",
        Some("css") => "text/css",
        Some("js") => "text/javascript",
        Some("xml") => "application/xml",
        Some("pdf") => "application/pdf",

        _ => OCTET_STREAM,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_types() {
        assert_eq!(get_content_type(Some("jpg")), "image/jpeg");
        assert_eq!(get_content_type(Some("png")), "image/png");
        assert_eq!(get_content_type(Some("mp3")), "audio/mpeg");
        assert_eq!(get_content_type(Some("m4a")), "audio/mp4");
        assert_eq!(get_content_type(Some("flac")), "audio/flac");
    }

    #[test]
    fn test_extension_case_is_ignored() {
        assert_eq!(content_type_for(Path::new("albums/x/Cover.JPG")), "image/jpeg");
        assert_eq!(content_type_for(Path::new("albums/x/01 Track.Mp3")), "audio/mpeg");
    }

    #[test]
    fn test_unknown_extension() {
        assert_eq!(get_content_type(Some("xyz")), OCTET_STREAM);
        assert_eq!(get_content_type(None), OCTET_STREAM);
        assert_eq!(content_type_for(Path::new("albums/x/README")), OCTET_STREAM);
    }
}
