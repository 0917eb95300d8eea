//! MIME type helpers
//!
//! Content sniffing via magic numbers plus a reverse content-type to
//! extension table. Extension-based lookup for named paths goes through
//! `mime_guess`; sniffing is the fallback for extensionless temp files.

use std::path::Path;

/// Fallback type when no signature matches
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Detect a content type from leading file bytes using magic numbers.
pub fn sniff(data: &[u8]) -> &'static str {
    if data.len() < 4 {
        return OCTET_STREAM;
    }

    // JPEG: FF D8 FF
    if data[0] == 0xFF && data[1] == 0xD8 && data[2] == 0xFF {
        return "image/jpeg";
    }

    // PNG: 89 50 4E 47
    if data[0] == 0x89 && data[1] == 0x50 && data[2] == 0x4E && data[3] == 0x47 {
        return "image/png";
    }

    // GIF: 47 49 46
    if data[0] == 0x47 && data[1] == 0x49 && data[2] == 0x46 {
        return "image/gif";
    }

    // WebP: RIFF ... WEBP
    if data.len() >= 12
        && data[0] == 0x52
        && data[1] == 0x49
        && data[2] == 0x46
        && data[3] == 0x46
        && data[8] == 0x57
        && data[9] == 0x45
        && data[10] == 0x42
        && data[11] == 0x50
    {
        return "image/webp";
    }

    // PDF: 25 50 44 46
    if data[0] == 0x25 && data[1] == 0x50 && data[2] == 0x44 && data[3] == 0x46 {
        return "application/pdf";
    }

    OCTET_STREAM
}

/// Map a content type to a canonical file extension (without the dot).
pub fn extension_for(content_type: &str) -> Option<&'static str> {
    match content_type {
        "image/jpeg" | "image/jpg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/gif" => Some("gif"),
        "image/webp" => Some("webp"),
        "application/pdf" => Some("pdf"),
        "text/plain" => Some("txt"),
        _ => None,
    }
}

/// Guess a content type from a path's extension, if it has one.
pub fn guess_from_path(path: &Path) -> Option<String> {
    path.extension()?;
    mime_guess::from_path(path)
        .first_raw()
        .map(|m| m.to_string())
}
