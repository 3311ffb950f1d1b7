//! Filename-based MIME lookup. Content is never sniffed.

/// Fallback for anything the table does not know.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Lower-cased text after the last `.`, or an empty string when there is none.
pub fn file_extension(filename: &str) -> String {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default()
}

/// MIME type for a filename, by extension.
pub fn resolve_mime(filename: &str) -> &'static str {
    match file_extension(filename).as_str() {
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "tiff" | "tif" => "image/tiff",
        "bmp" => "image/bmp",
        _ => OCTET_STREAM,
    }
}
