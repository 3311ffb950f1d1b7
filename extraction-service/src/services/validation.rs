//! Upload checks applied before any bytes leave the service.

use super::mime::file_extension;
use thiserror::Error;

/// Largest accepted upload: 20 MiB.
pub const MAX_FILE_SIZE_BYTES: usize = 20 * 1024 * 1024;

/// Extensions the model is known to read.
pub const ALLOWED_EXTENSIONS: &[&str] = &[
    "pdf", "png", "jpg", "jpeg", "gif", "webp", "tiff", "tif", "bmp",
];

/// Why an upload was refused. The display text is shown to end users.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FileRejection {
    #[error("Formato .{0} não suportado. Use: PDF, PNG, JPG, etc.")]
    UnsupportedExtension(String),

    #[error("Arquivo muito grande ({:.1}MB). Limite: 20MB", megabytes(.size))]
    TooLarge { size: usize },

    #[error("Não foi possível ler o arquivo enviado.")]
    Unreadable,
}

fn megabytes(size: &usize) -> f64 {
    *size as f64 / 1024.0 / 1024.0
}

/// Check a file's extension, then its size.
pub fn validate(filename: &str, size: usize) -> Result<(), FileRejection> {
    let extension = file_extension(filename);
    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(FileRejection::UnsupportedExtension(extension));
    }

    if size > MAX_FILE_SIZE_BYTES {
        return Err(FileRejection::TooLarge { size });
    }

    Ok(())
}
