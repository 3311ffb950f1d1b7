use axum::body::Bytes;
use serde::{Deserialize, Serialize};

/// A file received on `POST /extract`. Lives for one request only.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub filename: String,
    pub bytes: Bytes,
}

impl UploadedDocument {
    pub fn new(filename: impl Into<String>, bytes: Bytes) -> Self {
        Self {
            filename: filename.into(),
            bytes,
        }
    }

    /// Size in bytes; always the length of the content.
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Machine-readable failure codes returned in the `error` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    ConfigError,
    NoFile,
    InvalidFile,
    NotClinical,
    ProcessingError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ConfigError => "CONFIG_ERROR",
            ErrorCode::NoFile => "NO_FILE",
            ErrorCode::InvalidFile => "INVALID_FILE",
            ErrorCode::NotClinical => "NOT_CLINICAL",
            ErrorCode::ProcessingError => "PROCESSING_ERROR",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub filename: String,
    pub size_bytes: usize,
    pub mime_type: String,
}

/// Body of every `/extract` response, successful or not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResponse {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<DocumentMetadata>,
}

impl ExtractionResponse {
    pub fn success(message: String, metadata: DocumentMetadata) -> Self {
        Self {
            success: true,
            message,
            error: None,
            metadata: Some(metadata),
        }
    }

    pub fn failure(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            error: Some(code),
            metadata: None,
        }
    }
}
