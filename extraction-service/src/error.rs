//! Request-level failures of `POST /extract` and their JSON rendering.

use crate::models::{ErrorCode, ExtractionResponse};
use crate::services::providers::ProviderError;
use crate::services::FileRejection;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Gemini API key not configured")]
    NotConfigured,

    #[error("No file field in request")]
    MissingFile,

    #[error("Uploaded file has no name")]
    UnnamedFile,

    #[error("Invalid file: {0}")]
    InvalidFile(#[from] FileRejection),

    #[error("Document is not clinical: {0}")]
    NotClinical(String),

    #[error("Extraction failed: {0}")]
    Processing(#[from] ProviderError),
}

impl ExtractionError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ExtractionError::NotConfigured => ErrorCode::ConfigError,
            ExtractionError::MissingFile | ExtractionError::UnnamedFile => ErrorCode::NoFile,
            ExtractionError::InvalidFile(_) => ErrorCode::InvalidFile,
            ExtractionError::NotClinical(_) => ErrorCode::NotClinical,
            ExtractionError::Processing(_) => ErrorCode::ProcessingError,
        }
    }

    /// A non-clinical document was still processed correctly, hence 200.
    pub fn status(&self) -> StatusCode {
        match self {
            ExtractionError::NotConfigured | ExtractionError::Processing(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ExtractionError::MissingFile
            | ExtractionError::UnnamedFile
            | ExtractionError::InvalidFile(_) => StatusCode::BAD_REQUEST,
            ExtractionError::NotClinical(_) => StatusCode::OK,
        }
    }

    /// Text shown to the caller. Provider details stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            ExtractionError::NotConfigured => {
                "API não configurada corretamente. Contate o administrador.".to_string()
            }
            ExtractionError::MissingFile => {
                "Nenhum arquivo enviado. Envie um arquivo no campo 'file'.".to_string()
            }
            ExtractionError::UnnamedFile => "Arquivo sem nome.".to_string(),
            ExtractionError::InvalidFile(rejection) => rejection.to_string(),
            ExtractionError::NotClinical(reason) => {
                format!("Documento não contém informações clínicas: {}", reason)
            }
            ExtractionError::Processing(_) => {
                "Erro ao processar documento. Tente novamente.".to_string()
            }
        }
    }
}

impl IntoResponse for ExtractionError {
    fn into_response(self) -> Response {
        (
            self.status(),
            Json(ExtractionResponse::failure(self.code(), self.public_message())),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_and_code_per_variant() {
        let cases = [
            (
                ExtractionError::NotConfigured,
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::ConfigError,
            ),
            (
                ExtractionError::MissingFile,
                StatusCode::BAD_REQUEST,
                ErrorCode::NoFile,
            ),
            (
                ExtractionError::UnnamedFile,
                StatusCode::BAD_REQUEST,
                ErrorCode::NoFile,
            ),
            (
                ExtractionError::InvalidFile(FileRejection::UnsupportedExtension("exe".into())),
                StatusCode::BAD_REQUEST,
                ErrorCode::InvalidFile,
            ),
            (
                ExtractionError::NotClinical("fatura".into()),
                StatusCode::OK,
                ErrorCode::NotClinical,
            ),
            (
                ExtractionError::Processing(ProviderError::RateLimited),
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::ProcessingError,
            ),
        ];

        for (error, status, code) in cases {
            assert_eq!(error.status(), status, "{error}");
            assert_eq!(error.code(), code, "{error}");
        }
    }

    #[test]
    fn provider_detail_is_not_exposed() {
        let error = ExtractionError::Processing(ProviderError::ApiError(
            "Gemini API error 500: internal stack trace".into(),
        ));
        assert!(!error.public_message().contains("stack trace"));
        assert_eq!(
            error.public_message(),
            "Erro ao processar documento. Tente novamente."
        );
    }

    #[test]
    fn not_clinical_message_includes_reason() {
        let error = ExtractionError::NotClinical("administrative document".into());
        assert_eq!(
            error.public_message(),
            "Documento não contém informações clínicas: administrative document"
        );
    }
}
