use crate::error::ExtractionError;
use crate::models::{DocumentMetadata, ExtractionResponse, UploadedDocument};
use crate::services::{classify, resolve_mime, validate, Classification, FileRejection};
use crate::startup::AppState;
use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use metrics::counter;

/// Multipart field carrying the document.
pub const FILE_FIELD: &str = "file";

/// `POST /extract`: turn an uploaded document into a clinical narrative.
pub async fn extract_document(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let result = run_extraction(&state, multipart).await;

    let outcome = match &result {
        Ok(_) => "SUCCESS",
        Err(e) => e.code().as_str(),
    };
    counter!("extraction_outcomes_total", "outcome" => outcome).increment(1);

    match result {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// `OPTIONS /extract`: empty pre-flight answer.
pub async fn extract_preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn run_extraction(
    state: &AppState,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<ExtractionResponse, ExtractionError> {
    // Checked before touching the body so a misconfigured service reads nothing.
    let Some(extractor) = state.extractor.clone() else {
        tracing::error!("GEMINI_API_KEY not configured");
        return Err(ExtractionError::NotConfigured);
    };

    let mut multipart = multipart.map_err(|e| {
        tracing::debug!(error = %e, "Request is not a multipart upload");
        ExtractionError::MissingFile
    })?;

    let document = read_upload(&mut multipart).await?;
    tracing::info!(
        filename = %document.filename,
        size_bytes = document.size(),
        "Processing uploaded document"
    );

    validate(&document.filename, document.size())?;

    let mime_type = resolve_mime(&document.filename);

    let text = extractor
        .extract(&document.bytes, mime_type)
        .await
        .map_err(|e| {
            tracing::error!(
                error = %e,
                kind = e.kind(),
                filename = %document.filename,
                "Document extraction failed"
            );
            counter!("provider_errors_total", "kind" => e.kind()).increment(1);
            ExtractionError::from(e)
        })?;

    match classify(&text) {
        Classification::NotClinical(reason) => {
            tracing::info!(filename = %document.filename, reason = %reason, "Document is not clinical");
            Err(ExtractionError::NotClinical(reason))
        }
        Classification::Clinical => {
            tracing::info!(
                filename = %document.filename,
                narrative_len = text.len(),
                "Clinical narrative extracted"
            );
            let metadata = DocumentMetadata {
                size_bytes: document.size(),
                filename: document.filename,
                mime_type: mime_type.to_string(),
            };
            Ok(ExtractionResponse::success(text, metadata))
        }
    }
}

/// Find the `file` field and read it whole. Other fields are skipped.
async fn read_upload(multipart: &mut Multipart) -> Result<UploadedDocument, ExtractionError> {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => return Err(ExtractionError::MissingFile),
            Err(e) if e.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                tracing::warn!(error = %e, "Upload exceeds request body limit");
                return Err(FileRejection::Unreadable.into());
            }
            Err(e) => {
                tracing::warn!(error = %e, "Malformed multipart body");
                return Err(ExtractionError::MissingFile);
            }
        };

        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        if filename.is_empty() {
            return Err(ExtractionError::UnnamedFile);
        }

        let bytes = field.bytes().await.map_err(|e| {
            tracing::warn!(error = %e, filename = %filename, "Failed to read uploaded file");
            ExtractionError::from(FileRejection::Unreadable)
        })?;

        return Ok(UploadedDocument::new(filename, bytes));
    }
}
