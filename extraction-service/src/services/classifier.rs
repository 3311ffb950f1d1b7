//! Interpretation of the model's reply.

/// Prefix the model is instructed to emit for documents without clinical content.
pub const NOT_CLINICAL_SENTINEL: &str = "NOT_CLINICAL";

const DEFAULT_NOT_CLINICAL_REASON: &str = "Documento não clínico";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Clinical,
    /// Carries the model's stated reason.
    NotClinical(String),
}

/// Classify extracted text by the `NOT_CLINICAL` sentinel (case-insensitive).
///
/// The reason is whatever follows the first `:` in the reply.
pub fn classify(text: &str) -> Classification {
    let is_sentinel = text
        .get(..NOT_CLINICAL_SENTINEL.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(NOT_CLINICAL_SENTINEL));

    if !is_sentinel {
        return Classification::Clinical;
    }

    let reason = text
        .split_once(':')
        .map(|(_, reason)| reason.trim().to_string())
        .unwrap_or_else(|| DEFAULT_NOT_CLINICAL_REASON.to_string());

    Classification::NotClinical(reason)
}
