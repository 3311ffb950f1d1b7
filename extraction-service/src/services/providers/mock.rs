//! Mock extractor for tests.

use super::{DocumentExtractor, ProviderError};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Debug, Clone)]
enum Reply {
    Text(String),
    Failure,
}

/// Returns a canned reply and records what it was asked.
pub struct MockExtractor {
    reply: Reply,
    calls: AtomicUsize,
    last_mime_type: Mutex<Option<String>>,
}

impl MockExtractor {
    /// Reply with `text` (trimmed, like the real client) to every document.
    pub fn replying(text: impl Into<String>) -> Self {
        Self::with_reply(Reply::Text(text.into()))
    }

    /// Fail every call with a network error.
    pub fn failing() -> Self {
        Self::with_reply(Reply::Failure)
    }

    fn with_reply(reply: Reply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            last_mime_type: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_mime_type(&self) -> Option<String> {
        self.last_mime_type
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl DocumentExtractor for MockExtractor {
    async fn extract(&self, _bytes: &[u8], mime_type: &str) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_mime_type.lock() {
            *last = Some(mime_type.to_string());
        }

        match &self.reply {
            Reply::Text(text) => Ok(text.trim().to_string()),
            Reply::Failure => Err(ProviderError::NetworkError(
                "mock extractor configured to fail".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn replies_trimmed_text_and_records_calls() {
        let mock = MockExtractor::replying("  Queixa principal: cefaleia \n");
        let text = mock.extract(b"img", "image/png").await.unwrap();

        assert_eq!(text, "Queixa principal: cefaleia");
        assert_eq!(mock.calls(), 1);
        assert_eq!(mock.last_mime_type().as_deref(), Some("image/png"));
    }

    #[tokio::test]
    async fn failing_mock_returns_network_error() {
        let mock = MockExtractor::failing();
        let err = mock.extract(b"", "application/pdf").await.unwrap_err();
        assert_eq!(err.kind(), "network");
    }
}
