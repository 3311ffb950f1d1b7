use extraction_service::config::ExtractionConfig;
use extraction_service::services::providers::mock::MockExtractor;
use extraction_service::services::providers::DocumentExtractor;
use extraction_service::startup::Application;
use std::sync::Arc;

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub client: reqwest::Client,
}

impl TestApp {
    /// Spawn with a mock extractor that always replies `reply`.
    pub async fn with_reply(reply: &str) -> (Self, Arc<MockExtractor>) {
        let mock = Arc::new(MockExtractor::replying(reply));
        let extractor: Arc<dyn DocumentExtractor> = mock.clone();
        let app = Self::spawn(Some(extractor)).await;
        (app, mock)
    }

    /// Spawn without a credential: no extractor at all.
    pub async fn unconfigured() -> Self {
        Self::spawn(None).await
    }

    pub async fn spawn(extractor: Option<Arc<dyn DocumentExtractor>>) -> Self {
        let mut config = ExtractionConfig::default();
        config.common.port = 0; // Random port for testing

        let app = Application::build_with_extractor(config, extractor)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for HTTP server to be ready by polling health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            client,
        }
    }

    /// Upload `bytes` as the `file` field.
    pub async fn post_file(&self, filename: &str, bytes: Vec<u8>) -> reqwest::Response {
        let form = reqwest::multipart::Form::new().part(
            "file",
            reqwest::multipart::Part::bytes(bytes).file_name(filename.to_string()),
        );
        self.post_form(form).await
    }

    pub async fn post_form(&self, form: reqwest::multipart::Form) -> reqwest::Response {
        self.client
            .post(format!("{}/extract", self.address))
            .multipart(form)
            .send()
            .await
            .expect("Failed to execute request")
    }
}
