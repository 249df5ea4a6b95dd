//! Outbound clients for the external collaborators: the AI content
//! generation service and the brand-kit service.
//!
//! Both services must be tolerable when down. The content generator
//! surfaces failures as [`GenerationError`], which the template engine
//! recovers from; the brand client returns `None` on any failure so a
//! render simply proceeds unbranded.

use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use deck_core::brand::BrandKit;
use deck_templates::content::{ContentGenerator, GenerationError, GenerationRequest};

/// Default timeout for outbound collaborator calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// HTTP client for the content-generation service.
#[derive(Debug, Clone)]
pub struct HttpContentGenerator {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpContentGenerator {
    /// Create a client against a service base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL cannot be extended with the
    /// generation path or the HTTP client cannot be built.
    pub fn new(base: &Url) -> Result<Self, anyhow::Error> {
        let endpoint = base.join("generate")?;
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl ContentGenerator for HttpContentGenerator {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<serde_json::Value, GenerationError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await
            .map_err(|e| GenerationError(format!("content service unreachable: {e}")))?;

        if !response.status().is_success() {
            return Err(GenerationError(format!(
                "content service returned {}",
                response.status()
            )));
        }

        response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| GenerationError(format!("content service payload unreadable: {e}")))
    }
}

/// HTTP client for the brand-kit service.
#[derive(Debug, Clone)]
pub struct BrandKitClient {
    client: reqwest::Client,
    base: Url,
}

impl BrandKitClient {
    /// Create a client against a service base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base: Url) -> Result<Self, anyhow::Error> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { client, base })
    }

    /// Fetch the brand kit snapshot for a project. Any failure logs and
    /// returns `None`; rendering proceeds unbranded rather than failing.
    pub async fn fetch(&self, project_id: &str) -> Option<BrandKit> {
        let url = self
            .base
            .join(&format!("projects/{project_id}/brand-kit"))
            .ok()?;
        match self.client.get(url).send().await {
            Ok(response) if response.status().is_success() => {
                match response.json::<BrandKit>().await {
                    Ok(kit) => Some(kit),
                    Err(e) => {
                        tracing::warn!(project = project_id, error = %e, "brand kit payload unreadable");
                        None
                    }
                }
            }
            Ok(response) => {
                tracing::debug!(project = project_id, status = %response.status(), "no brand kit available");
                None
            }
            Err(e) => {
                tracing::warn!(project = project_id, error = %e, "brand service unreachable");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn generation_request() -> GenerationRequest {
        GenerationRequest {
            template_category: "problem".to_string(),
            template_name: "Problem".to_string(),
            business_profile: serde_json::json!({"industry": "robotics"}),
            existing_content: serde_json::json!({}),
            available_media: None,
            required_image_count: None,
        }
    }

    #[tokio::test]
    async fn test_generator_returns_service_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/generate"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"title": "The Problem"})),
            )
            .mount(&server)
            .await;

        let base = Url::parse(&server.uri()).expect("mock url");
        let generator = HttpContentGenerator::new(&base).expect("client");
        let content = generator
            .generate(&generation_request())
            .await
            .expect("generation");
        assert_eq!(content["title"], "The Problem");
    }

    #[tokio::test]
    async fn test_generator_maps_server_error_to_generation_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/generate"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let base = Url::parse(&server.uri()).expect("mock url");
        let generator = HttpContentGenerator::new(&base).expect("client");
        assert!(generator.generate(&generation_request()).await.is_err());
    }

    #[tokio::test]
    async fn test_brand_client_tolerates_missing_kit() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/projects/p1/brand-kit"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let base = Url::parse(&server.uri()).expect("mock url");
        let client = BrandKitClient::new(base).expect("client");
        assert!(client.fetch("p1").await.is_none());
    }

    #[tokio::test]
    async fn test_brand_client_parses_snapshot() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/projects/p1/brand-kit"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "primary_color": "#111111",
                "secondary_color": "#222222",
                "accent_color": "#333333",
                "font_family": "Inter, sans-serif",
                "logo_url": null,
            })))
            .mount(&server)
            .await;

        let base = Url::parse(&server.uri()).expect("mock url");
        let client = BrandKitClient::new(base).expect("client");
        let kit = client.fetch("p1").await.expect("kit");
        assert_eq!(kit.primary_color, "#111111");
    }
}
