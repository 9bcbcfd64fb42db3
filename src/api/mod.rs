use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{GenerateError, SERVER_ERROR_FALLBACK};
use crate::request::GenerateRequest;

#[cfg(test)]
pub mod mock;
pub mod types;

pub use types::{GeneratedContent, GuidedQuestions, HealthStatus, Post, VisualPrompt};

#[async_trait]
pub trait ContentApi: Send + Sync {
    /// One POST to the generation endpoint. Never retried.
    async fn generate(&self, request: GenerateRequest) -> Result<GeneratedContent, GenerateError>;
}

#[derive(Clone)]
pub struct ContentClient {
    http: HttpClient,
    cfg: ClientConfig,
}

impl ContentClient {
    pub fn new(cfg: ClientConfig) -> Result<Self, GenerateError> {
        let mut builder = HttpClient::builder();
        if let Some(timeout) = cfg.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(GenerateError::transport)?;
        Ok(Self { http, cfg })
    }

    pub async fn guided_questions(&self) -> Result<GuidedQuestions, GenerateError> {
        self.get_json(&self.cfg.guided_questions_url()).await
    }

    pub async fn health(&self) -> Result<HealthStatus, GenerateError> {
        self.get_json(&self.cfg.health_url()).await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, GenerateError> {
        let response = self.http.get(url).send().await.map_err(GenerateError::transport)?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(GenerateError::transport)?;
        decode(status, &bytes)
    }
}

#[async_trait]
impl ContentApi for ContentClient {
    async fn generate(&self, request: GenerateRequest) -> Result<GeneratedContent, GenerateError> {
        let endpoint = self.cfg.generate_content_url();
        debug!(endpoint = %endpoint, input_type = %request.input_type, "posting generation request");
        let form = request.into_form().map_err(GenerateError::transport)?;

        let response = self
            .http
            .post(endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(GenerateError::transport)?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(GenerateError::transport)?;
        decode(status, &bytes)
    }
}

fn decode<T: DeserializeOwned>(status: reqwest::StatusCode, bytes: &[u8]) -> Result<T, GenerateError> {
    if !status.is_success() {
        let message = types::error_detail(bytes).unwrap_or_else(|| SERVER_ERROR_FALLBACK.to_string());
        return Err(GenerateError::server(status.as_u16(), message));
    }
    serde_json::from_slice(bytes).map_err(|err| {
        warn!(status = status.as_u16(), error = %err, "response body does not match the expected shape");
        GenerateError::server(status.as_u16(), SERVER_ERROR_FALLBACK)
    })
}
