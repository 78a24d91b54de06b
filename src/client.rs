use crate::completion::{CompletionApiResponse, CompletionRequestBody};
use crate::constants::{COMPLETIONS_PATH, IMAGE_GENERATIONS_PATH, REQUEST_TIMEOUT_SECS};
use crate::error::{ApiError, RecreateError};
use crate::images::{ImageGenerationApiResponse, ImageGenerationRequestBody};
use crate::settings::Settings;
use log::debug;
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Client,
};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;

/// The two hosted capabilities the recreation loop needs.
///
/// [`OpenAiClient`] talks to the real service; tests substitute their own
/// implementation.
#[allow(async_fn_in_trait)]
pub trait ImageModelApi {
    async fn complete(
        &self,
        request: &CompletionRequestBody,
    ) -> Result<CompletionApiResponse, ApiError>;

    async fn generate_image(
        &self,
        request: &ImageGenerationRequestBody,
    ) -> Result<ImageGenerationApiResponse, ApiError>;
}

pub fn build_headers(api_key: &str) -> Result<HeaderMap, ApiError> {
    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", api_key))?,
    );
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    Ok(headers)
}

#[derive(Debug, Clone)]
pub struct OpenAiClient {
    http: Client,
    headers: HeaderMap,
    base_url: String,
}

impl OpenAiClient {
    pub fn new(api_key: &str, base_url: &str) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(OpenAiClient {
            http,
            headers: build_headers(api_key)?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, RecreateError> {
        let client = Self::new(settings.api_key()?, settings.base_url())?;
        Ok(client)
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let url = self.endpoint(path);
        debug!("POST {}", url);

        let response = self
            .http
            .post(&url)
            .headers(self.headers.clone())
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let response_body = response.text().await?;
        if !status.is_success() {
            return Err(ApiError::Status {
                status,
                body: response_body,
            });
        }

        Ok(serde_json::from_str(&response_body)?)
    }
}

impl ImageModelApi for OpenAiClient {
    async fn complete(
        &self,
        request: &CompletionRequestBody,
    ) -> Result<CompletionApiResponse, ApiError> {
        self.post_json(COMPLETIONS_PATH, request).await
    }

    async fn generate_image(
        &self,
        request: &ImageGenerationRequestBody,
    ) -> Result<ImageGenerationApiResponse, ApiError> {
        self.post_json(IMAGE_GENERATIONS_PATH, request).await
    }
}
