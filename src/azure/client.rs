/// Azure OpenAI HTTP client implementation.
///
/// This module provides `AzureOpenAiClient` for making synchronous HTTP requests to the
/// chat-completions extensions endpoint, along with error types and a builder for configuration.
use thiserror::Error;
use tracing::debug;

use super::wire::{ChatCompletion, ChatCompletionRequest};
use crate::config::ConnectionConfig;

/// API version of the extensions endpoint that accepts `dataSources`.
pub const DEFAULT_API_VERSION: &str = "2023-09-01-preview";

/// Errors that can occur when calling the Azure OpenAI endpoint.
#[derive(Debug, Error)]
pub enum AzureOpenAiError {
    /// Network-related errors (connection failures, DNS resolution, bad URL, etc.)
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// Non-success HTTP status, with the service's error message when it sent one
    #[error("HTTP error: status {status}: {message}")]
    Http { status: u16, message: String },

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The response parsed but lacks a field the answer depends on
    #[error("Malformed response: {message}")]
    MalformedResponse { message: String },
}

impl AzureOpenAiError {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            message: message.into(),
        }
    }
}

/// Builder for constructing `AzureOpenAiClient` instances.
///
/// # Examples
///
/// ```
/// use askdata::azure::AzureOpenAiClientBuilder;
///
/// let client = AzureOpenAiClientBuilder::new()
///     .endpoint("https://my-resource.openai.azure.com")
///     .api_key("my-key")
///     .deployment("gpt-35-turbo")
///     .build()
///     .expect("Failed to create client");
/// ```
#[derive(Debug, Default)]
pub struct AzureOpenAiClientBuilder {
    endpoint: String,
    api_key: String,
    deployment: String,
    api_version: Option<String>,
}

impl AzureOpenAiClientBuilder {
    /// Creates a new builder with every setting empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder seeded with the model settings of `config`.
    pub fn from_config(config: &ConnectionConfig) -> Self {
        Self::new()
            .endpoint(&config.model_endpoint)
            .api_key(&config.model_credential)
            .deployment(&config.model_deployment_id)
    }

    /// Sets the resource endpoint (e.g., "https://my-resource.openai.azure.com").
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Sets the key sent in the `api-key` header.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    /// Sets the deployment name that selects the model.
    pub fn deployment(mut self, deployment: impl Into<String>) -> Self {
        self.deployment = deployment.into();
        self
    }

    /// Overrides the `api-version` query parameter.
    pub fn api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = Some(api_version.into());
        self
    }

    /// Builds the `AzureOpenAiClient`.
    ///
    /// Settings are not validated here. An empty or malformed endpoint surfaces
    /// as a `Network` error when the request is sent.
    pub fn build(self) -> Result<AzureOpenAiClient, AzureOpenAiError> {
        // Default reqwest timeouts only
        let client = reqwest::blocking::Client::builder()
            .build()
            .map_err(AzureOpenAiError::Network)?;

        Ok(AzureOpenAiClient {
            client,
            endpoint: self.endpoint,
            api_key: self.api_key,
            deployment: self.deployment,
            api_version: self
                .api_version
                .unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
        })
    }
}

/// Synchronous HTTP client for the chat-completions extensions endpoint.
///
/// Sends each request exactly once. There is no retry.
pub struct AzureOpenAiClient {
    client: reqwest::blocking::Client,
    endpoint: String,
    api_key: String,
    deployment: String,
    api_version: String,
}

/// Trait for chat-completion calls.
///
/// This is the seam the requester is written against, so tests can supply
/// canned completions without a server.
pub trait ChatCompletionTrait: Send + Sync {
    /// Sends one chat-completion request and returns the parsed response body.
    fn complete(&self, request: &ChatCompletionRequest) -> Result<ChatCompletion, AzureOpenAiError>;
}

impl AzureOpenAiClient {
    /// Returns the resource endpoint configured for this client.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Returns the deployment name configured for this client.
    pub fn deployment(&self) -> &str {
        &self.deployment
    }

    /// Returns the `api-version` sent with every request.
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// Full URL of the extensions chat-completions endpoint.
    pub fn completions_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/extensions/chat/completions?api-version={}",
            self.endpoint.trim_end_matches('/'),
            self.deployment,
            self.api_version
        )
    }

    fn complete_internal(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletion, AzureOpenAiError> {
        let url = self.completions_url();
        debug!(deployment = %self.deployment, %url, "sending chat completion request");

        let response = self
            .client
            .post(&url)
            .header("api-key", &self.api_key)
            .json(request)
            .send()
            .map_err(AzureOpenAiError::Network)?;

        let status = response.status();
        debug!(status = status.as_u16(), "received chat completion response");

        let body = response.text().map_err(AzureOpenAiError::Network)?;

        if !status.is_success() {
            return Err(AzureOpenAiError::Http {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        serde_json::from_str(&body).map_err(AzureOpenAiError::Serialization)
    }
}

impl ChatCompletionTrait for AzureOpenAiClient {
    fn complete(&self, request: &ChatCompletionRequest) -> Result<ChatCompletion, AzureOpenAiError> {
        self.complete_internal(request)
    }
}

/// Pulls `error.message` out of an Azure error body, falling back to the raw text.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| {
            json.get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.trim().to_string())
}
