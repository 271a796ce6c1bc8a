//! JSON shapes exchanged with the chat-completions extensions endpoint.

use serde::{Deserialize, Serialize};

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// One entry of the `messages` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Retrieval backends the extensions endpoint accepts.
///
/// Only Cognitive Search is supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataSourceKind {
    AzureCognitiveSearch,
}

/// Connection details for the search index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParameters {
    pub endpoint: String,
    pub key: String,
    pub index_name: String,
}

/// One entry of the `dataSources` extension array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSource {
    #[serde(rename = "type")]
    pub kind: DataSourceKind,
    pub parameters: SearchParameters,
}

/// Request body for `POST .../extensions/chat/completions`.
///
/// `dataSources` sits at the top level of the body next to the standard
/// chat-completion fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
    pub messages: Vec<ChatMessage>,
    #[serde(rename = "dataSources")]
    pub data_sources: Vec<DataSource>,
}

/// Response body. Fields the client does not read are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatCompletion {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    /// Retrieval context injected by the extensions endpoint.
    #[serde(default)]
    pub context: Option<MessageContext>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageContext {
    #[serde(default)]
    pub messages: Vec<ContextMessage>,
}

/// A context message. For the tool message at index 0, `content` is itself a
/// JSON document carrying the `citations` array.
#[derive(Debug, Clone, Deserialize)]
pub struct ContextMessage {
    #[serde(default)]
    pub role: Option<String>,
    pub content: String,
}
