/// Azure OpenAI HTTP client module.
///
/// This module provides a blocking client for the chat-completions "extensions"
/// endpoint, which grounds answers on an Azure Cognitive Search index, along with
/// the JSON wire types it sends and receives.
mod client;
mod wire;

pub use client::{
    AzureOpenAiClient, AzureOpenAiClientBuilder, AzureOpenAiError, ChatCompletionTrait,
    DEFAULT_API_VERSION,
};
pub use wire::{
    ChatCompletion, ChatCompletionRequest, ChatMessage, Choice, ContextMessage, DataSource,
    DataSourceKind, MessageContext, ResponseMessage, Role, SearchParameters,
};
