//! Sends the grounded chat-completion request and extracts answer and citations.

use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::azure::{
    AzureOpenAiClientBuilder, AzureOpenAiError, ChatCompletion, ChatCompletionTrait,
};
use crate::config::ConnectionConfig;
use crate::error::OperationFailed;

use super::types::{CitationRecord, CompletionRequest, CompletionResponse};

/// Asks `question` against the deployment and index described by `config`.
///
/// Builds an HTTP client from `config`, sends exactly one request, and
/// returns the answer with its citations. Any failure along the way fails
/// the whole call, including an unparsable citation payload on an otherwise
/// complete answer.
pub fn request_answer(
    config: &ConnectionConfig,
    question: &str,
) -> Result<CompletionResponse, OperationFailed> {
    let missing = config.missing_variables();
    if !missing.is_empty() {
        warn!(?missing, "connection settings are empty; sending request anyway");
    }

    let client = AzureOpenAiClientBuilder::from_config(config).build()?;
    CompletionRequester::new(Arc::new(client)).answer(config, question)
}

/// Answers questions through any chat-completion client.
pub struct CompletionRequester {
    client: Arc<dyn ChatCompletionTrait>,
}

impl CompletionRequester {
    /// Creates a requester that sends through `client`.
    #[must_use]
    pub fn new(client: Arc<dyn ChatCompletionTrait>) -> Self {
        Self { client }
    }

    /// Sends `question` once and parses the grounded answer.
    pub fn answer(
        &self,
        config: &ConnectionConfig,
        question: &str,
    ) -> Result<CompletionResponse, OperationFailed> {
        let request = CompletionRequest::new(config, question);
        info!(
            deployment = %request.model(),
            index = %request.data_source().index_name(),
            "asking question"
        );

        let completion = self.client.complete(&request.to_wire())?;
        let response = extract_response(completion)?;

        debug!(
            answer_len = response.answer_text().len(),
            citations = response.citations().len(),
            "answer received"
        );
        Ok(response)
    }
}

/// Shape of the JSON document embedded in the first context message.
#[derive(Deserialize)]
struct CitationPayload {
    citations: Vec<CitationRecord>,
}

/// Parses the citation list out of a context message's JSON content.
///
/// # Errors
///
/// Returns `Serialization` if the text is not JSON or has no `citations` array.
pub fn parse_citations(raw: &str) -> Result<Vec<CitationRecord>, AzureOpenAiError> {
    let payload: CitationPayload =
        serde_json::from_str(raw).map_err(AzureOpenAiError::Serialization)?;
    Ok(payload.citations)
}

/// Pulls the answer from `choices[0]` and the citations from its first context message.
fn extract_response(completion: ChatCompletion) -> Result<CompletionResponse, AzureOpenAiError> {
    let message = completion
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message)
        .ok_or_else(|| AzureOpenAiError::malformed("response has no choices"))?;

    let answer_text = message
        .content
        .ok_or_else(|| AzureOpenAiError::malformed("first choice has no message content"))?;

    let raw_citation_context = message
        .context
        .and_then(|context| context.messages.into_iter().next())
        .map(|context_message| context_message.content)
        .ok_or_else(|| AzureOpenAiError::malformed("first choice has no context messages"))?;

    let citations = parse_citations(&raw_citation_context)?;

    Ok(CompletionResponse::new(
        answer_text,
        raw_citation_context,
        citations,
    ))
}
