//! Request and result types for grounded question answering.

use serde::{Deserialize, Deserializer};

use crate::azure::{
    ChatCompletionRequest, ChatMessage, DataSource, DataSourceKind, SearchParameters,
};
use crate::config::ConnectionConfig;

/// System message sent ahead of every question.
pub const SYSTEM_PROMPT: &str = "You are a helpful travel agent";
/// Sampling temperature.
pub const TEMPERATURE: f64 = 0.5;
/// Upper bound on generated tokens.
pub const MAX_TOKENS: u32 = 1000;

/// Search index the service retrieves grounding documents from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrievalConfig {
    source_type: DataSourceKind,
    endpoint: String,
    credential: String,
    index_name: String,
}

impl RetrievalConfig {
    /// Creates a Cognitive Search retrieval config from the connection settings.
    pub fn from_connection(config: &ConnectionConfig) -> Self {
        Self {
            source_type: DataSourceKind::AzureCognitiveSearch,
            endpoint: config.retrieval_endpoint.clone(),
            credential: config.retrieval_credential.clone(),
            index_name: config.retrieval_index_id.clone(),
        }
    }

    pub fn source_type(&self) -> DataSourceKind {
        self.source_type
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn credential(&self) -> &str {
        &self.credential
    }

    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    fn to_wire(&self) -> DataSource {
        DataSource {
            kind: self.source_type,
            parameters: SearchParameters {
                endpoint: self.endpoint.clone(),
                key: self.credential.clone(),
                index_name: self.index_name.clone(),
            },
        }
    }
}

/// A single chat-completion request for one question.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    model: String,
    system_prompt: &'static str,
    user_question: String,
    temperature: f64,
    max_tokens: u32,
    data_source: RetrievalConfig,
}

impl CompletionRequest {
    /// Creates the request for `question` against the configured deployment and index.
    pub fn new(config: &ConnectionConfig, question: impl Into<String>) -> Self {
        Self {
            model: config.model_deployment_id.clone(),
            system_prompt: SYSTEM_PROMPT,
            user_question: question.into(),
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
            data_source: RetrievalConfig::from_connection(config),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn system_prompt(&self) -> &str {
        self.system_prompt
    }

    pub fn user_question(&self) -> &str {
        &self.user_question
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    pub fn data_source(&self) -> &RetrievalConfig {
        &self.data_source
    }

    /// Converts to the JSON body sent on the wire.
    ///
    /// Messages are ordered system first, then the question.
    pub fn to_wire(&self) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.clone(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            messages: vec![
                ChatMessage::system(self.system_prompt),
                ChatMessage::user(self.user_question.clone()),
            ],
            data_sources: vec![self.data_source.to_wire()],
        }
    }
}

/// A source document the service says supported the answer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CitationRecord {
    /// Empty when the index has no title field mapped.
    #[serde(deserialize_with = "null_as_empty")]
    pub title: String,
    /// Parsed but not printed.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub url: String,
}

/// The service sends `null` for fields the index does not map.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl CitationRecord {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }
}

/// Answer text plus its citations.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionResponse {
    answer_text: String,
    /// JSON document from the first context message, as received
    raw_citation_context: String,
    citations: Vec<CitationRecord>,
}

impl CompletionResponse {
    pub fn new(
        answer_text: String,
        raw_citation_context: String,
        citations: Vec<CitationRecord>,
    ) -> Self {
        Self {
            answer_text,
            raw_citation_context,
            citations,
        }
    }

    /// Returns the generated answer.
    pub fn answer_text(&self) -> &str {
        &self.answer_text
    }

    /// Returns the unparsed citation context.
    pub fn raw_citation_context(&self) -> &str {
        &self.raw_citation_context
    }

    /// Returns the citations in the order the service listed them.
    pub fn citations(&self) -> &[CitationRecord] {
        &self.citations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_config() -> ConnectionConfig {
        ConnectionConfig {
            model_endpoint: "https://oai.example.com".to_string(),
            model_credential: "oai-key".to_string(),
            model_deployment_id: "gpt-35".to_string(),
            retrieval_endpoint: "https://search.example.com".to_string(),
            retrieval_credential: "search-key".to_string(),
            retrieval_index_id: "margies-travel".to_string(),
        }
    }

    #[test]
    fn retrieval_config_is_cognitive_search() {
        let retrieval = RetrievalConfig::from_connection(&sample_config());
        assert_eq!(retrieval.source_type(), DataSourceKind::AzureCognitiveSearch);
        assert_eq!(retrieval.endpoint(), "https://search.example.com");
        assert_eq!(retrieval.credential(), "search-key");
        assert_eq!(retrieval.index_name(), "margies-travel");
    }

    #[test]
    fn completion_request_uses_fixed_parameters() {
        let request = CompletionRequest::new(&sample_config(), "Where should I stay in Paris?");
        assert_eq!(request.model(), "gpt-35");
        assert_eq!(request.system_prompt(), "You are a helpful travel agent");
        assert_eq!(request.user_question(), "Where should I stay in Paris?");
        assert_eq!(request.temperature(), 0.5);
        assert_eq!(request.max_tokens(), 1000);
        assert_eq!(request.data_source().index_name(), "margies-travel");
    }

    #[test]
    fn wire_body_matches_extensions_layout() {
        let request = CompletionRequest::new(&sample_config(), "Best beaches in Portugal?");
        let body = serde_json::to_value(request.to_wire()).unwrap();

        assert_eq!(
            body,
            json!({
                "model": "gpt-35",
                "temperature": 0.5,
                "max_tokens": 1000,
                "messages": [
                    {"role": "system", "content": "You are a helpful travel agent"},
                    {"role": "user", "content": "Best beaches in Portugal?"}
                ],
                "dataSources": [{
                    "type": "AzureCognitiveSearch",
                    "parameters": {
                        "endpoint": "https://search.example.com",
                        "key": "search-key",
                        "indexName": "margies-travel"
                    }
                }]
            })
        );
    }

    #[test]
    fn non_ascii_question_survives_serialization() {
        let question = "Onde ficar em São Miguel? 東京のホテル 🏖️";
        let request = CompletionRequest::new(&sample_config(), question);

        let text = serde_json::to_string(&request.to_wire()).unwrap();
        let body: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(body["messages"][1]["content"], question);
    }

    #[test]
    fn empty_config_still_builds_a_request() {
        let request = CompletionRequest::new(&ConnectionConfig::default(), "q");
        let body = serde_json::to_value(request.to_wire()).unwrap();

        assert_eq!(body["model"], "");
        assert_eq!(body["dataSources"][0]["parameters"]["endpoint"], "");
        assert_eq!(body["dataSources"][0]["parameters"]["key"], "");
        assert_eq!(body["dataSources"][0]["parameters"]["indexName"], "");
    }

    #[test]
    fn citation_record_ignores_extra_fields_and_defaults_url() {
        let citation: CitationRecord = serde_json::from_value(json!({
            "title": "Dubai City Guide",
            "content": "...",
            "filepath": "Dubai Brochure.pdf",
            "chunk_id": "0"
        }))
        .unwrap();

        assert_eq!(citation, CitationRecord::new("Dubai City Guide", ""));
    }

    #[test]
    fn citation_record_accepts_null_url() {
        let citation: CitationRecord =
            serde_json::from_value(json!({"title": "New York Guide", "url": null})).unwrap();
        assert_eq!(citation.url, "");
    }

    #[test]
    fn citation_record_accepts_null_title() {
        let citation: CitationRecord =
            serde_json::from_value(json!({"title": null, "url": "u"})).unwrap();
        assert_eq!(citation, CitationRecord::new("", "u"));
    }

    #[test]
    fn citation_record_requires_title() {
        let result = serde_json::from_value::<CitationRecord>(json!({"url": "http://x"}));
        assert!(result.is_err());
    }
}
