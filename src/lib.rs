pub mod answerer;
pub mod azure;
pub mod config;
pub mod error;
pub mod output;
pub mod session;

pub use answerer::{CitationRecord, CompletionRequest, CompletionResponse, request_answer};
pub use azure::{AzureOpenAiClient, AzureOpenAiClientBuilder, AzureOpenAiError};
pub use config::{ConnectionConfig, OutputOptions};
pub use error::OperationFailed;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn types_accessible_from_crate_root() {
        let config = ConnectionConfig::default();
        let request = CompletionRequest::new(&config, "test");
        assert_eq!(request.user_question(), "test");

        let citation = CitationRecord::new("Guide", "http://x");
        assert_eq!(citation.title, "Guide");

        assert!(OutputOptions::default().show_citations);
    }

    #[test]
    fn client_builder_accessible_from_crate_root() {
        let client = AzureOpenAiClientBuilder::new().build();
        assert!(client.is_ok());
    }
}
