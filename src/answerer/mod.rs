//! Retrieval-grounded question answering.
//!
//! This module builds the chat-completion request that carries the search
//! index configuration, sends it once, and extracts the answer text and the
//! citations the service attached to it.

mod requester;
mod types;

pub use requester::{CompletionRequester, parse_citations, request_answer};
pub use types::{
    CitationRecord, CompletionRequest, CompletionResponse, MAX_TOKENS, RetrievalConfig,
    SYSTEM_PROMPT, TEMPERATURE,
};
