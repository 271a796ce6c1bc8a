//! Text printed to stdout around a question.
//!
//! Each function writes to any `Write` so the exact lines can be checked in tests.

use std::io::{self, Write};

use crate::answerer::CompletionResponse;
use crate::config::OutputOptions;
use crate::error::OperationFailed;

/// Prompt shown before reading the question.
pub const QUESTION_PROMPT: &str = "\nEnter a question:";

/// First line of the failure report.
pub const FAILURE_MARKER: &str = "In the exception block";

/// Writes the question prompt.
pub fn print_prompt<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{QUESTION_PROMPT}")?;
    out.flush()
}

/// Echoes the question about to be sent.
pub fn print_request<W: Write>(out: &mut W, question: &str) -> io::Result<()> {
    writeln!(out, "...Sending the following request to Azure OpenAI endpoint...")?;
    writeln!(out, "Request: {question}")?;
    writeln!(out)
}

/// Writes the answer and, when enabled, one `Title:` line per citation.
///
/// Citation URLs are never printed.
pub fn print_answer<W: Write>(
    out: &mut W,
    response: &CompletionResponse,
    options: OutputOptions,
) -> io::Result<()> {
    writeln!(out, "Response: {}", response.answer_text())?;
    writeln!(out)?;

    if options.show_citations {
        writeln!(out, "Citations:")?;
        for citation in response.citations() {
            writeln!(out, "Title: {}", citation.title)?;
        }
    }
    Ok(())
}

/// Writes the failure marker followed by the error description.
pub fn print_failure<W: Write>(out: &mut W, error: &OperationFailed) -> io::Result<()> {
    writeln!(out, "{FAILURE_MARKER}")?;
    writeln!(out, "{error}")
}
