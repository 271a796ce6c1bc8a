//! One question-and-answer round against the configured deployment.

use std::io::{BufRead, Write};

use anyhow::{Context, Result, bail};
use tracing::error;

use crate::answerer::request_answer;
use crate::config::{ConnectionConfig, OutputOptions};
use crate::output::{print_answer, print_failure, print_prompt, print_request};

/// Prompts for a question on `out`, reads it from `input`, and prints the answer.
///
/// A failed request is reported on `out` and still returns `Ok`, with no
/// answer printed. Only I/O problems on `input` or `out` return `Err`.
pub fn run<R, W>(
    config: &ConnectionConfig,
    options: OutputOptions,
    input: &mut R,
    out: &mut W,
) -> Result<()>
where
    R: BufRead,
    W: Write,
{
    print_prompt(out).context("Failed to write prompt")?;
    let question = read_question(input)?;

    print_request(out, &question).context("Failed to write request")?;

    match request_answer(config, &question) {
        Ok(response) => print_answer(out, &response, options).context("Failed to write answer")?,
        Err(e) => {
            error!(error = %e, "question failed");
            print_failure(out, &e).context("Failed to write failure")?;
        }
    }

    out.flush().context("Failed to flush output")?;
    Ok(())
}

/// Reads one line, without its line terminator.
fn read_question<R: BufRead>(input: &mut R) -> Result<String> {
    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .context("Failed to read question from standard input")?;
    if read == 0 {
        bail!("No question entered: standard input is closed");
    }

    let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
    line.truncate(trimmed_len);
    Ok(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn read_question_strips_line_terminator() {
        let mut input = Cursor::new("Best beaches in Portugal?\r\nignored\n");
        assert_eq!(read_question(&mut input).unwrap(), "Best beaches in Portugal?");
    }

    #[test]
    fn read_question_keeps_inner_whitespace() {
        let mut input = Cursor::new("  spaced  out  \n");
        assert_eq!(read_question(&mut input).unwrap(), "  spaced  out  ");
    }

    #[test]
    fn read_question_without_newline() {
        let mut input = Cursor::new("last line");
        assert_eq!(read_question(&mut input).unwrap(), "last line");
    }

    #[test]
    fn read_question_rejects_closed_input() {
        let mut input = Cursor::new("");
        let error = read_question(&mut input).unwrap_err();
        assert!(error.to_string().contains("No question entered"));
    }

    #[test]
    fn run_reports_failure_without_answer() {
        let mut input = Cursor::new("Where is Lisbon?\n");
        let mut out = Vec::new();

        run(
            &ConnectionConfig::default(),
            OutputOptions::default(),
            &mut input,
            &mut out,
        )
        .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Enter a question:"));
        assert!(text.contains("Request: Where is Lisbon?"));
        assert!(text.contains("In the exception block"));
        assert!(!text.contains("Response:"));
    }
}
