// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `lookout shell` command implementation.
//!
//! Interactive prompt loop with readline history. Each line is answered
//! independently; there is no conversation memory.

use colored::Colorize;
use lookout_core::types::{Answer, AnswerSource};
use lookout_core::LookoutError;
use lookout_router::QueryRouter;
use lookout_security::SecretList;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::app;

const EXIT_WORDS: &[&str] = &["exit", "quit", "/exit", "/quit"];

/// Runs the interactive loop until an exit word, Ctrl-C, or Ctrl-D.
///
/// Per-question failures are printed and the loop continues.
pub async fn run_shell(router: &QueryRouter, secrets: &SecretList) -> Result<(), LookoutError> {
    let mut rl = DefaultEditor::new()
        .map_err(|e| LookoutError::Internal(format!("failed to initialize readline: {e}")))?;

    println!("{}", "lookout shell".bold().green());
    println!("Ask anything. Type {} to leave.\n", "exit".yellow());

    let prompt = format!("{}> ", "lookout".green());
    loop {
        match rl.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if is_exit(trimmed) {
                    break;
                }
                if trimmed.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(trimmed);

                match router.answer(trimmed).await {
                    Ok(answer) => print!("{}", render_answer(&answer)),
                    Err(e) => eprintln!("{}: {}", "error".red(), app::redacted(&e, secrets)),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("{}: {e}", "error".red());
                break;
            }
        }
    }

    println!("{}", "bye".dimmed());
    Ok(())
}

fn is_exit(input: &str) -> bool {
    EXIT_WORDS.iter().any(|w| input.eq_ignore_ascii_case(w))
}

fn render_answer(answer: &Answer) -> String {
    let mut out = format!("\n{}\n{}\n", "--- Response ---".bold(), answer.response);

    if let Some(context) = &answer.search_context {
        out.push_str(&format!(
            "\n{}\n{}\n",
            "--- Search Results ---".bold(),
            context
        ));
    }

    let source = match answer.source {
        AnswerSource::Degraded => answer.source.to_string().yellow(),
        _ => answer.source.to_string().dimmed(),
    };
    out.push_str(&format!("[{source}]\n\n"));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use lookout_core::types::UserQuery;

    fn answer(source: AnswerSource, context: Option<&str>) -> Answer {
        Answer {
            query: UserQuery::parse("q").unwrap(),
            source,
            response: "The answer.".into(),
            search_context: context.map(str::to_string),
        }
    }

    #[test]
    fn exit_words_are_case_insensitive() {
        assert!(is_exit("exit"));
        assert!(is_exit("QUIT"));
        assert!(is_exit("/exit"));
        assert!(is_exit("/Quit"));
        assert!(!is_exit("exit now"));
        assert!(!is_exit(""));
    }

    #[test]
    fn renders_response_and_search_results() {
        colored::control::set_override(false);
        let text = render_answer(&answer(
            AnswerSource::SearchAugmented,
            Some("1. T: s (u)"),
        ));
        assert!(text.contains("--- Response ---\nThe answer.\n"));
        assert!(text.contains("--- Search Results ---\n1. T: s (u)\n"));
        assert!(text.contains("[search + model]"));
    }

    #[test]
    fn model_only_answer_has_no_results_section() {
        colored::control::set_override(false);
        let text = render_answer(&answer(AnswerSource::ModelOnly, None));
        assert!(!text.contains("--- Search Results ---"));
        assert!(text.contains("[model only]"));
    }
}
