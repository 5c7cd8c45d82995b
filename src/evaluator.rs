//! Decides whether a submitted answer matches a challenge's correct answer.
//!
//! Strictly boolean, no partial credit. Total over its inputs: a shape
//! mismatch between the submission and the expected answer grades as wrong
//! instead of panicking, since it signals an upstream data bug this layer
//! cannot fix.

use crate::model::{Challenge, CorrectAnswer, SubmittedAnswer};

pub fn is_correct(challenge: &Challenge, submitted: &SubmittedAnswer) -> bool {
    match (&challenge.correct_answer, submitted) {
        // Option buttons hand back a literal entry from `options`, so the
        // comparison is exact, no normalization.
        (CorrectAnswer::Choice(expected), SubmittedAnswer::Choice(given)) => expected == given,
        // Ordered tokens: whitespace- and case-insensitive, but position
        // sensitive. Concatenating without separators makes the check
        // independent of how the phrase was tokenized.
        (CorrectAnswer::Tokens(expected), SubmittedAnswer::Tokens(given)) => {
            normalize_tokens(expected) == normalize_tokens(given)
        }
        _ => false,
    }
}

fn normalize_tokens(tokens: &[String]) -> String {
    tokens
        .iter()
        .flat_map(|t| t.chars())
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}
