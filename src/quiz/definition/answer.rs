use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeSet;

use super::question::{normalize_letter, QuestionId};

lazy_static! {
    static ref ANSWER_TOKEN_REGEX: Regex =
        Regex::new(r"^[(\[]?(\p{Alphabetic})[)\].]?$").unwrap();
}

/// Reduces an answer key token such as `a`, `a)`, `(A)` or `b.` to its option letter.
pub fn answer_letter(token: &str) -> Option<char> {
    ANSWER_TOKEN_REGEX
        .captures(token.trim())
        .and_then(|captures| captures[1].chars().next())
        .map(normalize_letter)
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Answer {
    pub question_id: QuestionId,
    pub correct_options: BTreeSet<char>,
}
