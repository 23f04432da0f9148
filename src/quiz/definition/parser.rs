use anyhow::{anyhow, Context, Result};
use regex::Regex;
use std::collections::BTreeSet;
use tracing::debug;

use super::answer::{answer_letter, Answer};
use super::question::{Question, QuestionId};
use crate::quiz::settings::Markers;

fn lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().map(str::trim).filter(|line| !line.is_empty())
}

/// Malformed lines never produce errors, they are dropped and logged at debug level.
#[derive(Clone, Debug)]
pub struct DocumentParser {
    markers: Markers,
    question_marker: Regex,
}

impl DocumentParser {
    pub fn new(markers: &Markers) -> Result<Self> {
        if markers.question.is_empty() {
            return Err(anyhow!("Question marker cannot be empty"));
        }
        if markers.answer_delimiter.is_empty() || markers.answer_separator.is_empty() {
            return Err(anyhow!("Answer key delimiters cannot be empty"));
        }
        let pattern = format!(r"^{}\s*([+-]?[0-9]+)$", regex::escape(&markers.question));
        let question_marker = Regex::new(&pattern).context("Invalid question marker")?;
        Ok(DocumentParser {
            markers: markers.clone(),
            question_marker,
        })
    }

    fn question_id(&self, line: &str) -> Option<QuestionId> {
        self.question_marker
            .captures(line)
            .and_then(|captures| captures[1].parse().ok())
    }

    fn is_option(&self, line: &str) -> bool {
        self.markers
            .options
            .iter()
            .any(|prefix| line.starts_with(prefix.as_str()))
    }

    pub fn parse_questions(&self, text: &str) -> Vec<Question> {
        let mut questions = Vec::new();
        let mut current: Option<Question> = None;

        for line in lines(text) {
            if let Some(id) = self.question_id(line) {
                if let Some(question) = current.take() {
                    questions.push(question);
                }
                current = Some(Question::new(id));
                continue;
            }

            match current.as_mut() {
                Some(question) if self.is_option(line) => question.options.push(line.to_owned()),
                Some(question) => question.push_text(line),
                None => debug!("Skipping line outside of any question: {}", line),
            }
        }

        if let Some(question) = current {
            questions.push(question);
        }
        questions
    }

    pub fn parse_answers(&self, text: &str) -> Vec<Answer> {
        lines(text)
            .filter_map(|line| self.parse_answer_line(line))
            .collect()
    }

    fn parse_answer_line(&self, line: &str) -> Option<Answer> {
        let parts: Vec<&str> = line
            .split(self.markers.answer_delimiter.as_str())
            .filter(|part| !part.is_empty())
            .collect();
        if parts.len() != 2 {
            debug!("Skipping answer line without a single delimiter: {}", line);
            return None;
        }

        // Drop the opening bracket
        let mut id_chars = parts[0].chars();
        id_chars.next();
        let question_id: QuestionId = match id_chars.as_str().trim().parse() {
            Ok(id) => id,
            Err(_) => {
                debug!("Skipping answer line with an invalid question number: {}", line);
                return None;
            }
        };

        let correct_options: BTreeSet<char> = parts[1]
            .split(self.markers.answer_separator.as_str())
            .filter_map(answer_letter)
            .collect();
        if correct_options.is_empty() {
            debug!("Skipping answer line without option letters: {}", line);
            return None;
        }

        Some(Answer {
            question_id,
            correct_options,
        })
    }
}
