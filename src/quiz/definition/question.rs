use std::collections::BTreeSet;

pub type QuestionId = i64;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Question {
    pub id: QuestionId,
    pub text: String,
    pub options: Vec<String>,
}

impl Question {
    pub fn new(id: QuestionId) -> Self {
        Question {
            id,
            text: String::new(),
            options: Vec::new(),
        }
    }

    pub(super) fn push_text(&mut self, line: &str) {
        if !self.text.is_empty() {
            self.text.push(' ');
        }
        self.text.push_str(line);
    }

    pub fn letters(&self) -> BTreeSet<char> {
        self.options
            .iter()
            .filter_map(|option| option_letter(option))
            .collect()
    }
}

pub fn option_letter(option: &str) -> Option<char> {
    option.chars().next().map(normalize_letter)
}

pub fn normalize_letter(letter: char) -> char {
    letter.to_lowercase().next().unwrap_or(letter)
}
