use anyhow::Result;
use tracing::info;

use crate::document::{extract_text, Document, TextDocument};
use crate::quiz::settings::Settings;

pub mod answer;
pub mod parser;
pub mod question;


pub use answer::Answer;
pub use parser::DocumentParser;
pub use question::{normalize_letter, option_letter, Question, QuestionId};

#[derive(Clone, Debug, Default)]
pub struct QuizDefinition {
    questions: Vec<Question>,
    answers: Vec<Answer>,
}

impl QuizDefinition {
    pub fn open(settings: &Settings) -> Result<QuizDefinition> {
        let parser = DocumentParser::new(&settings.markers)?;
        let questions_document = TextDocument::open(&settings.questions_path)?;
        let answers_document = TextDocument::open(&settings.answers_path)?;
        Ok(QuizDefinition::from_documents(
            &parser,
            &questions_document,
            &answers_document,
        ))
    }

    pub fn from_documents(
        parser: &DocumentParser,
        questions_document: &dyn Document,
        answers_document: &dyn Document,
    ) -> QuizDefinition {
        let questions = parser.parse_questions(&extract_text(questions_document));
        let answers = parser.parse_answers(&extract_text(answers_document));
        info!(
            "Parsed {} questions and {} answers",
            questions.len(),
            answers.len()
        );
        QuizDefinition { questions, answers }
    }

    pub fn get_questions(&self) -> &Vec<Question> {
        &self.questions
    }

    pub fn get_answers(&self) -> &Vec<Answer> {
        &self.answers
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty() || self.answers.is_empty()
    }
}

pub fn find_answer(answers: &[Answer], question_id: QuestionId) -> Option<&Answer> {
    answers.iter().find(|a| a.question_id == question_id)
}
