use std::collections::BTreeSet;
use std::time::Duration;

use crate::quiz::definition::QuestionId;
use crate::quiz::Score;

pub mod console;
#[cfg(test)]
pub mod mock;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Message {
    AnswerCorrect(usize),
    AnswerIncorrect(usize, BTreeSet<char>),
    AnswerKeyMissing(usize, QuestionId),
    NoContent,
    TestAbandoned,
    TestBegins(usize, Duration),
    TestReset,
    TestResults(Score),
    TimeRemaining(Duration),
    TimeUp,
}

pub trait SessionOutput {
    fn say(&self, message: &Message);
}
