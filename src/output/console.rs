use itertools::Itertools;
use std::collections::BTreeSet;

use crate::output::{Message, SessionOutput};
use crate::quiz::definition::option_letter;
use crate::quiz::{Correctness, Session};

pub fn format_time(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

fn format_letters(letters: &BTreeSet<char>) -> String {
    letters.iter().join(", ")
}

pub fn interpret_message(message: &Message) -> String {
    use Message::*;
    match message {
        AnswerCorrect(index) => format!("✅ Question {} answered correctly!", index + 1),
        AnswerIncorrect(index, letters) => format!(
            "❌ Question {} answered incorrectly. Check options: {}",
            index + 1,
            format_letters(letters)
        ),
        AnswerKeyMissing(index, question_id) => format!(
            "⚠️ Question {} (№{}) has no entry in the answer key and cannot be checked.",
            index + 1,
            question_id
        ),
        NoContent => "Could not load test content. Use `reload` to try again.".into(),
        TestAbandoned => "The test was abandoned.".into(),
        TestBegins(count, duration) => format!(
            "📋 The test begins! {} questions, {} on the clock.",
            count,
            format_time(duration.as_secs())
        ),
        TestReset => "The test was restarted.".into(),
        TestResults(score) => format!(
            "🏁 Test finished. Correct: {} of {}. Score: {}%",
            score.correct,
            score.total,
            score.percentage()
        ),
        TimeRemaining(duration) => format!("🕒 Only {} left!", format_time(duration.as_secs())),
        TimeUp => "⏰ Time's up!".into(),
    }
}

pub fn render_status<O: SessionOutput>(session: &Session<O>) -> String {
    let index = session.current_index();
    let total = session.questions().len();
    let mut status = format!(
        "[{}{}] {}/{} ✅ {} ❌ {}{}",
        format_time(session.remaining_seconds()),
        if session.is_active() && !session.is_countdown_running() {
            " ⏸"
        } else {
            ""
        },
        index.min(total),
        total,
        session.correct_count(),
        session.incorrect_count(),
        if session.is_shuffled() { " 🔀" } else { "" }
    );

    if let Some(score) = session.score() {
        status += &format!("\n{}", interpret_message(&Message::TestResults(score)));
        return status;
    }

    let question = match session.current_question() {
        Some(question) => question,
        None => return status,
    };

    status += &format!("\nВопрос №{}\n{}", question.id, question.text);
    let selection = session.selection(index);
    let incorrect_letters = session.incorrect_letters(index);
    for option in &question.options {
        let letter = option_letter(option);
        let is_selected = letter.map_or(false, |l| selection.map_or(false, |s| s.contains(&l)));
        let is_wrong =
            letter.map_or(false, |l| incorrect_letters.map_or(false, |s| s.contains(&l)));
        let marker = match (is_selected, is_wrong) {
            (_, true) => "✗",
            (true, false) => "●",
            (false, false) => "○",
        };
        status += &format!("\n  {} {}", marker, option);
    }

    match session.correctness(index) {
        Some(Correctness::Correct) if session.has_pending_advance() => {
            status += "\nCorrect! Moving on…"
        }
        Some(Correctness::Correct) => status += "\nCorrect!",
        Some(Correctness::Incorrect) => status += "\nIncorrect, use `next` to continue.",
        None => (),
    }
    status
}

pub fn render_question_list<O: SessionOutput>(session: &Session<O>) -> String {
    if session.questions().is_empty() {
        return "No questions loaded.".to_owned();
    }
    session
        .questions()
        .iter()
        .enumerate()
        .map(|(index, question)| {
            let cursor = if index == session.current_index() { "›" } else { " " };
            let verdict = match session.correctness(index) {
                Some(Correctness::Correct) => " ✅",
                Some(Correctness::Incorrect) => " ❌",
                None => "",
            };
            format!("{} {}. №{}{}", cursor, index + 1, question.id, verdict)
        })
        .join("\n")
}

#[derive(Clone, Debug, Default)]
pub struct ConsoleOutput;

impl SessionOutput for ConsoleOutput {
    fn say(&self, message: &Message) {
        println!("{}", interpret_message(message));
    }
}
