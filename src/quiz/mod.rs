use anyhow::{anyhow, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::{BTreeSet, HashMap};
use std::time::Duration;
use tracing::{debug, info, warn};

use self::countdown::{Countdown, CountdownEvent};
use self::definition::{find_answer, normalize_letter, Answer, Question, QuizDefinition};
use self::settings::Settings;
use crate::output::{Message, SessionOutput};

pub mod countdown;
pub mod definition;
pub mod settings;


const TIME_REMAINING_ANNOUNCEMENTS: [u64; 2] = [60, 5 * 60];

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Phase {
    NotLoaded,
    Active,
    Finished,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Correctness {
    Correct,
    Incorrect,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Score {
    pub correct: usize,
    pub total: usize,
}

impl Score {
    pub fn percentage(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        (self.correct as f64 / self.total as f64 * 100.0).round() as u32
    }
}

#[derive(Debug)]
struct PendingAdvance {
    time_elapsed: Duration,
    time_to_wait: Duration,
}

impl PendingAdvance {
    fn new(duration: Duration) -> Self {
        PendingAdvance {
            time_elapsed: Duration::default(),
            time_to_wait: duration,
        }
    }

    fn tick(&mut self, dt: Duration) {
        self.time_elapsed += dt;
    }

    fn is_over(&self) -> bool {
        self.time_elapsed >= self.time_to_wait
    }
}

pub struct Session<O: SessionOutput> {
    settings: Settings,
    phase: Phase,
    questions: Vec<Question>,
    answers: Vec<Answer>,
    current_index: usize,
    selections: HashMap<usize, BTreeSet<char>>,
    correctness: HashMap<usize, Correctness>,
    incorrect_letters: HashMap<usize, BTreeSet<char>>,
    correct_count: usize,
    incorrect_count: usize,
    shuffled: bool,
    countdown: Countdown,
    pending_advance: Option<PendingAdvance>,
    output: O,
}

impl<O: SessionOutput> Session<O> {
    pub fn new(settings: Settings, output: O) -> Self {
        Session {
            settings,
            phase: Phase::NotLoaded,
            questions: Vec::new(),
            answers: Vec::new(),
            current_index: 0,
            selections: HashMap::new(),
            correctness: HashMap::new(),
            incorrect_letters: HashMap::new(),
            correct_count: 0,
            incorrect_count: 0,
            shuffled: false,
            countdown: Countdown::new(),
            pending_advance: None,
            output,
        }
    }

    fn set_phase(&mut self, phase: Phase) {
        info!("Entering session phase: {:?}", phase);
        self.phase = phase;
    }

    pub fn load_definition(&mut self, definition: &QuizDefinition) {
        self.load(
            definition.get_questions(),
            definition.get_answers().clone(),
        );
    }

    pub fn load(&mut self, questions: &[Question], answers: Vec<Answer>) {
        self.load_with_rng(questions, answers, &mut rand::thread_rng());
    }

    pub fn load_with_rng<R: Rng + ?Sized>(
        &mut self,
        questions: &[Question],
        answers: Vec<Answer>,
        rng: &mut R,
    ) {
        let mut working_set = questions.to_vec();
        working_set.shuffle(rng);
        working_set.truncate(self.settings.sample_size);
        info!(
            "Sampled {} of {} questions",
            working_set.len(),
            questions.len()
        );
        self.questions = working_set;
        self.answers = answers;
        self.begin();
    }

    pub fn reset(&mut self) {
        if self.phase == Phase::NotLoaded {
            return;
        }
        self.output.say(&Message::TestReset);
        self.begin();
    }

    pub fn abandon(&mut self) {
        if self.phase == Phase::NotLoaded {
            return;
        }
        self.countdown.stop();
        self.clear_progress();
        self.questions.clear();
        self.answers.clear();
        self.set_phase(Phase::NotLoaded);
        self.output.say(&Message::TestAbandoned);
    }

    fn begin(&mut self) {
        self.clear_progress();
        if self.questions.is_empty() {
            warn!("No questions available, the test cannot start");
            self.countdown.stop();
            self.set_phase(Phase::Finished);
            self.output.say(&Message::NoContent);
            return;
        }
        self.countdown
            .restart(self.settings.test_duration.as_secs());
        self.set_phase(Phase::Active);
        self.output.say(&Message::TestBegins(
            self.questions.len(),
            self.settings.test_duration,
        ));
    }

    fn clear_progress(&mut self) {
        self.current_index = 0;
        self.selections.clear();
        self.correctness.clear();
        self.incorrect_letters.clear();
        self.correct_count = 0;
        self.incorrect_count = 0;
        self.pending_advance = None;
    }

    fn is_answerable(&self, index: usize) -> bool {
        self.phase == Phase::Active
            && index < self.questions.len()
            && !self.correctness.contains_key(&index)
    }

    /// Toggles `letter` for the question at `index`. Completing the correct set checks the
    /// question right away and schedules a move to the next one.
    pub fn select(&mut self, index: usize, letter: char) {
        if !self.is_answerable(index) {
            debug!("Ignoring selection for question {}", index);
            return;
        }

        let letter = normalize_letter(letter);
        let selection = self.selections.entry(index).or_default();
        if !selection.remove(&letter) {
            selection.insert(letter);
        }

        let is_complete = match (self.answer_for(index), self.selections.get(&index)) {
            (Some(answer), Some(selection)) => answer.correct_options == *selection,
            _ => false,
        };
        if is_complete {
            self.check(index, true);
        }
    }

    pub fn check(&mut self, index: usize, auto_advance: bool) {
        if !self.is_answerable(index) {
            return;
        }

        let question_id = self.questions[index].id;
        let correct_options = match self.answer_for(index) {
            Some(answer) => answer.correct_options.clone(),
            None => {
                warn!("No answer key for question {}", question_id);
                self.output
                    .say(&Message::AnswerKeyMissing(index, question_id));
                return;
            }
        };

        let selection = self.selections.get(&index).cloned().unwrap_or_default();
        if selection == correct_options {
            self.correctness.insert(index, Correctness::Correct);
            self.correct_count += 1;
            self.output.say(&Message::AnswerCorrect(index));
            if auto_advance {
                self.schedule_advance();
            }
        } else {
            let wrong_letters: BTreeSet<char> = selection
                .symmetric_difference(&correct_options)
                .copied()
                .collect();
            self.correctness.insert(index, Correctness::Incorrect);
            self.incorrect_count += 1;
            self.output
                .say(&Message::AnswerIncorrect(index, wrong_letters.clone()));
            self.incorrect_letters.insert(index, wrong_letters);
        }
    }

    fn schedule_advance(&mut self) {
        let delay = self.settings.auto_advance_delay;
        if delay == Duration::default() {
            self.move_forward();
        } else {
            self.pending_advance = Some(PendingAdvance::new(delay));
        }
    }

    pub fn advance(&mut self) {
        self.cancel_pending_advance();
        self.move_forward();
    }

    fn move_forward(&mut self) {
        if self.phase != Phase::Active {
            return;
        }
        if self.current_index + 1 >= self.questions.len() {
            self.finish();
        } else {
            self.current_index += 1;
        }
    }

    pub fn previous(&mut self) -> Result<()> {
        if self.current_index == 0 {
            return Err(anyhow!("This is the first question"));
        }
        self.jump_to(self.current_index - 1)
    }

    pub fn jump_to(&mut self, index: usize) -> Result<()> {
        if self.phase != Phase::Active {
            return Err(anyhow!("There is no active test"));
        }
        if index >= self.questions.len() {
            return Err(anyhow!(
                "There is no question #{}, this test has {}",
                index + 1,
                self.questions.len()
            ));
        }
        self.cancel_pending_advance();
        self.current_index = index;
        Ok(())
    }

    fn cancel_pending_advance(&mut self) {
        if self.pending_advance.take().is_some() {
            debug!("Cancelled pending advance");
        }
    }

    fn finish(&mut self) {
        self.countdown.stop();
        self.pending_advance = None;
        self.current_index = self.questions.len();
        self.set_phase(Phase::Finished);
        self.output.say(&Message::TestResults(Score {
            correct: self.correct_count,
            total: self.questions.len(),
        }));
    }

    pub fn toggle_shuffle(&mut self) -> bool {
        self.shuffled = !self.shuffled;
        self.shuffled
    }

    pub fn stop_countdown(&mut self) {
        self.countdown.stop();
    }

    pub fn tick(&mut self, dt: Duration) {
        if self.phase != Phase::Active {
            return;
        }

        let advance_due = match &mut self.pending_advance {
            Some(pending_advance) => {
                pending_advance.tick(dt);
                pending_advance.is_over()
            }
            None => false,
        };
        if advance_due {
            self.pending_advance = None;
            self.move_forward();
            if self.phase != Phase::Active {
                return;
            }
        }

        let remaining_before = self.countdown.remaining_seconds();
        for event in self.countdown.tick(dt) {
            if event == CountdownEvent::Expired {
                info!("Time is up");
                self.output.say(&Message::TimeUp);
                self.finish();
                return;
            }
        }
        self.announce_time_remaining(remaining_before, self.countdown.remaining_seconds());
    }

    fn announce_time_remaining(&self, before: u64, after: u64) {
        let threshold = TIME_REMAINING_ANNOUNCEMENTS
            .iter()
            .find(|&&threshold| before > threshold && after <= threshold);
        if let Some(threshold) = threshold {
            self.output
                .say(&Message::TimeRemaining(Duration::from_secs(*threshold)));
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase == Phase::Active
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_index)
    }

    pub fn answer_for(&self, index: usize) -> Option<&Answer> {
        let question = self.questions.get(index)?;
        find_answer(&self.answers, question.id)
    }

    pub fn selection(&self, index: usize) -> Option<&BTreeSet<char>> {
        self.selections.get(&index)
    }

    pub fn correctness(&self, index: usize) -> Option<Correctness> {
        self.correctness.get(&index).copied()
    }

    pub fn incorrect_letters(&self, index: usize) -> Option<&BTreeSet<char>> {
        self.incorrect_letters.get(&index)
    }

    pub fn correct_count(&self) -> usize {
        self.correct_count
    }

    pub fn incorrect_count(&self) -> usize {
        self.incorrect_count
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.countdown.remaining_seconds()
    }

    pub fn is_countdown_running(&self) -> bool {
        self.countdown.is_running()
    }

    pub fn is_shuffled(&self) -> bool {
        self.shuffled
    }

    pub fn has_pending_advance(&self) -> bool {
        self.pending_advance.is_some()
    }

    pub fn score(&self) -> Option<Score> {
        match self.phase {
            Phase::Finished => Some(Score {
                correct: self.correct_count,
                total: self.questions.len(),
            }),
            _ => None,
        }
    }
}
