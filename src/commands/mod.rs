use anyhow::{anyhow, Context, Result};
use std::str::FromStr;
use tracing::info;

use crate::output::SessionOutput;
use crate::quiz::definition::{normalize_letter, QuizDefinition};
use crate::quiz::settings::Settings;
use crate::quiz::{Phase, Session};

#[cfg(test)]
mod tests;

const ERROR_NO_LETTER: &str = "Tell me which option to select, e.g. `select a`.";
const ERROR_NO_QUESTION_NUMBER: &str = "Tell me which question to go to, e.g. `goto 3`.";

pub const HELP: &str = "Commands: select <letter>, check, next, prev, goto <n>, list, reset, shuffle, status, abandon, reload, quit";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Command {
    Select(char),
    Check,
    Next,
    Previous,
    Goto(usize),
    List,
    Reset,
    Abandon,
    Shuffle,
    Status,
    Reload,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(input: &str) -> Result<Command> {
        let mut words = input.split_whitespace();
        let name = words.next().unwrap_or("").to_lowercase();
        let argument = words.next();
        let command = match name.as_str() {
            "select" | "s" => {
                let argument = argument.context(ERROR_NO_LETTER)?;
                let mut letters = argument.chars();
                match (letters.next(), letters.next()) {
                    (Some(letter), None) if letter.is_alphabetic() => Command::Select(letter),
                    _ => return Err(anyhow!(ERROR_NO_LETTER)),
                }
            }
            "check" | "c" => Command::Check,
            "next" | "n" => Command::Next,
            "prev" | "p" => Command::Previous,
            "goto" | "g" => {
                let number: usize = argument
                    .context(ERROR_NO_QUESTION_NUMBER)?
                    .parse()
                    .context(ERROR_NO_QUESTION_NUMBER)?;
                if number == 0 {
                    return Err(anyhow!("Questions are numbered from 1"));
                }
                Command::Goto(number - 1)
            }
            "list" | "l" => Command::List,
            "reset" => Command::Reset,
            "abandon" => Command::Abandon,
            "shuffle" => Command::Shuffle,
            "status" => Command::Status,
            "reload" => Command::Reload,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            "" => return Err(anyhow!(HELP)),
            other => return Err(anyhow!("Unknown command `{}`. {}", other, HELP)),
        };
        Ok(command)
    }
}

pub fn decode_line(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).trim().to_owned()
}

pub fn load_test<O: SessionOutput>(session: &mut Session<O>, settings: &Settings) -> Result<()> {
    let definition = QuizDefinition::open(settings).context("Could not load test content")?;
    if definition.is_empty() {
        return Err(anyhow!(
            "Could not load test content: found {} questions and {} answers",
            definition.get_questions().len(),
            definition.get_answers().len()
        ));
    }
    session.load_definition(&definition);
    Ok(())
}

/// Quit is left to the caller.
pub fn execute<O: SessionOutput>(
    session: &mut Session<O>,
    command: Command,
    settings: &Settings,
) -> Result<()> {
    let index = session.current_index();
    match command {
        Command::Select(letter) => {
            ensure_active(session)?;
            let letter = normalize_letter(letter);
            let is_offered = session
                .current_question()
                .map_or(false, |q| q.letters().contains(&letter));
            if !is_offered {
                return Err(anyhow!("This question has no option `{}`", letter));
            }
            session.select(index, letter);
        }
        Command::Check => {
            ensure_active(session)?;
            session.check(index, false);
        }
        Command::Next => {
            ensure_active(session)?;
            session.advance();
        }
        Command::Previous => session.previous()?,
        Command::Goto(index) => session.jump_to(index)?,
        Command::Reset => {
            if session.questions().is_empty() {
                return Err(anyhow!("There is no test to restart, use `reload`"));
            }
            session.reset();
        }
        Command::Abandon => session.abandon(),
        Command::Shuffle => {
            let shuffled = session.toggle_shuffle();
            info!("Shuffle mode: {}", shuffled);
        }
        Command::Reload => load_test(session, settings)?,
        Command::List | Command::Status | Command::Help | Command::Quit => (),
    }
    Ok(())
}

fn ensure_active<O: SessionOutput>(session: &Session<O>) -> Result<()> {
    match session.phase() {
        Phase::Active => Ok(()),
        Phase::Finished => Err(anyhow!("The test is over, use `reset` to start again")),
        Phase::NotLoaded => Err(anyhow!("There is no test loaded, use `reload`")),
    }
}
