use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

use super::*;
use crate::output::mock::MockSessionOutput;
use crate::quiz::definition::{Answer, Question};
use crate::quiz::{Correctness, Phase};

fn session() -> Session<MockSessionOutput> {
    let questions: Vec<Question> = (1..=2)
        .map(|id| Question {
            id,
            text: format!("Question {}", id),
            options: vec!["a) yes".to_owned(), "b) no".to_owned()],
        })
        .collect();
    let answers = (1..=2)
        .map(|id| Answer {
            question_id: id,
            correct_options: "a".chars().collect(),
        })
        .collect();
    let mut session = Session::new(Settings::default(), MockSessionOutput::new());
    session.load_with_rng(&questions, answers, &mut StdRng::seed_from_u64(7));
    session
}

#[test]
fn parses_commands() {
    assert_eq!("select a".parse::<Command>().unwrap(), Command::Select('a'));
    assert_eq!("S б".parse::<Command>().unwrap(), Command::Select('б'));
    assert_eq!("check".parse::<Command>().unwrap(), Command::Check);
    assert_eq!("  next ".parse::<Command>().unwrap(), Command::Next);
    assert_eq!("prev".parse::<Command>().unwrap(), Command::Previous);
    assert_eq!("goto 3".parse::<Command>().unwrap(), Command::Goto(2));
    assert_eq!("list".parse::<Command>().unwrap(), Command::List);
    assert_eq!("reset".parse::<Command>().unwrap(), Command::Reset);
    assert_eq!("abandon".parse::<Command>().unwrap(), Command::Abandon);
    assert_eq!("shuffle".parse::<Command>().unwrap(), Command::Shuffle);
    assert_eq!("status".parse::<Command>().unwrap(), Command::Status);
    assert_eq!("reload".parse::<Command>().unwrap(), Command::Reload);
    assert_eq!("quit".parse::<Command>().unwrap(), Command::Quit);
}

#[test]
fn rejects_bad_commands() {
    assert!("".parse::<Command>().is_err());
    assert!("dance".parse::<Command>().is_err());
    assert!("select".parse::<Command>().is_err());
    assert!("select ab".parse::<Command>().is_err());
    assert!("select 1".parse::<Command>().is_err());
    assert!("goto".parse::<Command>().is_err());
    assert!("goto zero".parse::<Command>().is_err());
    assert!("goto 0".parse::<Command>().is_err());
}

#[test]
fn select_applies_to_current_question() {
    let settings = Settings::default();
    let mut session = session();
    execute(&mut session, Command::Select('b'), &settings).unwrap();
    execute(&mut session, Command::Check, &settings).unwrap();
    assert_eq!(session.correctness(0), Some(Correctness::Incorrect));
    execute(&mut session, Command::Next, &settings).unwrap();
    assert_eq!(session.current_index(), 1);
}

#[test]
fn navigation_errors_are_reported() {
    let settings = Settings::default();
    let mut session = session();
    assert!(execute(&mut session, Command::Previous, &settings).is_err());
    assert!(execute(&mut session, Command::Goto(5), &settings).is_err());
    execute(&mut session, Command::Goto(1), &settings).unwrap();
    assert_eq!(session.current_index(), 1);
}

#[test]
fn answering_requires_active_test() {
    let settings = Settings::default();
    let mut session = session();
    execute(&mut session, Command::Next, &settings).unwrap();
    execute(&mut session, Command::Next, &settings).unwrap();
    assert_eq!(session.phase(), Phase::Finished);
    assert!(execute(&mut session, Command::Select('a'), &settings).is_err());
    execute(&mut session, Command::Reset, &settings).unwrap();
    assert_eq!(session.phase(), Phase::Active);
}

#[test]
fn reload_failure_keeps_session() {
    let settings = Settings {
        questions_path: "does/not/exist/questions.txt".into(),
        answers_path: "does/not/exist/answers.txt".into(),
        ..Default::default()
    };
    let mut session = session();
    assert!(execute(&mut session, Command::Reload, &settings).is_err());
    assert_eq!(session.phase(), Phase::Active);
    assert_eq!(session.questions().len(), 2);
}

#[test]
fn select_rejects_letters_the_question_does_not_offer() {
    let settings = Settings::default();
    let mut session = session();
    assert!(execute(&mut session, Command::Select('c'), &settings).is_err());
    assert_eq!(session.selection(0), None);
    execute(&mut session, Command::Select('A'), &settings).unwrap();
    assert_eq!(session.correctness(0), Some(Correctness::Correct));
}

#[test]
fn abandoned_test_needs_reload() {
    let settings = Settings::default();
    let mut session = session();
    execute(&mut session, Command::Abandon, &settings).unwrap();
    assert_eq!(session.phase(), Phase::NotLoaded);
    assert!(execute(&mut session, Command::Reset, &settings).is_err());
    assert!(execute(&mut session, Command::Check, &settings).is_err());
}

#[test]
fn next_after_correct_answer_moves_once() {
    let settings = Settings::default();
    let mut session = session();
    execute(&mut session, Command::Select('a'), &settings).unwrap();
    assert!(session.has_pending_advance());
    execute(&mut session, Command::Next, &settings).unwrap();
    session.tick(Duration::from_millis(800));
    assert_eq!(session.current_index(), 1);
    assert_eq!(session.phase(), Phase::Active);
}

#[test]
fn inactive_errors_name_the_way_out() {
    let settings = Settings::default();
    let mut session = session();
    session.tick(Duration::from_secs(1800));
    let error = execute(&mut session, Command::Check, &settings).unwrap_err();
    assert!(error.to_string().contains("`reset`"));
    session.abandon();
    let error = execute(&mut session, Command::Check, &settings).unwrap_err();
    assert!(error.to_string().contains("`reload`"));
}

#[test]
fn decodes_lines_that_are_not_utf8() {
    assert_eq!(decode_line(b"next\r"), "next");
    // "select б" typed on a cp1251 terminal
    let line = decode_line(b"select \xe1");
    assert_eq!(line, "select \u{fffd}");
    assert!(line.parse::<Command>().is_err());
    assert!(decode_line(b"\xff\xfe").parse::<Command>().is_err());
}
