use anyhow::Result;
use parking_lot::Mutex;
use std::io::{self, BufRead};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{error, info};

mod commands;
mod document;
mod output;
mod quiz;
mod telemetry;

use crate::commands::Command;
use crate::output::console::{render_question_list, render_status, ConsoleOutput};
use crate::quiz::settings::Settings;
use crate::quiz::Session;

type SessionHandle = Arc<Mutex<Session<ConsoleOutput>>>;

fn spawn_ticker(session: SessionHandle, interval: Duration) {
    thread::spawn(move || {
        let mut last_tick = Instant::now();
        loop {
            thread::sleep(interval);
            let now = Instant::now();
            session.lock().tick(now.duration_since(last_tick));
            last_tick = now;
        }
    });
}

fn main() -> Result<()> {
    telemetry::init_tracing();

    let settings = Settings::load()?;
    info!(
        "Questions from {}, answers from {}",
        settings.questions_path.display(),
        settings.answers_path.display()
    );

    let session: SessionHandle = Arc::new(Mutex::new(Session::new(
        settings.clone(),
        ConsoleOutput::default(),
    )));

    {
        let mut session = session.lock();
        if let Err(e) = commands::load_test(&mut *session, &settings) {
            error!("{:#}", e);
            println!("{}", e);
        }
        println!("{}", render_status(&*session));
        println!("{}", commands::HELP);
    }

    spawn_ticker(session.clone(), settings.tick_interval);

    let stdin = io::stdin();
    for line in stdin.lock().split(b'\n') {
        let line = commands::decode_line(&line?);
        if line.is_empty() {
            continue;
        }

        let command: Command = match line.parse() {
            Ok(command) => command,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };
        match command {
            Command::Quit => break,
            Command::Help => {
                println!("{}", commands::HELP);
                continue;
            }
            _ => (),
        }

        let mut session = session.lock();
        if let Err(e) = commands::execute(&mut *session, command, &settings) {
            error!("{:#}", e);
            println!("{:#}", e);
        }
        match command {
            Command::List => println!("{}", render_question_list(&*session)),
            _ => println!("{}", render_status(&*session)),
        }
    }

    session.lock().stop_countdown();
    Ok(())
}
