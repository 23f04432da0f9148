use std::time::Duration;


const SECOND: Duration = Duration::from_secs(1);

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CountdownEvent {
    Tick(u64),
    Expired,
}

#[derive(Clone, Debug, Default)]
pub struct Countdown {
    remaining_seconds: u64,
    time_elapsed: Duration,
    running: bool,
}

impl Countdown {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn start(&mut self, seconds: u64) {
        self.remaining_seconds = seconds;
        self.time_elapsed = Duration::default();
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn restart(&mut self, seconds: u64) {
        self.stop();
        self.start(seconds);
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.remaining_seconds
    }

    /// Emits one `Tick` per full second elapsed, then `Expired` once the count reaches zero.
    pub fn tick(&mut self, dt: Duration) -> Vec<CountdownEvent> {
        let mut events = Vec::new();
        if !self.running {
            return events;
        }

        self.time_elapsed += dt;
        while self.running && self.time_elapsed >= SECOND {
            self.time_elapsed -= SECOND;
            self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
            events.push(CountdownEvent::Tick(self.remaining_seconds));
            if self.remaining_seconds == 0 {
                self.running = false;
                events.push(CountdownEvent::Expired);
            }
        }
        events
    }
}
