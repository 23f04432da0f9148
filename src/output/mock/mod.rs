use parking_lot::RwLock;
use std::sync::Arc;

use crate::output::{Message, SessionOutput};

#[derive(Clone, Default)]
pub struct MockSessionOutput {
    messages: Arc<RwLock<Vec<Message>>>,
}

impl MockSessionOutput {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn flush(&self) -> Vec<Message> {
        std::mem::replace(&mut *self.messages.write(), Vec::new())
    }

    pub fn contains_message(&self, message: &Message) -> bool {
        self.messages.read().iter().any(|m| m == message)
    }
}

impl SessionOutput for MockSessionOutput {
    fn say(&self, message: &Message) {
        self.messages.write().push(message.clone());
    }
}
