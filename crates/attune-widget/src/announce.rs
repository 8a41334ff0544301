//! Status Announcements
//!
//! Bounded queue of user-facing status messages relayed to assistive
//! technology through the host's live region.

use std::collections::VecDeque;

/// Live-region politeness for a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Politeness {
    Polite,
    Assertive,
}

/// One user-facing status message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub politeness: Politeness,
}

/// FIFO status channel. Assertive messages drop anything still queued;
/// overflow evicts the oldest message.
#[derive(Debug)]
pub struct StatusChannel {
    queue: VecDeque<StatusMessage>,
    capacity: usize,
}

impl StatusChannel {
    pub fn new(capacity: usize) -> Self {
        Self { queue: VecDeque::new(), capacity }
    }

    pub fn push(&mut self, text: &str, politeness: Politeness) {
        if politeness == Politeness::Assertive {
            self.queue.clear();
        }
        self.queue.push_back(StatusMessage { text: text.to_string(), politeness });
        while self.queue.len() > self.capacity {
            self.queue.pop_front();
        }
    }

    pub fn next(&mut self) -> Option<StatusMessage> {
        self.queue.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl Default for StatusChannel {
    fn default() -> Self {
        Self::new(16)
    }
}
