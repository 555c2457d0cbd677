use serde::{Deserialize, Serialize};

/// Maximum number of messages kept; older ones are dropped first.
const LOG_CAPACITY: usize = 64;

#[derive(PartialEq, Eq, Clone, Copy, Debug, Serialize, Deserialize)]
pub enum MsgClass {
    /// Progress feedback, e.g. saving.
    Info,
    /// Something the player has to acknowledge, e.g. a locked chest.
    Alert,
    /// Game events: pickups, unlocked doors, stage changes, win and loss.
    Event,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Log {
    pub is_changed: bool,
    pub messages: Vec<(String, MsgClass)>,
}

impl Log {
    pub fn new() -> Self {
        Log {
            is_changed: false,
            messages: Vec::new(),
        }
    }

    pub fn last(&self) -> Option<&(String, MsgClass)> {
        self.messages.last()
    }

    /// Take out every message added since the last drain.
    pub fn drain(&mut self) -> Vec<(String, MsgClass)> {
        self.is_changed = false;
        std::mem::take(&mut self.messages)
    }
}

/// The message log can add text from any string collection.
pub trait MessageLog {
    fn add<T: Into<String>>(&mut self, message: T, class: MsgClass);
}

impl MessageLog for Log {
    /// Push a message unless it repeats the most recent one verbatim.
    fn add<T: Into<String>>(&mut self, msg: T, class: MsgClass) {
        let msg = msg.into();
        if self.messages.last().map_or(false, |(recent, _)| *recent == msg) {
            return;
        }
        if self.messages.len() == LOG_CAPACITY {
            self.messages.remove(0);
        }
        self.messages.push((msg, class));
        self.is_changed = true;
    }
}
