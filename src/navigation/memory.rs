//! In-process navigator with browser-style back/forward history.

use crate::navigation::{HistoryMode, Location, Navigator, QueryPatch};
use parking_lot::Mutex;

struct History {
    entries: Vec<Location>,
    index: usize,
}

/// Navigator backed by an in-memory history stack. Used by the CLI and tests.
pub struct MemoryNavigator {
    history: Mutex<History>,
}

impl MemoryNavigator {
    pub fn new(initial: &str) -> Self {
        Self {
            history: Mutex::new(History {
                entries: vec![Location::parse(initial)],
                index: 0,
            }),
        }
    }

    /// Step back one entry. Returns false at the start of history.
    pub fn back(&self) -> bool {
        let mut history = self.history.lock();
        if history.index == 0 {
            return false;
        }
        history.index -= 1;
        true
    }

    /// Step forward one entry. Returns false at the end of history.
    pub fn forward(&self) -> bool {
        let mut history = self.history.lock();
        if history.index + 1 >= history.entries.len() {
            return false;
        }
        history.index += 1;
        true
    }

    pub fn history_len(&self) -> usize {
        self.history.lock().entries.len()
    }
}

impl Navigator for MemoryNavigator {
    fn location(&self) -> Location {
        let history = self.history.lock();
        history.entries[history.index].clone()
    }

    fn goto(&self, path: &str, patch: &QueryPatch, mode: HistoryMode) {
        let mut history = self.history.lock();
        let index = history.index;
        let next = history.entries[index].navigate(path, patch);
        tracing::debug!("Navigate ({:?}) to {}", mode, next);

        match mode {
            HistoryMode::Push => {
                history.entries.truncate(index + 1);
                history.entries.push(next);
                history.index += 1;
            }
            HistoryMode::Replace => history.entries[index] = next,
        }
    }
}
