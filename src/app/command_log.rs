//! Ringpuffer der zuletzt ausgeführten Commands (Diagnose, Tests).

use std::collections::VecDeque;

use super::AppCommand;

/// Maximale Anzahl gehaltener Commands.
const CAPACITY: usize = 256;

/// Hält die letzten ausgeführten Commands, älteste zuerst.
#[derive(Debug, Default)]
pub struct CommandLog {
    entries: VecDeque<AppCommand>,
    total: u64,
}

impl CommandLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hängt einen Command an, bei vollem Puffer fällt der älteste heraus.
    pub fn record(&mut self, command: &AppCommand) {
        if self.entries.len() == CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back(command.clone());
        self.total += 1;
        log::debug!("Command #{}: {:?}", self.total, command);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Anzahl aller jemals aufgezeichneten Commands.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Gehaltene Commands, älteste zuerst.
    pub fn entries(&self) -> &VecDeque<AppCommand> {
        &self.entries
    }

    /// Letzter ausgeführter Command.
    pub fn last(&self) -> Option<&AppCommand> {
        self.entries.back()
    }
}
