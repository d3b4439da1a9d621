//! Display sink that keeps everything in memory

use fairdice::{DisplaySink, GameEvent, ProbabilityTable};

#[derive(Debug, Default)]
pub struct RecordingDisplay {
    pub events: Vec<GameEvent>,
    pub tables_shown: usize,
}

impl RecordingDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count events matching a predicate
    pub fn count<F>(&self, predicate: F) -> usize
    where
        F: Fn(&GameEvent) -> bool,
    {
        self.events.iter().filter(|e| predicate(e)).count()
    }
}

impl DisplaySink for RecordingDisplay {
    fn emit(&mut self, event: &GameEvent) {
        self.events.push(event.clone());
    }

    fn show_table(&mut self, _table: &ProbabilityTable) {
        self.tables_shown += 1;
    }
}
