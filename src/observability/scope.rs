//! Start/complete logging around a unit of work.

use std::time::Instant;

use super::logger::Logger;

/// Logs `{name}_BEGIN` on creation and `{name}_COMPLETE` on [`complete`].
///
/// A scope dropped without completing logs `{name}_ERROR`.
///
/// [`complete`]: ObservationScope::complete
pub struct ObservationScope<'a> {
    name: &'a str,
    started: Instant,
    completed: bool,
}

impl<'a> ObservationScope<'a> {
    pub fn new(name: &'a str) -> Self {
        Self::with_fields(name, &[])
    }

    pub fn with_fields(name: &'a str, fields: &[(&str, &str)]) -> Self {
        Logger::info(&format!("{}_BEGIN", name), fields);
        Self {
            name,
            started: Instant::now(),
            completed: false,
        }
    }

    /// Mark the work as done, attaching `fields` and the elapsed time
    pub fn complete(mut self, fields: &[(&str, &str)]) {
        self.completed = true;
        let elapsed = self.started.elapsed().as_micros().to_string();
        let mut all: Vec<(&str, &str)> = fields.to_vec();
        all.push(("elapsed_us", elapsed.as_str()));
        Logger::info(&format!("{}_COMPLETE", self.name), &all);
    }
}

impl Drop for ObservationScope<'_> {
    fn drop(&mut self) {
        if !self.completed {
            Logger::error(&format!("{}_ERROR", self.name), &[]);
        }
    }
}
