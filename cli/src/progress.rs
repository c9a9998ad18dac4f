use crate::ui;
use std::time::{Duration, Instant};

/// Prints numbered steps of a CLI operation and its total duration
pub struct ProgressTracker {
    operation_name: String,
    start_time: Instant,
    steps: Vec<String>,
    current_step: usize,
}

impl ProgressTracker {
    pub fn new(operation_name: &str) -> Self {
        ui::section_header(operation_name);
        Self {
            operation_name: operation_name.to_string(),
            start_time: Instant::now(),
            steps: Vec::new(),
            current_step: 0,
        }
    }

    pub fn with_steps<I, S>(mut self, steps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.steps = steps.into_iter().map(Into::into).collect();
        self
    }

    /// Announce the next step
    pub fn start_step(&self) {
        if let Some(step) = self.steps.get(self.current_step) {
            ui::status_message(step);
        }
    }

    pub fn complete_step(&mut self) {
        if let Some(step) = self.steps.get(self.current_step) {
            ui::success_message(step);
            self.current_step += 1;
        }
    }

    pub fn skip_step(&mut self, reason: &str) {
        if let Some(step) = self.steps.get(self.current_step) {
            ui::warning_message(&format!("Skipped: {step} ({reason})"));
            self.current_step += 1;
        }
    }

    /// Complete the operation
    pub fn complete(&self) {
        ui::success_message(&format!(
            "{} completed in {}",
            self.operation_name,
            Self::format_duration(self.start_time.elapsed())
        ));
    }

    fn format_duration(duration: Duration) -> String {
        let millis = duration.as_millis();
        if millis < 1000 {
            format!("{millis} ms")
        } else if duration.as_secs() < 60 {
            format!("{:.1} seconds", duration.as_secs_f64())
        } else {
            let seconds = duration.as_secs();
            format!("{} minutes {} seconds", seconds / 60, seconds % 60)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(ProgressTracker::format_duration(Duration::from_millis(42)), "42 ms");
        assert_eq!(
            ProgressTracker::format_duration(Duration::from_millis(2500)),
            "2.5 seconds"
        );
        assert_eq!(
            ProgressTracker::format_duration(Duration::from_secs(125)),
            "2 minutes 5 seconds"
        );
    }
}
