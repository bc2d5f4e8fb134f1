//! Logging infrastructure for structured console and file output.

mod logger;
mod subscriber;
mod types;
mod utils;

pub use logger::Logger;
pub use subscriber::init_subscriber;
pub use types::{Log, TaskEntry, TaskStatus};

/// In-memory [`Log`] for unit tests: keeps every message with its level tag.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct MemoryLog {
    lines: std::sync::Mutex<Vec<String>>,
    tasks: std::sync::Mutex<Vec<TaskEntry>>,
}

#[cfg(test)]
impl MemoryLog {
    fn push(&self, tag: &str, msg: &str) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(format!("{tag}: {msg}"));
        }
    }

    /// Messages logged at `warn` level.
    pub(crate) fn warnings(&self) -> Vec<String> {
        self.with_tag("warn")
    }

    /// Messages logged at `dry_run` level.
    pub(crate) fn dry_runs(&self) -> Vec<String> {
        self.with_tag("dry_run")
    }

    /// Recorded task entries.
    pub(crate) fn tasks(&self) -> Vec<TaskEntry> {
        self.tasks.lock().map_or_else(|_| vec![], |t| t.clone())
    }

    fn with_tag(&self, tag: &str) -> Vec<String> {
        let prefix = format!("{tag}: ");
        self.lines.lock().map_or_else(
            |_| vec![],
            |lines| {
                lines
                    .iter()
                    .filter_map(|l| l.strip_prefix(&prefix).map(String::from))
                    .collect()
            },
        )
    }
}

#[cfg(test)]
impl Log for MemoryLog {
    fn stage(&self, msg: &str) {
        self.push("stage", msg);
    }
    fn info(&self, msg: &str) {
        self.push("info", msg);
    }
    fn debug(&self, msg: &str) {
        self.push("debug", msg);
    }
    fn warn(&self, msg: &str) {
        self.push("warn", msg);
    }
    fn error(&self, msg: &str) {
        self.push("error", msg);
    }
    fn dry_run(&self, msg: &str) {
        self.push("dry_run", msg);
    }
    fn record_task(&self, name: &str, status: TaskStatus, message: Option<&str>) {
        if let Ok(mut tasks) = self.tasks.lock() {
            tasks.push(TaskEntry {
                name: name.to_string(),
                status,
                message: message.map(String::from),
            });
        }
    }
}
