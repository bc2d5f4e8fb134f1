//! The build's [`Log`] implementation on top of [`tracing`].
use std::path::PathBuf;
use std::sync::Mutex;

use super::subscriber::{DRY_RUN_TARGET, STAGE_TARGET};
use super::types::{Log, TaskEntry, TaskStatus};
use super::utils::log_file_path;

/// Logger used by the `build`, `render` and `check` commands.
///
/// Messages go through [`tracing`]; the subscriber installed by
/// [`init_subscriber`](super::init_subscriber) decides where they land. Task
/// results are kept in memory for [`Logger::print_summary`].
#[derive(Debug)]
pub struct Logger {
    tasks: Mutex<Vec<TaskEntry>>,
    log_file: Option<PathBuf>,
}

impl Logger {
    /// Logger for `command`. The log file named in the summary is written by
    /// the subscriber's file layer, not here.
    #[must_use]
    pub fn new(command: &str) -> Self {
        Self {
            tasks: Mutex::new(Vec::new()),
            log_file: log_file_path(command),
        }
    }

    /// A task failure, on stderr.
    pub fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    /// Degraded input, on stderr.
    pub fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    /// Header line naming the task that starts.
    pub fn stage(&self, msg: &str) {
        tracing::info!(target: STAGE_TARGET, "{msg}");
    }

    /// Progress line.
    pub fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    /// Shown on the console only with `--verbose`.
    pub fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    /// A write that `--dry-run` suppressed.
    pub fn dry_run(&self, msg: &str) {
        tracing::info!(target: DRY_RUN_TARGET, "{msg}");
    }

    /// Add a line to the summary.
    pub fn record_task(&self, name: &str, status: TaskStatus, message: Option<&str>) {
        if let Ok(mut guard) = self.tasks.lock() {
            guard.push(TaskEntry {
                name: name.to_string(),
                status,
                message: message.map(String::from),
            });
        }
    }

    /// Summary lines recorded so far, in order.
    #[must_use]
    pub fn task_entries(&self) -> Vec<TaskEntry> {
        self.tasks.lock().map_or_else(|_| vec![], |g| g.clone())
    }

    /// `true` once any task or check has failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.failure_count() > 0
    }

    /// Number of failed tasks or checks; the exit status depends on it.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.tasks.lock().map_or(0, |guard| {
            guard
                .iter()
                .filter(|t| t.status == TaskStatus::Failed)
                .count()
        })
    }

    /// Log one line per recorded task, then the totals and the log file path.
    pub fn print_summary(&self) {
        let tasks = self.task_entries();
        if tasks.is_empty() {
            return;
        }

        self.stage("Summary");
        for task in &tasks {
            let (icon, color) = task.status.marker();
            let suffix = task
                .message
                .as_ref()
                .map_or_else(String::new, |msg| format!(" ({msg})"));
            self.info(&format!("{color}{icon} {}{suffix}\x1b[0m", task.name));
        }
        self.info(&summary_totals(&tasks));

        if let Some(path) = &self.log_file {
            self.info(&format!("\x1b[2mlog: {}\x1b[0m", path.display()));
        }
    }
}

/// `4 tasks: 3 ok, 1 idle`, leaving out statuses nobody ended with.
fn summary_totals(tasks: &[TaskEntry]) -> String {
    let counts: Vec<String> = TaskStatus::ALL
        .iter()
        .filter_map(|&status| {
            let count = tasks.iter().filter(|t| t.status == status).count();
            let (_, color) = status.marker();
            (count > 0).then(|| format!("{color}{count} {}\x1b[0m", status.label()))
        })
        .collect();
    format!("{} tasks: {}", tasks.len(), counts.join(", "))
}

impl Log for Logger {
    fn stage(&self, msg: &str) {
        self.stage(msg);
    }

    fn info(&self, msg: &str) {
        self.info(msg);
    }

    fn debug(&self, msg: &str) {
        self.debug(msg);
    }

    fn warn(&self, msg: &str) {
        self.warn(msg);
    }

    fn error(&self, msg: &str) {
        self.error(msg);
    }

    fn dry_run(&self, msg: &str) {
        self.dry_run(msg);
    }

    fn record_task(&self, name: &str, status: TaskStatus, message: Option<&str>) {
        self.record_task(name, status, message);
    }
}
