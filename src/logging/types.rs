//! Task records kept for the build summary, and the [`Log`] trait.

/// One line of the build summary.
#[derive(Debug, Clone)]
pub struct TaskEntry {
    /// Task or check name, e.g. `Render pages` or `hero.html`.
    pub name: String,
    /// How it ended.
    pub status: TaskStatus,
    /// Detail shown after the name, such as a failure reason.
    pub message: Option<String>,
}

/// How a build task or template check ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    /// Finished and wrote what it had to.
    Ok,
    /// Nothing in `site.toml` for this task to work on.
    Idle,
    /// Ran but had to leave its input alone, e.g. a page shell that is missing.
    Skipped,
    /// Ran under `--dry-run`; the output directory was not touched.
    DryRun,
    /// Returned an error, or found diagnostics under `--strict`.
    Failed,
}

impl TaskStatus {
    /// Every status, in the order the summary totals list them.
    pub const ALL: [Self; 5] = [Self::Ok, Self::Idle, Self::Skipped, Self::DryRun, Self::Failed];

    /// Word used in the summary totals.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Idle => "idle",
            Self::Skipped => "skipped",
            Self::DryRun => "dry-run",
            Self::Failed => "failed",
        }
    }

    /// Icon and ANSI colour for a summary line.
    pub(super) const fn marker(self) -> (&'static str, &'static str) {
        match self {
            Self::Ok => ("✓", "\x1b[32m"),
            Self::Idle => ("·", "\x1b[2m"),
            Self::Skipped => ("○", "\x1b[33m"),
            Self::DryRun => ("~", "\x1b[37m"),
            Self::Failed => ("✗", "\x1b[31m"),
        }
    }
}

/// Sink for build messages and task results.
///
/// Tasks, loaders and commands log through this trait so they can be
/// exercised in tests with an in-memory implementation.
pub trait Log: Send + Sync {
    /// A task is starting.
    fn stage(&self, msg: &str);
    /// Progress worth showing on the console.
    fn info(&self, msg: &str);
    /// Detail shown only with `--verbose` or in the log file.
    fn debug(&self, msg: &str);
    /// Degraded input the build worked around, such as a missing data file.
    fn warn(&self, msg: &str);
    /// A task failure.
    fn error(&self, msg: &str);
    /// A write that `--dry-run` suppressed.
    fn dry_run(&self, msg: &str);
    /// Add a line to the build summary.
    fn record_task(&self, name: &str, status: TaskStatus, message: Option<&str>);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_distinct() {
        let labels: Vec<&str> = TaskStatus::ALL.iter().map(|s| s.label()).collect();
        assert_eq!(labels, ["ok", "idle", "skipped", "dry-run", "failed"]);
    }

    #[test]
    fn failed_marker_is_red() {
        assert_eq!(TaskStatus::Failed.marker(), ("✗", "\x1b[31m"));
    }
}
