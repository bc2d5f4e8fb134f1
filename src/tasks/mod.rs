//! Named build tasks, executed in order with their status recorded.
pub mod context;
pub mod copy_static;
pub mod prepare_output;
pub mod render_pages;

pub use context::Context;

use anyhow::Result;

use crate::logging::TaskStatus;

/// Result of a single task execution.
///
/// # Examples
///
/// ```
/// use portfolio_cli::tasks::TaskResult;
///
/// let ok = TaskResult::Ok;
/// let skipped = TaskResult::Skipped("no copy_files configured".into());
/// let dry = TaskResult::DryRun;
///
/// assert!(matches!(ok, TaskResult::Ok));
/// assert!(matches!(skipped, TaskResult::Skipped(_)));
/// assert!(matches!(dry, TaskResult::DryRun));
/// ```
#[derive(Debug, Clone)]
pub enum TaskResult {
    /// Task completed successfully.
    Ok,
    /// Task was skipped at run time.
    Skipped(String),
    /// Task ran in dry-run mode.
    DryRun,
}

/// Counters for tasks that handle many outputs.
///
/// # Examples
///
/// ```
/// use portfolio_cli::tasks::TaskStats;
///
/// let stats = TaskStats { written: 3, skipped: 0 };
/// assert_eq!(stats.summary(false), "3 written");
/// assert_eq!(stats.summary(true), "3 would be written");
///
/// let stats = TaskStats { written: 1, skipped: 2 };
/// assert_eq!(stats.summary(false), "1 written, 2 skipped");
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TaskStats {
    /// Number of outputs written (or that would be written in a dry run).
    pub written: u32,
    /// Number of outputs skipped because their source was missing.
    pub skipped: u32,
}

impl TaskStats {
    /// Create a new empty stats counter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Format the summary string (e.g. "3 written, 1 skipped").
    #[must_use]
    pub fn summary(&self, dry_run: bool) -> String {
        let verb = if dry_run { "would be written" } else { "written" };
        if self.skipped > 0 {
            format!("{} {verb}, {} skipped", self.written, self.skipped)
        } else {
            format!("{} {verb}", self.written)
        }
    }

    /// Log the summary and convert to the matching [`TaskResult`].
    #[must_use]
    pub fn finish(self, ctx: &Context) -> TaskResult {
        ctx.log.info(&self.summary(ctx.dry_run));
        if ctx.dry_run {
            TaskResult::DryRun
        } else {
            TaskResult::Ok
        }
    }
}

impl std::ops::AddAssign for TaskStats {
    fn add_assign(&mut self, rhs: Self) {
        self.written += rhs.written;
        self.skipped += rhs.skipped;
    }
}

/// A named, executable task.
pub trait Task: Send + Sync {
    /// Human-readable task name.
    fn name(&self) -> &str;

    /// Whether this task has anything to do for the current configuration.
    fn should_run(&self, ctx: &Context) -> bool;

    /// Execute the task.
    ///
    /// # Errors
    ///
    /// Returns an error if output cannot be written or, in strict mode, if
    /// templates produced diagnostics.
    fn run(&self, ctx: &Context) -> Result<TaskResult>;
}

/// The complete set of tasks run by the build command, in execution order.
#[must_use]
pub fn all_build_tasks() -> Vec<Box<dyn Task>> {
    vec![
        Box::new(prepare_output::PrepareOutput),
        Box::new(render_pages::RenderPages),
        Box::new(copy_static::CopyStaticFiles),
        Box::new(copy_static::CopyAssetDirectories),
    ]
}

/// Execute a task, recording the result in the logger.
pub fn execute(task: &dyn Task, ctx: &Context) {
    if !task.should_run(ctx) {
        ctx.log
            .debug(&format!("{}: nothing configured", task.name()));
        ctx.log
            .record_task(task.name(), TaskStatus::Idle, None);
        return;
    }

    ctx.log.stage(task.name());

    match task.run(ctx) {
        Ok(TaskResult::Ok) => {
            ctx.log.record_task(task.name(), TaskStatus::Ok, None);
        }
        Ok(TaskResult::Skipped(reason)) => {
            ctx.log.info(&format!("skipped: {reason}"));
            ctx.log
                .record_task(task.name(), TaskStatus::Skipped, Some(&reason));
        }
        Ok(TaskResult::DryRun) => {
            ctx.log.record_task(task.name(), TaskStatus::DryRun, None);
        }
        Err(e) => {
            ctx.log.error(&format!("{}: {e:#}", task.name()));
            ctx.log
                .record_task(task.name(), TaskStatus::Failed, Some(&format!("{e:#}")));
        }
    }
}


#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::path::Path;
    use test_helpers::{make_context, site_config};

    /// A mock task for testing `execute()`.
    struct MockTask {
        name: &'static str,
        should_run: bool,
        result: Result<TaskResult, String>,
    }

    impl Task for MockTask {
        fn name(&self) -> &str {
            self.name
        }
        fn should_run(&self, _ctx: &Context) -> bool {
            self.should_run
        }
        fn run(&self, _ctx: &Context) -> Result<TaskResult> {
            self.result.clone().map_err(|s| anyhow::anyhow!("{s}"))
        }
    }

    fn run_mock(should_run: bool, result: Result<TaskResult, String>) -> TaskStatus {
        let (ctx, log) = make_context(site_config(Path::new("/tmp")), json!({}));
        let task = MockTask {
            name: "mock",
            should_run,
            result,
        };
        execute(&task, &ctx);
        let tasks = log.tasks();
        assert_eq!(tasks.len(), 1);
        tasks[0].status
    }

    #[test]
    fn execute_records_idle_task() {
        assert_eq!(run_mock(false, Ok(TaskResult::Ok)), TaskStatus::Idle);
    }

    #[test]
    fn execute_records_ok_task() {
        assert_eq!(run_mock(true, Ok(TaskResult::Ok)), TaskStatus::Ok);
    }

    #[test]
    fn execute_records_failed_task() {
        assert_eq!(run_mock(true, Err("kaboom".to_string())), TaskStatus::Failed);
    }

    #[test]
    fn execute_records_skipped_task() {
        assert_eq!(
            run_mock(true, Ok(TaskResult::Skipped("nothing".to_string()))),
            TaskStatus::Skipped
        );
    }

    #[test]
    fn execute_records_dry_run_task() {
        assert_eq!(run_mock(true, Ok(TaskResult::DryRun)), TaskStatus::DryRun);
    }

    #[test]
    fn build_tasks_run_in_pipeline_order() {
        let names: Vec<String> = all_build_tasks()
            .iter()
            .map(|t| t.name().to_string())
            .collect();
        assert_eq!(
            names,
            [
                "Prepare output directory",
                "Render pages",
                "Copy static files",
                "Copy asset directories",
            ]
        );
    }

    #[test]
    fn stats_accumulate() {
        let mut total = TaskStats::new();
        total += TaskStats {
            written: 2,
            skipped: 1,
        };
        total += TaskStats {
            written: 1,
            skipped: 0,
        };
        assert_eq!(
            total,
            TaskStats {
                written: 3,
                skipped: 1
            }
        );
    }
}
