//! Command: build every configured page and copy static assets.
use std::sync::Arc;

use anyhow::Result;

use super::{CommandSetup, run_tasks_to_completion, version::version};
use crate::cli::{BuildOpts, GlobalOpts};
use crate::logging::Logger;
use crate::tasks::{self, Task};

/// Run the build command.
///
/// # Errors
///
/// Returns an error if configuration loading fails or any task fails.
pub fn run(global: &GlobalOpts, opts: &BuildOpts, log: &Arc<Logger>) -> Result<()> {
    log.info(&format!("portfolio {}", version()));

    log.stage("Loading project");
    let setup = CommandSetup::init(global, log)?;
    log.info(&format!(
        "{} page(s) from {}",
        setup.config.pages.len(),
        setup.config.src_dir.display()
    ));

    let mut ctx = setup.context(global, log);
    ctx.strict = opts.strict;
    ctx.clean = opts.clean;

    let all_tasks = tasks::all_build_tasks();
    let selected = select_tasks(&all_tasks, &opts.skip, &opts.only);

    run_tasks_to_completion(selected, &ctx, log)
}

/// Filter tasks by `--only` (takes precedence) or `--skip`, matching
/// case-insensitive substrings of the task name.
fn select_tasks<'a>(
    all_tasks: &'a [Box<dyn Task>],
    skip: &[String],
    only: &[String],
) -> Vec<&'a dyn Task> {
    all_tasks
        .iter()
        .filter(|t| {
            let name = t.name().to_lowercase();
            if !only.is_empty() {
                return only.iter().any(|o| name.contains(&o.to_lowercase()));
            }
            !skip.iter().any(|s| name.contains(&s.to_lowercase()))
        })
        .map(AsRef::as_ref)
        .collect()
}
