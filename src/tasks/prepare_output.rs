//! Task: create, or with `--clean` recreate, the output directory.
use anyhow::{Context as _, Result};

use super::{Context, Task, TaskResult};

/// Create the output directory, removing it first when `--clean` is set.
#[derive(Debug)]
pub struct PrepareOutput;

impl Task for PrepareOutput {
    fn name(&self) -> &'static str {
        "Prepare output directory"
    }

    fn should_run(&self, _ctx: &Context) -> bool {
        true
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let out_dir = &ctx.config.out_dir;

        if ctx.clean && out_dir.exists() {
            if ctx.dry_run {
                ctx.log
                    .dry_run(&format!("would remove {}", out_dir.display()));
            } else {
                std::fs::remove_dir_all(out_dir)
                    .with_context(|| format!("removing {}", out_dir.display()))?;
                ctx.log.debug(&format!("removed {}", out_dir.display()));
            }
        }

        if ctx.dry_run {
            if !out_dir.exists() {
                ctx.log
                    .dry_run(&format!("would create {}", out_dir.display()));
            }
            return Ok(TaskResult::DryRun);
        }

        std::fs::create_dir_all(out_dir)
            .with_context(|| format!("creating {}", out_dir.display()))?;
        ctx.log.info(&format!("output: {}", out_dir.display()));
        Ok(TaskResult::Ok)
    }
}
