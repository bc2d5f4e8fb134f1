//! Verbatim copies of static sources into the output directory.
use std::path::{Path, PathBuf};

use anyhow::Result;

use super::{Context, Task, TaskResult, TaskStats};
use crate::site::fs::{copy_dir_recursive, copy_file};

/// Shared loop: copy each configured entry from `src_dir` to `out_dir`.
///
/// A missing source is a warning and counts as skipped.
fn copy_entries(
    ctx: &Context,
    entries: &[PathBuf],
    kind: &str,
    copy: impl Fn(&Path, &Path) -> Result<u32>,
) -> Result<TaskResult> {
    let mut stats = TaskStats::new();
    for entry in entries {
        let src = ctx.config.src_dir.join(entry);
        let dst = ctx.config.out_dir.join(entry);
        if !src.exists() {
            ctx.log
                .warn(&format!("{kind} not found: {}", src.display()));
            stats.skipped += 1;
            continue;
        }
        if ctx.dry_run {
            ctx.log
                .dry_run(&format!("would copy {}", entry.display()));
            stats.written += 1;
            continue;
        }
        let copied = copy(&src, &dst)?;
        ctx.log.debug(&format!("copied {}", entry.display()));
        stats.written += copied;
    }
    Ok(stats.finish(ctx))
}

/// Copy individual files listed in `copy_files`.
#[derive(Debug)]
pub struct CopyStaticFiles;

impl Task for CopyStaticFiles {
    fn name(&self) -> &'static str {
        "Copy static files"
    }

    fn should_run(&self, ctx: &Context) -> bool {
        !ctx.config.copy_files.is_empty()
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        copy_entries(ctx, &ctx.config.copy_files, "file", |src, dst| {
            copy_file(src, dst)?;
            Ok(1)
        })
    }
}

/// Copy directory trees listed in `copy_dirs`.
#[derive(Debug)]
pub struct CopyAssetDirectories;

impl Task for CopyAssetDirectories {
    fn name(&self) -> &'static str {
        "Copy asset directories"
    }

    fn should_run(&self, ctx: &Context) -> bool {
        !ctx.config.copy_dirs.is_empty()
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        copy_entries(ctx, &ctx.config.copy_dirs, "directory", |src, dst| {
            let copied = copy_dir_recursive(src, dst)?;
            Ok(u32::try_from(copied).unwrap_or(u32::MAX))
        })
    }
}
