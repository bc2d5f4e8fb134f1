//! Top-level subcommand orchestration.
pub mod build;
pub mod check;
pub mod render;
pub mod version;

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use serde_json::Value;

use crate::cli::GlobalOpts;
use crate::config::{CONFIG_FILE, SiteConfig};
use crate::logging::Logger;
use crate::site::load_context;
use crate::tasks::{self, Context, Task};

/// Environment variable consulted when `--root` is not given.
pub const ROOT_ENV: &str = "PORTFOLIO_ROOT";

/// Shared state produced by the common command setup sequence.
///
/// Resolves the project root, loads `site.toml`, and reads the JSON data so
/// that each command does not have to repeat the boilerplate.
#[derive(Debug)]
pub struct CommandSetup {
    /// Validated configuration.
    pub config: Arc<SiteConfig>,
    /// Render context built from the data files.
    pub data: Arc<Value>,
}

impl CommandSetup {
    /// Resolve the root, load the configuration, and load the data files.
    ///
    /// Progress is logged at debug level so that commands writing to stdout
    /// stay clean; loader warnings still go to stderr.
    ///
    /// # Errors
    ///
    /// Returns an error if the root directory cannot be determined or
    /// `site.toml` is invalid.
    pub fn init(global: &GlobalOpts, log: &Logger) -> Result<Self> {
        let root = resolve_root(global)?;
        log.debug(&format!("root: {}", root.display()));

        let config = SiteConfig::load(&root)
            .with_context(|| format!("loading {}", root.join(CONFIG_FILE).display()))?;
        log.debug(&format!(
            "{} page(s), {} data file(s), templates in {}",
            config.pages.len(),
            config.data_files.len(),
            config.templates_dir.display()
        ));

        let data = load_context(&config.data_dir, &config.data_files, log);

        Ok(Self {
            config: Arc::new(config),
            data: Arc::new(data),
        })
    }

    /// Build a task [`Context`] sharing this setup's configuration and data.
    #[must_use]
    pub fn context(&self, global: &GlobalOpts, log: &Arc<Logger>) -> Context {
        let mut ctx = Context::new(
            Arc::clone(&self.config),
            Arc::clone(&self.data),
            Arc::clone(log) as Arc<dyn crate::logging::Log>,
        );
        ctx.dry_run = global.dry_run;
        ctx.parallel = global.parallel;
        ctx
    }
}

/// Execute every task in order, print the summary, and bail if any task failed.
///
/// # Errors
///
/// Returns an error if one or more tasks recorded a failure.
pub fn run_tasks_to_completion<'a>(
    tasks: impl IntoIterator<Item = &'a dyn Task>,
    ctx: &Context,
    log: &Logger,
) -> Result<()> {
    for task in tasks {
        tasks::execute(task, ctx);
    }

    log.print_summary();

    let count = log.failure_count();
    if count > 0 {
        anyhow::bail!("{count} task(s) failed");
    }
    Ok(())
}

/// Resolve the project root from `--root`, `PORTFOLIO_ROOT`, or the current
/// directory.
///
/// # Errors
///
/// Returns an error if no candidate is usable.
pub fn resolve_root(global: &GlobalOpts) -> Result<PathBuf> {
    let cwd = std::env::current_dir().context("reading current directory")?;
    resolve_root_from(global.root.as_deref(), std::env::var_os(ROOT_ENV), &cwd)
}

/// Root resolution with its inputs made explicit.
fn resolve_root_from(explicit: Option<&Path>, env: Option<OsString>, cwd: &Path) -> Result<PathBuf> {
    if let Some(root) = explicit {
        return dunce::canonicalize(root)
            .with_context(|| format!("project root not found: {}", root.display()));
    }

    if let Some(root) = env.filter(|v| !v.is_empty()) {
        let root = PathBuf::from(root);
        return dunce::canonicalize(&root)
            .with_context(|| format!("{ROOT_ENV} does not exist: {}", root.display()));
    }

    if cwd.join(CONFIG_FILE).exists() || cwd.join("src").is_dir() {
        return Ok(cwd.to_path_buf());
    }

    anyhow::bail!(
        "cannot determine project root. Use --root, set {ROOT_ENV}, or run from a directory containing {CONFIG_FILE} or src/"
    );
}
