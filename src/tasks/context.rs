//! Shared state handed to every build task.
use std::sync::Arc;

use serde_json::Value;

use crate::config::SiteConfig;
use crate::logging::Log;

/// Shared context for task execution.
pub struct Context {
    /// Validated site configuration.
    pub config: Arc<SiteConfig>,
    /// Render context built from the project's JSON data files.
    pub data: Arc<Value>,
    /// Logger for output and task recording.
    pub log: Arc<dyn Log>,
    /// Whether to perform a dry run (report what would be written).
    pub dry_run: bool,
    /// Whether to render page sections in parallel using Rayon.
    pub parallel: bool,
    /// Whether template diagnostics fail the build.
    pub strict: bool,
    /// Whether to remove the output directory before building.
    pub clean: bool,
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("config", &self.config)
            .field("data", &"<Value>")
            .field("log", &"<dyn Log>")
            .field("dry_run", &self.dry_run)
            .field("parallel", &self.parallel)
            .field("strict", &self.strict)
            .field("clean", &self.clean)
            .finish()
    }
}

impl Context {
    /// Creates a new context with every flag off except `parallel`.
    #[must_use]
    pub fn new(config: Arc<SiteConfig>, data: Arc<Value>, log: Arc<dyn Log>) -> Self {
        Self {
            config,
            data,
            log,
            dry_run: false,
            parallel: true,
            strict: false,
            clean: false,
        }
    }
}
