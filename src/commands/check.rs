//! Command: report template diagnostics without writing any output.
use std::sync::Arc;

use anyhow::Result;
use serde_json::Value;

use super::CommandSetup;
use crate::cli::GlobalOpts;
use crate::config::SiteConfig;
use crate::engine::Template;
use crate::logging::{Log, Logger, TaskStatus};
use crate::site::{TemplateStore, find_markers};

/// Render every fragment with diagnostics and record one entry per fragment.
fn check_templates(store: &TemplateStore, data: &Value, log: &dyn Log) {
    let names = store.list();
    if names.is_empty() {
        log.warn(&format!("no templates found in {}", store.dir().display()));
    }

    for name in names {
        let source = store.load(&name, log);
        let rendered = Template::parse(&source).render_with_diagnostics(data);
        if rendered.is_clean() {
            log.record_task(&name, TaskStatus::Ok, None);
            continue;
        }
        for diagnostic in &rendered.diagnostics {
            log.warn(&format!("{name}: {diagnostic}"));
        }
        log.record_task(
            &name,
            TaskStatus::Failed,
            Some(&format!("{} diagnostic(s)", rendered.diagnostics.len())),
        );
    }
}

/// Check that every marker in every page shell names an existing fragment.
fn check_pages(config: &SiteConfig, store: &TemplateStore, log: &dyn Log) {
    let available = store.list();
    for page in &config.pages {
        let label = page.shell.display().to_string();
        let Ok(shell) = std::fs::read_to_string(config.src_dir.join(&page.shell)) else {
            log.record_task(&label, TaskStatus::Skipped, Some("shell not found"));
            continue;
        };
        let missing: Vec<String> = find_markers(&shell)
            .into_iter()
            .filter(|name| !available.contains(name))
            .collect();
        if missing.is_empty() {
            log.record_task(&label, TaskStatus::Ok, None);
        } else {
            let message = format!("missing: {}", missing.join(", "));
            log.warn(&format!("{label}: {message}"));
            log.record_task(&label, TaskStatus::Failed, Some(&message));
        }
    }
}

/// Run the check command.
///
/// # Errors
///
/// Returns an error if configuration loading fails, or if any template has
/// diagnostics or any page references a missing fragment.
pub fn run(global: &GlobalOpts, log: &Arc<Logger>) -> Result<()> {
    let setup = CommandSetup::init(global, log)?;
    let store = TemplateStore::new(&setup.config.templates_dir);

    log.stage("Checking templates");
    check_templates(&store, &setup.data, log.as_ref());

    log.stage("Checking pages");
    check_pages(&setup.config, &store, log.as_ref());

    log.print_summary();

    let count = log.failure_count();
    if count > 0 {
        anyhow::bail!("{count} check(s) failed");
    }
    Ok(())
}
