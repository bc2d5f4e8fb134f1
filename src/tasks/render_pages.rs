//! Task: render each page's sections and splice them into its shell.
use std::collections::HashMap;

use anyhow::{Context as _, Result};

use super::{Context, Task, TaskResult, TaskStats};
use crate::config::PageConfig;
use crate::engine::{Rendered, Template};
use crate::error::BuildError;
use crate::site::{TemplateStore, assemble, find_markers, fs::write_file};

/// One rendered fragment of a page.
#[derive(Debug)]
struct Section {
    name: String,
    rendered: Rendered,
}

fn render_section(ctx: &Context, store: &TemplateStore, name: &str) -> Section {
    let source = store.load(name, ctx.log.as_ref());
    Section {
        name: name.to_string(),
        rendered: Template::parse(&source).render_with_diagnostics(&ctx.data),
    }
}

/// Render every named fragment, in parallel unless `--no-parallel` was given.
///
/// Output order matches `names` either way.
fn render_sections(ctx: &Context, store: &TemplateStore, names: &[String]) -> Vec<Section> {
    if ctx.parallel {
        use rayon::prelude::*;
        names
            .par_iter()
            .map(|name| render_section(ctx, store, name))
            .collect()
    } else {
        names
            .iter()
            .map(|name| render_section(ctx, store, name))
            .collect()
    }
}

/// Assemble and write one page. Returns the page's diagnostic count, or
/// `None` when its shell is missing and the page was skipped.
fn render_page(ctx: &Context, store: &TemplateStore, page: &PageConfig) -> Result<Option<usize>> {
    let shell_path = ctx.config.src_dir.join(&page.shell);
    let shell = match std::fs::read_to_string(&shell_path) {
        Ok(shell) => shell,
        Err(e) => {
            ctx.log
                .warn(&format!("page shell not found: {} ({e})", shell_path.display()));
            return Ok(None);
        }
    };

    let names = find_markers(&shell);
    ctx.log.debug(&format!(
        "{}: {} section(s)",
        page.shell.display(),
        names.len()
    ));

    let sections = render_sections(ctx, store, &names);
    let mut diagnostics = 0;
    let mut rendered = HashMap::with_capacity(sections.len());
    for section in sections {
        for diagnostic in &section.rendered.diagnostics {
            ctx.log.warn(&format!("{}: {diagnostic}", section.name));
        }
        diagnostics += section.rendered.diagnostics.len();
        rendered.insert(section.name, section.rendered.output);
    }

    let html = assemble(&shell, &rendered);
    let out_path = ctx.config.out_dir.join(page.output_path());
    if ctx.dry_run {
        ctx.log.dry_run(&format!(
            "would write {} ({} bytes)",
            page.output_path().display(),
            html.len()
        ));
    } else {
        write_file(&out_path, &html)
            .with_context(|| format!("writing page {}", page.output_path().display()))?;
        ctx.log
            .info(&format!("wrote {}", page.output_path().display()));
    }
    Ok(Some(diagnostics))
}

/// Assemble every configured page from its shell and rendered fragments.
#[derive(Debug)]
pub struct RenderPages;

impl Task for RenderPages {
    fn name(&self) -> &'static str {
        "Render pages"
    }

    fn should_run(&self, ctx: &Context) -> bool {
        !ctx.config.pages.is_empty()
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let store = TemplateStore::new(&ctx.config.templates_dir);
        let mut stats = TaskStats::new();
        let mut flagged: Vec<(String, usize)> = Vec::new();

        for page in &ctx.config.pages {
            match render_page(ctx, &store, page)? {
                Some(count) => {
                    stats.written += 1;
                    if count > 0 {
                        flagged.push((page.shell.display().to_string(), count));
                    }
                }
                None => stats.skipped += 1,
            }
        }

        if ctx.strict && !flagged.is_empty() {
            let page = flagged
                .iter()
                .map(|(page, _)| page.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            let count = flagged.iter().map(|(_, count)| count).sum();
            return Err(BuildError::Diagnostics { page, count }.into());
        }

        Ok(stats.finish(ctx))
    }
}
