//! Command: render one template fragment against the project data.
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};

use super::CommandSetup;
use crate::cli::{GlobalOpts, RenderOpts};
use crate::engine::Template;
use crate::error::BuildError;
use crate::logging::Logger;
use crate::site::fs::write_file;

/// Locate the template: a path that exists as given, else one under the
/// templates directory.
fn template_path(template: &Path, templates_dir: &Path) -> PathBuf {
    if template.is_absolute() || template.exists() {
        template.to_path_buf()
    } else {
        templates_dir.join(template)
    }
}

/// Run the render command.
///
/// Output goes to `--output` or stdout; diagnostics are logged as warnings.
///
/// # Errors
///
/// Returns an error if the template cannot be read, the output cannot be
/// written, or `--strict` is set and the template produced diagnostics.
pub fn run(global: &GlobalOpts, opts: &RenderOpts, log: &Arc<Logger>) -> Result<()> {
    let setup = CommandSetup::init(global, log)?;
    let path = template_path(&opts.template, &setup.config.templates_dir);
    let source = std::fs::read_to_string(&path)
        .map_err(|e| BuildError::io(&path, e))
        .with_context(|| format!("reading template {}", opts.template.display()))?;

    let rendered = Template::parse(&source).render_with_diagnostics(&setup.data);
    let name = opts.template.display().to_string();
    for diagnostic in &rendered.diagnostics {
        log.warn(&format!("{name}: {diagnostic}"));
    }
    if opts.strict && !rendered.is_clean() {
        return Err(BuildError::Diagnostics {
            page: name,
            count: rendered.diagnostics.len(),
        }
        .into());
    }

    match &opts.output {
        Some(out) if global.dry_run => {
            log.dry_run(&format!(
                "would write {} ({} bytes)",
                out.display(),
                rendered.output.len()
            ));
        }
        Some(out) => {
            write_file(out, &rendered.output)?;
            log.info(&format!("wrote {}", out.display()));
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(rendered.output.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}
