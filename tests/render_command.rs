#![allow(clippy::expect_used, clippy::unwrap_used)]
//! Integration tests for the `render` and `check` commands.

mod common;

use std::path::PathBuf;

use common::SiteProject;
use portfolio_cli::cli::RenderOpts;
use portfolio_cli::commands::{check, render};
use portfolio_cli::logging::TaskStatus;

fn render_to(project: &SiteProject, template: &str, strict: bool) -> anyhow::Result<PathBuf> {
    let out = project.join("out/rendered.html");
    let opts = RenderOpts {
        template: PathBuf::from(template),
        output: Some(out.clone()),
        strict,
    };
    render::run(&project.global(), &opts, &common::logger())?;
    Ok(out)
}

// ---------------------------------------------------------------------------
// render
// ---------------------------------------------------------------------------

#[test]
fn render_named_fragment_against_project_data() {
    let project = SiteProject::portfolio();

    let out = render_to(&project, "skills.html", false).expect("render succeeds");

    assert_eq!(
        std::fs::read_to_string(out).unwrap(),
        "<section id=\"skills\">\n  <h3>Languages</h3>\n  <p>Rust,Go</p>\n  <h3>Tools</h3>\n  <p>Git,Cargo</p>\n</section>"
    );
}

#[test]
fn render_missing_template_is_an_error() {
    let project = SiteProject::portfolio();
    let err = render_to(&project, "nope.html", false).unwrap_err();
    assert!(format!("{err:#}").contains("reading template nope.html"));
}

#[test]
fn render_strict_rejects_diagnostics_and_writes_nothing() {
    let project = SiteProject::portfolio();
    project.write("src/templates/broken.html", "{{#if profile.available}}open");

    let err = render_to(&project, "broken.html", true).unwrap_err();

    assert!(err.to_string().contains("template diagnostic(s) in broken.html"));
    assert!(!project.join("out/rendered.html").exists());
}

#[test]
fn render_lenient_keeps_unclosed_tag_literal() {
    let project = SiteProject::portfolio();
    project.write("src/templates/broken.html", "{{#if profile.available}}open");

    let out = render_to(&project, "broken.html", false).unwrap();

    assert_eq!(
        std::fs::read_to_string(out).unwrap(),
        "{{#if profile.available}}open"
    );
}

#[test]
fn render_dry_run_writes_nothing() {
    let project = SiteProject::portfolio();
    let mut global = project.global();
    global.dry_run = true;
    let opts = RenderOpts {
        template: PathBuf::from("hero.html"),
        output: Some(project.join("out/hero.html")),
        strict: false,
    };

    render::run(&global, &opts, &common::logger()).unwrap();

    assert!(!project.join("out").exists());
}

// ---------------------------------------------------------------------------
// check
// ---------------------------------------------------------------------------

#[test]
fn check_passes_on_clean_project() {
    let project = SiteProject::portfolio();
    let log = common::logger();

    check::run(&project.global(), &log).expect("clean project passes");

    let names: Vec<String> = log.task_entries().into_iter().map(|t| t.name).collect();
    assert_eq!(
        names,
        [
            "contact.html",
            "experience.html",
            "hero.html",
            "skills.html",
            "index.html",
        ]
    );
    assert!(!log.has_failures());
}

#[test]
fn check_fails_on_broken_fragment() {
    let project = SiteProject::portfolio();
    project.write("src/templates/skills.html", "{{#each skills}}{{title}}{{/if}}");
    let log = common::logger();

    let err = check::run(&project.global(), &log).unwrap_err();

    assert!(err.to_string().contains("1 check(s) failed"));
    let skills = log
        .task_entries()
        .into_iter()
        .find(|t| t.name == "skills.html")
        .expect("skills entry");
    assert_eq!(skills.status, TaskStatus::Failed);
}

#[test]
fn check_flags_markers_without_fragments() {
    let project = SiteProject::portfolio();
    std::fs::remove_file(project.join("src/templates/contact.html")).unwrap();
    let log = common::logger();

    assert!(check::run(&project.global(), &log).is_err());

    let page = log
        .task_entries()
        .into_iter()
        .find(|t| t.name == "index.html")
        .expect("page entry");
    assert_eq!(page.status, TaskStatus::Failed);
    assert_eq!(page.message.as_deref(), Some("missing: contact.html"));
}
