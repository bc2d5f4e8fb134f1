// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed site project and a builder for a
// representative portfolio so each integration test can set up an isolated
// project without repeating filesystem boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use portfolio_cli::cli::GlobalOpts;
use portfolio_cli::logging::Logger;

/// Shell page of the representative project.
pub const INDEX_SHELL: &str = "<!doctype html>
<html lang=\"en\">
<head><title>Portfolio</title></head>
<body>
<!-- TEMPLATE: hero.html -->
<main>
<!-- TEMPLATE: experience.html -->
<!-- TEMPLATE: skills.html -->
</main>
<!-- TEMPLATE: contact.html -->
</body>
</html>";

/// An isolated site project backed by a [`tempfile::TempDir`].
///
/// The directory is automatically deleted when dropped.
pub struct SiteProject {
    /// Temporary directory containing the project.
    pub root: tempfile::TempDir,
}

impl SiteProject {
    /// Create an empty project with just a `src/` directory.
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("create temp dir");
        std::fs::create_dir_all(root.path().join("src")).expect("create src dir");
        Self { root }
    }

    /// Create a project with a shell, four fragments, data files, and static
    /// assets, laid out with the default `site.toml` settings.
    pub fn portfolio() -> Self {
        let project = Self::new();
        project
            .write("src/index.html", INDEX_SHELL)
            .write(
                "src/templates/hero.html",
                "<header>\n  <h1>{{profile.name}}</h1>\n  <p>{{profile.title}}</p>\n  {{#if profile.available}}<span class=\"badge\">Open to work</span>{{/if}}\n</header>",
            )
            .write(
                "src/templates/experience.html",
                "<section id=\"experience\">\n{{#each experience}}  <article>\n    <h3>{{role}} @ {{company}}</h3>\n    <p>{{period}}</p>\n    <ul>{{#each highlights}}<li>{{this}}</li>{{/each}}</ul>\n  </article>\n{{/each}}</section>",
            )
            .write(
                "src/templates/skills.html",
                "<section id=\"skills\">\n{{#each skills}}  <h3>{{title}}</h3>\n  <p>{{items}}</p>\n{{/each}}</section>",
            )
            .write(
                "src/templates/contact.html",
                "<footer>\n  <a href=\"mailto:{{contact.email}}\">{{contact.email}}</a>\n  {{#if contact.github}}<a href=\"{{contact.github}}\">GitHub</a>{{/if}}\n  <small>{{meta.updated}}</small>\n</footer>",
            )
            .write(
                "src/data/profile.json",
                r#"{ "name": "Ada Lovelace", "title": "Analytical Engineer", "available": true }"#,
            )
            .write(
                "src/data/experience.json",
                r#"[
  { "company": "Analytical Engines Ltd", "role": "Lead", "period": "1842-1843",
    "highlights": ["Note G", "Bernoulli numbers"] },
  { "company": "Royal Society", "role": "Correspondent", "period": "1840", "highlights": [] }
]"#,
            )
            .write(
                "src/data/skills.json",
                r#"{
  "languages": { "title": "Languages", "items": ["Rust", "Go"] },
  "tools": { "title": "Tools", "items": ["Git", "Cargo"] },
  "note": "not a category"
}"#,
            )
            .write(
                "src/data/contact.json",
                r#"{ "email": "ada@example.com", "github": "https://github.com/ada" }"#,
            )
            .write("src/data/meta.json", r#"{ "updated": "2026-01" }"#)
            .write("src/data/pages.json", "{}")
            .write("src/css/site.css", "body { margin: 0; }")
            .write("src/js/main.js", "console.log('hi');")
            .write("src/assets/img/logo.svg", "<svg/>");
        project
    }

    /// Path to the project root.
    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Absolute path of `rel` inside the project.
    pub fn join(&self, rel: &str) -> PathBuf {
        self.root.path().join(rel)
    }

    /// Write `content` to `rel`, creating parent directories.
    pub fn write(&self, rel: &str, content: &str) -> &Self {
        let path = self.join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent dir");
        }
        std::fs::write(&path, content).expect("write project file");
        self
    }

    /// Read `rel` as UTF-8.
    pub fn read(&self, rel: &str) -> String {
        std::fs::read_to_string(self.join(rel)).expect("read project file")
    }

    /// Global options pointing at this project.
    pub fn global(&self) -> GlobalOpts {
        GlobalOpts {
            dry_run: false,
            root: Some(self.path().to_path_buf()),
            parallel: true,
        }
    }
}

/// A fresh logger; without an installed subscriber its output is discarded.
pub fn logger() -> Arc<Logger> {
    Arc::new(Logger::new("test"))
}
