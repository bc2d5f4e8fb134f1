//! Template fragment storage.
use std::path::{Path, PathBuf};

use crate::config::validation;
use crate::logging::Log;

/// Extension of template fragments listed by [`TemplateStore::list`].
const FRAGMENT_EXTENSION: &str = "html";

/// Reads named template fragments from a directory.
#[derive(Debug, Clone)]
pub struct TemplateStore {
    dir: PathBuf,
}

impl TemplateStore {
    /// Create a store rooted at `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory the store reads from.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Read fragment `name` (e.g. `"hero.html"`).
    ///
    /// A missing or unreadable fragment yields `""` and a warning, as does a
    /// name that is absolute or climbs out of the store with `..`.
    pub fn load(&self, name: &str, log: &dyn Log) -> String {
        if let Err(e) = validation::relative_path("template", Path::new(name)) {
            log.warn(&e.to_string());
            return String::new();
        }
        let path = self.dir.join(name);
        std::fs::read_to_string(&path).unwrap_or_else(|e| {
            log.warn(&format!("template not found: {} ({e})", path.display()));
            String::new()
        })
    }

    /// Names of all `*.html` fragments directly in the store, sorted.
    ///
    /// An absent directory lists as empty.
    #[must_use]
    pub fn list(&self) -> Vec<String> {
        let Ok(entries) = std::fs::read_dir(&self.dir) else {
            return Vec::new();
        };
        let mut names: Vec<String> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file()
                    && path
                        .extension()
                        .is_some_and(|ext| ext == FRAGMENT_EXTENSION)
            })
            .filter_map(|path| path.file_name()?.to_str().map(String::from))
            .collect();
        names.sort();
        names
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::logging::MemoryLog;

    #[test]
    fn load_refuses_names_outside_the_store() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("src/templates")).unwrap();
        std::fs::write(dir.path().join("secret.txt"), "private").unwrap();
        let log = MemoryLog::default();
        let store = TemplateStore::new(dir.path().join("src/templates"));

        assert_eq!(store.load("../../secret.txt", &log), "");

        let warnings = log.warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("must not contain '..'"), "{warnings:?}");
    }

    #[test]
    fn load_reads_fragment() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("hero.html"), "<h1>{{profile.name}}</h1>").unwrap();
        let log = MemoryLog::default();

        let text = TemplateStore::new(dir.path()).load("hero.html", &log);

        assert_eq!(text, "<h1>{{profile.name}}</h1>");
        assert!(log.warnings().is_empty());
    }

    #[test]
    fn load_missing_fragment_is_empty_with_warning() {
        let dir = tempfile::tempdir().unwrap();
        let log = MemoryLog::default();

        let text = TemplateStore::new(dir.path()).load("nope.html", &log);

        assert!(text.is_empty());
        assert_eq!(log.warnings().len(), 1);
        assert!(log.warnings().iter().any(|w| w.contains("nope.html")));
    }

    #[test]
    fn list_returns_sorted_html_files_only() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["skills.html", "about.html", "notes.txt"] {
            std::fs::write(dir.path().join(name), "").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested.html")).unwrap();

        let names = TemplateStore::new(dir.path()).list();

        assert_eq!(names, vec!["about.html", "skills.html"]);
    }

    #[test]
    fn list_of_missing_directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(TemplateStore::new(dir.path().join("absent")).list().is_empty());
    }
}
