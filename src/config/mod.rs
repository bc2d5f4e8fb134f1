//! Project configuration: the optional `site.toml` at the project root.
pub mod toml_loader;
pub mod validation;

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Name of the configuration file looked up in the project root.
pub const CONFIG_FILE: &str = "site.toml";

/// Raw contents of `site.toml`, with every key optional.
///
/// Paths are kept exactly as written; [`SiteConfig::from_settings`] validates
/// and resolves them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteSettings {
    /// Source directory, relative to the project root.
    pub src_dir: PathBuf,
    /// Output directory, relative to the project root.
    pub out_dir: PathBuf,
    /// Template fragments directory, relative to `src_dir`.
    pub templates_dir: PathBuf,
    /// JSON data directory, relative to `src_dir`.
    pub data_dir: PathBuf,
    /// Data file stems; each `<name>.json` becomes the context key `<name>`.
    pub data_files: Vec<String>,
    /// Directories copied verbatim into the output, relative to `src_dir`.
    pub copy_dirs: Vec<PathBuf>,
    /// Single files copied verbatim into the output, relative to `src_dir`.
    pub copy_files: Vec<PathBuf>,
    /// Pages to assemble.
    pub pages: Vec<PageConfig>,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            src_dir: PathBuf::from("src"),
            out_dir: PathBuf::from("dist"),
            templates_dir: PathBuf::from("templates"),
            data_dir: PathBuf::from("data"),
            data_files: ["profile", "experience", "skills", "contact", "meta", "pages"]
                .into_iter()
                .map(String::from)
                .collect(),
            copy_dirs: ["css", "js", "assets"].into_iter().map(PathBuf::from).collect(),
            copy_files: Vec::new(),
            pages: vec![PageConfig::default()],
        }
    }
}

/// One `[[pages]]` entry: a shell HTML file and where its assembled result goes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PageConfig {
    /// Shell file, relative to `src_dir`.
    pub shell: PathBuf,
    /// Output file, relative to `out_dir`; defaults to the shell's path.
    #[serde(default)]
    pub output: Option<PathBuf>,
}

impl PageConfig {
    /// Output path relative to `out_dir`.
    #[must_use]
    pub fn output_path(&self) -> &Path {
        self.output.as_deref().unwrap_or(&self.shell)
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            shell: PathBuf::from("index.html"),
            output: None,
        }
    }
}

/// Validated configuration with every directory resolved against the root.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Project root.
    pub root: PathBuf,
    /// Absolute source directory.
    pub src_dir: PathBuf,
    /// Absolute output directory.
    pub out_dir: PathBuf,
    /// Absolute template fragments directory.
    pub templates_dir: PathBuf,
    /// Absolute JSON data directory.
    pub data_dir: PathBuf,
    /// Data file stems.
    pub data_files: Vec<String>,
    /// Directories to copy, relative to both `src_dir` and `out_dir`.
    pub copy_dirs: Vec<PathBuf>,
    /// Files to copy, relative to both `src_dir` and `out_dir`.
    pub copy_files: Vec<PathBuf>,
    /// Pages to assemble.
    pub pages: Vec<PageConfig>,
}

impl SiteConfig {
    /// Load `site.toml` from `root`, falling back to defaults if it is absent.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file cannot be read or parsed, or if
    /// any configured path is empty, absolute, or escapes its base directory.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let settings: SiteSettings = toml_loader::load_config(&root.join(CONFIG_FILE))?;
        Self::from_settings(root, settings)
    }

    /// Validate `settings` and resolve its directories against `root`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for the first unacceptable path.
    pub fn from_settings(root: &Path, settings: SiteSettings) -> Result<Self, ConfigError> {
        validation::relative_path("src_dir", &settings.src_dir)?;
        validation::relative_path("out_dir", &settings.out_dir)?;
        validation::output_dir("out_dir", &settings.out_dir, &settings.src_dir)?;
        validation::relative_path("templates_dir", &settings.templates_dir)?;
        validation::relative_path("data_dir", &settings.data_dir)?;
        validation::relative_paths("data_files", &settings.data_files)?;
        validation::relative_paths("copy_dirs", &settings.copy_dirs)?;
        validation::relative_paths("copy_files", &settings.copy_files)?;
        for (i, page) in settings.pages.iter().enumerate() {
            validation::relative_path(&format!("pages[{i}].shell"), &page.shell)?;
            validation::relative_path(&format!("pages[{i}].output"), page.output_path())?;
        }

        let src_dir = root.join(&settings.src_dir);
        Ok(Self {
            root: root.to_path_buf(),
            out_dir: root.join(&settings.out_dir),
            templates_dir: src_dir.join(&settings.templates_dir),
            data_dir: src_dir.join(&settings.data_dir),
            src_dir,
            data_files: settings.data_files,
            copy_dirs: settings.copy_dirs,
            copy_files: settings.copy_files,
            pages: settings.pages,
        })
    }
}
