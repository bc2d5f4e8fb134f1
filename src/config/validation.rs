//! Checks applied to every configured path after deserialization.
use std::path::{Component, Path, PathBuf};

use crate::error::ConfigError;

/// Require `value` to be a non-empty relative path that stays inside its base.
///
/// Rejects absolute paths, root or prefix components, and `..` segments.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidValue`] naming `key` when the path is not
/// acceptable.
pub fn relative_path(key: &str, value: &Path) -> Result<(), ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidValue {
        key: key.to_string(),
        reason: format!("{reason}: '{}'", value.display()),
    };

    if value.as_os_str().is_empty() {
        return Err(invalid("must not be empty"));
    }
    if value.is_absolute() {
        return Err(invalid("must be a relative path"));
    }
    for component in value.components() {
        match component {
            Component::ParentDir => return Err(invalid("must not contain '..'")),
            Component::RootDir | Component::Prefix(_) => {
                return Err(invalid("must be a relative path"));
            }
            Component::CurDir | Component::Normal(_) => {}
        }
    }
    Ok(())
}

/// Apply [`relative_path`] to every entry of a list key, reporting the index.
///
/// # Errors
///
/// Returns the first [`ConfigError::InvalidValue`] found.
pub fn relative_paths<P: AsRef<Path>>(key: &str, values: &[P]) -> Result<(), ConfigError> {
    values
        .iter()
        .enumerate()
        .try_for_each(|(i, value)| relative_path(&format!("{key}[{i}]"), value.as_ref()))
}

/// `value` without its `.` components.
fn normalized(value: &Path) -> PathBuf {
    value
        .components()
        .filter(|component| !matches!(component, Component::CurDir))
        .collect()
}

/// Require the output directory to be a subdirectory of the project that
/// does not hold the sources.
///
/// `--clean` removes the whole output directory, so it must differ from the
/// project root and must not equal or contain `src_dir`. Both paths are
/// expected to have passed [`relative_path`] already.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidValue`] naming `key` otherwise.
pub fn output_dir(key: &str, out_dir: &Path, src_dir: &Path) -> Result<(), ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidValue {
        key: key.to_string(),
        reason: format!("{reason}: '{}'", out_dir.display()),
    };

    let out = normalized(out_dir);
    if out.as_os_str().is_empty() {
        return Err(invalid("must not be the project root"));
    }
    if normalized(src_dir).starts_with(&out) {
        return Err(invalid("must not contain src_dir"));
    }
    Ok(())
}
