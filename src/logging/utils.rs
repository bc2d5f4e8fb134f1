//! Log file location, ANSI stripping, and timestamps.
use std::path::PathBuf;

/// Timestamp format of the log file header.
pub(super) const HEADER_TIME: &str = "%Y-%m-%d %H:%M:%S";
/// Timestamp format of each log file line.
pub(super) const LINE_TIME: &str = "%H:%M:%S";

/// Remove ANSI escape sequences so log file lines stay plain text.
///
/// A CSI sequence (`ESC [`) runs up to its final byte in `@`..=`~`; any other
/// escape drops just the byte after `ESC`.
pub(super) fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\x1b' {
            out.push(c);
        } else if chars.next() == Some('[') {
            chars.by_ref().find(|inner| ('@'..='~').contains(inner));
        }
    }
    out
}

/// `<cache>/portfolio/<command>.log`, where `<cache>` is `$XDG_CACHE_HOME`
/// or `~/.cache`.
///
/// Returns `None` when the directory cannot be created; the build then runs
/// without a log file.
pub(super) fn log_file_path(command: &str) -> Option<PathBuf> {
    let cache = std::env::var_os("XDG_CACHE_HOME").map_or_else(
        || {
            std::env::var_os("HOME")
                .or_else(|| std::env::var_os("USERPROFILE"))
                .map_or_else(|| PathBuf::from("."), PathBuf::from)
                .join(".cache")
        },
        PathBuf::from,
    );
    let dir = cache.join("portfolio");
    std::fs::create_dir_all(&dir).ok()?;
    Some(dir.join(format!("{command}.log")))
}

/// Current UTC time in `format`.
pub(super) fn utc_now(format: &str) -> String {
    chrono::Utc::now().format(format).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_ansi_leaves_summary_line_plain() {
        assert_eq!(
            strip_ansi("\x1b[32m✓ Render pages (1 written)\x1b[0m"),
            "✓ Render pages (1 written)"
        );
        assert_eq!(strip_ansi("<h1>{{profile.name}}</h1>"), "<h1>{{profile.name}}</h1>");
    }

    #[test]
    fn strip_ansi_drops_non_colour_escapes() {
        assert_eq!(strip_ansi("\x1b[2Kdone"), "done");
        assert_eq!(strip_ansi("a\x1bMb"), "ab");
        assert_eq!(strip_ansi("cut\x1b["), "cut");
    }

    #[test]
    fn log_file_is_named_after_command() {
        if let Some(path) = log_file_path("render") {
            assert!(path.ends_with("portfolio/render.log"));
        }
    }

    #[test]
    fn timestamps_follow_their_formats() {
        assert_eq!(utc_now(LINE_TIME).len(), "00:00:00".len());
        assert_eq!(utc_now(HEADER_TIME).len(), "2026-01-01 00:00:00".len());
    }
}
