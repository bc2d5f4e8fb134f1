//! Page assembly: splicing rendered sections into an HTML shell.
//!
//! A shell references fragments with comment markers such as
//! `<!-- TEMPLATE: hero.html -->`. Assembly is plain string splicing and
//! knows nothing about the template language.
use std::collections::HashMap;

const COMMENT_OPEN: &str = "<!--";
const COMMENT_CLOSE: &str = "-->";
const MARKER_PREFIX: &str = "TEMPLATE:";

/// One marker occurrence: its byte span in the shell and the fragment name.
#[derive(Debug)]
struct Marker<'a> {
    start: usize,
    end: usize,
    name: &'a str,
}

/// Fragment name if a comment body is a template marker.
fn marker_name(body: &str) -> Option<&str> {
    let name = body.trim().strip_prefix(MARKER_PREFIX)?.trim();
    (!name.is_empty() && !name.contains(char::is_whitespace)).then_some(name)
}

/// Marker occurrences in `shell`, left to right.
fn markers(shell: &str) -> impl Iterator<Item = Marker<'_>> {
    let mut offset = 0;
    std::iter::from_fn(move || {
        loop {
            let start = offset + shell.get(offset..)?.find(COMMENT_OPEN)?;
            let body_start = start + COMMENT_OPEN.len();
            let body_len = shell.get(body_start..)?.find(COMMENT_CLOSE)?;
            let end = body_start + body_len + COMMENT_CLOSE.len();
            offset = end;
            if let Some(name) = shell.get(body_start..body_start + body_len).and_then(marker_name)
            {
                return Some(Marker { start, end, name });
            }
        }
    })
}

/// Distinct fragment names referenced by `shell`, in order of first appearance.
///
/// # Examples
///
/// ```
/// use portfolio_cli::site::find_markers;
///
/// let shell = "<!-- TEMPLATE: a.html --><!-- note --><!-- TEMPLATE: b.html --><!-- TEMPLATE: a.html -->";
/// assert_eq!(find_markers(shell), vec!["a.html", "b.html"]);
/// ```
#[must_use]
pub fn find_markers(shell: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for marker in markers(shell) {
        if !names.iter().any(|n| n == marker.name) {
            names.push(marker.name.to_string());
        }
    }
    names
}

/// Replace every marker in `shell` with its section from `sections`.
///
/// One left-to-right pass: markers without a section stay as written, and
/// inserted text is never scanned for further markers.
#[must_use]
pub fn assemble<S: std::hash::BuildHasher>(
    shell: &str,
    sections: &HashMap<String, String, S>,
) -> String {
    let mut out = String::with_capacity(shell.len());
    let mut copied = 0;
    for marker in markers(shell) {
        if let Some(section) = sections.get(marker.name) {
            out.push_str(shell.get(copied..marker.start).unwrap_or_default());
            out.push_str(section);
            copied = marker.end;
        }
    }
    out.push_str(shell.get(copied..).unwrap_or_default());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sections(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn marker_name_tolerates_spacing() {
        assert_eq!(marker_name(" TEMPLATE: hero.html "), Some("hero.html"));
        assert_eq!(marker_name("TEMPLATE:hero.html"), Some("hero.html"));
        assert_eq!(marker_name(" TEMPLATE: "), None);
        assert_eq!(marker_name(" TEMPLATE: a b "), None);
        assert_eq!(marker_name(" just a comment "), None);
    }

    #[test]
    fn find_markers_skips_plain_comments_and_duplicates() {
        let shell = "<!-- TEMPLATE: a.html -->\n<!-- layout -->\n<!-- TEMPLATE: b.html -->\n<!-- TEMPLATE: a.html -->";
        assert_eq!(find_markers(shell), vec!["a.html", "b.html"]);
    }

    #[test]
    fn unterminated_comment_ends_scan() {
        assert!(find_markers("<!-- TEMPLATE: a.html").is_empty());
    }

    #[test]
    fn assemble_replaces_every_occurrence() {
        let shell = "<main><!-- TEMPLATE: a.html -->|<!-- TEMPLATE: a.html --></main>";
        let out = assemble(shell, &sections(&[("a.html", "A")]));
        assert_eq!(out, "<main>A|A</main>");
    }

    #[test]
    fn assemble_leaves_unknown_markers() {
        let shell = "<!-- TEMPLATE: a.html --><!-- TEMPLATE: missing.html -->";
        let out = assemble(shell, &sections(&[("a.html", "A")]));
        assert_eq!(out, "A<!-- TEMPLATE: missing.html -->");
    }

    #[test]
    fn assemble_does_not_rescan_inserted_text() {
        let shell = "<!-- TEMPLATE: a.html -->";
        let out = assemble(
            shell,
            &sections(&[("a.html", "<!-- TEMPLATE: b.html -->"), ("b.html", "B")]),
        );
        assert_eq!(out, "<!-- TEMPLATE: b.html -->");
    }

    #[test]
    fn assemble_without_markers_is_identity() {
        let shell = "<p>static <!-- comment --> page</p>";
        assert_eq!(assemble(shell, &sections(&[])), shell);
    }
}
