//! Warnings collected while parsing or rendering a template.
use std::fmt;

use thiserror::Error;

use super::parser::MAX_DEPTH;

/// The two block directives of the template language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    /// `{{#each path}} … {{/each}}`
    Each,
    /// `{{#if path}} … {{/if}}`
    If,
}

impl BlockKind {
    /// The keyword used in the open and close tags.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Each => "each",
            Self::If => "if",
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A problem found in a template.
///
/// None of these stop rendering; they are what the silent default mode
/// swallows and what [`render_with_diagnostics`](super::render_with_diagnostics)
/// reports. Lines are 1-based and refer to the tag that caused the warning.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// An open tag without its matching close tag. The tag is kept as text.
    #[error("line {line}: {{{{#{kind} {path}}}}} is never closed")]
    UnclosedBlock {
        /// Directive kind.
        kind: BlockKind,
        /// Path named by the open tag.
        path: String,
        /// Line of the open tag.
        line: usize,
    },

    /// A close tag with no open block of the same kind. The tag is kept as text.
    #[error("line {line}: {{{{/{kind}}}}} has no matching open tag")]
    UnmatchedClose {
        /// Directive kind.
        kind: BlockKind,
        /// Line of the close tag.
        line: usize,
    },

    /// A placeholder or loop path that resolved to nothing.
    #[error("line {line}: `{path}` does not resolve to a value")]
    UnresolvedPath {
        /// The dotted path as written.
        path: String,
        /// Line of the tag.
        line: usize,
    },

    /// An open tag past the nesting limit. It and its close tag are kept as
    /// text.
    #[error("line {line}: {{{{#{kind}}}}} nests deeper than {} blocks", MAX_DEPTH)]
    TooDeep {
        /// Directive kind of the first refused open tag.
        kind: BlockKind,
        /// Line of that tag.
        line: usize,
    },

    /// A loop over a scalar value.
    #[error("line {line}: `{path}` is not a list or mapping and cannot be iterated")]
    NotIterable {
        /// The dotted path as written.
        path: String,
        /// Line of the tag.
        line: usize,
    },
}

impl Diagnostic {
    /// Line of the tag that produced this diagnostic.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::UnclosedBlock { line, .. }
            | Self::UnmatchedClose { line, .. }
            | Self::TooDeep { line, .. }
            | Self::UnresolvedPath { line, .. }
            | Self::NotIterable { line, .. } => *line,
        }
    }
}
