//! Mustache-style template engine.
//!
//! The language has three constructs:
//!
//! - `{{path}}`: substitute the value at a dotted path (`this` is the current
//!   loop item)
//! - `{{#if path}} … {{/if}}`: keep the body when the value is truthy
//! - `{{#each path}} … {{/each}}`: repeat the body for every list element, or
//!   for every `{ title, items }` entry of a mapping
//!
//! Templates are parsed once into a [`Node`] tree and evaluated against a
//! [`serde_json::Value`] context. Rendering never fails: unknown paths render
//! as empty text and malformed tags are copied through. Use
//! [`render_with_diagnostics`] to see what was swallowed.
//!
//! # Examples
//!
//! ```
//! use portfolio_cli::engine;
//! use serde_json::json;
//!
//! let ctx = json!({ "skills": { "lang": { "title": "Languages", "items": ["Go", "Rust"] } } });
//! let out = engine::render(
//!     "{{#each skills}}{{title}}:{{#each items}}{{this}},{{/each}}{{/each}}",
//!     &ctx,
//! );
//! assert_eq!(out, "Languages:Go,Rust,");
//! ```
mod diagnostics;
mod eval;
mod parser;
mod resolve;

pub use diagnostics::{BlockKind, Diagnostic};
pub use parser::{Node, VarPath};
pub use resolve::{is_truthy, resolve, to_text};

use serde_json::Value;

use eval::{Renderer, Scope};

/// A parsed template, reusable across contexts and threads.
#[derive(Debug, Clone)]
pub struct Template {
    nodes: Vec<Node>,
    diagnostics: Vec<Diagnostic>,
}

/// Output of a render together with everything the silent mode would hide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    /// The rendered text, identical to what [`render`] returns.
    pub output: String,
    /// Structural diagnostics from parsing followed by those from evaluation.
    pub diagnostics: Vec<Diagnostic>,
}

impl Rendered {
    /// `true` when no diagnostics were produced.
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

impl Template {
    /// Parse template source. Never fails.
    #[must_use]
    pub fn parse(source: &str) -> Self {
        let (nodes, diagnostics) = parser::parse(source);
        Self { nodes, diagnostics }
    }

    /// The parsed node tree.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Structural diagnostics found while parsing.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Render against a context.
    #[must_use]
    pub fn render(&self, context: &Value) -> String {
        let mut renderer = Renderer::new(false);
        renderer.render(&self.nodes, &Scope::root(context));
        renderer.finish().0
    }

    /// Render against a context, collecting diagnostics.
    #[must_use]
    pub fn render_with_diagnostics(&self, context: &Value) -> Rendered {
        let mut renderer = Renderer::new(true);
        renderer.render(&self.nodes, &Scope::root(context));
        let (output, evaluated) = renderer.finish();
        let mut diagnostics = self.diagnostics.clone();
        diagnostics.extend(evaluated);
        Rendered {
            output,
            diagnostics,
        }
    }
}

/// Parse and render `template` against `context`.
///
/// The same inputs always give the same output and `context` is never
/// modified.
#[must_use]
pub fn render(template: &str, context: &Value) -> String {
    Template::parse(template).render(context)
}

/// Parse and render `template`, also returning diagnostics.
///
/// # Examples
///
/// ```
/// use portfolio_cli::engine::{self, Diagnostic};
/// use serde_json::json;
///
/// let rendered = engine::render_with_diagnostics("Hi {{user.name}}", &json!({}));
/// assert_eq!(rendered.output, "Hi ");
/// assert_eq!(
///     rendered.diagnostics,
///     [Diagnostic::UnresolvedPath { path: "user.name".to_string(), line: 1 }]
/// );
/// ```
#[must_use]
pub fn render_with_diagnostics(template: &str, context: &Value) -> Rendered {
    Template::parse(template).render_with_diagnostics(context)
}
