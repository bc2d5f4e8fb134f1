//! Tree-walking evaluator.
//!
//! Loop iterations do not copy the enclosing context. Each iteration pushes a
//! [`Scope`] frame that shadows its parent, which gives the same lookups as
//! merging the item's keys over a copy of the enclosing context.
use serde_json::Value;

use super::diagnostics::Diagnostic;
use super::parser::{Node, VarPath};
use super::resolve::{descend, is_truthy, to_text};

/// Key bound to the raw current item inside a sequence loop.
const THIS: &str = "this";
/// Second name for the whole entry inside a categorized-mapping loop.
const CATEGORY: &str = "category";

#[derive(Debug, Clone, Copy)]
enum Frame<'a> {
    /// The context passed to `render`.
    Root(&'a Value),
    /// One element of a list: `this`, then the element's own keys.
    Item(&'a Value),
    /// One `{ title, items, … }` entry of a mapping: `this` and `category`,
    /// then the entry's keys.
    Category(&'a Value),
}

/// A chain of lookup frames, innermost first.
#[derive(Debug, Clone, Copy)]
pub(super) struct Scope<'a> {
    frame: Frame<'a>,
    parent: Option<&'a Scope<'a>>,
}

impl<'a> Scope<'a> {
    pub(super) const fn root(context: &'a Value) -> Self {
        Self {
            frame: Frame::Root(context),
            parent: None,
        }
    }

    const fn nested(parent: &'a Scope<'a>, frame: Frame<'a>) -> Self {
        Self {
            frame,
            parent: Some(parent),
        }
    }

    fn lookup(&self, key: &str) -> Option<&'a Value> {
        let local = match self.frame {
            Frame::Root(context) => context.as_object().and_then(|map| map.get(key)),
            Frame::Item(item) if key == THIS => Some(item),
            Frame::Category(entry) if key == THIS || key == CATEGORY => Some(entry),
            Frame::Item(value) | Frame::Category(value) => {
                value.as_object().and_then(|map| map.get(key))
            }
        };
        local.or_else(|| self.parent.and_then(|parent| parent.lookup(key)))
    }

    fn resolve(&self, path: &VarPath) -> Option<&'a Value> {
        let mut segments = path.segments();
        let head = self.lookup(segments.next()?)?;
        descend(head, segments)
    }
}

/// A mapping entry with both `title` and `items` keys.
fn is_category(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|map| map.contains_key("title") && map.contains_key("items"))
}

/// Accumulates output and, when asked, diagnostics.
#[derive(Debug, Default)]
pub(super) struct Renderer {
    out: String,
    diagnostics: Option<Vec<Diagnostic>>,
}

impl Renderer {
    pub(super) fn new(collect_diagnostics: bool) -> Self {
        Self {
            out: String::new(),
            diagnostics: collect_diagnostics.then(Vec::new),
        }
    }

    pub(super) fn finish(self) -> (String, Vec<Diagnostic>) {
        (self.out, self.diagnostics.unwrap_or_default())
    }

    fn report(&mut self, diagnostic: Diagnostic) {
        if let Some(diagnostics) = &mut self.diagnostics
            && !diagnostics.contains(&diagnostic)
        {
            diagnostics.push(diagnostic);
        }
    }

    pub(super) fn render(&mut self, nodes: &[Node], scope: &Scope<'_>) {
        for node in nodes {
            match node {
                Node::Text(text) => self.out.push_str(text),
                Node::Placeholder { path, line } => {
                    let value = scope.resolve(path);
                    if value.is_none() {
                        self.report(Diagnostic::UnresolvedPath {
                            path: path.as_str().to_string(),
                            line: *line,
                        });
                    }
                    self.out.push_str(&to_text(value));
                }
                Node::If { path, body, .. } => {
                    if is_truthy(scope.resolve(path)) {
                        self.render(body, scope);
                    }
                }
                Node::Each { path, body, line } => self.render_each(path, body, *line, scope),
            }
        }
    }

    fn render_each(&mut self, path: &VarPath, body: &[Node], line: usize, scope: &Scope<'_>) {
        match scope.resolve(path) {
            Some(Value::Array(items)) => {
                for item in items {
                    self.render(body, &Scope::nested(scope, Frame::Item(item)));
                }
            }
            Some(Value::Object(entries)) => {
                for entry in entries.values().filter(|v| is_category(v)) {
                    self.render(body, &Scope::nested(scope, Frame::Category(entry)));
                }
            }
            Some(Value::Null) => {}
            Some(_) => self.report(Diagnostic::NotIterable {
                path: path.as_str().to_string(),
                line,
            }),
            None => self.report(Diagnostic::UnresolvedPath {
                path: path.as_str().to_string(),
                line,
            }),
        }
    }
}
