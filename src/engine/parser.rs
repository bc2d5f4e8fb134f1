//! Single-pass tokenizer and depth-matching parser for template text.
//!
//! The source is scanned once for `{{ … }}` tags. Block tags are matched with
//! a stack, so nested `each`/`if` blocks close in the right place. Anything
//! the parser cannot make sense of is kept verbatim as text and reported as a
//! [`Diagnostic`].
use super::diagnostics::{BlockKind, Diagnostic};

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Most blocks that may be open at once. Deeper open tags are kept as text.
pub(super) const MAX_DEPTH: usize = 256;

/// A dotted lookup path as written in a tag, e.g. `profile.name` or `this`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarPath(String);

impl VarPath {
    /// Wrap a raw path.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The path exactly as written (trimmed).
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Dot-separated segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }
}

/// One node of a parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Literal text, copied to the output unchanged.
    Text(String),
    /// `{{path}}`
    Placeholder {
        /// Path to substitute.
        path: VarPath,
        /// Line of the tag.
        line: usize,
    },
    /// `{{#each path}} body {{/each}}`
    Each {
        /// Path of the list or mapping to iterate.
        path: VarPath,
        /// Nodes rendered once per iteration.
        body: Vec<Self>,
        /// Line of the open tag.
        line: usize,
    },
    /// `{{#if path}} body {{/if}}`
    If {
        /// Path tested for truthiness.
        path: VarPath,
        /// Nodes rendered when the path is truthy.
        body: Vec<Self>,
        /// Line of the open tag.
        line: usize,
    },
}

/// What a single `{{ … }}` tag means.
#[derive(Debug, PartialEq, Eq)]
enum Tag<'a> {
    Open(BlockKind, &'a str),
    Close(BlockKind),
    Placeholder(&'a str),
    Literal,
}

fn classify(inner: &str) -> Tag<'_> {
    let inner = inner.trim();
    if let Some(rest) = inner.strip_prefix('#') {
        return match rest.split_once(char::is_whitespace) {
            Some((keyword, path)) if !path.trim().is_empty() => match keyword {
                "each" => Tag::Open(BlockKind::Each, path.trim()),
                "if" => Tag::Open(BlockKind::If, path.trim()),
                _ => Tag::Literal,
            },
            _ => Tag::Literal,
        };
    }
    if let Some(rest) = inner.strip_prefix('/') {
        return match rest.trim() {
            "each" => Tag::Close(BlockKind::Each),
            "if" => Tag::Close(BlockKind::If),
            _ => Tag::Literal,
        };
    }
    if inner.is_empty() {
        Tag::Literal
    } else {
        Tag::Placeholder(inner)
    }
}

/// A block whose close tag has not been seen yet.
#[derive(Debug)]
struct OpenBlock {
    kind: BlockKind,
    path: String,
    /// Source text of the open tag, restored if the block is never closed.
    tag: String,
    line: usize,
    body: Vec<Node>,
}

impl OpenBlock {
    fn into_node(self) -> Node {
        let path = VarPath::new(self.path);
        match self.kind {
            BlockKind::Each => Node::Each {
                path,
                body: self.body,
                line: self.line,
            },
            BlockKind::If => Node::If {
                path,
                body: self.body,
                line: self.line,
            },
        }
    }

    /// Give up on this block: its open tag becomes text and its body stays
    /// in place as ordinary content.
    fn abandon(self, target: &mut Vec<Node>) -> Diagnostic {
        push_text(target, &self.tag);
        for node in self.body {
            match node {
                Node::Text(text) => push_text(target, &text),
                other => target.push(other),
            }
        }
        Diagnostic::UnclosedBlock {
            kind: self.kind,
            path: self.path,
            line: self.line,
        }
    }
}

/// Append text, merging with a preceding text node.
fn push_text(nodes: &mut Vec<Node>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(Node::Text(last)) = nodes.last_mut() {
        last.push_str(text);
    } else {
        nodes.push(Node::Text(text.to_string()));
    }
}

/// Parser state: the finished top-level nodes plus the stack of open blocks.
#[derive(Debug, Default)]
struct Parser {
    root: Vec<Node>,
    stack: Vec<OpenBlock>,
    /// Kinds of open tags refused past [`MAX_DEPTH`], innermost last.
    refused: Vec<BlockKind>,
    diagnostics: Vec<Diagnostic>,
}

impl Parser {
    fn current(&mut self) -> &mut Vec<Node> {
        match self.stack.last_mut() {
            Some(block) => &mut block.body,
            None => &mut self.root,
        }
    }

    /// Pop the innermost open block and abandon it into its parent.
    fn abandon_innermost(&mut self) {
        if let Some(block) = self.stack.pop() {
            let diagnostic = block.abandon(self.current());
            self.diagnostics.push(diagnostic);
        }
    }

    fn open(&mut self, kind: BlockKind, path: &str, tag: String, line: usize) {
        if self.stack.len() >= MAX_DEPTH {
            if self.refused.is_empty() {
                self.diagnostics.push(Diagnostic::TooDeep { kind, line });
            }
            self.refused.push(kind);
            push_text(self.current(), &tag);
            return;
        }
        self.stack.push(OpenBlock {
            kind,
            path: path.to_string(),
            tag,
            line,
            body: Vec::new(),
        });
    }

    fn close(&mut self, kind: BlockKind, tag: &str, line: usize) {
        if self.refused.last() == Some(&kind) {
            self.refused.pop();
            push_text(self.current(), tag);
            return;
        }
        let Some(depth) = self.stack.iter().rposition(|b| b.kind == kind) else {
            self.diagnostics
                .push(Diagnostic::UnmatchedClose { kind, line });
            push_text(self.current(), tag);
            return;
        };
        while self.stack.len() > depth + 1 {
            self.abandon_innermost();
        }
        self.refused.clear();
        if let Some(block) = self.stack.pop() {
            let node = block.into_node();
            self.current().push(node);
        }
    }

    fn finish(mut self) -> (Vec<Node>, Vec<Diagnostic>) {
        while !self.stack.is_empty() {
            self.abandon_innermost();
        }
        (self.root, self.diagnostics)
    }
}

/// Parse template source into a node tree.
///
/// Never fails. Structural problems (unclosed blocks, stray close tags,
/// nesting past [`MAX_DEPTH`]) are returned as diagnostics and the offending
/// tags are kept as text.
pub(super) fn parse(source: &str) -> (Vec<Node>, Vec<Diagnostic>) {
    let mut parser = Parser::default();
    let mut rest = source;
    let mut line = 1;

    while let Some((text, after_open)) = rest.split_once(OPEN) {
        let Some((inner, after_tag)) = after_open.split_once(CLOSE) else {
            break;
        };
        push_text(parser.current(), text);
        line += text.matches('\n').count();
        let tag_line = line;
        let tag = format!("{OPEN}{inner}{CLOSE}");
        line += inner.matches('\n').count();

        match classify(inner) {
            Tag::Open(kind, path) => parser.open(kind, path, tag, tag_line),
            Tag::Close(kind) => parser.close(kind, &tag, tag_line),
            Tag::Placeholder(path) => parser.current().push(Node::Placeholder {
                path: VarPath::new(path),
                line: tag_line,
            }),
            Tag::Literal => push_text(parser.current(), &tag),
        }
        rest = after_tag;
    }
    push_text(parser.current(), rest);

    parser.finish()
}
