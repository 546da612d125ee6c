//! Markdown line renderer
//!
//! A single forward pass over the document's lines. Each line is classified as
//! fenced code, heading, bullet, quote or paragraph, and paragraph lines are
//! split further into inline spans. The renderer only emits abstract
//! [`StyleTag`]s: turning a tag into fonts or colors is up to whatever
//! [`StyleSink`] consumes the spans.
//!
//! There is no AST and no nesting. Delimiters are matched non-greedily and never
//! escaped, so `2 * 3 * 4` renders ` 3 ` in italics.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// `**bold**`, `*italic*` or `` `code` ``, leftmost match wins
static INLINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*\*.*?\*\*|\*.*?\*|`.*?`").expect("Invalid inline markdown regex")
});

const FENCE: &str = "```";
const BULLET_GLYPH: &str = "• ";

/// Presentation role of a rendered span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleTag {
    Heading1,
    Heading2,
    Heading3,
    Bold,
    Italic,
    InlineCode,
    CodeBlock,
    Bullet,
    Quote,
    Plain,
}

impl StyleTag {
    pub const ALL: [StyleTag; 10] = [
        StyleTag::Heading1,
        StyleTag::Heading2,
        StyleTag::Heading3,
        StyleTag::Bold,
        StyleTag::Italic,
        StyleTag::InlineCode,
        StyleTag::CodeBlock,
        StyleTag::Bullet,
        StyleTag::Quote,
        StyleTag::Plain,
    ];

    /// Stable name used by sinks that key styles by string
    pub fn name(self) -> &'static str {
        match self {
            StyleTag::Heading1 => "heading1",
            StyleTag::Heading2 => "heading2",
            StyleTag::Heading3 => "heading3",
            StyleTag::Bold => "bold",
            StyleTag::Italic => "italic",
            StyleTag::InlineCode => "inlineCode",
            StyleTag::CodeBlock => "codeBlock",
            StyleTag::Bullet => "bullet",
            StyleTag::Quote => "quote",
            StyleTag::Plain => "plain",
        }
    }
}

impl fmt::Display for StyleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A contiguous run of text paired with one tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedSpan {
    pub text: String,
    pub tag: StyleTag,
}

impl RenderedSpan {
    pub fn new(text: impl Into<String>, tag: StyleTag) -> Self {
        Self {
            text: text.into(),
            tag,
        }
    }
}

/// Anything that can append styled spans in order
pub trait StyleSink {
    fn push_span(&mut self, text: &str, tag: StyleTag);
}

impl StyleSink for Vec<RenderedSpan> {
    fn push_span(&mut self, text: &str, tag: StyleTag) {
        self.push(RenderedSpan::new(text, tag));
    }
}

/// Render content into an ordered list of spans
pub fn render(content: &str) -> Vec<RenderedSpan> {
    let mut spans = Vec::new();
    render_into(content, &mut spans);
    spans
}

/// Render content, streaming each span into `sink`
pub fn render_into<S: StyleSink + ?Sized>(content: &str, sink: &mut S) {
    // A trailing newline terminates the last line, it does not open a new one
    let lines: Vec<&str> = content.split_terminator('\n').collect();
    let mut i = 0;

    while i < lines.len() {
        if is_fence(lines[i]) {
            sink.push_span("\n", StyleTag::Plain);
            i += 1;

            let start = i;
            while i < lines.len() && !is_fence(lines[i]) {
                i += 1;
            }
            if i > start {
                let mut code = lines[start..i].join("\n");
                code.push('\n');
                sink.push_span(&code, StyleTag::CodeBlock);
            }
            sink.push_span("\n", StyleTag::Plain);

            // Step over the closing fence (or past the end if unterminated)
            i += 1;
            continue;
        }

        render_line(lines[i], sink);
        i += 1;
    }
}

fn is_fence(line: &str) -> bool {
    line.trim().starts_with(FENCE)
}

fn heading(line: &str) -> Option<(StyleTag, &str)> {
    if let Some(rest) = line.strip_prefix("# ") {
        Some((StyleTag::Heading1, rest))
    } else if let Some(rest) = line.strip_prefix("## ") {
        Some((StyleTag::Heading2, rest))
    } else {
        line.strip_prefix("### ")
            .map(|rest| (StyleTag::Heading3, rest))
    }
}

fn render_line<S: StyleSink + ?Sized>(line: &str, sink: &mut S) {
    if let Some((tag, rest)) = heading(line) {
        sink.push_span(&format!("{rest}\n"), tag);
        return;
    }

    let trimmed = line.trim();
    if let Some(rest) = trimmed
        .strip_prefix("- ")
        .or_else(|| trimmed.strip_prefix("* "))
    {
        sink.push_span(&format!("{BULLET_GLYPH}{rest}\n"), StyleTag::Bullet);
    } else if let Some(rest) = line.strip_prefix("> ") {
        sink.push_span(&format!("{rest}\n"), StyleTag::Quote);
    } else {
        split_inline(&format!("{line}\n"), sink);
    }
}

/// Split one line into plain text and `**bold**` / `*italic*` / `` `code` `` runs
pub fn split_inline<S: StyleSink + ?Sized>(text: &str, sink: &mut S) {
    let mut last = 0;

    for m in INLINE_RE.find_iter(text) {
        if m.start() > last {
            sink.push_span(&text[last..m.start()], StyleTag::Plain);
        }
        let (inner, tag) = classify_fragment(m.as_str());
        sink.push_span(inner, tag);
        last = m.end();
    }

    if last < text.len() {
        sink.push_span(&text[last..], StyleTag::Plain);
    }
}

fn classify_fragment(fragment: &str) -> (&str, StyleTag) {
    let len = fragment.len();

    if fragment.starts_with("**") && fragment.ends_with("**") {
        // `**` on its own is an empty bold run
        let inner = fragment.get(2..len.saturating_sub(2)).unwrap_or("");
        (inner, StyleTag::Bold)
    } else if len >= 2 && fragment.starts_with('*') && fragment.ends_with('*') {
        (&fragment[1..len - 1], StyleTag::Italic)
    } else if len >= 2 && fragment.starts_with('`') && fragment.ends_with('`') {
        (&fragment[1..len - 1], StyleTag::InlineCode)
    } else {
        (fragment, StyleTag::Plain)
    }
}
