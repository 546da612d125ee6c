//! HTML export of rendered markdown

use crate::markdown::{self, StyleSink, StyleTag};

/// A [`StyleSink`] that writes an HTML body fragment
#[derive(Debug, Default)]
pub struct HtmlSink {
    out: String,
    in_list: bool,
}

impl HtmlSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Close any open list and return the accumulated HTML
    pub fn finish(mut self) -> String {
        self.close_list();
        self.out
    }

    fn close_list(&mut self) {
        if self.in_list {
            self.out.push_str("</ul>\n");
            self.in_list = false;
        }
    }

    fn push_block(&mut self, element: &str, text: &str) {
        self.out.push('<');
        self.out.push_str(element);
        self.out.push('>');
        self.out.push_str(&escape(text.trim_end_matches('\n')));
        self.out.push_str("</");
        self.out.push_str(element);
        self.out.push_str(">\n");
    }

    fn push_inline(&mut self, element: &str, text: &str) {
        self.out.push_str(&format!("<{element}>{}</{element}>", escape(text)));
    }
}

impl StyleSink for HtmlSink {
    fn push_span(&mut self, text: &str, tag: StyleTag) {
        if tag != StyleTag::Bullet {
            self.close_list();
        }

        match tag {
            StyleTag::Heading1 => self.push_block("h1", text),
            StyleTag::Heading2 => self.push_block("h2", text),
            StyleTag::Heading3 => self.push_block("h3", text),
            StyleTag::Quote => self.push_block("blockquote", text),
            StyleTag::Bullet => {
                if !self.in_list {
                    self.out.push_str("<ul>\n");
                    self.in_list = true;
                }
                let item = text.strip_prefix("• ").unwrap_or(text);
                self.push_block("li", item);
            }
            StyleTag::CodeBlock => {
                self.out.push_str("<pre><code>");
                self.out.push_str(&escape(text));
                self.out.push_str("</code></pre>\n");
            }
            StyleTag::Bold => self.push_inline("strong", text),
            StyleTag::Italic => self.push_inline("em", text),
            StyleTag::InlineCode => self.push_inline("code", text),
            StyleTag::Plain => {
                self.out.push_str(&escape(text).replace('\n', "<br>\n"));
            }
        }
    }
}

/// Escape text for inclusion in HTML element content or attributes
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Render markdown content to an HTML body fragment
pub fn to_html(content: &str) -> String {
    let mut sink = HtmlSink::new();
    markdown::render_into(content, &mut sink);
    sink.finish()
}

/// Render markdown content to a standalone HTML page
pub fn to_html_document(title: &str, content: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n{}</body>\n</html>\n",
        escape(title),
        to_html(content)
    )
}
