//! Preview rendering and cache

use crate::theme::Theme;
use notpad_core::{markdown, StyleSink, StyleTag, ThemeVariant};
use ratatui::text::{Line, Span};

/// Key for render cache
#[derive(Hash, PartialEq, Eq, Clone, Debug)]
pub struct RenderKey {
    pub doc_rev: u64,
    pub theme: ThemeVariant,
}

/// A [`StyleSink`] producing ratatui lines
pub struct LineSink<'t> {
    theme: &'t Theme,
    lines: Vec<Line<'static>>,
    current: Vec<Span<'static>>,
}

impl<'t> LineSink<'t> {
    pub fn new(theme: &'t Theme) -> Self {
        Self {
            theme,
            lines: Vec::new(),
            current: Vec::new(),
        }
    }

    pub fn finish(mut self) -> Vec<Line<'static>> {
        if !self.current.is_empty() {
            let spans = std::mem::take(&mut self.current);
            self.lines.push(Line::from(spans));
        }
        self.lines
    }
}

impl StyleSink for LineSink<'_> {
    fn push_span(&mut self, text: &str, tag: StyleTag) {
        let style = self.theme.style_for(tag);
        for (i, segment) in text.split('\n').enumerate() {
            if i > 0 {
                let spans = std::mem::take(&mut self.current);
                self.lines.push(Line::from(spans).style(self.theme.base));
            }
            if !segment.is_empty() {
                self.current.push(Span::styled(segment.to_string(), style));
            }
        }
    }
}

/// Render markdown content into styled lines
pub fn render_lines(content: &str, theme: &Theme) -> Vec<Line<'static>> {
    let mut sink = LineSink::new(theme);
    markdown::render_into(content, &mut sink);
    sink.finish()
}

/// LRU cache for rendered previews
pub struct PreviewCache {
    cache: lru::LruCache<RenderKey, Vec<Line<'static>>>,
}

impl PreviewCache {
    pub fn new() -> Self {
        Self {
            cache: lru::LruCache::new(std::num::NonZeroUsize::new(8).unwrap()),
        }
    }

    pub fn get(&mut self, key: &RenderKey) -> Option<&Vec<Line<'static>>> {
        self.cache.get(key)
    }

    pub fn put(&mut self, key: RenderKey, lines: Vec<Line<'static>>) {
        self.cache.put(key, lines);
    }
}

impl Default for PreviewCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_render_lines_splits_on_newlines() {
        let theme = Theme::dark();
        let lines = render_lines("# Title\n\n- a\n*i* text\n", &theme);
        let texts: Vec<String> = lines.iter().map(line_text).collect();
        assert_eq!(texts, vec!["Title", "", "• a", "i text"]);
    }

    #[test]
    fn test_styles_follow_tags() {
        let theme = Theme::light();
        let lines = render_lines("**b** plain\n", &theme);
        assert_eq!(lines[0].spans[0].style, theme.style_for(StyleTag::Bold));
        assert_eq!(lines[0].spans[1].style, theme.base);
    }

    #[test]
    fn test_code_block_lines() {
        let theme = Theme::dark();
        let lines = render_lines("```\none\ntwo\n```\n", &theme);
        let texts: Vec<String> = lines.iter().map(line_text).collect();
        // Leading spacer, two code lines, trailing spacer
        assert_eq!(texts, vec!["", "one", "two", ""]);
        assert_eq!(lines[1].spans[0].style, theme.code);
    }

    #[test]
    fn test_cache_roundtrip() {
        let theme = Theme::dark();
        let mut cache = PreviewCache::new();
        let key = RenderKey {
            doc_rev: 3,
            theme: ThemeVariant::Dark,
        };
        assert!(cache.get(&key).is_none());

        cache.put(key.clone(), render_lines("x", &theme));
        assert_eq!(cache.get(&key).map(|l| l.len()), Some(1));

        let other = RenderKey {
            doc_rev: 3,
            theme: ThemeVariant::Light,
        };
        assert!(cache.get(&other).is_none());
    }
}
