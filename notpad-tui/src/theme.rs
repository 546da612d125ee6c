//! Theme system for light/dark modes

use notpad_core::{StyleTag, ThemeVariant};
use ratatui::style::{Color, Modifier, Style};

/// Theme definition
#[derive(Clone, Debug)]
pub struct Theme {
    pub base: Style,
    pub heading: [Style; 3],
    pub code: Style,
    pub quote: Style,
    pub bullet: Style,
    pub border: Color,
    pub border_focused: Color,
    pub selection: Style,
    pub scrollbar_thumb: Color,
    pub scrollbar_track: Color,
    pub status_bar_fg: Color,
    pub status_bar_bg: Color,
    pub message: Style,
}

impl Theme {
    /// Create a theme for the given variant
    pub fn for_variant(variant: ThemeVariant) -> Self {
        match variant {
            ThemeVariant::Dark => Self::dark(),
            ThemeVariant::Light => Self::light(),
        }
    }

    /// Presentation of a rendered markdown span
    pub fn style_for(&self, tag: StyleTag) -> Style {
        match tag {
            StyleTag::Heading1 => self.heading[0],
            StyleTag::Heading2 => self.heading[1],
            StyleTag::Heading3 => self.heading[2],
            StyleTag::Bold => self.base.add_modifier(Modifier::BOLD),
            StyleTag::Italic => self.base.add_modifier(Modifier::ITALIC),
            StyleTag::InlineCode | StyleTag::CodeBlock => self.code,
            StyleTag::Bullet => self.bullet,
            StyleTag::Quote => self.quote,
            StyleTag::Plain => self.base,
        }
    }

    /// Dark theme
    pub fn dark() -> Self {
        let bg = Color::Rgb(30, 30, 30);
        Self {
            base: Style::default().fg(Color::Rgb(212, 212, 212)).bg(bg),
            heading: [
                Style::default()
                    .fg(Color::LightBlue)
                    .bg(bg)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
                Style::default()
                    .fg(Color::LightCyan)
                    .bg(bg)
                    .add_modifier(Modifier::BOLD),
                Style::default()
                    .fg(Color::LightGreen)
                    .bg(bg)
                    .add_modifier(Modifier::BOLD),
            ],
            code: Style::default()
                .fg(Color::Rgb(220, 220, 170))
                .bg(Color::Rgb(45, 45, 45)),
            quote: Style::default()
                .fg(Color::Rgb(136, 136, 136))
                .bg(bg)
                .add_modifier(Modifier::ITALIC),
            bullet: Style::default().fg(Color::Rgb(212, 212, 212)).bg(bg),
            border: Color::Rgb(90, 90, 90),
            border_focused: Color::Rgb(225, 137, 68),
            selection: Style::default()
                .fg(Color::Black)
                .bg(Color::Rgb(225, 137, 68)),
            scrollbar_thumb: Color::Rgb(90, 90, 90),
            scrollbar_track: Color::Rgb(42, 42, 42),
            status_bar_fg: Color::Rgb(212, 212, 212),
            status_bar_bg: Color::Rgb(45, 45, 45),
            message: Style::default()
                .fg(Color::LightYellow)
                .bg(Color::Rgb(45, 45, 45))
                .add_modifier(Modifier::BOLD),
        }
    }

    /// Light theme (default)
    pub fn light() -> Self {
        let bg = Color::Rgb(255, 255, 255);
        Self {
            base: Style::default().fg(Color::Black).bg(bg),
            heading: [
                Style::default()
                    .fg(Color::Blue)
                    .bg(bg)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
                Style::default()
                    .fg(Color::Cyan)
                    .bg(bg)
                    .add_modifier(Modifier::BOLD),
                Style::default()
                    .fg(Color::Green)
                    .bg(bg)
                    .add_modifier(Modifier::BOLD),
            ],
            code: Style::default()
                .fg(Color::Rgb(150, 75, 0)) // Orange-brown
                .bg(Color::Rgb(245, 245, 245)),
            quote: Style::default()
                .fg(Color::Rgb(136, 136, 136))
                .bg(bg)
                .add_modifier(Modifier::ITALIC),
            bullet: Style::default().fg(Color::Black).bg(bg),
            border: Color::Rgb(208, 208, 208),
            border_focused: Color::Rgb(0, 120, 215),
            selection: Style::default()
                .fg(Color::White)
                .bg(Color::Rgb(0, 120, 215)),
            scrollbar_thumb: Color::Rgb(208, 208, 208),
            scrollbar_track: Color::Rgb(224, 224, 224),
            status_bar_fg: Color::Black,
            status_bar_bg: Color::Rgb(240, 240, 240),
            message: Style::default()
                .fg(Color::Rgb(0, 90, 160))
                .bg(Color::Rgb(240, 240, 240))
                .add_modifier(Modifier::BOLD),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_tag_has_a_style() {
        let theme = Theme::dark();
        for tag in StyleTag::ALL {
            let style = theme.style_for(tag);
            assert!(style.fg.is_some(), "{} has no foreground", tag);
        }
    }

    #[test]
    fn test_emphasis_modifiers() {
        let theme = Theme::light();
        assert!(theme
            .style_for(StyleTag::Bold)
            .add_modifier
            .contains(Modifier::BOLD));
        assert!(theme
            .style_for(StyleTag::Italic)
            .add_modifier
            .contains(Modifier::ITALIC));
        assert_eq!(theme.style_for(StyleTag::CodeBlock), theme.code);
    }

    #[test]
    fn test_variants_differ() {
        assert_ne!(
            Theme::for_variant(ThemeVariant::Dark).base,
            Theme::for_variant(ThemeVariant::Light).base
        );
    }
}
