//! UI rendering

use crate::app::{App, TAB_WIDTH};
use crate::dialogs::{Confirm, Dialog, SaveDialog};
use crate::theme::Theme;
use notpad_core::SaveChoice;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Margin, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap,
    },
    Frame,
};
use std::ops::Range;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Draw the UI
pub fn draw(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // Editor and preview
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    if app.show_preview {
        let panes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[0]);
        render_editor(frame, app, panes[0]);
        render_preview(frame, app, panes[1]);
    } else {
        render_editor(frame, app, chunks[0]);
    }

    render_status_bar(frame, app, chunks[1]);

    match &app.dialog {
        Some(Dialog::Save(dialog)) => render_save_dialog(frame, &app.theme, dialog),
        Some(Dialog::Confirm(confirm)) => render_confirm(frame, &app.theme, confirm),
        Some(Dialog::Prompt(_)) | None => {}
    }
}

/// Cells taken by `c` when it starts at display column `col`
fn char_width(c: char, col: usize) -> usize {
    if c == '\t' {
        TAB_WIDTH - col % TAB_WIDTH
    } else {
        c.width().unwrap_or(0)
    }
}

/// Display column of the char at `char_col`, tabs expanded
pub fn display_col(line: &str, char_col: usize) -> usize {
    line.chars()
        .take(char_col)
        .fold(0, |col, c| col + char_width(c, col))
}

/// Slice of `line` visible between display columns `h_scroll` and `h_scroll + width`
///
/// Chars whose index falls in `highlight` get the `selected` style.
fn visible_line(
    line: &str,
    h_scroll: usize,
    width: usize,
    highlight: Option<Range<usize>>,
    base: Style,
    selected: Style,
) -> Line<'static> {
    let mut spans = Vec::new();
    let mut buf = String::new();
    let mut buf_highlighted = false;
    let mut col = 0;
    let right = h_scroll + width;

    for (i, c) in line.chars().enumerate() {
        if c != '\t' && c.is_control() {
            continue;
        }
        let start = col;
        col += char_width(c, col);
        if col <= h_scroll {
            continue;
        }
        if start >= right {
            break;
        }

        let highlighted = highlight.as_ref().is_some_and(|r| r.contains(&i));
        if highlighted != buf_highlighted && !buf.is_empty() {
            let style = if buf_highlighted { selected } else { base };
            spans.push(Span::styled(std::mem::take(&mut buf), style));
        }
        buf_highlighted = highlighted;

        if c == '\t' || start < h_scroll || col > right {
            // Tabs and wide chars cut by the viewport edge become blanks
            let cells = col.min(right) - start.max(h_scroll);
            buf.extend(std::iter::repeat(' ').take(cells));
        } else {
            buf.push(c);
        }
    }

    if !buf.is_empty() {
        let style = if buf_highlighted { selected } else { base };
        spans.push(Span::styled(buf, style));
    }
    Line::from(spans)
}

fn render_scrollbar(frame: &mut Frame, theme: &Theme, area: Rect, content_len: usize, position: usize) {
    let visible = area.height.saturating_sub(2) as usize;
    if content_len <= visible {
        return;
    }

    let mut state = ScrollbarState::new(content_len.saturating_sub(visible)).position(position);
    let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .begin_symbol(None)
        .end_symbol(None)
        .thumb_style(Style::default().fg(theme.scrollbar_thumb))
        .track_style(Style::default().fg(theme.scrollbar_track));
    frame.render_stateful_widget(
        scrollbar,
        area.inner(Margin {
            vertical: 1,
            horizontal: 0,
        }),
        &mut state,
    );
}

fn render_editor(frame: &mut Frame, app: &mut App, area: Rect) {
    let marker = if app.doc.is_modified() { " [+]" } else { "" };
    let title = format!(" {}{} ", app.doc.status_label(), marker);
    let border = if app.dialog.is_none() {
        app.theme.border_focused
    } else {
        app.theme.border
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(border))
        .style(app.theme.base);
    let inner = block.inner(area);
    let width = inner.width as usize;
    let height = inner.height as usize;

    // Keep the cursor column inside the viewport
    let cursor_x = display_col(&app.doc.line(app.cursor.line), app.cursor.col);
    if cursor_x < app.h_scroll {
        app.h_scroll = cursor_x;
    } else if width > 0 && cursor_x >= app.h_scroll + width {
        app.h_scroll = cursor_x + 1 - width;
    }

    let line_count = app.doc.line_count();
    let end = (app.scroll + height).min(line_count);
    let lines: Vec<Line> = (app.scroll..end)
        .map(|idx| {
            let text = app.doc.line(idx);
            let line_start = app.doc.rope.line_to_char(idx);
            let highlight = app.last_hit.and_then(|(start, end)| {
                let line_end = line_start + text.chars().count();
                let from = start.max(line_start);
                let to = end.min(line_end);
                (from < to).then(|| from - line_start..to - line_start)
            });
            visible_line(
                &text,
                app.h_scroll,
                width,
                highlight,
                app.theme.base,
                app.theme.selection,
            )
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
    render_scrollbar(frame, &app.theme, area, line_count, app.scroll);

    let on_screen = app.cursor.line >= app.scroll && app.cursor.line < app.scroll + height;
    if app.dialog.is_none() && on_screen && width > 0 {
        frame.set_cursor_position(Position::new(
            inner.x + (cursor_x - app.h_scroll) as u16,
            inner.y + (app.cursor.line - app.scroll) as u16,
        ));
    }
}

fn render_preview(frame: &mut Frame, app: &mut App, area: Rect) {
    let lines = app.preview_lines();
    let total = lines.len();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Preview ")
        .border_style(Style::default().fg(app.theme.border))
        .style(app.theme.base);
    let scroll = app.preview_scroll.min(u16::MAX as usize) as u16;
    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(app.theme.base)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));

    frame.render_widget(paragraph, area);
    render_scrollbar(frame, &app.theme, area, total, app.preview_scroll);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let bar = Style::default()
        .fg(app.theme.status_bar_fg)
        .bg(app.theme.status_bar_bg);

    if let Some(Dialog::Prompt(prompt)) = &app.dialog {
        let label = format!(" {}: ", prompt.kind.label());
        let typed: String = prompt.input.chars().take(prompt.cursor).collect();
        let x = label.width() + typed.width();
        let line = Line::from(vec![
            Span::styled(label, bar.add_modifier(Modifier::BOLD)),
            Span::styled(prompt.input.clone(), bar),
        ]);
        frame.render_widget(Paragraph::new(line).style(bar), area);
        frame.set_cursor_position(Position::new(
            area.x + (x as u16).min(area.width.saturating_sub(1)),
            area.y,
        ));
        return;
    }

    let left = match &app.status_message {
        Some(message) => Span::styled(format!(" {}", message), app.theme.message),
        None => Span::styled(
            format!(" {}  {} lines", app.doc.title(), app.doc.line_count()),
            bar.add_modifier(Modifier::BOLD),
        ),
    };
    let right = Span::styled(
        format!(
            "Ln {}, Col {}  [{}] ",
            app.cursor.line + 1,
            app.cursor.col + 1,
            app.theme_variant.to_string().to_uppercase()
        ),
        bar,
    );
    let pad = (area.width as usize).saturating_sub(left.width() + right.width());

    let status = Paragraph::new(Line::from(vec![left, Span::styled(" ".repeat(pad), bar), right]))
        .style(bar);
    frame.render_widget(status, area);
}

/// Rect of the given size centred in `area`
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

fn dialog_block(theme: &Theme, title: &str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", title))
        .border_style(Style::default().fg(theme.border_focused))
        .style(theme.base)
}

fn render_save_dialog(frame: &mut Frame, theme: &Theme, dialog: &SaveDialog) {
    let area = centered_rect(46, SaveChoice::ALL.len() as u16 + 9, frame.area());
    frame.render_widget(Clear, area);

    let mut lines = vec![Line::from("")];
    for (i, choice) in SaveChoice::ALL.iter().enumerate() {
        let style = if i == dialog.selected_index {
            theme.selection
        } else {
            theme.base
        };
        lines.push(Line::from(Span::styled(
            format!(" {}. {} ", i + 1, choice.label()),
            style,
        )));
    }
    lines.push(Line::from(""));

    let check = if dialog.add_separator { "[x]" } else { "[ ]" };
    lines.push(Line::from(Span::styled(
        format!(" {} Separator line (space)", check),
        theme.base,
    )));
    lines.push(Line::from(Span::styled(
        format!("     Date: {} (d)", dialog.date_label()),
        theme.base,
    )));
    let text_style = if dialog.editing_text {
        theme.selection
    } else {
        theme.base
    };
    lines.push(Line::from(vec![
        Span::styled("     Text: ", theme.base),
        Span::styled(format!("{}_", dialog.separator_text), text_style),
        Span::styled(" (tab)", theme.base),
    ]));

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(" Enter: select  Esc: cancel", theme.quote)));

    let paragraph = Paragraph::new(lines).block(dialog_block(theme, "Save"));
    frame.render_widget(paragraph, area);
}

fn render_confirm(frame: &mut Frame, theme: &Theme, confirm: &Confirm) {
    let width = (confirm.message.width() as u16 + 6).clamp(30, 70);
    let area = centered_rect(width, 7, frame.area());
    frame.render_widget(Clear, area);

    let button = |label: &'static str, focused: bool| {
        let style = if focused {
            theme.selection.add_modifier(Modifier::BOLD)
        } else {
            theme.base
        };
        Span::styled(label, style)
    };
    let lines = vec![
        Line::from(""),
        Line::from(confirm.message.clone()),
        Line::from(""),
        Line::from(vec![
            button("[ Yes ]", confirm.yes_focused),
            Span::styled("   ", theme.base),
            button("[ No ]", !confirm.yes_focused),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .block(dialog_block(theme, &confirm.title))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}
