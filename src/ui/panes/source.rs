//! Source code pane rendering with token-based highlighting
//!
//! When the lexical phase has passed, every line is colored from the real
//! token spans: bytes covered by a token take the style of its kind, and the
//! remaining non-blank bytes can only be comment text.  Before that (or after
//! a lexical error) the source is shown plain, with the offending line marked.

use super::utils::{clamp_scroll, pane_block};
use crate::parser::lexer::{Token, TokenKind};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

fn token_style(kind: TokenKind) -> Style {
    match kind {
        TokenKind::Keyword => Style::default()
            .fg(DEFAULT_THEME.type_name)
            .add_modifier(Modifier::BOLD),
        TokenKind::Boolean => Style::default().fg(DEFAULT_THEME.keyword),
        TokenKind::String | TokenKind::Char => Style::default().fg(DEFAULT_THEME.string),
        TokenKind::Number => Style::default().fg(DEFAULT_THEME.number),
        TokenKind::Operator => Style::default().fg(DEFAULT_THEME.primary),
        TokenKind::Identifier | TokenKind::Punctuation => Style::default().fg(DEFAULT_THEME.fg),
    }
}

/// Split one source line into styled spans using the tokens that fall on it.
///
/// `line_start` is the byte offset of the line in the whole source.
fn highlight_line<'a>(line: &'a str, line_start: usize, tokens: &[Token]) -> Vec<Span<'a>> {
    let line_end = line_start + line.len();
    let gap_style = Style::default().fg(DEFAULT_THEME.comment);

    let mut spans = Vec::new();
    let mut cursor = line_start;

    // Tokens never contain a newline, so each lies entirely on one line.
    let first = tokens.partition_point(|t| t.end <= line_start);
    for token in tokens[first..].iter().take_while(|t| t.start < line_end) {
        if token.start > cursor {
            spans.push(Span::styled(
                &line[cursor - line_start..token.start - line_start],
                gap_style,
            ));
        }
        spans.push(Span::styled(
            &line[token.start - line_start..token.end - line_start],
            token_style(token.kind),
        ));
        cursor = token.end;
    }

    if cursor < line_end {
        spans.push(Span::styled(&line[cursor - line_start..], gap_style));
    }

    spans
}

/// Render the source code pane
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    source_code: &str,
    tokens: Option<&[Token]>,
    error_line: Option<usize>,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(" Source Code ", is_focused);

    // (byte offset, text) of every line; `split('\n')` keeps offsets exact.
    let mut offset = 0;
    let lines: Vec<(usize, &str)> = source_code
        .split('\n')
        .map(|line| {
            let start = offset;
            offset += line.len() + 1;
            (start, line.strip_suffix('\r').unwrap_or(line))
        })
        .collect();

    let visible_height = clamp_scroll(area, lines.len(), scroll_offset);

    let visible_lines: Vec<Line> = lines
        .iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(idx, (start, line))| {
            let line_num = idx + 1;
            let is_error = error_line == Some(line_num);

            let num_style = if is_error {
                Style::default()
                    .fg(DEFAULT_THEME.error)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.comment)
            };

            let mut content = match tokens {
                Some(tokens) => highlight_line(line, *start, tokens),
                None => vec![Span::styled(*line, Style::default().fg(DEFAULT_THEME.fg))],
            };

            if is_error {
                // ERROR LINE: white text on red for visibility
                for span in &mut content {
                    span.style = Style::default()
                        .bg(DEFAULT_THEME.error)
                        .fg(ratatui::style::Color::White)
                        .add_modifier(Modifier::BOLD);
                }
            }

            let mut spans = vec![Span::styled(format!("{:4} ", line_num), num_style)];
            spans.extend(content);
            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}
