//! Token list pane

use super::utils::{clamp_scroll, pane_block, placeholder_line};
use crate::parser::lexer::Token;
use crate::pipeline::PhaseOutcome;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};

/// Render the tokens produced by the lexical phase, one per row
pub fn render_tokens_pane(
    frame: &mut Frame,
    area: Rect,
    tokens: Option<&[Token]>,
    outcome: &PhaseOutcome,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(" Tokens ", is_focused);

    let Some(tokens) = tokens else {
        let line = placeholder_line(outcome, "(press l to run the lexical phase)");
        frame.render_widget(Paragraph::new(line).block(block), area);
        return;
    };

    if tokens.is_empty() {
        let paragraph = Paragraph::new("(no tokens)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let visible_height = clamp_scroll(area, tokens.len(), scroll_offset);

    let items: Vec<ListItem> = tokens
        .iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(idx, token)| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:3} ", idx),
                    Style::default().fg(DEFAULT_THEME.comment),
                ),
                Span::styled(
                    format!("{:<12}", token.kind.to_string()),
                    Style::default().fg(DEFAULT_THEME.type_name),
                ),
                Span::styled(
                    format!("{:<16}", token.lexeme),
                    Style::default().fg(DEFAULT_THEME.fg),
                ),
                Span::styled(
                    format!("{}..{}", token.start, token.end),
                    Style::default().fg(DEFAULT_THEME.comment),
                ),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
