//! Semantic findings pane

use super::utils::{clamp_scroll, pane_block, placeholder_line};
use crate::checker::findings::{Level, SemanticFinding};
use crate::pipeline::PhaseOutcome;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};

fn level_color(level: Level) -> Color {
    match level {
        Level::Info => DEFAULT_THEME.success,
        Level::Warn => DEFAULT_THEME.warning,
        Level::Error => DEFAULT_THEME.error,
    }
}

/// Render the semantic findings, in the order the checker produced them
pub fn render_findings_pane(
    frame: &mut Frame,
    area: Rect,
    findings: Option<&[SemanticFinding]>,
    outcome: &PhaseOutcome,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(" Findings ", is_focused);

    let Some(findings) = findings else {
        let line = placeholder_line(outcome, "(press c to run the semantic phase)");
        frame.render_widget(Paragraph::new(line).block(block), area);
        return;
    };

    let visible_height = clamp_scroll(area, findings.len(), scroll_offset);

    let items: Vec<ListItem> = findings
        .iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|finding| {
            let color = level_color(finding.level);
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!(" {:<5} ", finding.level.to_string().to_uppercase()),
                    Style::default()
                        .bg(color)
                        .fg(Color::Black)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(" "),
                Span::styled(finding.message.as_str(), Style::default().fg(color)),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
