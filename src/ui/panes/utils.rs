//! Helpers shared by every pane: framed blocks and scroll clamping.

use crate::pipeline::PhaseOutcome;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders},
};

/// Bordered block whose border lights up when the pane has focus.
pub(crate) fn pane_block(title: &str, is_focused: bool) -> Block<'_> {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style)
}

/// Clamp `scroll_offset` so the last page stays full, and return the number of
/// rows that fit inside the borders of `area`.
pub(crate) fn clamp_scroll(area: Rect, total_items: usize, scroll_offset: &mut usize) -> usize {
    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders, min 1

    if total_items > visible_height {
        let max_scroll = total_items - visible_height;
        *scroll_offset = (*scroll_offset).min(max_scroll);
    } else {
        *scroll_offset = 0;
    }

    visible_height
}

/// Line shown in a pane whose phase has not produced output.
pub(crate) fn placeholder_line(outcome: &PhaseOutcome, hint: &str) -> Line<'static> {
    match outcome {
        PhaseOutcome::Error(message) => {
            Line::styled(message.clone(), Style::default().fg(DEFAULT_THEME.error))
        }
        _ => Line::styled(hint.to_string(), Style::default().fg(DEFAULT_THEME.comment)),
    }
}
