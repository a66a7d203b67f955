//! Status bar rendering with phase badges and keybindings

use crate::pipeline::{Analysis, Phase, PhaseOutcome};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

fn badge_color(outcome: &PhaseOutcome) -> Color {
    match outcome {
        PhaseOutcome::Pass => DEFAULT_THEME.success,
        PhaseOutcome::Error(_) => DEFAULT_THEME.error,
        PhaseOutcome::Skipped => DEFAULT_THEME.comment,
    }
}

fn short_name(phase: Phase) -> &'static str {
    match phase {
        Phase::Lexical => "LEX",
        Phase::Syntax => "SYN",
        Phase::Semantic => "SEM",
    }
}

/// Render the status bar at the bottom.
///
/// Phase keys whose predecessor has not passed are drawn dimmed: pressing
/// them is refused.
pub fn render_status_bar(frame: &mut Frame, area: Rect, message: &str, analysis: &Analysis) {
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let bar_bg = DEFAULT_THEME.current_line_bg;
    let sep_style = Style::default().bg(bar_bg).fg(DEFAULT_THEME.comment);

    // Left side: one badge per phase, then the status message
    let mut left_spans = Vec::new();
    for phase in Phase::ALL {
        let outcome = analysis.outcome(phase);
        left_spans.push(Span::styled(
            format!(" {} {} ", short_name(phase), outcome.label()),
            Style::default()
                .bg(badge_color(outcome))
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ));
        left_spans.push(Span::styled(" ", sep_style));
    }
    left_spans.push(Span::styled("| ", sep_style));
    left_spans.push(Span::styled(
        format!("{} ", message),
        Style::default().bg(bar_bg).fg(DEFAULT_THEME.fg),
    ));

    let left_paragraph = Paragraph::new(Line::from(left_spans))
        .style(Style::default().bg(bar_bg))
        .alignment(Alignment::Left);
    frame.render_widget(left_paragraph, layout[0]);

    // Right side: keybinds, phase keys dimmed while gated
    let key_style = Style::default().bg(DEFAULT_THEME.comment).fg(Color::Black);
    let gated_key_style = Style::default().bg(bar_bg).fg(DEFAULT_THEME.comment);
    let desc_style = Style::default().bg(bar_bg).fg(DEFAULT_THEME.fg);

    let phase_key = |key: &'static str, phase: Phase| {
        if analysis.can_run(phase) {
            Span::styled(key, key_style)
        } else {
            Span::styled(key, gated_key_style.add_modifier(Modifier::CROSSED_OUT))
        }
    };

    let right_spans = vec![
        phase_key(" l ", Phase::Lexical),
        Span::styled(" lex ", desc_style),
        phase_key(" p ", Phase::Syntax),
        Span::styled(" parse ", desc_style),
        phase_key(" c ", Phase::Semantic),
        Span::styled(" check ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" a ", key_style),
        Span::styled(" all ", desc_style),
        Span::styled(" r ", key_style),
        Span::styled(" reload ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" ⇥ ", key_style),
        Span::styled(" focus ", desc_style),
        Span::styled(" q ", key_style),
        Span::styled(" quit ", desc_style),
    ];

    let right_paragraph = Paragraph::new(Line::from(right_spans))
        .style(Style::default().bg(bar_bg))
        .alignment(Alignment::Right);
    frame.render_widget(right_paragraph, layout[1]);
}
