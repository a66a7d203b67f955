//! Syntax tree pane
//!
//! Draws the tree's `tag` / `label` view as an indented outline:
//!
//! ```text
//! Program
//! └ VariableDeclaration
//!   ├ Type: int
//!   ├ Identifier: x
//!   └ Expression: 5
//! ```

use super::utils::{clamp_scroll, pane_block, placeholder_line};
use crate::parser::ast::{AstNode, NodeTag, TreeView};
use crate::pipeline::PhaseOutcome;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Build the outline rows: tree-drawing prefix, tag, optional label.
fn outline_rows<'a>(view: &'a TreeView<'a>) -> Vec<Line<'a>> {
    let mut rows = Vec::new();
    push_rows(view, String::new(), None, &mut rows);
    rows
}

fn push_rows<'a>(
    node: &'a TreeView<'a>,
    prefix: String,
    is_last: Option<bool>,
    rows: &mut Vec<Line<'a>>,
) {
    let branch = match is_last {
        None => "",
        Some(true) => "└ ",
        Some(false) => "├ ",
    };

    let tag_style = match node.tag {
        NodeTag::Program | NodeTag::VariableDeclaration => Style::default()
            .fg(DEFAULT_THEME.primary)
            .add_modifier(Modifier::BOLD),
        NodeTag::Empty => Style::default().fg(DEFAULT_THEME.comment),
        _ => Style::default().fg(DEFAULT_THEME.type_name),
    };

    let mut spans = vec![
        Span::styled(
            format!("{}{}", prefix, branch),
            Style::default().fg(DEFAULT_THEME.comment),
        ),
        Span::styled(node.tag.to_string(), tag_style),
    ];
    if let Some(label) = node.label {
        spans.push(Span::styled(": ", Style::default().fg(DEFAULT_THEME.fg)));
        spans.push(Span::styled(label, Style::default().fg(DEFAULT_THEME.string)));
    }
    rows.push(Line::from(spans));

    let child_prefix = match is_last {
        None => prefix,
        Some(true) => format!("{}  ", prefix),
        Some(false) => format!("{}│ ", prefix),
    };
    let count = node.children.len();
    for (i, child) in node.children.iter().enumerate() {
        push_rows(child, child_prefix.clone(), Some(i + 1 == count), rows);
    }
}

/// Render the syntax tree pane
pub fn render_tree_pane(
    frame: &mut Frame,
    area: Rect,
    ast: Option<&AstNode>,
    outcome: &PhaseOutcome,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(" Syntax Tree ", is_focused);

    let Some(ast) = ast else {
        let line = placeholder_line(outcome, "(press p to run the syntax phase)");
        frame.render_widget(Paragraph::new(line).block(block), area);
        return;
    };

    let view = ast.view();
    let rows = outline_rows(&view);
    let visible_height = clamp_scroll(area, rows.len(), scroll_offset);

    let visible: Vec<Line> = rows
        .into_iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .collect();

    frame.render_widget(Paragraph::new(visible).block(block), area);
}
