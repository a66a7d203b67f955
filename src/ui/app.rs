//! Main TUI application state and logic

use crate::pipeline::{Analysis, Phase};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Tokens,
    Tree,
    Findings,
}

impl FocusedPane {
    /// Move focus to the next pane (clockwise: source -> tokens -> findings -> tree)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Tokens,
            FocusedPane::Tokens => FocusedPane::Findings,
            FocusedPane::Findings => FocusedPane::Tree,
            FocusedPane::Tree => FocusedPane::Source,
        }
    }

    /// Move focus to the previous pane (counter-clockwise)
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Tree,
            FocusedPane::Tokens => FocusedPane::Source,
            FocusedPane::Findings => FocusedPane::Tokens,
            FocusedPane::Tree => FocusedPane::Findings,
        }
    }
}

/// The main application state
pub struct App {
    /// File the source was loaded from, re-read on reload
    pub path: PathBuf,

    /// The source text being analyzed
    pub source_code: String,

    /// Phase outcomes and artifacts so far
    pub analysis: Analysis,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub source_scroll: usize,
    pub tokens_scroll: usize,
    pub tree_scroll: usize,
    pub findings_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
}

impl App {
    /// Create a new app for the given file and its contents. No phase has run yet.
    pub fn new(path: PathBuf, source_code: String) -> Self {
        App {
            path,
            source_code,
            analysis: Analysis::new(),
            focused_pane: FocusedPane::Source,
            source_scroll: 0,
            tokens_scroll: 0,
            tree_scroll: 0,
            findings_scroll: 0,
            should_quit: false,
            status_message: String::from("Ready! Press l to start the lexical phase"),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // 4 panes in 2 columns, plus status bar at bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let pane_area = main_chunks[0];
        let status_area = main_chunks[1];

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(pane_area);

        // Left column: Source (top) | Tokens (bottom)
        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(columns[0]);

        // Right column: Tree (top) | Findings (bottom)
        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(columns[1]);

        let analysis = &self.analysis;

        super::panes::render_source_pane(
            frame,
            left_rows[0],
            &self.source_code,
            analysis.tokens.as_deref(),
            analysis.lex_error.as_ref().map(|e| e.line()),
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        super::panes::render_tokens_pane(
            frame,
            left_rows[1],
            analysis.tokens.as_deref(),
            analysis.outcome(Phase::Lexical),
            self.focused_pane == FocusedPane::Tokens,
            &mut self.tokens_scroll,
        );

        super::panes::render_tree_pane(
            frame,
            right_rows[0],
            analysis.ast.as_ref(),
            analysis.outcome(Phase::Syntax),
            self.focused_pane == FocusedPane::Tree,
            &mut self.tree_scroll,
        );

        super::panes::render_findings_pane(
            frame,
            right_rows[1],
            analysis.findings.as_deref(),
            analysis.outcome(Phase::Semantic),
            self.focused_pane == FocusedPane::Findings,
            &mut self.findings_scroll,
        );

        super::panes::render_status_bar(frame, status_area, &self.status_message, analysis);
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('l') => self.run_phase(Phase::Lexical),
            KeyCode::Char('p') => self.run_phase(Phase::Syntax),
            KeyCode::Char('c') => self.run_phase(Phase::Semantic),
            KeyCode::Char('a') => self.run_all(),
            KeyCode::Char('r') => self.reload(),
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Up => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_sub(1);
            }
            KeyCode::Down => {
                // Clamped against the content length on the next render
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_add(1);
            }
            _ => {}
        }
    }

    fn focused_scroll(&mut self) -> &mut usize {
        match self.focused_pane {
            FocusedPane::Source => &mut self.source_scroll,
            FocusedPane::Tokens => &mut self.tokens_scroll,
            FocusedPane::Tree => &mut self.tree_scroll,
            FocusedPane::Findings => &mut self.findings_scroll,
        }
    }

    /// Run one phase if its predecessor passed, otherwise explain why not
    fn run_phase(&mut self, phase: Phase) {
        match self.analysis.run(phase, &self.source_code) {
            Ok(outcome) => {
                self.status_message = format!("{} phase: {}", phase, outcome.label());
            }
            Err(blocked) => {
                self.status_message = format!("Cannot run: {}", blocked);
            }
        }

        match phase {
            Phase::Lexical => {
                self.tokens_scroll = 0;
                self.tree_scroll = 0;
                self.findings_scroll = 0;
            }
            Phase::Syntax => {
                self.tree_scroll = 0;
                self.findings_scroll = 0;
            }
            Phase::Semantic => self.findings_scroll = 0,
        }
    }

    /// Run every phase in order, stopping at the first that does not pass
    fn run_all(&mut self) {
        for phase in Phase::ALL {
            self.run_phase(phase);
            if !self.analysis.outcome(phase).is_pass() {
                return;
            }
        }
        self.status_message = "All phases passed".to_string();
    }

    /// Re-read the file from disk and discard every phase result
    fn reload(&mut self) {
        match fs::read_to_string(&self.path) {
            Ok(source) => {
                self.source_code = source;
                self.analysis = Analysis::new();
                self.source_scroll = 0;
                self.tokens_scroll = 0;
                self.tree_scroll = 0;
                self.findings_scroll = 0;
                self.status_message = format!("Reloaded {}", self.path.display());
            }
            Err(e) => {
                log::warn!("reload of {} failed: {}", self.path.display(), e);
                self.status_message = format!("Cannot reload {}: {}", self.path.display(), e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use crate::pipeline::PhaseOutcome;

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn app_for(source: &str) -> App {
        App::new(PathBuf::from("test.decl"), source.to_string())
    }

    #[test]
    fn test_phase_keys_are_gated() {
        let mut app = app_for("int x = 5;");

        press(&mut app, KeyCode::Char('c'));
        assert_eq!(app.analysis.outcome(Phase::Semantic), &PhaseOutcome::Skipped);
        assert!(app.status_message.starts_with("Cannot run"));

        press(&mut app, KeyCode::Char('l'));
        press(&mut app, KeyCode::Char('p'));
        press(&mut app, KeyCode::Char('c'));
        assert!(app.analysis.is_clean());
    }

    #[test]
    fn test_run_all_stops_at_failure() {
        let mut app = app_for("integer x = 5;");
        press(&mut app, KeyCode::Char('a'));
        assert!(app.analysis.outcome(Phase::Lexical).is_pass());
        assert!(matches!(
            app.analysis.outcome(Phase::Syntax),
            PhaseOutcome::Error(_)
        ));
        assert_eq!(app.status_message, "syntax phase: ERROR");
    }

    #[test]
    fn test_focus_cycles() {
        let mut app = app_for("");
        for _ in 0..4 {
            press(&mut app, KeyCode::Tab);
        }
        assert_eq!(app.focused_pane, FocusedPane::Source);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.focused_pane, FocusedPane::Tree);
    }

    #[test]
    fn test_reload_missing_file_keeps_source() {
        let mut app = App::new(
            PathBuf::from("/nonexistent/declcheck/missing.decl"),
            "int x = 5;".to_string(),
        );
        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.source_code, "int x = 5;");
        assert!(app.status_message.starts_with("Cannot reload"));
    }
}
