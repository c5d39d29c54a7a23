//! Main TUI application state and logic

use crate::error::CompileError;
use crate::parser::ast::SourceLocation;
use crate::pipeline::{compile_detailed, ensure_not_empty, Compilation, CompileOptions};
use crate::ui::panes::{self, CodeView, Syntax};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::path::PathBuf;
use tracing::debug;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Output,
    Tokens,
}

impl FocusedPane {
    /// Move focus to the next pane (source -> output -> tokens)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Output,
            FocusedPane::Output => FocusedPane::Tokens,
            FocusedPane::Tokens => FocusedPane::Source,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Tokens,
            FocusedPane::Output => FocusedPane::Source,
            FocusedPane::Tokens => FocusedPane::Output,
        }
    }
}

/// The main application state
pub struct App {
    /// File the source was loaded from; `r` reloads it
    pub source_path: PathBuf,

    pub source: String,

    pub options: CompileOptions,

    /// Outcome of the last compilation
    pub result: Result<Compilation, CompileError>,

    /// Statement locations in pre-order
    statements: Vec<SourceLocation>,

    /// Index into `statements`
    pub selected: usize,

    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub source_scroll: usize,
    pub output_scroll: usize,
    pub tokens_scroll: usize,

    /// Scroll panes to the selection on the next frame
    reveal_selection: bool,

    pub should_quit: bool,

    pub status_message: String,
}

impl App {
    /// Create an app for `source` (already read from `source_path`) and compile it
    pub fn new(source_path: PathBuf, source: String, options: CompileOptions) -> Self {
        let mut app = App {
            source_path,
            source,
            options,
            result: Err(CompileError::EmptySource),
            statements: Vec::new(),
            selected: 0,
            focused_pane: FocusedPane::Source,
            source_scroll: 0,
            output_scroll: 0,
            tokens_scroll: 0,
            reveal_selection: true,
            should_quit: false,
            status_message: String::new(),
        };
        app.recompile();
        app
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key_event(key);
                }
            }
        }

        Ok(())
    }

    /// Compile `self.source`, keeping the selection when possible
    fn recompile(&mut self) {
        self.result = ensure_not_empty(&self.source)
            .and_then(|()| compile_detailed(&self.source, &self.options));

        match &self.result {
            Ok(compilation) => {
                self.statements = compilation
                    .program
                    .walk()
                    .into_iter()
                    .map(|stmt| stmt.location())
                    .collect();
                self.status_message = format!(
                    "Compiled {} statement(s) into {} line(s)",
                    self.statements.len(),
                    compilation.lines.len()
                );
            }
            Err(err) => {
                self.statements.clear();
                self.status_message = format!("{}: {}", err.label(), err);
            }
        }

        self.selected = self.selected.min(self.statements.len().saturating_sub(1));
        self.reveal_selection = true;
        debug!(statements = self.statements.len(), "viewer recompiled");
    }

    /// Re-read the source file and recompile
    fn reload(&mut self) {
        match CompileError::read_source(&self.source_path) {
            Ok(source) => {
                self.source = source;
                self.recompile();
            }
            Err(err) => {
                self.status_message = format!("{}: {}", err.label(), err);
            }
        }
    }

    pub fn total_statements(&self) -> usize {
        self.statements.len()
    }

    pub fn selected_location(&self) -> Option<SourceLocation> {
        self.statements.get(self.selected).copied()
    }

    /// 0-based source line of the selected statement
    pub fn selected_source_line(&self) -> Option<usize> {
        self.selected_location().map(|loc| loc.line.saturating_sub(1))
    }

    /// 0-based output lines generated by the selected statement
    pub fn selected_output_lines(&self) -> Vec<usize> {
        let (Ok(compilation), Some(location)) = (&self.result, self.selected_location()) else {
            return Vec::new();
        };

        compilation
            .lines
            .iter()
            .enumerate()
            .filter(|(_, line)| line.origin == Some(location))
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Index of the token that starts the selected statement
    pub fn selected_token(&self) -> Option<usize> {
        let compilation = self.result.as_ref().ok()?;
        let location = self.selected_location()?;
        compilation
            .tokens
            .iter()
            .position(|token| token.location == location)
    }

    /// 0-based source line of the compile error, if any
    pub fn error_line(&self) -> Option<usize> {
        let err = self.result.as_ref().err()?;
        err.location().map(|loc| loc.line.saturating_sub(1))
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Panes on top, status bar at the bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        // Code row (top) | Tokens (bottom)
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(main_chunks[0]);

        // Source (left) | Generated C++ (right)
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[0]);

        let reveal = std::mem::take(&mut self.reveal_selection);
        let source_line = self.selected_source_line();
        let error_line = self.error_line();

        panes::render_code_pane(
            frame,
            columns[0],
            CodeView {
                title: "VoltScript Source",
                lines: self.source.lines().collect(),
                syntax: Syntax::VoltScript,
                highlighted: source_line.into_iter().collect(),
                error_line,
                reveal: if reveal { error_line.or(source_line) } else { None },
            },
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        let output_lines = self.selected_output_lines();
        let selected_token = self.selected_token();

        match &self.result {
            Ok(compilation) => {
                panes::render_code_pane(
                    frame,
                    columns[1],
                    CodeView {
                        title: "Generated C++",
                        lines: compilation.lines.iter().map(|l| l.text.as_str()).collect(),
                        syntax: Syntax::Cpp,
                        reveal: if reveal { output_lines.first().copied() } else { None },
                        highlighted: output_lines,
                        error_line: None,
                    },
                    self.focused_pane == FocusedPane::Output,
                    &mut self.output_scroll,
                );

                panes::render_tokens_pane(
                    frame,
                    rows[1],
                    &compilation.tokens,
                    selected_token,
                    reveal,
                    self.focused_pane == FocusedPane::Tokens,
                    &mut self.tokens_scroll,
                );
            }
            Err(err) => {
                let message = format!("{}: {}", err.label(), err);
                panes::render_message_pane(
                    frame,
                    columns[1],
                    "Generated C++",
                    &message,
                    self.focused_pane == FocusedPane::Output,
                );
                panes::render_tokens_pane(
                    frame,
                    rows[1],
                    &[],
                    None,
                    false,
                    self.focused_pane == FocusedPane::Tokens,
                    &mut self.tokens_scroll,
                );
            }
        }

        panes::render_status_bar(
            frame,
            main_chunks[1],
            &self.status_message,
            self.selected,
            self.statements.len(),
            self.result.is_err(),
        );
    }

    fn focused_scroll(&mut self) -> &mut usize {
        match self.focused_pane {
            FocusedPane::Source => &mut self.source_scroll,
            FocusedPane::Output => &mut self.output_scroll,
            FocusedPane::Tokens => &mut self.tokens_scroll,
        }
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.reload();
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Left => self.select(self.selected.checked_sub(1)),
            KeyCode::Right => self.select(Some(self.selected + 1)),
            KeyCode::Home => self.select(Some(0)),
            KeyCode::End => self.select(self.statements.len().checked_sub(1)),
            KeyCode::Up => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_sub(1);
            }
            KeyCode::Down => {
                // Clamped to the content length at render time
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_add(1);
            }
            _ => {}
        }
    }

    /// Move the selection to `index` if it names a statement
    fn select(&mut self, index: Option<usize>) {
        match index.and_then(|i| self.statements.get(i).map(|loc| (i, *loc))) {
            Some((i, location)) => {
                self.selected = i;
                self.reveal_selection = true;
                self.status_message = format!("Statement at {location}");
            }
            None if self.statements.is_empty() => {
                self.status_message = "No statements to select".to_string();
            }
            None => {
                self.status_message = if index.is_none() {
                    "Already at first statement".to_string()
                } else {
                    "Already at last statement".to_string()
                };
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    const SOURCE: &str = "int x = 0;\nwhile (x < 3) {\n    x = x + 1;\n}\nprint(x);\n";

    fn app(source: &str) -> App {
        App::new(
            PathBuf::from("viewer_test.volt"),
            source.to_string(),
            CompileOptions::default(),
        )
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_statements_in_pre_order() {
        let mut app = app(SOURCE);
        assert_eq!(app.total_statements(), 4);

        let mut lines = vec![app.selected_location().map(|l| l.line)];
        for _ in 0..3 {
            press(&mut app, KeyCode::Right);
            lines.push(app.selected_location().map(|l| l.line));
        }
        assert_eq!(lines, vec![Some(1), Some(2), Some(3), Some(5)]);

        press(&mut app, KeyCode::Right);
        assert_eq!(app.selected, 3);
        assert_eq!(app.status_message, "Already at last statement");

        press(&mut app, KeyCode::Home);
        assert_eq!(app.selected, 0);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.status_message, "Already at first statement");
        press(&mut app, KeyCode::End);
        assert_eq!(app.selected, 3);
    }

    #[test]
    fn test_selection_maps_to_output_and_tokens() {
        let mut app = app(SOURCE);
        press(&mut app, KeyCode::Right);

        // while header and its closing brace; the body belongs to its own statement
        let output = app.selected_output_lines();
        assert_eq!(output.len(), 2);
        let compilation = app.result.as_ref().unwrap();
        assert_eq!(compilation.lines[output[0]].text, "    while ((x < 3)) {");

        let token = app.selected_token().unwrap();
        assert_eq!(compilation.tokens[token].text, "while");
        assert_eq!(app.selected_source_line(), Some(1));
    }

    #[test]
    fn test_compile_error_state() {
        let app = app("int x = 1;\nint 5y;\n");
        assert!(app.result.is_err());
        assert_eq!(app.total_statements(), 0);
        assert_eq!(app.error_line(), Some(1));
        assert!(app.status_message.starts_with("Syntax Error: Expected identifier"));
    }

    #[test]
    fn test_empty_source() {
        let app = app("   \n");
        assert!(matches!(app.result, Err(CompileError::EmptySource)));
        assert_eq!(app.status_message, "Error: No code provided");
        assert_eq!(app.error_line(), None);
    }

    #[test]
    fn test_focus_and_scroll() {
        let mut app = app(SOURCE);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focused_pane, FocusedPane::Output);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.output_scroll, 1);
        assert_eq!(app.source_scroll, 0);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.focused_pane, FocusedPane::Source);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_reload_reads_file() {
        let path = std::env::temp_dir().join(format!("voltc_reload_{}.volt", std::process::id()));
        std::fs::write(&path, "print(1);").unwrap();

        let mut app = App::new(path.clone(), "print(0);".to_string(), CompileOptions::default());
        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.source, "print(1);");
        assert!(app.result.as_ref().unwrap().output().contains("std::cout << 1 << std::endl;"));

        std::fs::remove_file(&path).unwrap();
        press(&mut app, KeyCode::Char('r'));
        assert!(app.status_message.starts_with("Error: File"));
        assert_eq!(app.source, "print(1);");
    }
}
