//! Code pane rendering with syntax highlighting
//!
//! Used for both the VoltScript source and the generated C++. Each pane shows
//! line numbers, highlights the lines belonging to the selected statement and
//! can mark a single line as the error line.
//!
//! Highlighting uses a small character-level scanner per line rather than the
//! real lexer, so half-typed or invalid source still renders.

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Which keyword table to highlight with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Syntax {
    VoltScript,
    Cpp,
}

impl Syntax {
    fn word_style(self, word: &str, is_function: bool) -> Style {
        let is_type = match self {
            Syntax::VoltScript => matches!(word, "int" | "float" | "string" | "bool" | "void"),
            Syntax::Cpp => matches!(word, "int" | "double" | "bool" | "void" | "std" | "string"),
        };
        let is_keyword = match self {
            Syntax::VoltScript => {
                matches!(word, "if" | "else" | "while" | "for" | "return" | "print")
            }
            Syntax::Cpp => matches!(
                word,
                "if" | "else" | "while" | "for" | "return" | "cout" | "endl" | "include"
            ),
        };

        if is_type {
            Style::default().fg(DEFAULT_THEME.type_name)
        } else if is_keyword {
            Style::default()
                .fg(DEFAULT_THEME.keyword)
                .add_modifier(Modifier::BOLD)
        } else if matches!(word, "true" | "false")
            || word.starts_with(|c: char| c.is_ascii_digit())
        {
            Style::default().fg(DEFAULT_THEME.number)
        } else if is_function {
            Style::default().fg(DEFAULT_THEME.function)
        } else {
            Style::default().fg(DEFAULT_THEME.fg)
        }
    }
}

/// Split one line into styled spans
pub fn highlight_line(line: &str, syntax: Syntax) -> Line<'static> {
    let chars: Vec<char> = line.chars().collect();

    if syntax == Syntax::Cpp && line.trim_start().starts_with('#') {
        return Line::from(Span::styled(
            line.to_string(),
            Style::default().fg(DEFAULT_THEME.preprocessor),
        ));
    }

    let mut spans = Vec::new();
    let mut current_word = String::new();
    let mut i = 0;

    let flush = |word: &mut String, spans: &mut Vec<Span<'static>>, next: Option<char>| {
        if !word.is_empty() {
            let style = syntax.word_style(word, next == Some('('));
            spans.push(Span::styled(std::mem::take(word), style));
        }
    };

    while i < chars.len() {
        let c = chars[i];

        // Comments run to end of line
        if c == '/' && chars.get(i + 1) == Some(&'/') {
            flush(&mut current_word, &mut spans, Some(c));
            spans.push(Span::styled(
                chars[i..].iter().collect::<String>(),
                Style::default().fg(DEFAULT_THEME.comment),
            ));
            break;
        }

        if c == '"' {
            flush(&mut current_word, &mut spans, Some(c));
            let mut end = i + 1;
            while end < chars.len() && chars[end] != '"' {
                end += if chars[end] == '\\' { 2 } else { 1 };
            }
            let end = (end + 1).min(chars.len());
            spans.push(Span::styled(
                chars[i..end].iter().collect::<String>(),
                Style::default().fg(DEFAULT_THEME.string),
            ));
            i = end;
            continue;
        }

        // `.` stays inside numbers such as 3.14
        if c.is_alphanumeric() || c == '_' || (c == '.' && !current_word.is_empty()) {
            current_word.push(c);
            i += 1;
            continue;
        }

        flush(&mut current_word, &mut spans, Some(c));
        let style = match c {
            '{' | '}' | '(' | ')' => Style::default().fg(DEFAULT_THEME.primary),
            '+' | '-' | '*' | '/' | '%' | '=' | '&' | '|' | '!' | '<' | '>' => {
                Style::default().fg(DEFAULT_THEME.secondary)
            }
            _ => Style::default().fg(DEFAULT_THEME.fg),
        };
        spans.push(Span::styled(c.to_string(), style));
        i += 1;
    }
    flush(&mut current_word, &mut spans, None);

    Line::from(spans)
}

/// Everything a code pane needs for one frame
pub struct CodeView<'a> {
    pub title: &'a str,
    pub lines: Vec<&'a str>,
    pub syntax: Syntax,
    /// 0-based indices of lines to highlight
    pub highlighted: Vec<usize>,
    /// 0-based index of the line to mark as failing
    pub error_line: Option<usize>,
    /// Scroll so this line becomes visible
    pub reveal: Option<usize>,
}

/// Keep `offset` such that `line` is on screen
pub fn reveal_line(offset: usize, line: usize, visible_height: usize) -> usize {
    if line < offset {
        line
    } else if line >= offset + visible_height {
        line + 1 - visible_height
    } else {
        offset
    }
}

/// Render a code pane
pub fn render_code_pane(
    frame: &mut Frame,
    area: Rect,
    view: CodeView<'_>,
    is_focused: bool,
    scroll: &mut usize,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(format!(" {} ", view.title))
        .borders(Borders::ALL)
        .border_style(border_style);

    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    let total_lines = view.lines.len();

    if let Some(line) = view.reveal {
        *scroll = reveal_line(*scroll, line, visible_height);
    }
    *scroll = (*scroll).min(total_lines.saturating_sub(visible_height));

    let visible_lines: Vec<Line> = view
        .lines
        .iter()
        .enumerate()
        .skip(*scroll)
        .take(visible_height)
        .map(|(idx, text)| {
            let is_error = view.error_line == Some(idx);
            let is_current = view.highlighted.contains(&idx);

            let num_style = if is_error {
                Style::default()
                    .fg(DEFAULT_THEME.error)
                    .add_modifier(Modifier::BOLD)
            } else if is_current {
                Style::default()
                    .fg(DEFAULT_THEME.secondary)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.comment)
            };

            let mut content = highlight_line(text, view.syntax);
            if is_error {
                let error_style = Style::default()
                    .bg(DEFAULT_THEME.error)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD);
                for span in &mut content.spans {
                    span.style = error_style;
                }
            } else if is_current {
                let current_style = Style::default().bg(DEFAULT_THEME.current_line_bg);
                for span in &mut content.spans {
                    span.style = span.style.patch(current_style);
                }
            }

            let mut spans = vec![Span::styled(format!("{:4} ", idx + 1), num_style)];
            spans.extend(content.spans);
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(visible_lines).block(block), area);
}

/// Render a message in place of code, e.g. a compile error
pub fn render_message_pane(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    message: &str,
    is_focused: bool,
) {
    let border_style = if is_focused {
        Style::default().fg(DEFAULT_THEME.border_focused)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let lines: Vec<Line> = message
        .lines()
        .map(|l| {
            Line::from(Span::styled(
                l.to_string(),
                Style::default()
                    .fg(DEFAULT_THEME.error)
                    .add_modifier(Modifier::BOLD),
            ))
        })
        .collect();

    let block = Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(border_style);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
