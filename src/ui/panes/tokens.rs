//! Token stream pane

use crate::parser::lexer::{Token, TokenKind};
use crate::ui::panes::code::reveal_line;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

fn kind_style(kind: TokenKind) -> Style {
    match kind {
        TokenKind::Keyword(k) if k.is_type() => Style::default().fg(DEFAULT_THEME.type_name),
        TokenKind::Keyword(_) => Style::default().fg(DEFAULT_THEME.keyword),
        TokenKind::Number => Style::default().fg(DEFAULT_THEME.number),
        TokenKind::Str => Style::default().fg(DEFAULT_THEME.string),
        TokenKind::Operator(_) | TokenKind::Assign => Style::default().fg(DEFAULT_THEME.secondary),
        TokenKind::Eof => Style::default().fg(DEFAULT_THEME.comment),
        _ => Style::default().fg(DEFAULT_THEME.fg),
    }
}

/// One row of the token table
pub fn token_row(index: usize, token: &Token) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{index:5} "), Style::default().fg(DEFAULT_THEME.comment)),
        Span::styled(format!("{:<12}", token.kind.label()), kind_style(token.kind)),
        Span::styled(format!("{:<20} ", token.text), Style::default().fg(DEFAULT_THEME.fg)),
        Span::styled(
            format!("{}:{}", token.location.line, token.location.column),
            Style::default().fg(DEFAULT_THEME.comment),
        ),
    ])
}

/// Render the token pane. `selected` is highlighted and kept on screen when
/// `reveal` is set.
pub fn render_tokens_pane(
    frame: &mut Frame,
    area: Rect,
    tokens: &[Token],
    selected: Option<usize>,
    reveal: bool,
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
        .title(format!(" Tokens ({}) ", tokens.len()))
        .borders(Borders::ALL)
        .border_style(border_style);

    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    if let (true, Some(index)) = (reveal, selected) {
        *scroll = reveal_line(*scroll, index, visible_height);
    }
    *scroll = (*scroll).min(tokens.len().saturating_sub(visible_height));

    let rows: Vec<Line> = tokens
        .iter()
        .enumerate()
        .skip(*scroll)
        .take(visible_height)
        .map(|(index, token)| {
            let mut row = token_row(index, token);
            if selected == Some(index) {
                let current = Style::default()
                    .bg(DEFAULT_THEME.current_line_bg)
                    .add_modifier(Modifier::BOLD);
                for span in &mut row.spans {
                    span.style = span.style.patch(current);
                }
            }
            row
        })
        .collect();

    frame.render_widget(Paragraph::new(rows).block(block), area);
}
