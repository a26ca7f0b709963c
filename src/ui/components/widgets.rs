use ratatui::layout::Alignment;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};

use crate::ui::components::theme::ThemePalette;

pub fn search_bar(query: &str, palette: ThemePalette, limit: usize) -> Paragraph<'static> {
    let title = Span::styled(format!("Search · limit {limit}"), palette.title());

    // Cursor indicator at the end of the typed text.
    let cursor = "▎";
    let input_line = Line::from(Span::styled(
        format!("/ {query}{cursor}"),
        Style::default().fg(palette.accent),
    ));

    let tips_line = Line::from(vec![
        Span::styled("Tab", Style::default().fg(palette.accent)),
        Span::raw(" limit  "),
        Span::styled("Ctrl+R", Style::default().fg(palette.hint)),
        Span::raw(" recent  "),
        Span::styled("Ctrl+U", Style::default().fg(palette.hint)),
        Span::raw(" clear  "),
        Span::styled("F6", Style::default().fg(palette.hint)),
        Span::raw(" theme  "),
        Span::styled("Esc", Style::default().fg(palette.hint)),
        Span::raw(" quit"),
    ]);

    Paragraph::new(vec![input_line, tips_line])
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.border)),
        )
        .alignment(Alignment::Left)
    // No wrapping: the cursor at the end must stay visible on long queries.
}

/// Result rows. Identity is the index, not the word — duplicate values at
/// different positions render and select independently. The caller drives
/// the selection through a `ListState`.
pub fn word_list(words: &[String], palette: ThemePalette) -> List<'static> {
    let items: Vec<ListItem> = words
        .iter()
        .enumerate()
        .map(|(idx, word)| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:>3} ", idx + 1), Style::default().fg(palette.hint)),
                Span::styled(word.clone(), Style::default().fg(palette.fg)),
            ]))
        })
        .collect();

    List::new(items)
        .highlight_style(palette.selection())
        .highlight_symbol("▶ ")
}
