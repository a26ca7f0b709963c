//! Ratatui shell wired to the search controller.

use anyhow::Result;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers, MouseButton,
    MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, ListState, Paragraph};
use std::collections::VecDeque;
use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::controller::{SearchController, SearchPhase};
use crate::fetch::{HttpWordFetcher, WordCache};
use crate::ui::components::theme::ThemePalette;
use crate::ui::components::widgets::{search_bar, word_list};

const SPINNER_CHARS: [char; 8] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧'];
const RECENT_CAP: usize = 10;

/// Shortcut legend for the footer. `compact` drops the secondary keys when
/// the terminal is narrow.
pub fn footer_legend(compact: bool) -> String {
    if compact {
        "Tab limit | Enter select | Esc quit".to_string()
    } else {
        "Tab limit | ↑/↓ move | Enter select | Ctrl+R recent | Ctrl+U clear | F6 theme | Esc quit"
            .to_string()
    }
}

pub fn run_tui(config: Config) -> Result<()> {
    let mut stdout = io::stdout();
    enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let fetcher = Arc::new(HttpWordFetcher::new(
        config.endpoint.clone(),
        config.fetch_timeout,
    ));
    let cache = WordCache::new(fetcher);
    let mut controller = SearchController::new(cache, config.debounce, config.limit);
    tracing::info!(endpoint = %config.endpoint, "tui started");

    let result = event_loop(&mut terminal, &mut controller);
    teardown_terminal()?;
    result
}

fn teardown_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
    Ok(())
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    controller: &mut SearchController,
) -> Result<()> {
    let tick_rate = Duration::from_millis(30);
    let mut last_tick = Instant::now();
    let mut needs_draw = true;
    let mut theme_dark = true;
    let mut spinner_frame: usize = 0;

    let mut list_state = ListState::default();
    let mut last_list_area: Option<Rect> = None;

    // In-session only; never persisted.
    let mut recent_queries: VecDeque<String> = VecDeque::new();
    let mut recent_cursor: Option<usize> = None;

    loop {
        if needs_draw {
            terminal.draw(|f| {
                let palette = if theme_dark {
                    ThemePalette::dark()
                } else {
                    ThemePalette::light()
                };

                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .margin(1)
                    .constraints(
                        [
                            Constraint::Length(4), // search bar + tips
                            Constraint::Min(0),    // results
                            Constraint::Length(1), // footer
                        ]
                        .as_ref(),
                    )
                    .split(f.area());

                f.render_widget(
                    search_bar(controller.raw_text(), palette, controller.limit()),
                    chunks[0],
                );

                let results_area = chunks[1];
                let phase = controller.phase();
                let words = controller.words();

                if words.is_empty() {
                    last_list_area = None;
                    let mut lines: Vec<Line> = Vec::new();
                    match phase {
                        SearchPhase::Loading => {
                            let spinner = SPINNER_CHARS[spinner_frame % SPINNER_CHARS.len()];
                            lines.push(Line::from(Span::styled(
                                format!("{spinner} Searching..."),
                                Style::default().fg(palette.accent),
                            )));
                        }
                        SearchPhase::Error => {
                            lines.push(Line::from(Span::styled(
                                "Failed to fetch words.",
                                Style::default().fg(palette.error),
                            )));
                            if let Some(detail) = controller.error_detail() {
                                lines.push(Line::from(Span::styled(
                                    detail,
                                    Style::default().fg(palette.hint),
                                )));
                            }
                        }
                        SearchPhase::Empty => {
                            lines.push(Line::from(Span::styled(
                                "No matching word found.",
                                Style::default().fg(palette.hint),
                            )));
                        }
                        SearchPhase::Idle | SearchPhase::Success => {
                            if recent_queries.is_empty() {
                                lines.push(Line::from(Span::styled(
                                    "Type to search...",
                                    Style::default().fg(palette.hint),
                                )));
                            } else {
                                lines.push(Line::from(Span::styled(
                                    "Recent queries (Ctrl+R to load):",
                                    palette.title(),
                                )));
                                for (idx, q) in recent_queries.iter().take(5).enumerate() {
                                    let loaded = recent_cursor == Some(idx);
                                    lines.push(Line::from(Span::styled(
                                        format!("{} {}", if loaded { "▶" } else { " " }, q),
                                        if loaded {
                                            Style::default().fg(palette.accent)
                                        } else {
                                            Style::default().fg(palette.hint)
                                        },
                                    )));
                                }
                            }
                        }
                    }
                    let block = Block::default()
                        .title("Words")
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(palette.border));
                    f.render_widget(Paragraph::new(lines).block(block), results_area);
                } else {
                    last_list_area = Some(results_area);
                    let title = match controller.selected_word() {
                        Some(word) => format!("Words · selected '{word}'"),
                        None => "Words".to_string(),
                    };
                    let block = Block::default()
                        .title(Span::styled(title, palette.title()))
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(palette.border));
                    list_state.select(controller.selected());
                    f.render_stateful_widget(
                        word_list(words, palette).block(block),
                        results_area,
                        &mut list_state,
                    );
                }

                // Footer: live status message first, then the key legend.
                let status = controller.status_message();
                let compact = f.area().width < 90;
                let footer = if status.is_empty() {
                    footer_legend(compact)
                } else {
                    format!("{status} | {}", footer_legend(compact))
                };
                f.render_widget(
                    Paragraph::new(Span::styled(footer, Style::default().fg(palette.hint))),
                    chunks[2],
                );
            })?;
            needs_draw = false;
        }

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    needs_draw = true;
                    match key.code {
                        KeyCode::Esc | KeyCode::F(10) => break,
                        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            break;
                        }
                        KeyCode::F(6) => theme_dark = !theme_dark,
                        KeyCode::Tab => controller.cycle_limit(),
                        KeyCode::Up => controller.select_prev(),
                        KeyCode::Down => controller.select_next(),
                        KeyCode::Enter => {
                            if let Some(idx) = controller.selected()
                                && let Some((word, index)) = controller.select(idx)
                            {
                                tracing::info!(word = %word, index, "word activated");
                                remember_query(
                                    &mut recent_queries,
                                    controller.committed_query().to_string(),
                                );
                                recent_cursor = None;
                            }
                        }
                        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            controller.clear_input();
                        }
                        KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            if !recent_queries.is_empty() {
                                let next = recent_cursor
                                    .map(|idx| (idx + 1) % recent_queries.len())
                                    .unwrap_or(0);
                                if let Some(saved) = recent_queries.get(next) {
                                    recent_cursor = Some(next);
                                    controller.set_text(saved.clone());
                                }
                            }
                        }
                        KeyCode::Backspace => controller.backspace(),
                        KeyCode::Char(c) => controller.push_char(c),
                        _ => {}
                    }
                }
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::Down(MouseButton::Left) => {
                        if let Some(area) = last_list_area
                            && mouse.column > area.x
                            && mouse.column < area.x + area.width.saturating_sub(1)
                            && mouse.row > area.y
                            && mouse.row < area.y + area.height.saturating_sub(1)
                        {
                            // One row per word inside the block border.
                            let relative = (mouse.row - area.y - 1) as usize;
                            let idx = list_state.offset() + relative;
                            if let Some((word, index)) = controller.select(idx) {
                                tracing::info!(word = %word, index, "row clicked");
                                remember_query(
                                    &mut recent_queries,
                                    controller.committed_query().to_string(),
                                );
                                recent_cursor = None;
                            }
                            needs_draw = true;
                        }
                    }
                    MouseEventKind::ScrollUp => {
                        controller.select_prev();
                        needs_draw = true;
                    }
                    MouseEventKind::ScrollDown => {
                        controller.select_next();
                        needs_draw = true;
                    }
                    _ => {}
                },
                Event::Resize(_, _) => needs_draw = true,
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_rate {
            if controller.on_tick() {
                needs_draw = true;
            }
            // Advance the spinner while work is pending.
            if controller.debounce_pending() || controller.phase() == SearchPhase::Loading {
                spinner_frame = spinner_frame.wrapping_add(1);
                needs_draw = true;
            }
            last_tick = Instant::now();
        }
    }

    Ok(())
}

fn remember_query(recent: &mut VecDeque<String>, query: String) {
    if query.is_empty() {
        return;
    }
    recent.retain(|q| q != &query);
    recent.push_front(query);
    recent.truncate(RECENT_CAP);
}
