use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::{ListState, StatefulWidget, Widget};

use word_search::ui::components::theme::ThemePalette;
use word_search::ui::components::widgets::{search_bar, word_list};

fn buffer_text(buf: &Buffer, rect: Rect) -> String {
    (0..rect.height)
        .map(|y| {
            (0..rect.width)
                .map(|x| buf[(x, y)].symbol().to_string())
                .collect::<Vec<_>>()
                .join("")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn search_bar_shows_query_cursor_and_limit() {
    let palette = ThemePalette::dark();
    let widget = search_bar("apple", palette, 10);
    let rect = Rect::new(0, 0, 100, 4);
    let mut buf = Buffer::empty(rect);
    widget.render(rect, &mut buf);

    let joined = buffer_text(&buf, rect);
    eprintln!("bar={joined}");
    assert!(joined.contains("/ apple▎"));
    assert!(joined.contains("limit 10"));
    assert!(joined.contains("Tab"));
    assert!(joined.contains("Esc"));
    assert!(joined.contains("quit"));
}

#[test]
fn word_list_renders_rows_in_backend_order() {
    let palette = ThemePalette::dark();
    let words: Vec<String> = ["apple", "application", "apply"]
        .iter()
        .map(|w| w.to_string())
        .collect();
    let rect = Rect::new(0, 0, 40, 5);
    let mut buf = Buffer::empty(rect);
    let mut state = ListState::default();
    StatefulWidget::render(word_list(&words, palette), rect, &mut buf, &mut state);

    let lines: Vec<String> = buffer_text(&buf, rect)
        .lines()
        .map(|l| l.to_string())
        .collect();
    assert!(lines[0].contains("1 apple"));
    assert!(lines[1].contains("2 application"));
    assert!(lines[2].contains("3 apply"));
}

#[test]
fn selected_row_is_visually_distinguished() {
    let palette = ThemePalette::dark();
    let words: Vec<String> = ["echo", "echo", "echo"]
        .iter()
        .map(|w| w.to_string())
        .collect();
    let rect = Rect::new(0, 0, 40, 4);
    let mut buf = Buffer::empty(rect);
    let mut state = ListState::default();
    state.select(Some(1));
    StatefulWidget::render(word_list(&words, palette), rect, &mut buf, &mut state);

    let lines: Vec<String> = buffer_text(&buf, rect)
        .lines()
        .map(|l| l.to_string())
        .collect();
    // Duplicate values: only the row at the selected index carries the
    // highlight symbol.
    assert!(!lines[0].contains('▶'));
    assert!(lines[1].contains('▶'));
    assert!(!lines[2].contains('▶'));
}

#[test]
fn empty_word_list_renders_no_rows() {
    let palette = ThemePalette::dark();
    let rect = Rect::new(0, 0, 40, 3);
    let mut buf = Buffer::empty(rect);
    let mut state = ListState::default();
    StatefulWidget::render(word_list(&[], palette), rect, &mut buf, &mut state);

    let joined = buffer_text(&buf, rect);
    assert_eq!(joined.trim(), "");
}
