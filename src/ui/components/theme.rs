use ratatui::style::{Color, Modifier, Style};

/// Color roles shared by every widget. Copy on purpose: widgets take the
/// palette by value the way they take a `Style`.
#[derive(Debug, Clone, Copy)]
pub struct ThemePalette {
    pub bg: Color,
    pub fg: Color,
    pub accent: Color,
    pub accent_alt: Color,
    pub hint: Color,
    pub border: Color,
    pub error: Color,
}

impl ThemePalette {
    pub fn dark() -> Self {
        Self {
            bg: Color::Rgb(18, 18, 24),
            fg: Color::Rgb(220, 223, 228),
            accent: Color::Rgb(97, 175, 239),
            accent_alt: Color::Rgb(198, 120, 221),
            hint: Color::Rgb(110, 118, 129),
            border: Color::Rgb(62, 68, 82),
            error: Color::Rgb(224, 108, 117),
        }
    }

    pub fn light() -> Self {
        Self {
            bg: Color::Rgb(250, 250, 248),
            fg: Color::Rgb(36, 41, 46),
            accent: Color::Rgb(3, 102, 214),
            accent_alt: Color::Rgb(111, 66, 193),
            hint: Color::Rgb(106, 115, 125),
            border: Color::Rgb(200, 204, 210),
            error: Color::Rgb(203, 36, 49),
        }
    }

    pub fn title(self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    /// Style for the selected result row.
    pub fn selection(self) -> Style {
        Style::default()
            .fg(self.bg)
            .bg(self.accent)
            .add_modifier(Modifier::BOLD)
    }
}
