use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

/// Vibe categories offered as one-click filters
pub const VIBE_TAGS: [&str; 6] = ["cozy", "lively", "quiet", "historic", "creative", "energetic"];

/// Row of tag buttons
#[derive(Debug, Clone, Default)]
pub struct TagBar {
    selected: usize,
}

impl TagBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tags(&self) -> &'static [&'static str] {
        &VIBE_TAGS
    }

    pub fn selected(&self) -> &'static str {
        VIBE_TAGS[self.selected]
    }

    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % VIBE_TAGS.len();
    }

    pub fn select_prev(&mut self) {
        self.selected = (self.selected + VIBE_TAGS.len() - 1) % VIBE_TAGS.len();
    }

    /// Tag under the cursor
    pub fn activate(&self) -> &'static str {
        self.selected()
    }

    /// Tag bound to a number key, `'1'` for the first
    pub fn tag_for_key(&mut self, key: char) -> Option<&'static str> {
        let index = key.to_digit(10)?.checked_sub(1)? as usize;
        let tag = VIBE_TAGS.get(index)?;
        self.selected = index;
        Some(*tag)
    }

    pub fn render(&self, f: &mut Frame, area: Rect, focused: bool) {
        let mut spans = vec![Span::styled(
            "Find a vibe: ",
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )];

        for (i, tag) in VIBE_TAGS.iter().enumerate() {
            let style = if focused && i == self.selected {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
                    .fg(Color::Rgb(17, 94, 89))
                    .bg(Color::Rgb(220, 220, 220))
                    .add_modifier(Modifier::BOLD)
            };
            spans.push(Span::styled((i + 1).to_string(), Style::default().fg(Color::DarkGray)));
            spans.push(Span::styled(format!(" {} ", tag), style));
            spans.push(Span::raw("  "));
        }

        let bar = Paragraph::new(Line::from(spans))
            .alignment(ratatui::layout::Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(if focused { Color::Yellow } else { Color::DarkGray })),
            );

        f.render_widget(bar, area);
    }
}
