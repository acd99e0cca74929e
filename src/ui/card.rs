use crate::api::model::{VibeReport, VibeResult};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

/// Number of leading tags that get an icon
pub const MAX_TAG_ICONS: usize = 4;

/// Card palette, picked from the first tag of a vibe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    WarmYellow,
    Amber,
    Emerald,
    Blue,
    Neutral,
}

impl Theme {
    pub fn for_tag(tag: &str) -> Theme {
        match tag.trim().to_lowercase().as_str() {
            "lively" | "energetic" | "festive" => Theme::WarmYellow,
            "cozy" | "historic" => Theme::Amber,
            "peaceful" | "tranquil" | "green" => Theme::Emerald,
            "monumental" | "patriotic" => Theme::Blue,
            _ => Theme::Neutral,
        }
    }

    /// Only the first tag counts; no tags means neutral
    pub fn for_tags(tags: &[String]) -> Theme {
        Theme::for_tag(tags.first().map(String::as_str).unwrap_or(""))
    }

    pub fn accent(&self) -> Color {
        match self {
            Theme::WarmYellow => Color::Rgb(234, 179, 8),
            Theme::Amber => Color::Rgb(245, 158, 11),
            Theme::Emerald => Color::Rgb(16, 185, 129),
            Theme::Blue => Color::Rgb(59, 130, 246),
            Theme::Neutral => Color::Rgb(156, 163, 175),
        }
    }

    pub fn pill_bg(&self) -> Color {
        match self {
            Theme::WarmYellow => Color::Rgb(113, 63, 18),
            Theme::Amber => Color::Rgb(120, 53, 15),
            Theme::Emerald => Color::Rgb(6, 78, 59),
            Theme::Blue => Color::Rgb(30, 58, 138),
            Theme::Neutral => Color::Rgb(55, 65, 81),
        }
    }
}

/// Icon drawn for a tag. Several tags share an icon; unknown tags sparkle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagIcon {
    Coffee,
    Party,
    Trees,
    Building,
    Wind,
    Gem,
    Muted,
    Shield,
    Zap,
    Lightbulb,
    Users,
    Crown,
    Camera,
    Briefcase,
    Tent,
    Heart,
    TopHat,
    Sparkles,
}

impl TagIcon {
    pub fn for_tag(tag: &str) -> TagIcon {
        match tag.trim().to_lowercase().as_str() {
            "cozy" | "coffee" => TagIcon::Coffee,
            "lively" | "festive" | "celebratory" => TagIcon::Party,
            "green" | "peaceful" | "tranquil" | "serene" | "natural" | "calm" => TagIcon::Trees,
            "historic" | "monumental" | "classic" | "traditional" => TagIcon::Building,
            "energetic" => TagIcon::Wind,
            "chic" | "sophisticated" | "elegant" => TagIcon::Gem,
            "quiet" => TagIcon::Muted,
            "patriotic" => TagIcon::Shield,
            "vibrant" => TagIcon::Zap,
            "creative" => TagIcon::Lightbulb,
            "crowded" | "bustling" => TagIcon::Users,
            "grand" | "impressive" => TagIcon::Crown,
            "touristy" => TagIcon::Camera,
            "productive" => TagIcon::Briefcase,
            "rustic" => TagIcon::Tent,
            "intimate" => TagIcon::Heart,
            "formal" => TagIcon::TopHat,
            _ => TagIcon::Sparkles,
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            TagIcon::Coffee => "☕",
            TagIcon::Party => "🎉",
            TagIcon::Trees => "🌳",
            TagIcon::Building => "🏛",
            TagIcon::Wind => "💨",
            TagIcon::Gem => "💎",
            TagIcon::Muted => "🔇",
            TagIcon::Shield => "🛡",
            TagIcon::Zap => "⚡",
            TagIcon::Lightbulb => "💡",
            TagIcon::Users => "👥",
            TagIcon::Crown => "👑",
            TagIcon::Camera => "📷",
            TagIcon::Briefcase => "💼",
            TagIcon::Tent => "⛺",
            TagIcon::Heart => "❤",
            TagIcon::TopHat => "🎩",
            TagIcon::Sparkles => "✨",
        }
    }
}

/// One rendered vibe result.
///
/// A new card is built for every search, so the citations panel always
/// starts collapsed.
#[derive(Debug, Clone)]
pub struct VibeCard {
    result: VibeResult,
    label: String,
    show_citations: bool,
}

impl VibeCard {
    pub fn new(result: VibeResult, label: impl Into<String>) -> Self {
        Self {
            result,
            label: label.into(),
            show_citations: false,
        }
    }

    pub fn result(&self) -> &VibeResult {
        &self.result
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn show_citations(&self) -> bool {
        self.show_citations
    }

    pub fn has_citations(&self) -> bool {
        matches!(&self.result, VibeResult::Found(report) if !report.citations.is_empty())
    }

    /// Flip the citations panel. Cards without citations have no toggle.
    pub fn toggle_citations(&mut self) -> bool {
        if self.has_citations() {
            self.show_citations = !self.show_citations;
        }
        self.show_citations
    }

    /// Theme of a found card; error and not-found panels have none
    pub fn theme(&self) -> Option<Theme> {
        match &self.result {
            VibeResult::Found(report) => Some(Theme::for_tags(&report.tags)),
            _ => None,
        }
    }

    pub fn icons(&self) -> Vec<TagIcon> {
        match &self.result {
            VibeResult::Found(report) => report
                .tags
                .iter()
                .take(MAX_TAG_ICONS)
                .map(|t| TagIcon::for_tag(t))
                .collect(),
            _ => Vec::new(),
        }
    }

    pub fn lines(&self) -> Vec<Line<'static>> {
        match &self.result {
            VibeResult::Error {
                message,
                raw_response,
            } => error_lines(message, raw_response.as_deref()),
            VibeResult::NotFound {
                message,
                suggestions,
            } => not_found_lines(&self.label, message.as_deref(), suggestions),
            VibeResult::Found(report) => self.found_lines(report),
        }
    }

    /// The card as plain text, one line per rendered line
    pub fn plain_text(&self) -> String {
        self.lines()
            .iter()
            .map(|line| {
                line.spans
                    .iter()
                    .map(|span| span.content.as_ref())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn widget(&self) -> Paragraph<'static> {
        let (border, title) = match &self.result {
            VibeResult::Error { .. } => (Color::Red, " Error ".to_string()),
            VibeResult::NotFound { .. } => (Color::Yellow, " Not found ".to_string()),
            VibeResult::Found(report) => (
                Theme::for_tags(&report.tags).accent(),
                format!(" {} ", self.label),
            ),
        };

        Paragraph::new(self.lines())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(border))
                    .title(Span::styled(
                        title,
                        Style::default().fg(border).add_modifier(Modifier::BOLD),
                    )),
            )
            .wrap(Wrap { trim: false })
    }

    fn found_lines(&self, report: &VibeReport) -> Vec<Line<'static>> {
        let theme = Theme::for_tags(&report.tags);
        let accent = Style::default().fg(theme.accent()).add_modifier(Modifier::BOLD);
        let heading = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);

        let mut lines = vec![Line::from(Span::styled(self.label.clone(), accent))];

        let icons = self
            .icons()
            .iter()
            .map(|icon| icon.glyph())
            .collect::<Vec<_>>()
            .join("  ");
        if !icons.is_empty() {
            lines.push(Line::from(icons));
        }
        if !report.emojis.is_empty() {
            lines.push(Line::from(report.emojis.join(" ")));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            report.summary.clone(),
            Style::default().fg(Color::White),
        )));
        lines.push(Line::from(""));

        if !report.tags.is_empty() {
            let pill = Style::default()
                .fg(Color::White)
                .bg(theme.pill_bg())
                .add_modifier(Modifier::BOLD);
            let mut spans = Vec::with_capacity(report.tags.len() * 2);
            for (i, tag) in report.tags.iter().enumerate() {
                if i > 0 {
                    spans.push(Span::raw(" "));
                }
                spans.push(Span::styled(format!(" {} ", tag), pill));
            }
            lines.push(Line::from(spans));
            lines.push(Line::from(""));
        }

        if let Some(dims) = &report.dimensions {
            let rows = [
                ("Ambience", &dims.ambience),
                ("Crowd", &dims.crowd),
                ("Noise", &dims.noise_level),
            ];
            for (name, value) in rows {
                if let Some(value) = value {
                    lines.push(Line::from(vec![
                        Span::styled(format!("{}: ", name), heading),
                        Span::raw(value.clone()),
                    ]));
                }
            }
            lines.push(Line::from(""));
        }

        if !report.citations.is_empty() {
            let toggle = if self.show_citations {
                "▼ Hide Source Reviews"
            } else {
                "▶ Show Source Reviews"
            };
            lines.push(Line::from(vec![
                Span::styled(toggle, Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
                Span::styled(" (c)", Style::default().fg(Color::DarkGray)),
            ]));

            if self.show_citations {
                lines.push(Line::from(Span::styled(
                    "Based on these reviews:",
                    Style::default().fg(Color::Gray),
                )));
                for citation in &report.citations {
                    lines.push(Line::from(Span::styled(
                        format!("• \"{}\"", citation),
                        Style::default().fg(Color::White).add_modifier(Modifier::ITALIC),
                    )));
                }
            }
        }

        lines
    }
}

/// Message used when the backend gave none
pub fn default_not_found_message(label: &str) -> String {
    format!("Sorry, I couldn't find anything about {}.", label)
}

fn error_lines(message: &str, raw_response: Option<&str>) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(
            "⚠ Something went wrong",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(message.to_string(), Style::default().fg(Color::White))),
    ];
    if let Some(raw) = raw_response {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Raw response:", Style::default().fg(Color::DarkGray))));
        for line in raw.lines() {
            lines.push(Line::from(Span::styled(
                line.to_string(),
                Style::default().fg(Color::DarkGray),
            )));
        }
    }
    lines
}

fn not_found_lines(label: &str, message: Option<&str>, suggestions: &[String]) -> Vec<Line<'static>> {
    let message = message
        .map(str::to_string)
        .unwrap_or_else(|| default_not_found_message(label));

    let mut lines = vec![
        Line::from(Span::styled(
            "🔍 No vibe found",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(message, Style::default().fg(Color::White))),
    ];

    if !suggestions.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Did you mean:",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )));
        for name in suggestions {
            lines.push(Line::from(format!("• {}", name)));
        }
    }
    lines
}
