use crate::api::client::{Outcome, Request, VibeClient};
use crate::app::home::{Home, Resolution, Ticket};
use crate::core::config::Config;
use crate::core::error::Result;
use crate::ui::card::VibeCard;
use crate::ui::map::VibeMap;
use crate::ui::tags::TagBar;
use crossterm::cursor;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;
use std::io;
use std::sync::mpsc;
use std::time::Duration;
use tokio::runtime::Handle;
use tracing::{debug, info};

// How long to wait for terminal input before checking for responses
const TICK: Duration = Duration::from_millis(100);

const PLACEHOLDER: &str = "e.g., The Cozy Mug Cafe";

/// Which panel receives key presses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Search,
    Tags,
    Map,
    Results,
}

impl Focus {
    fn next(self) -> Focus {
        match self {
            Focus::Search => Focus::Tags,
            Focus::Tags => Focus::Map,
            Focus::Map => Focus::Results,
            Focus::Results => Focus::Search,
        }
    }

    fn prev(self) -> Focus {
        match self {
            Focus::Search => Focus::Results,
            Focus::Tags => Focus::Search,
            Focus::Map => Focus::Tags,
            Focus::Results => Focus::Map,
        }
    }
}

/// Screen regions from the last draw, for mouse hit-testing
#[derive(Debug, Clone, Copy, Default)]
struct Areas {
    search: Rect,
    tags: Rect,
    map: Rect,
    results: Rect,
}

/// Interactive map and search interface
pub struct VibeTui {
    home: Home,
    card: Option<VibeCard>,
    map: VibeMap,
    tags: TagBar,

    focus: Focus,
    suggestion_selected: usize,
    card_scroll: u16,
    areas: Areas,
    should_quit: bool,

    config: Config,
    client: VibeClient,
    runtime: Handle,
    tx: mpsc::Sender<(u64, Outcome)>,
    rx: mpsc::Receiver<(u64, Outcome)>,
}

impl VibeTui {
    /// Requests are spawned onto `runtime`; the UI itself stays on the calling thread.
    pub fn new(config: Config, runtime: Handle) -> Result<Self> {
        let client = VibeClient::new(&config)?;
        let (tx, rx) = mpsc::channel();

        Ok(Self {
            home: Home::new(),
            card: None,
            map: VibeMap::new(),
            tags: TagBar::new(),
            focus: Focus::Search,
            suggestion_selected: 0,
            card_scroll: 0,
            areas: Areas::default(),
            should_quit: false,
            config,
            client,
            runtime,
            tx,
            rx,
        })
    }

    pub fn home(&self) -> &Home {
        &self.home
    }

    pub fn card(&self) -> Option<&VibeCard> {
        self.card.as_ref()
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture, cursor::Hide)?;

        // Always restore terminal, even if we early-return with an error.
        struct TerminalRestore;
        impl Drop for TerminalRestore {
            fn drop(&mut self) {
                let _ = disable_raw_mode();
                let mut stdout = io::stdout();
                let _ = execute!(stdout, LeaveAlternateScreen, DisableMouseCapture, cursor::Show);
            }
        }
        let _restore = TerminalRestore;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = ratatui::Terminal::new(backend)?;

        info!(api = %self.config.api_url, "Starting terminal UI");
        self.start();

        while !self.should_quit {
            self.drain_responses();
            terminal.draw(|f| self.render_ui(f))?;

            if event::poll(TICK)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
                    Event::Mouse(mouse) => self.handle_mouse(mouse),
                    _ => {}
                }
            }
        }

        Ok(())
    }

    /// Kick off the one-time location list fetch
    pub fn start(&mut self) {
        let ticket = self.home.initialize();
        self.dispatch(ticket);
    }

    /// Apply every response that has arrived so far
    pub fn drain_responses(&mut self) {
        while let Ok((seq, outcome)) = self.rx.try_recv() {
            let is_search = !matches!(outcome, Outcome::Locations(_));
            if self.home.resolve(seq, outcome) == Resolution::Applied && is_search {
                self.card = self
                    .home
                    .result()
                    .map(|r| VibeCard::new(r.clone(), self.home.searched_label()));
                self.suggestion_selected = 0;
                self.card_scroll = 0;
            }
        }
    }

    fn dispatch(&mut self, ticket: Ticket) {
        let is_search = !matches!(ticket.request, Request::Locations);
        if is_search {
            // Old card goes away with the old result
            self.card = None;
            self.suggestion_selected = 0;
            self.card_scroll = 0;
        }

        debug!(seq = ticket.seq, request = ?ticket.request, "Dispatching request");
        let client = self.client.clone();
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let outcome = client.execute(&ticket.request).await;
            // Receiver gone means the UI has exited
            let _ = tx.send((ticket.seq, outcome));
        });
    }

    fn dispatch_opt(&mut self, ticket: Option<Ticket>) {
        if let Some(ticket) = ticket {
            self.dispatch(ticket);
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match key.code {
            KeyCode::Esc => {
                self.should_quit = true;
                return;
            }
            KeyCode::Tab => {
                self.focus = self.focus.next();
                return;
            }
            KeyCode::BackTab => {
                self.focus = self.focus.prev();
                return;
            }
            _ => {}
        }

        match self.focus {
            Focus::Search => match key.code {
                KeyCode::Enter => {
                    let ticket = self.home.submit_form();
                    self.dispatch_opt(ticket);
                }
                KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    self.home.clear_query();
                }
                KeyCode::Char(c) => self.home.push_char(c),
                KeyCode::Backspace => self.home.pop_char(),
                _ => {}
            },
            Focus::Tags => match key.code {
                KeyCode::Char('q') => self.should_quit = true,
                KeyCode::Left | KeyCode::Char('h') => self.tags.select_prev(),
                KeyCode::Right | KeyCode::Char('l') => self.tags.select_next(),
                KeyCode::Enter => {
                    let tag = self.tags.activate();
                    self.search_tag(tag);
                }
                KeyCode::Char(c) if c.is_ascii_digit() => {
                    if let Some(tag) = self.tags.tag_for_key(c) {
                        self.search_tag(tag);
                    }
                }
                _ => {}
            },
            Focus::Map => {
                let count = self.home.all_locations().len();
                match key.code {
                    KeyCode::Char('q') => self.should_quit = true,
                    KeyCode::Down | KeyCode::Right | KeyCode::Char('j') => self.map.select_next(count),
                    KeyCode::Up | KeyCode::Left | KeyCode::Char('k') => self.map.select_prev(count),
                    KeyCode::Enter => {
                        if let Some(name) = self.map.activate(self.home.all_locations()) {
                            self.click_marker(&name);
                        }
                    }
                    _ => {}
                }
            }
            Focus::Results => match key.code {
                KeyCode::Char('q') => self.should_quit = true,
                KeyCode::Char('c') => {
                    if let Some(card) = self.card.as_mut() {
                        card.toggle_citations();
                    }
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    if self.home.suggestions().is_some() {
                        self.suggestion_selected = self.suggestion_selected.saturating_sub(1);
                    } else {
                        self.card_scroll = self.card_scroll.saturating_sub(1);
                    }
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    if let Some(names) = self.home.suggestions() {
                        if self.suggestion_selected + 1 < names.len() {
                            self.suggestion_selected += 1;
                        }
                    } else if self.card.is_some() {
                        self.card_scroll = self.card_scroll.saturating_add(1);
                    }
                }
                KeyCode::Enter => {
                    let ticket = self.home.select_suggestion(self.suggestion_selected);
                    self.dispatch_opt(ticket);
                }
                _ => {}
            },
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let (col, row) = (mouse.column, mouse.row);

        if hit(self.areas.map, col, row) {
            self.focus = Focus::Map;
            let hit = self.map.marker_at(
                self.home.all_locations(),
                self.areas.map,
                col,
                row,
            );
            if let Some(name) = hit {
                self.click_marker(&name);
            }
        } else if hit(self.areas.search, col, row) {
            self.focus = Focus::Search;
        } else if hit(self.areas.tags, col, row) {
            self.focus = Focus::Tags;
        } else if hit(self.areas.results, col, row) {
            self.focus = Focus::Results;
        }
    }

    fn click_marker(&mut self, name: &str) {
        let ticket = self.home.select_marker(name);
        self.dispatch_opt(ticket);
    }

    fn search_tag(&mut self, tag: &str) {
        let ticket = self.home.search_by_tag(tag);
        self.dispatch(ticket);
        self.focus = Focus::Results;
    }

    pub fn render_ui(&mut self, f: &mut Frame) {
        let size = f.size();
        let background = Block::default().style(Style::default().bg(Color::Rgb(35, 35, 35)));
        f.render_widget(background, size);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Length(3), // Tag bar
                Constraint::Min(0),    // Map + results
                Constraint::Length(2), // Footer
            ])
            .split(size);

        let title = Paragraph::new(Line::from(vec![
            Span::styled(
                "Vibe Navigator 🔮",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "  Pick a marker or search to find the vibe",
                Style::default().fg(Color::Gray),
            ),
        ]))
        .alignment(Alignment::Left);
        f.render_widget(title, chunks[0]);

        self.tags.render(f, chunks[1], self.focus == Focus::Tags);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(64), Constraint::Percentage(36)])
            .split(chunks[2]);

        self.map.render(
            f,
            columns[0],
            self.home.all_locations(),
            self.focus == Focus::Map,
        );

        let side = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Search bar
                Constraint::Min(0),    // Results
            ])
            .split(columns[1]);

        self.render_search_bar(f, side[0]);
        self.render_results(f, side[1]);
        self.render_footer(f, chunks[3]);

        self.areas = Areas {
            search: side[0],
            tags: chunks[1],
            map: columns[0],
            results: side[1],
        };
    }

    fn render_search_bar(&self, f: &mut Frame, area: Rect) {
        let focused = self.focus == Focus::Search;
        let border = if focused { Color::Yellow } else { Color::White };

        let mut spans = if self.home.query_text().is_empty() {
            vec![Span::styled(PLACEHOLDER, Style::default().fg(Color::DarkGray))]
        } else {
            vec![Span::styled(
                self.home.query_text().to_string(),
                Style::default().fg(Color::White),
            )]
        };
        if focused {
            spans.push(Span::styled("▏", Style::default().fg(Color::Yellow)));
        }

        let button = if self.home.is_loading() { " ... " } else { " Find " };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(Span::styled(
                "Search",
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ))
            .title(
                ratatui::widgets::block::Title::from(Span::styled(
                    button,
                    Style::default()
                        .fg(Color::White)
                        .bg(if self.home.is_loading() { Color::DarkGray } else { Color::Rgb(20, 184, 166) })
                        .add_modifier(Modifier::BOLD),
                ))
                .alignment(Alignment::Right),
            );

        f.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
    }

    fn render_results(&self, f: &mut Frame, area: Rect) {
        let focused = self.focus == Focus::Results;
        let border = if focused { Color::Yellow } else { Color::White };

        if self.home.is_loading() {
            let loading = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    "Getting the vibe...",
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                )),
            ])
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(border))
                    .title(format!(" {} ", self.home.searched_label())),
            );
            f.render_widget(loading, area);
            return;
        }

        if let Some(names) = self.home.suggestions() {
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border))
                .title(vec![
                    Span::styled(
                        self.home.searched_label().to_string(),
                        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(format!(" ({} found)", names.len())),
                ]);

            if names.is_empty() {
                let empty = Paragraph::new(vec![
                    Line::from(""),
                    Line::from(Span::styled(
                        "No spots found for this vibe.",
                        Style::default().fg(Color::White),
                    )),
                ])
                .alignment(Alignment::Center)
                .block(block);
                f.render_widget(empty, area);
                return;
            }

            let items: Vec<ListItem> = names
                .iter()
                .map(|name| ListItem::new(Line::from(format!("📍 {}", name))))
                .collect();
            let list = List::new(items).block(block).highlight_style(
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            );
            let mut list_state = ListState::default();
            list_state.select(Some(self.suggestion_selected.min(names.len() - 1)));
            f.render_stateful_widget(list, area, &mut list_state);
            return;
        }

        if let Some(card) = &self.card {
            f.render_widget(card.widget().scroll((self.card_scroll, 0)), area);
            return;
        }

        let hint = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "Pick a marker on the map, choose a vibe,",
                Style::default().fg(Color::White),
            )),
            Line::from(Span::styled(
                "or type a place and press Enter",
                Style::default().fg(Color::White),
            )),
        ])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border))
                .title("Results"),
        );
        f.render_widget(hint, area);
    }

    fn render_footer(&self, f: &mut Frame, area: Rect) {
        let key = |k: &'static str, color: Color| {
            Span::styled(k, Style::default().fg(color).add_modifier(Modifier::BOLD))
        };

        let mut spans = vec![
            key("Tab", Color::Cyan),
            Span::raw(": Focus  "),
        ];
        match self.focus {
            Focus::Search => {
                spans.push(key("Enter", Color::Green));
                spans.push(Span::raw(": Find  "));
                spans.push(key("Ctrl+U", Color::Cyan));
                spans.push(Span::raw(": Clear  "));
            }
            Focus::Tags => {
                spans.push(key("←→/1-6", Color::Cyan));
                spans.push(Span::raw(": Pick  "));
                spans.push(key("Enter", Color::Green));
                spans.push(Span::raw(": Browse vibe  "));
            }
            Focus::Map => {
                spans.push(key("↑↓", Color::Cyan));
                spans.push(Span::raw(": Marker  "));
                spans.push(key("Enter/click", Color::Green));
                spans.push(Span::raw(": Get vibe  "));
            }
            Focus::Results => {
                spans.push(key("↑↓", Color::Cyan));
                spans.push(Span::raw(": Move  "));
                spans.push(key("Enter", Color::Green));
                spans.push(Span::raw(": Open  "));
                spans.push(key("c", Color::Magenta));
                spans.push(Span::raw(": Reviews  "));
            }
        }
        spans.push(key("Esc", Color::Red));
        spans.push(Span::raw(": Quit"));
        spans.push(Span::raw(format!("  Backend: {}", self.config.api_url)));

        let footer = Paragraph::new(Line::from(spans))
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::TOP)
                    .border_style(Style::default().fg(Color::DarkGray)),
            );
        f.render_widget(footer, area);
    }
}

fn hit(area: Rect, col: u16, row: u16) -> bool {
    col >= area.x && col < area.right() && row >= area.y && row < area.bottom()
}
