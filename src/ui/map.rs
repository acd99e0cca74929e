use crate::api::model::Location;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::Canvas;
use ratatui::widgets::{Block, Borders};
use ratatui::Frame;

/// Map centre (New Delhi), `(latitude, longitude)`
pub const DEFAULT_CENTER: (f64, f64) = (28.6139, 77.2090);

/// Slippy-map zoom level of the view
pub const DEFAULT_ZOOM: u8 = 12;

// Visible area expressed in 256px map tiles
const VIEWPORT_TILES_X: f64 = 4.0;
const VIEWPORT_TILES_Y: f64 = 3.0;

/// Fixed geographic window shown by the map
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub center_lat: f64,
    pub center_lon: f64,
    pub lat_span: f64,
    pub lon_span: f64,
}

impl Viewport {
    /// Window around `center` as a web map would show it at `zoom`
    pub fn at(center: (f64, f64), zoom: u8) -> Self {
        let tile_degrees = 360.0 / 2f64.powi(i32::from(zoom));
        let (lat, lon) = center;
        Self {
            center_lat: lat,
            center_lon: lon,
            lat_span: VIEWPORT_TILES_Y * tile_degrees * lat.to_radians().cos(),
            lon_span: VIEWPORT_TILES_X * tile_degrees,
        }
    }

    /// `[west, east]`
    pub fn x_bounds(&self) -> [f64; 2] {
        [
            self.center_lon - self.lon_span / 2.0,
            self.center_lon + self.lon_span / 2.0,
        ]
    }

    /// `[south, north]`
    pub fn y_bounds(&self) -> [f64; 2] {
        [
            self.center_lat - self.lat_span / 2.0,
            self.center_lat + self.lat_span / 2.0,
        ]
    }

    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        let [west, east] = self.x_bounds();
        let [south, north] = self.y_bounds();
        (west..=east).contains(&lon) && (south..=north).contains(&lat)
    }

    /// Terminal cell a coordinate lands on inside `inner`, the canvas area
    /// without borders. Same rounding as the canvas uses when printing.
    pub fn project(&self, inner: Rect, lat: f64, lon: f64) -> Option<(u16, u16)> {
        if inner.width == 0 || inner.height == 0 || !self.contains(lat, lon) {
            return None;
        }
        let [west, _] = self.x_bounds();
        let [_, north] = self.y_bounds();
        let col = (lon - west) * f64::from(inner.width - 1) / self.lon_span;
        let row = (north - lat) * f64::from(inner.height - 1) / self.lat_span;
        Some((inner.x + col as u16, inner.y + row as u16))
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport::at(DEFAULT_CENTER, DEFAULT_ZOOM)
    }
}

/// Map of all known locations with a marker cursor
#[derive(Debug, Clone, Default)]
pub struct VibeMap {
    viewport: Viewport,
    selected: usize,
}

impl VibeMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn selected<'a>(&self, locations: &'a [Location]) -> Option<&'a Location> {
        locations.get(self.selected.min(locations.len().saturating_sub(1)))
    }

    pub fn select_next(&mut self, count: usize) {
        if count > 0 {
            self.selected = (self.selected.min(count - 1) + 1) % count;
        }
    }

    pub fn select_prev(&mut self, count: usize) {
        if count > 0 {
            let current = self.selected.min(count - 1);
            self.selected = if current == 0 { count - 1 } else { current - 1 };
        }
    }

    /// Name of the marker under the cursor; the caller decides what a click does
    pub fn activate(&self, locations: &[Location]) -> Option<String> {
        self.selected(locations).map(|l| l.name.clone())
    }

    /// Marker hit by a mouse click at `(col, row)` on a map drawn into `area`.
    /// Clicks up to one cell away count; the closest marker wins.
    pub fn marker_at(&mut self, locations: &[Location], area: Rect, col: u16, row: u16) -> Option<String> {
        let inner = Block::default().borders(Borders::ALL).inner(area);

        let hit = locations
            .iter()
            .enumerate()
            .filter_map(|(i, loc)| {
                let (x, y) = self.viewport.project(inner, loc.latitude(), loc.longitude())?;
                let dx = x.abs_diff(col);
                let dy = y.abs_diff(row);
                (dx <= 1 && dy <= 1).then_some((dx + dy, i))
            })
            .min_by_key(|(distance, _)| *distance)?;

        self.selected = hit.1;
        Some(locations[hit.1].name.clone())
    }

    pub fn render(&self, f: &mut Frame, area: Rect, locations: &[Location], focused: bool) {
        let selected = self.selected(locations);
        let border = if focused { Color::Yellow } else { Color::White };

        let mut title = vec![Span::styled(
            " Map ",
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )];
        match selected {
            Some(loc) => title.push(Span::styled(
                format!("● {} ({}/{}) ", loc.name, self.selected.min(locations.len() - 1) + 1, locations.len()),
                Style::default().fg(Color::Yellow),
            )),
            None => title.push(Span::styled("(no locations) ", Style::default().fg(Color::DarkGray))),
        }

        let viewport = self.viewport;
        let selected_name = selected.map(|l| l.name.as_str());

        let canvas = Canvas::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(border))
                    .title(title),
            )
            .marker(Marker::Braille)
            .x_bounds(viewport.x_bounds())
            .y_bounds(viewport.y_bounds())
            // Marker plane only: a world outline has no linework at this zoom
            .paint(move |ctx| {
                ctx.print(
                    viewport.center_lon,
                    viewport.center_lat,
                    Span::styled("+", Style::default().fg(Color::DarkGray)),
                );
                for loc in locations {
                    if Some(loc.name.as_str()) == selected_name {
                        continue;
                    }
                    ctx.print(
                        loc.longitude(),
                        loc.latitude(),
                        Span::styled("●", Style::default().fg(Color::Cyan)),
                    );
                }
                // Cursor marker last so it stays on top
                if let Some(loc) = locations.iter().find(|l| Some(l.name.as_str()) == selected_name) {
                    ctx.print(
                        loc.longitude(),
                        loc.latitude(),
                        Line::from(vec![
                            Span::styled("●", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
                            Span::styled(format!(" {}", loc.name), Style::default().fg(Color::Yellow)),
                        ]),
                    );
                }
            });

        f.render_widget(canvas, area);
    }
}
