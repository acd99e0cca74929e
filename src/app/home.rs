use crate::api::client::{Outcome, Request};
use crate::api::model::{Location, VibeResult};
use tracing::{debug, info, warn};

/// Shown when a name search never got a usable answer from the backend
pub const CONNECTION_ERROR: &str = "Could not connect to the backend. Is it running?";

/// A request the caller must execute, tagged with its dispatch order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub seq: u64,
    pub request: Request,
}

/// What `resolve` did with an outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// State was updated from the outcome
    Applied,
    /// A newer search was dispatched since; the outcome was dropped
    Stale,
}

/// Search and result state for the whole application.
///
/// Operations that need the network hand back a [`Ticket`]; the caller runs
/// the request and feeds the [`Outcome`] to [`Home::resolve`]. Only the
/// newest search ticket may change the result, so a slow response can never
/// overwrite a later one.
#[derive(Debug, Default)]
pub struct Home {
    query_text: String,
    searched_label: String,
    result: Option<VibeResult>,
    suggestions: Option<Vec<String>>,
    loading: bool,
    all_locations: Vec<Location>,

    next_seq: u64,
    /// Sequence number of the newest search in flight
    in_flight: Option<u64>,
    /// Tag of the newest tag search, for its failure message
    pending_tag: Option<String>,
    locations_seq: Option<u64>,
}

impl Home {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query_text(&self) -> &str {
        &self.query_text
    }

    pub fn searched_label(&self) -> &str {
        &self.searched_label
    }

    pub fn result(&self) -> Option<&VibeResult> {
        self.result.as_ref()
    }

    pub fn suggestions(&self) -> Option<&[String]> {
        self.suggestions.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn all_locations(&self) -> &[Location] {
        &self.all_locations
    }

    pub fn set_query(&mut self, text: impl Into<String>) {
        self.query_text = text.into();
    }

    pub fn push_char(&mut self, c: char) {
        self.query_text.push(c);
    }

    pub fn pop_char(&mut self) {
        self.query_text.pop();
    }

    pub fn clear_query(&mut self) {
        self.query_text.clear();
    }

    /// Ticket for loading the full location list
    pub fn initialize(&mut self) -> Ticket {
        let seq = self.bump_seq();
        self.locations_seq = Some(seq);
        Ticket {
            seq,
            request: Request::Locations,
        }
    }

    /// Look up the vibe of a place. Blank queries do nothing.
    pub fn search_by_name(&mut self, query: &str) -> Option<Ticket> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }

        self.searched_label = query.to_string();
        self.pending_tag = None;
        Some(self.begin(Request::Vibe(query.to_string())))
    }

    /// List the places carrying a vibe tag
    pub fn search_by_tag(&mut self, tag: &str) -> Ticket {
        self.searched_label = format!("Vibe: {}", tag);
        self.pending_tag = Some(tag.to_string());
        self.begin(Request::LocationsByVibe(tag.to_string()))
    }

    /// A map marker was chosen: fill the search box and search for it
    pub fn select_marker(&mut self, name: &str) -> Option<Ticket> {
        self.query_text = name.to_string();
        self.search_by_name(name)
    }

    /// Search for whatever is in the search box
    pub fn submit_form(&mut self) -> Option<Ticket> {
        let query = self.query_text.clone();
        self.search_by_name(&query)
    }

    /// Search for the suggestion at `index`, if there is one
    pub fn select_suggestion(&mut self, index: usize) -> Option<Ticket> {
        let name = self.suggestions.as_ref()?.get(index)?.clone();
        self.search_by_name(&name)
    }

    /// Apply the outcome of a ticket previously handed out
    pub fn resolve(&mut self, seq: u64, outcome: Outcome) -> Resolution {
        let resolution = match outcome {
            Outcome::Locations(result) => {
                if self.locations_seq != Some(seq) {
                    debug!(seq, "Ignoring location list for an unknown ticket");
                    return Resolution::Stale;
                }
                self.locations_seq = None;
                match result {
                    Ok(locations) => {
                        info!(count = locations.len(), "Loaded locations for the map");
                        self.all_locations = locations;
                    }
                    Err(e) => warn!("Failed to fetch locations for map: {}", e),
                }
                Resolution::Applied
            }
            Outcome::Vibe(result) => {
                if !self.take_in_flight(seq) {
                    return Resolution::Stale;
                }
                match result {
                    Ok(vibe) => self.set_result(vibe),
                    Err(e) => {
                        warn!(label = %self.searched_label, "Vibe lookup failed: {}", e);
                        self.set_result(VibeResult::error(CONNECTION_ERROR));
                    }
                }
                Resolution::Applied
            }
            Outcome::LocationsByVibe(result) => {
                if !self.take_in_flight(seq) {
                    return Resolution::Stale;
                }
                let tag = self.pending_tag.take().unwrap_or_default();
                match result {
                    Ok(names) => self.set_suggestions(names),
                    Err(e) => {
                        warn!(%tag, "Failed to fetch locations by vibe: {}", e);
                        self.set_result(VibeResult::error(tag_error_message(&tag)));
                    }
                }
                Resolution::Applied
            }
        };

        self.check_exclusive();
        resolution
    }

    fn bump_seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }

    /// Start a search: loading on, previous answers gone
    fn begin(&mut self, request: Request) -> Ticket {
        let seq = self.bump_seq();
        if let Some(previous) = self.in_flight.replace(seq) {
            debug!(previous, seq, "Superseding an unfinished search");
        }
        self.loading = true;
        self.result = None;
        self.suggestions = None;
        self.check_exclusive();
        Ticket { seq, request }
    }

    /// True if `seq` is the newest search; it is then no longer in flight
    fn take_in_flight(&mut self, seq: u64) -> bool {
        if self.in_flight != Some(seq) {
            debug!(seq, latest = ?self.in_flight, "Discarding stale response");
            return false;
        }
        self.in_flight = None;
        self.loading = false;
        true
    }

    fn set_result(&mut self, result: VibeResult) {
        self.suggestions = None;
        self.result = Some(result);
    }

    fn set_suggestions(&mut self, names: Vec<String>) {
        self.result = None;
        self.suggestions = Some(names);
    }

    fn check_exclusive(&self) {
        debug_assert!(
            !(self.result.is_some() && self.suggestions.is_some()),
            "result and suggestions populated at once"
        );
    }
}

/// Shown when a tag search never got a usable answer from the backend
pub fn tag_error_message(tag: &str) -> String {
    format!(
        "Could not load spots for the '{}' vibe. Is the backend running?",
        tag
    )
}
