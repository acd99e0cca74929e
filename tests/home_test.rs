use vibenav::app::home::{tag_error_message, CONNECTION_ERROR};
use vibenav::{Error, Home, Location, Outcome, Request, Resolution, VibeResult};
use vibenav::api::model::VibeReport;

fn transport_error() -> Error {
    Error::Config("connection refused".to_string())
}

fn found(summary: &str, tags: &[&str]) -> VibeResult {
    VibeResult::Found(VibeReport {
        summary: summary.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        ..Default::default()
    })
}

#[test]
fn test_blank_query_does_nothing() {
    let mut home = Home::new();

    assert!(home.search_by_name("").is_none());
    assert!(home.search_by_name("   \t ").is_none());

    home.set_query("  ");
    assert!(home.submit_form().is_none());

    assert!(!home.is_loading());
    assert_eq!(home.searched_label(), "");
    assert!(home.result().is_none());
    assert!(home.suggestions().is_none());
}

#[test]
fn test_name_search_loading_lifecycle() {
    let mut home = Home::new();

    let ticket = home.search_by_name("India Gate").unwrap();
    assert_eq!(ticket.request, Request::Vibe("India Gate".to_string()));
    assert!(home.is_loading());
    assert_eq!(home.searched_label(), "India Gate");
    assert!(home.result().is_none());

    let resolution = home.resolve(ticket.seq, Outcome::Vibe(Ok(found("Grand lawns", &["monumental"]))));
    assert_eq!(resolution, Resolution::Applied);
    assert!(!home.is_loading());
    assert_eq!(home.result(), Some(&found("Grand lawns", &["monumental"])));
}

#[test]
fn test_name_search_failure_shows_connection_error() {
    let mut home = Home::new();

    let ticket = home.search_by_name("Hauz Khas").unwrap();
    home.resolve(ticket.seq, Outcome::Vibe(Err(transport_error())));

    assert!(!home.is_loading());
    assert_eq!(home.result(), Some(&VibeResult::error(CONNECTION_ERROR)));
    assert!(home.suggestions().is_none());
}

#[test]
fn test_marker_selection_matches_typed_search() {
    let mut typed = Home::new();
    typed.set_query("India Gate");
    let typed_ticket = typed.submit_form().unwrap();

    let mut clicked = Home::new();
    let clicked_ticket = clicked.select_marker("India Gate").unwrap();

    assert_eq!(clicked.query_text(), "India Gate");
    assert_eq!(clicked.searched_label(), "India Gate");
    assert_eq!(clicked_ticket.request, typed_ticket.request);
    assert!(clicked.is_loading());
}

#[test]
fn test_tag_search_replaces_card_with_suggestions() {
    let mut home = Home::new();

    let ticket = home.search_by_name("Lodhi Garden").unwrap();
    home.resolve(ticket.seq, Outcome::Vibe(Ok(found("Leafy", &["green"]))));
    assert!(home.result().is_some());

    let ticket = home.search_by_tag("cozy");
    assert_eq!(ticket.request, Request::LocationsByVibe("cozy".to_string()));
    assert_eq!(home.searched_label(), "Vibe: cozy");
    assert!(home.result().is_none());
    assert!(home.is_loading());

    home.resolve(ticket.seq, Outcome::LocationsByVibe(Ok(Vec::new())));
    assert!(!home.is_loading());
    assert_eq!(home.suggestions().map(|s| s.len()), Some(0));
    assert!(home.result().is_none());
}

#[test]
fn test_name_search_clears_suggestions() {
    let mut home = Home::new();

    let ticket = home.search_by_tag("quiet");
    home.resolve(
        ticket.seq,
        Outcome::LocationsByVibe(Ok(vec!["Sunder Nursery".to_string()])),
    );
    assert!(home.suggestions().is_some());

    let ticket = home.select_suggestion(0).unwrap();
    assert_eq!(ticket.request, Request::Vibe("Sunder Nursery".to_string()));
    assert!(home.suggestions().is_none());
    assert!(home.result().is_none());
}

#[test]
fn test_select_suggestion_out_of_range() {
    let mut home = Home::new();
    assert!(home.select_suggestion(0).is_none());

    let ticket = home.search_by_tag("quiet");
    home.resolve(ticket.seq, Outcome::LocationsByVibe(Ok(vec!["A".to_string()])));
    assert!(home.select_suggestion(3).is_none());
    assert!(!home.is_loading());
}

#[test]
fn test_tag_search_failure_is_shown() {
    let mut home = Home::new();

    let ticket = home.search_by_tag("lively");
    home.resolve(ticket.seq, Outcome::LocationsByVibe(Err(transport_error())));

    assert!(!home.is_loading());
    assert!(home.suggestions().is_none());
    assert_eq!(home.result(), Some(&VibeResult::error(tag_error_message("lively"))));
}

#[test]
fn test_stale_response_is_discarded() {
    let mut home = Home::new();

    let slow = home.search_by_name("Connaught Place").unwrap();
    let fast = home.search_by_name("Khan Market").unwrap();
    assert!(fast.seq > slow.seq);

    let applied = home.resolve(fast.seq, Outcome::Vibe(Ok(found("Upscale", &["chic"]))));
    assert_eq!(applied, Resolution::Applied);

    let stale = home.resolve(slow.seq, Outcome::Vibe(Ok(found("Busy", &["bustling"]))));
    assert_eq!(stale, Resolution::Stale);
    assert_eq!(home.result(), Some(&found("Upscale", &["chic"])));
    assert_eq!(home.searched_label(), "Khan Market");
}

#[test]
fn test_stale_response_keeps_loading() {
    let mut home = Home::new();

    let first = home.search_by_name("Red Fort").unwrap();
    let second = home.search_by_tag("historic");

    assert_eq!(
        home.resolve(first.seq, Outcome::Vibe(Err(transport_error()))),
        Resolution::Stale
    );
    assert!(home.is_loading());
    assert!(home.result().is_none());

    home.resolve(second.seq, Outcome::LocationsByVibe(Ok(vec!["Red Fort".to_string()])));
    assert!(!home.is_loading());
}

#[test]
fn test_locations_load_once() {
    let mut home = Home::new();
    let ticket = home.initialize();
    assert_eq!(ticket.request, Request::Locations);

    let locations = vec![
        Location::new("India Gate", 28.6129, 77.2295),
        Location::new("Lodhi Garden", 28.5931, 77.2197),
    ];
    home.resolve(ticket.seq, Outcome::Locations(Ok(locations.clone())));
    assert_eq!(home.all_locations(), locations.as_slice());

    // Replaying the same ticket does nothing
    assert_eq!(
        home.resolve(ticket.seq, Outcome::Locations(Ok(Vec::new()))),
        Resolution::Stale
    );
    assert_eq!(home.all_locations().len(), 2);
}

#[test]
fn test_locations_failure_is_not_fatal() {
    let mut home = Home::new();
    let ticket = home.initialize();

    home.resolve(ticket.seq, Outcome::Locations(Err(transport_error())));
    assert!(home.all_locations().is_empty());
    assert!(home.result().is_none());
    assert!(!home.is_loading());
}

#[test]
fn test_locations_do_not_interfere_with_search() {
    let mut home = Home::new();
    let init = home.initialize();
    let search = home.search_by_name("Dilli Haat").unwrap();

    home.resolve(init.seq, Outcome::Locations(Ok(vec![Location::new("Dilli Haat", 28.57, 77.21)])));
    assert!(home.is_loading());

    home.resolve(search.seq, Outcome::Vibe(Ok(found("Crafty", &["creative"]))));
    assert!(!home.is_loading());
    assert_eq!(home.all_locations().len(), 1);
}

#[test]
fn test_query_editing() {
    let mut home = Home::new();
    for c in "Cafe".chars() {
        home.push_char(c);
    }
    home.pop_char();
    assert_eq!(home.query_text(), "Caf");
    home.clear_query();
    assert_eq!(home.query_text(), "");
}
