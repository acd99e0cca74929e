use vibenav::ui::card::{default_not_found_message, TagIcon, Theme, MAX_TAG_ICONS};
use vibenav::{VibeCard, VibeResult};

fn card(json: &str, label: &str) -> VibeCard {
    VibeCard::new(VibeResult::from_json(json).unwrap(), label)
}

#[test]
fn test_error_panel() {
    let card = card(r#"{"error": "X"}"#, "Somewhere");
    let text = card.plain_text();

    assert!(text.contains("X"));
    assert!(text.contains("Something went wrong"));
    assert_eq!(card.theme(), None);
    assert!(card.icons().is_empty());
    assert!(!card.has_citations());
}

#[test]
fn test_error_panel_shows_raw_response() {
    let card = card(
        r#"{"error": "Failed to parse the vibe summary from the AI.", "raw_response": "not json"}"#,
        "Cafe",
    );
    let text = card.plain_text();
    assert!(text.contains("Failed to parse the vibe summary from the AI."));
    assert!(text.contains("not json"));
}

#[test]
fn test_not_found_lists_suggestions_in_order() {
    let card = card(r#"{"status": "not_found", "suggestions": ["A", "B"]}"#, "Nowhere");
    let text = card.plain_text();

    let bullets: Vec<&str> = text.lines().filter(|l| l.starts_with("• ")).collect();
    assert_eq!(bullets, vec!["• A", "• B"]);
    assert!(text.contains(&default_not_found_message("Nowhere")));
    assert_eq!(card.theme(), None);
}

#[test]
fn test_not_found_uses_backend_message() {
    let card = card(
        r#"{"status": "not_found", "message": "I couldn't find specific reviews for 'Nowhere'."}"#,
        "Nowhere",
    );
    let text = card.plain_text();

    assert!(text.contains("I couldn't find specific reviews for 'Nowhere'."));
    assert!(!text.contains("Did you mean"));
}

#[test]
fn test_found_card_with_citations_toggle() {
    let mut card = card(
        r#"{"summary": "S", "tags": ["cozy", "quiet"], "citations": ["r1", "r2"]}"#,
        "The Cozy Mug Cafe",
    );

    assert_eq!(card.theme(), Some(Theme::Amber));
    assert!(card.has_citations());
    assert!(!card.show_citations());

    let hidden = card.plain_text();
    assert!(hidden.contains("Show Source Reviews"));
    assert!(!hidden.contains("\"r1\""));

    assert!(card.toggle_citations());
    let shown = card.plain_text();
    assert!(shown.contains("Hide Source Reviews"));
    let quoted: Vec<&str> = shown.lines().filter(|l| l.starts_with("• \"")).collect();
    assert_eq!(quoted, vec!["• \"r1\"", "• \"r2\""]);

    assert!(!card.toggle_citations());
    assert!(!card.plain_text().contains("\"r1\""));
}

#[test]
fn test_new_card_starts_collapsed() {
    let json = r#"{"summary": "S", "tags": ["cozy"], "citations": ["r1"]}"#;
    let mut first = card(json, "A");
    first.toggle_citations();
    assert!(first.show_citations());

    let second = card(json, "A");
    assert!(!second.show_citations());
}

#[test]
fn test_no_citations_means_no_toggle() {
    let mut card = card(r#"{"summary": "S", "tags": ["lively"], "citations": []}"#, "Market");
    assert!(!card.toggle_citations());
    assert!(!card.plain_text().contains("Source Reviews"));
}

#[test]
fn test_empty_tags_fall_back_to_neutral() {
    let card = card(r#"{"summary": "Nothing much", "tags": []}"#, "Empty Lot");
    assert_eq!(card.theme(), Some(Theme::Neutral));
    assert!(card.icons().is_empty());
    assert!(card.plain_text().contains("Nothing much"));

    assert_eq!(Theme::for_tags(&[]), Theme::Neutral);
}

#[test]
fn test_theme_uses_first_tag_only() {
    let tags = |list: &[&str]| list.iter().map(|t| t.to_string()).collect::<Vec<_>>();

    assert_eq!(Theme::for_tags(&tags(&[" Lively ", "cozy"])), Theme::WarmYellow);
    assert_eq!(Theme::for_tags(&tags(&["HISTORIC"])), Theme::Amber);
    assert_eq!(Theme::for_tags(&tags(&["tranquil"])), Theme::Emerald);
    assert_eq!(Theme::for_tags(&tags(&["patriotic"])), Theme::Blue);
    assert_eq!(Theme::for_tags(&tags(&["quiet", "cozy"])), Theme::Neutral);
}

#[test]
fn test_icons_limited_to_first_four_tags() {
    let card = card(
        r#"{"summary": "S", "tags": ["cozy", "Festive", "mysterious", "quiet", "grand", "rustic"]}"#,
        "Place",
    );

    assert_eq!(
        card.icons(),
        vec![TagIcon::Coffee, TagIcon::Party, TagIcon::Sparkles, TagIcon::Muted]
    );
    assert_eq!(card.icons().len(), MAX_TAG_ICONS);

    // Every tag still shows as a pill
    let text = card.plain_text();
    for tag in ["cozy", "Festive", "mysterious", "quiet", "grand", "rustic"] {
        assert!(text.contains(&format!(" {} ", tag)), "missing pill for {}", tag);
    }
}

#[test]
fn test_icon_table_is_many_to_one() {
    assert_eq!(TagIcon::for_tag("green"), TagIcon::for_tag("serene"));
    assert_eq!(TagIcon::for_tag("crowded"), TagIcon::Users);
    assert_eq!(TagIcon::for_tag("bustling"), TagIcon::Users);
    assert_eq!(TagIcon::for_tag("something-new"), TagIcon::Sparkles);
}

#[test]
fn test_found_card_shows_dimensions_and_emojis() {
    let card = card(
        r#"{
            "status": "found",
            "summary": "Loud and fun",
            "tags": ["lively"],
            "emojis": ["🎶", "🍻"],
            "vibe_dimensions": {"ambience": "neon-lit", "crowd": "students", "noise_level": "loud"}
        }"#,
        "Hauz Khas Village",
    );
    let text = card.plain_text();

    assert!(text.starts_with("Hauz Khas Village"));
    assert!(text.contains("🎶 🍻"));
    assert!(text.contains("Ambience: neon-lit"));
    assert!(text.contains("Crowd: students"));
    assert!(text.contains("Noise: loud"));
}
