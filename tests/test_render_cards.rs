use recipe_cards::{render_cards, search_recipes, AppConfig};
use scraper::{Html, Selector};

const LISTING: &str = r#"[
    {"@id": "pad-thai-1a2b3c", "name": "Pad Thai", "url": "https://example.com/pad-thai",
     "publisher": {"name": "Hot Thai Kitchen"}, "image": "https://example.com/pad-thai.jpg",
     "recipeIngredient": ["rice noodles", "tamarind"], "recipeInstructions": ["Soak", "Fry"]},
    {"@id": "scones-4d5e6f", "name": "Cream Scones &amp; Jam", "url": "https://example.com/scones",
     "publisher": {"name": "Bake School"},
     "recipeIngredient": ["flour", "cream"], "recipeInstructions": ["Mix", "Bake"]}
]"#;

#[test]
fn test_search_over_bare_json() {
    let config = AppConfig::default();

    let all = search_recipes(LISTING, "", &config).unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[1].name, "Cream Scones & Jam");

    let hits = search_recipes(LISTING, "tamarind", &config).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, "pad-thai-1a2b3c");
}

#[test]
fn test_search_reads_listing_page() {
    let page = format!(
        r#"<html><body><script type="application/json" id="data">{LISTING}</script></body></html>"#
    );
    let hits = search_recipes(&page, "scones", &AppConfig::default()).unwrap();
    assert_eq!(hits[0].id, "scones-4d5e6f");
}

#[test]
fn test_rendered_cards_link_to_recipe_pages() {
    let doc = render_cards(LISTING, "", &AppConfig::default()).unwrap();
    let html = Html::parse_document(&doc);

    let links = Selector::parse("#card-container a").unwrap();
    let hrefs: Vec<&str> = html
        .select(&links)
        .filter_map(|a| a.value().attr("href"))
        .collect();
    assert!(hrefs.contains(&"/recipe/pad-thai-1a2b3c"));
    assert!(hrefs.contains(&"/recipe/scones-4d5e6f"));

    let images = Selector::parse("#card-container img").unwrap();
    assert_eq!(html.select(&images).count(), 1);
}

#[test]
fn test_rendered_empty_state_keeps_query() {
    let doc = render_cards(LISTING, "  zzzzqqq ", &AppConfig::default()).unwrap();
    assert!(doc.contains(r#"No cards found for "zzzzqqq""#));
}

#[test]
fn test_object_payload_is_rejected() {
    assert!(search_recipes(r#"{"name": "Solo"}"#, "", &AppConfig::default()).is_err());
}
