use serde_json::Value;

use super::{attr, json_for_script_tag, text};
use crate::config::SiteConfig;
use crate::model::Recipe;

/// Responsive column classes of a card wrapper; the layout engine derives
/// its column count from the same breakpoints.
pub const CARD_CLASSES: &str = "col-12 col-md-6 col-lg-4 col-xl-3";

/// Contents of the `card-container` element
#[derive(Debug, Clone, PartialEq)]
pub enum CardGrid {
    /// One card per recipe, in display order
    Cards(Vec<String>),
    /// Placeholder shown when a search matched nothing
    Empty(String),
}

impl CardGrid {
    pub fn is_empty(&self) -> bool {
        matches!(self, CardGrid::Empty(_))
    }

    pub fn to_html(&self) -> String {
        match self {
            CardGrid::Cards(cards) => cards.concat(),
            CardGrid::Empty(message) => format!(
                r#"<span style="margin: auto; margin-top: 10px;">{}</span>"#,
                text(message)
            ),
        }
    }
}

/// Placeholder text for a search with zero results
pub fn no_results_message(query: &str) -> String {
    format!("No cards found for \"{query}\"")
}

/// Build the grid for a list of recipes; `query` only feeds the empty-state text
pub fn render_grid(recipes: &[&Recipe], query: &str, site: &SiteConfig) -> CardGrid {
    if recipes.is_empty() {
        return CardGrid::Empty(no_results_message(query));
    }
    CardGrid::Cards(recipes.iter().map(|r| card_html(r, site)).collect())
}

/// A single card tile
pub fn card_html(recipe: &Recipe, site: &SiteConfig) -> String {
    let image = recipe
        .image
        .as_deref()
        .map(|src| {
            format!(
                r#"
        <img src="{}" class="card-img-top" alt="{}">"#,
                attr(src),
                attr(&recipe.name)
            )
        })
        .unwrap_or_default();

    format!(
        r#"<div class="{classes}">
    <div class="card card-custom">{image}
        <div class="card-body">
            <h5 class="card-title">{name}</h5>
            <p class="card-text">Source: <a class="source-link" href="{url}">{publisher}</a></p>
            <form class="delete-form">
                <input type="hidden" name="recipe_route" value="{id}">
                <button type="submit" class="btn delete-button card-btn">Delete</button>
            </form>
            <a href="{link}" class="stretched-link"></a>
        </div>
    </div>
</div>
"#,
        classes = CARD_CLASSES,
        image = image,
        name = text(&recipe.name),
        url = attr(&recipe.url),
        publisher = text(&recipe.publisher),
        id = attr(&recipe.id),
        link = attr(&site.recipe_link(&recipe.id)),
    )
}

/// Full card list document: search box, grid container and the embedded payload
pub fn cards_document(grid: &CardGrid, query: &str, payload: &Value) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Recipes</title>
</head>
<body>
  <main class="container">
    <input type="search" id="search-bar" class="form-control" placeholder="Search recipes" value="{query}">
    <div id="card-container" class="row">
{grid}
    </div>
  </main>
  <script type="application/json" id="data">{payload}</script>
</body>
</html>
"#,
        query = attr(query),
        grid = grid.to_html(),
        payload = json_for_script_tag(payload),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    fn sample() -> Recipe {
        Recipe {
            id: "pancakes-a1b2c3".to_string(),
            name: "Fluffy Pancakes".to_string(),
            url: "https://example.com/pancakes".to_string(),
            publisher: "Example Kitchen".to_string(),
            image: Some("https://example.com/pancakes.jpg".to_string()),
            ..Default::default()
        }
    }

    fn select<'a>(html: &'a Html, css: &str) -> Vec<scraper::ElementRef<'a>> {
        let selector = Selector::parse(css).unwrap();
        html.select(&selector).collect()
    }

    #[test]
    fn test_card_contents() {
        let html = Html::parse_fragment(&card_html(&sample(), &SiteConfig::default()));

        let img = select(&html, "img.card-img-top");
        assert_eq!(img[0].value().attr("src"), Some("https://example.com/pancakes.jpg"));
        assert_eq!(img[0].value().attr("alt"), Some("Fluffy Pancakes"));

        let title = select(&html, ".card-title");
        assert_eq!(title[0].text().collect::<String>(), "Fluffy Pancakes");

        let source = select(&html, "a.source-link");
        assert_eq!(source[0].value().attr("href"), Some("https://example.com/pancakes"));
        assert_eq!(source[0].text().collect::<String>(), "Example Kitchen");

        let hidden = select(&html, "input[name=recipe_route]");
        assert_eq!(hidden[0].value().attr("value"), Some("pancakes-a1b2c3"));

        // submission is always intercepted and sent as JSON
        let form = select(&html, "form.delete-form");
        assert_eq!(form[0].value().attr("method"), None);
        assert_eq!(form[0].value().attr("action"), None);

        let link = select(&html, "a.stretched-link");
        assert_eq!(link[0].value().attr("href"), Some("/recipe/pancakes-a1b2c3"));
    }

    #[test]
    fn test_card_without_image_has_no_img() {
        let recipe = Recipe {
            image: None,
            ..sample()
        };
        let html = Html::parse_fragment(&card_html(&recipe, &SiteConfig::default()));
        assert!(select(&html, "img").is_empty());
    }

    #[test]
    fn test_card_escapes_markup() {
        let recipe = Recipe {
            name: "<script>alert(1)</script>".to_string(),
            ..sample()
        };
        let html = card_html(&recipe, &SiteConfig::default());
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_empty_grid_mentions_query() {
        let grid = render_grid(&[], "unicorn stew", &SiteConfig::default());
        assert!(grid.is_empty());
        assert!(grid
            .to_html()
            .contains("No cards found for \"unicorn stew\""));
    }

    #[test]
    fn test_document_embeds_payload() {
        let recipe = sample();
        let grid = render_grid(&[&recipe], "", &SiteConfig::default());
        let payload = serde_json::json!([{"name": "Fluffy Pancakes"}]);
        let doc = cards_document(&grid, "", &payload);

        let value = crate::payload::read_embedded(&doc, crate::payload::LIST_PAYLOAD_ID).unwrap();
        assert_eq!(value, payload);

        let html = Html::parse_document(&doc);
        assert_eq!(select(&html, "#card-container .card").len(), 1);
        assert_eq!(select(&html, "#search-bar").len(), 1);
    }
}
