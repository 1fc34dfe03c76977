pub mod config;
pub mod delete;
pub mod duration;
pub mod error;
pub mod host;
pub mod layout;
pub mod model;
pub mod payload;
pub mod render;
pub mod search;
pub mod views;

pub use config::AppConfig;
pub use delete::{DeleteAction, DeleteOutcome};
pub use error::RecipeError;
pub use host::{Host, TerminalHost};
pub use model::Recipe;
pub use views::{CardListView, DetailView};

use log::debug;

use crate::model::decode_list;
use crate::payload::{read_input, LIST_PAYLOAD_ID};
use crate::render::cards::{cards_document, render_grid};
use crate::search::SearchIndex;

/// Recipes from a card list payload matching `query`, best first.
///
/// A blank query returns every recipe in its original order.
pub fn search_recipes(
    input: &str,
    query: &str,
    config: &AppConfig,
) -> Result<Vec<Recipe>, RecipeError> {
    let recipes = decode_list(&read_input(input, LIST_PAYLOAD_ID)?)?;
    Ok(ranked(recipes, query, config))
}

/// Render the card list document for a payload, filtered by `query`
pub fn render_cards(input: &str, query: &str, config: &AppConfig) -> Result<String, RecipeError> {
    let payload = read_input(input, LIST_PAYLOAD_ID)?;
    let matches = ranked(decode_list(&payload)?, query, config);
    let visible: Vec<&Recipe> = matches.iter().collect();
    let grid = render_grid(&visible, query.trim(), &config.site);
    Ok(cards_document(&grid, query.trim(), &payload))
}

fn ranked(recipes: Vec<Recipe>, query: &str, config: &AppConfig) -> Vec<Recipe> {
    let query = query.trim();
    if query.is_empty() {
        return recipes;
    }

    let hits = SearchIndex::new(&recipes, &config.search).search(query);
    debug!("'{}' matched {} of {} recipes", query, hits.len(), recipes.len());

    let mut slots: Vec<Option<Recipe>> = recipes.into_iter().map(Some).collect();
    hits.into_iter()
        .filter_map(|hit| slots[hit.index].take())
        .collect()
}
