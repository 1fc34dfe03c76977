use log::debug;
use serde_json::Value;
use std::sync::Arc;

use crate::config::{AppConfig, SiteConfig};
use crate::delete::{DeleteAction, DeleteOutcome, CONFIRM_CARD_DELETE};
use crate::error::RecipeError;
use crate::host::Host;
use crate::layout::{ImageLoader, LayoutController, Masonry};
use crate::model::{decode_list, Recipe};
use crate::payload::{read_embedded, LIST_PAYLOAD_ID};
use crate::render::cards::{cards_document, render_grid, CardGrid};
use crate::search::SearchIndex;

/// The card list page: a masonry grid of recipes filtered by a search box
pub struct CardListView {
    recipes: Vec<Recipe>,
    payload: Value,
    index: SearchIndex,
    site: SiteConfig,
    layout: LayoutController,
    delete: DeleteAction,
    grid: CardGrid,
    query: String,
    shown: Vec<usize>,
}

impl CardListView {
    /// Build the view from the recipe array payload
    pub fn new(
        payload: Value,
        config: &AppConfig,
        loader: Arc<dyn ImageLoader>,
        container_width: u32,
    ) -> Result<Self, RecipeError> {
        let recipes = decode_list(&payload)?;
        let index = SearchIndex::new(&recipes, &config.search);

        Ok(Self {
            recipes,
            payload,
            index,
            site: config.site.clone(),
            layout: LayoutController::new(loader, config.layout.clone(), container_width),
            delete: DeleteAction::new(&config.site)?,
            grid: CardGrid::Cards(Vec::new()),
            query: String::new(),
            shown: Vec::new(),
        })
    }

    /// Build the view from a host page carrying the payload in `#data`
    pub fn from_page(
        html: &str,
        config: &AppConfig,
        loader: Arc<dyn ImageLoader>,
        container_width: u32,
    ) -> Result<Self, RecipeError> {
        Self::new(read_embedded(html, LIST_PAYLOAD_ID)?, config, loader, container_width)
    }

    /// Initial render of every card
    pub async fn load(&mut self) -> &CardGrid {
        let all: Vec<usize> = (0..self.recipes.len()).collect();
        self.show(all, String::new()).await
    }

    /// React to the search box changing
    pub async fn on_search_input(&mut self, input: &str) -> &CardGrid {
        let query = input.trim();
        let matches = if query.is_empty() {
            (0..self.recipes.len()).collect()
        } else {
            self.index.search(query).into_iter().map(|hit| hit.index).collect()
        };
        self.show(matches, query.to_string()).await
    }

    /// Delete the recipe behind a card's form
    pub async fn on_delete_submit<H: Host + ?Sized>(&self, host: &H, route: &str) -> DeleteOutcome {
        self.delete.run(host, route, CONFIRM_CARD_DELETE).await
    }

    async fn show(&mut self, indices: Vec<usize>, query: String) -> &CardGrid {
        let visible: Vec<&Recipe> = indices.iter().map(|&i| &self.recipes[i]).collect();
        let grid = render_grid(&visible, &query, &self.site);

        if grid.is_empty() {
            self.layout.clear();
        } else {
            let sources: Vec<Option<String>> = visible.iter().map(|r| r.image.clone()).collect();
            self.layout.relayout(&sources).await;
        }

        debug!("Showing {} of {} cards", indices.len(), self.recipes.len());
        self.grid = grid;
        self.query = query;
        self.shown = indices;
        &self.grid
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    /// Recipes currently in the grid, in display order
    pub fn visible(&self) -> impl Iterator<Item = &Recipe> {
        self.shown.iter().map(|&i| &self.recipes[i])
    }

    pub fn grid(&self) -> &CardGrid {
        &self.grid
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn layout(&self) -> Option<&Masonry> {
        self.layout.current()
    }

    /// Number of grids destroyed by re-layouts so far
    pub fn destroyed_layouts(&self) -> usize {
        self.layout.destroyed()
    }

    pub fn to_html(&self) -> String {
        cards_document(&self.grid, &self.query, &self.payload)
    }
}
