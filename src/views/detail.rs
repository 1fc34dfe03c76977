use log::debug;
use serde_json::Value;

use crate::config::AppConfig;
use crate::delete::{DeleteAction, DeleteOutcome, CONFIRM_RECIPE_DELETE};
use crate::error::RecipeError;
use crate::host::Host;
use crate::model::{decode_recipe, Recipe};
use crate::payload::{read_embedded, RECIPE_PAYLOAD_ID};
use crate::render::detail::{Chrome, DetailPage, TimeBlock};

const INGREDIENTS_PANEL: &str = ".recipe-ingredients";
const ADDITIONAL_TIME: &str = ".additional-time";

/// The detail page of a single recipe
pub struct DetailView {
    recipe: Recipe,
    page: DetailPage,
    payload: Value,
    chrome: Chrome,
    delete: DeleteAction,
}

/// Drops the `container` class from `main` while alive
struct PrintLayout<'a> {
    chrome: &'a mut Chrome,
}

impl<'a> PrintLayout<'a> {
    fn new(chrome: &'a mut Chrome) -> Self {
        chrome.contained = false;
        Self { chrome }
    }
}

impl Drop for PrintLayout<'_> {
    fn drop(&mut self) {
        self.chrome.contained = true;
    }
}

impl DetailView {
    /// Build the view from a single recipe payload
    pub fn new(payload: Value, config: &AppConfig) -> Result<Self, RecipeError> {
        let recipe = decode_recipe(&payload)?;
        let page = DetailPage::from_recipe(&recipe);

        Ok(Self {
            recipe,
            page,
            payload,
            chrome: Chrome::default(),
            delete: DeleteAction::new(&config.site)?,
        })
    }

    /// Build the view from a host page carrying the payload in `#recipe`
    pub fn from_page(html: &str, config: &AppConfig) -> Result<Self, RecipeError> {
        Self::new(read_embedded(html, RECIPE_PAYLOAD_ID)?, config)
    }

    /// Post-render pass: add the fade cue when the ingredients overflow the viewport
    pub fn mount<H: Host + ?Sized>(&mut self, host: &H) {
        let panel = host.element_height(INGREDIENTS_PANEL);
        let viewport = host.viewport_height();
        self.chrome.scroll_fade = panel >= viewport;
        debug!(
            "Ingredients panel {}px, viewport {}px, fade: {}",
            panel, viewport, self.chrome.scroll_fade
        );
    }

    /// The image visibility switch changed
    pub fn on_image_check(&mut self, checked: bool) {
        if self.page.has_image_toggle() {
            self.chrome.image_visible = checked;
        }
    }

    /// Click on the total time line: expand or collapse the breakdown
    pub fn on_times_click<H: Host + ?Sized>(&mut self, host: &H) {
        let has_breakdown = matches!(
            self.page.meta.as_ref().and_then(|m| m.time.as_ref()),
            Some(TimeBlock::Breakdown { .. })
        );
        if !has_breakdown {
            return;
        }

        self.chrome.times_max_height = match self.chrome.times_max_height {
            None => Some(host.element_height(ADDITIONAL_TIME)),
            Some(_) => None,
        };
    }

    /// Print the page without the width constraint on `main`
    pub fn on_print<H: Host + ?Sized>(&mut self, host: &H) {
        let layout = PrintLayout::new(&mut self.chrome);
        let document = self.page.document(&*layout.chrome, &self.payload);
        host.print(&document);
    }

    pub async fn on_delete<H: Host + ?Sized>(&self, host: &H) -> DeleteOutcome {
        self.delete
            .run(host, &self.recipe.id, CONFIRM_RECIPE_DELETE)
            .await
    }

    pub fn recipe(&self) -> &Recipe {
        &self.recipe
    }

    pub fn page(&self) -> &DetailPage {
        &self.page
    }

    pub fn chrome(&self) -> &Chrome {
        &self.chrome
    }

    pub fn to_html(&self) -> String {
        self.page.document(&self.chrome, &self.payload)
    }
}
