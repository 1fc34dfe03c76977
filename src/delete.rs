use log::{info, warn};
use reqwest::{Client, StatusCode};
use serde::Serialize;

use crate::config::SiteConfig;
use crate::error::RecipeError;
use crate::host::Host;

/// Confirmation asked from a card in the list
pub const CONFIRM_CARD_DELETE: &str = "Are you sure you want to delete recipe?";
/// Confirmation asked from the detail page
pub const CONFIRM_RECIPE_DELETE: &str = "Are you sure you want to delete this recipe?";
/// Alert shown when the server refuses or cannot be reached
pub const DELETE_FAILED: &str = "Failed to delete recipe";

#[derive(Debug, Serialize)]
struct RemoveRequest<'a> {
    recipe_route: &'a str,
}

/// How a delete attempt ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The user declined; nothing was sent
    Cancelled,
    /// The server accepted and the host navigated to the listing
    Deleted,
    /// The request failed and the user was alerted
    Failed,
}

/// Confirm, post `{"recipe_route": ..}` to the remove endpoint, then redirect or alert.
///
/// Failures are not retried and nothing is rolled back.
pub struct DeleteAction {
    client: Client,
    endpoint: String,
    listing_path: String,
}

impl DeleteAction {
    pub fn new(site: &SiteConfig) -> Result<Self, RecipeError> {
        let client = Client::builder()
            .user_agent(concat!("recipe-cards/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            endpoint: site.remove_url(),
            listing_path: site.listing_path.clone(),
        })
    }

    pub async fn run<H: Host + ?Sized>(&self, host: &H, route: &str, prompt: &str) -> DeleteOutcome {
        if !host.confirm(prompt) {
            info!("Delete of '{}' cancelled", route);
            return DeleteOutcome::Cancelled;
        }

        match self.post(route).await {
            Ok(status) if status.is_success() => {
                info!("Deleted '{}'", route);
                host.navigate(&self.listing_path);
                DeleteOutcome::Deleted
            }
            Ok(status) => {
                warn!("Delete of '{}' rejected with {}", route, status);
                host.alert(DELETE_FAILED);
                DeleteOutcome::Failed
            }
            Err(e) => {
                warn!("Delete of '{}' failed: {}", route, e);
                host.alert(DELETE_FAILED);
                DeleteOutcome::Failed
            }
        }
    }

    async fn post(&self, route: &str) -> Result<StatusCode, reqwest::Error> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&RemoveRequest {
                recipe_route: route,
            })
            .send()
            .await?;
        Ok(response.status())
    }
}
