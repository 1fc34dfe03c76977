use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Top-level configuration for both views
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    /// Server routes the views link to and post against
    #[serde(default)]
    pub site: SiteConfig,
    /// Fuzzy search tuning for the card list
    #[serde(default)]
    pub search: SearchConfig,
    /// Masonry grid settings
    #[serde(default)]
    pub layout: LayoutConfig,
}

/// Routes on the server that hosts the pages
#[derive(Debug, Deserialize, Clone)]
pub struct SiteConfig {
    /// Origin used for outgoing requests (e.g. "http://localhost:5000")
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Endpoint accepting `{"recipe_route": ...}` delete requests
    #[serde(default = "default_remove_endpoint")]
    pub remove_endpoint: String,
    /// Page to navigate to after a successful delete
    #[serde(default = "default_listing_path")]
    pub listing_path: String,
    /// Prefix of the detail page route, followed by `/<@id>`
    #[serde(default = "default_recipe_path")]
    pub recipe_path: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            remove_endpoint: default_remove_endpoint(),
            listing_path: default_listing_path(),
            recipe_path: default_recipe_path(),
        }
    }
}

impl SiteConfig {
    /// Absolute URL of the delete endpoint
    pub fn remove_url(&self) -> String {
        join_url(&self.base_url, &self.remove_endpoint)
    }

    /// Relative link to the detail page of a recipe
    pub fn recipe_link(&self, id: &str) -> String {
        format!("{}/{}", self.recipe_path.trim_end_matches('/'), id)
    }
}

/// Fuzzy search options
#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    /// Match looseness: 0.0 requires an exact match, 1.0 matches anything
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    /// How far from `location` a match may start before it scores 1.0
    #[serde(default = "default_distance")]
    pub distance: usize,
    /// Expected position of a match inside a field
    #[serde(default)]
    pub location: usize,
    /// Dotted key paths that are searched
    #[serde(default = "default_keys")]
    pub keys: Vec<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            distance: default_distance(),
            location: 0,
            keys: default_keys(),
        }
    }
}

/// Masonry layout options
#[derive(Debug, Deserialize, Clone)]
pub struct LayoutConfig {
    /// Report horizontal positions as percentages of the container width
    #[serde(default = "default_percent_position")]
    pub percent_position: bool,
    /// Height in pixels of the card text below the image
    #[serde(default = "default_card_body_height")]
    pub card_body_height: u32,
    /// Width / height ratio assumed for images that report no dimensions
    #[serde(default = "default_aspect_ratio")]
    pub default_aspect_ratio: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            percent_position: default_percent_position(),
            card_body_height: default_card_body_height(),
            default_aspect_ratio: default_aspect_ratio(),
        }
    }
}

// Default value functions
fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_remove_endpoint() -> String {
    "/remove-card".to_string()
}

fn default_listing_path() -> String {
    "/cards".to_string()
}

fn default_recipe_path() -> String {
    "/recipe".to_string()
}

fn default_threshold() -> f64 {
    0.4
}

fn default_distance() -> usize {
    100
}

fn default_keys() -> Vec<String> {
    [
        "name",
        "description",
        "recipeIngredient",
        "keywords",
        "recipeCuisine",
        "recipeCategory",
        "author.name",
        "publisher.name",
    ]
    .iter()
    .map(|k| k.to_string())
    .collect()
}

fn default_percent_position() -> bool {
    true
}

fn default_card_body_height() -> u32 {
    120
}

fn default_aspect_ratio() -> f64 {
    4.0 / 3.0
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

impl AppConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Load configuration from file and environment variables
///
/// Configuration is loaded with the following priority (highest to lowest):
/// 1. Environment variables with RECIPE_CARDS__ prefix
/// 2. recipe-cards.toml file in current directory
/// 3. Default values
///
/// Environment variable format: RECIPE_CARDS__SITE__BASE_URL
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("recipe-cards").required(false))
        .add_source(
            Environment::with_prefix("RECIPE_CARDS")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = AppConfig::default();
        assert_eq!(config.site.remove_endpoint, "/remove-card");
        assert_eq!(config.site.listing_path, "/cards");
        assert_eq!(config.search.threshold, 0.4);
        assert_eq!(config.search.distance, 100);
        assert_eq!(config.search.location, 0);
        assert_eq!(config.search.keys.len(), 8);
        assert!(config.layout.percent_position);
        assert_eq!(config.layout.card_body_height, 120);
    }

    #[test]
    fn test_remove_url_joins_slashes() {
        let site = SiteConfig {
            base_url: "http://127.0.0.1:1234/".to_string(),
            ..SiteConfig::default()
        };
        assert_eq!(site.remove_url(), "http://127.0.0.1:1234/remove-card");
    }

    #[test]
    fn test_recipe_link() {
        let site = SiteConfig::default();
        assert_eq!(site.recipe_link("pancakes-1a2b3c"), "/recipe/pancakes-1a2b3c");
    }

    #[test]
    fn test_deserialize_partial_sections() {
        let config: AppConfig = Config::builder()
            .add_source(config::File::from_str(
                "[search]\nthreshold = 0.2\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.search.threshold, 0.2);
        assert_eq!(config.search.distance, 100);
        assert_eq!(config.site.listing_path, "/cards");
    }

    #[test]
    fn test_layout_section_ignores_retired_keys() {
        let config: AppConfig = Config::builder()
            .add_source(config::File::from_str(
                "[layout]\nitem_selector = \".tile\"\ncard_body_height = 90\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.layout.card_body_height, 90);
        assert!(config.layout.percent_position);
    }
}
