mod decode;
mod image;

pub use decode::{decode_list, decode_recipe};
pub use image::resolve_image;

use serde_json::Value;

/// A recipe as consumed by the views
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Recipe {
    /// Server-side route key (`@id`), used for delete and the detail link
    pub id: String,
    pub name: String,
    /// Original page the recipe was imported from
    pub url: String,
    /// Display name of the source site (`publisher.name`)
    pub publisher: String,
    /// Single resolved image URL
    pub image: Option<String>,
    /// `description`, falling back to `articleBody`
    pub description: Option<String>,
    /// Every author name in document order
    pub authors: Vec<String>,
    /// Yield text; for arrays only the last entry is kept
    pub recipe_yield: Option<String>,
    pub total_time: Option<String>,
    pub prep_time: Option<String>,
    pub cook_time: Option<String>,
    pub ingredients: Vec<String>,
    pub instructions: Instructions,
    pub keywords: Vec<String>,
    pub cuisine: Vec<String>,
    pub category: Vec<String>,
}

impl Recipe {
    /// The author shown on the detail page.
    ///
    /// When several authors carry a name the last one wins.
    pub fn author(&self) -> Option<&str> {
        self.authors.last().map(String::as_str)
    }

    /// Whether the detail page has anything to put in its metadata block
    pub fn has_metadata(&self) -> bool {
        self.author().is_some()
            || self.recipe_yield.is_some()
            || self.total_time.is_some()
            || self.description.is_some()
    }

    /// Text values reachable through a dotted key path such as `author.name`.
    ///
    /// Returns `None` for key paths that do not name a searchable field.
    pub fn field_values(&self, key: &str) -> Option<Vec<&str>> {
        let values = match key {
            "name" => vec![self.name.as_str()],
            "url" => vec![self.url.as_str()],
            "@id" => vec![self.id.as_str()],
            "description" => self.description.as_deref().into_iter().collect(),
            "recipeIngredient" => self.ingredients.iter().map(String::as_str).collect(),
            "keywords" => self.keywords.iter().map(String::as_str).collect(),
            "recipeCuisine" => self.cuisine.iter().map(String::as_str).collect(),
            "recipeCategory" => self.category.iter().map(String::as_str).collect(),
            "author.name" => self.authors.iter().map(String::as_str).collect(),
            "publisher.name" => vec![self.publisher.as_str()],
            _ => return None,
        };
        Some(values.into_iter().filter(|v| !v.is_empty()).collect())
    }
}

/// Ordered cooking directions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Instructions {
    pub entries: Vec<Instruction>,
    /// The `recipeInstructions` value as received, dumped when an entry is unrecognized
    pub raw: Value,
}

/// One entry of `recipeInstructions`
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    /// A `HowToSection` grouping numbered steps
    Section(HowToSection),
    /// A `HowToStep` object
    Step(String),
    /// A bare string
    Text(String),
    /// Any other shape, kept verbatim
    Other(Value),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HowToSection {
    pub name: Option<String>,
    pub steps: Vec<String>,
}

impl HowToSection {
    /// Section name as shown above its steps, always ending with a colon
    pub fn header(&self) -> Option<String> {
        self.name.as_ref().map(|name| {
            if name.ends_with(':') {
                name.clone()
            } else {
                format!("{name}:")
            }
        })
    }
}
