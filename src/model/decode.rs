use html_escape::decode_html_entities;
use log::debug;
use serde::Deserialize;
use serde_json::{Map, Number, Value};

use super::{resolve_image, HowToSection, Instruction, Instructions, Recipe};
use crate::error::RecipeError;

/// Decode one recipe record
pub fn decode_recipe(value: &Value) -> Result<Recipe, RecipeError> {
    if !value.is_object() {
        return Err(RecipeError::InvalidPayload(format!(
            "expected a recipe object, found {}",
            kind(value)
        )));
    }
    let raw: RawRecipe = serde_json::from_value(value.clone())?;
    Ok(raw.into_recipe())
}

/// Decode the array of recipes embedded in the card list page
pub fn decode_list(value: &Value) -> Result<Vec<Recipe>, RecipeError> {
    let items = value.as_array().ok_or_else(|| {
        RecipeError::InvalidPayload(format!(
            "expected an array of recipes, found {}",
            kind(value)
        ))
    })?;
    debug!("Decoding {} recipe records", items.len());
    items.iter().map(decode_recipe).collect()
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct RawRecipe {
    #[serde(rename = "@id")]
    id: Option<Scalar>,
    name: Option<Scalar>,
    url: Option<Scalar>,
    publisher: Option<Named>,
    image: Option<Value>,
    description: Option<Scalar>,
    #[serde(rename = "articleBody")]
    article_body: Option<Scalar>,
    author: Option<OneOrMany<Named>>,
    #[serde(rename = "recipeYield")]
    recipe_yield: Option<OneOrMany<Scalar>>,
    #[serde(rename = "totalTime")]
    total_time: Option<Scalar>,
    #[serde(rename = "prepTime")]
    prep_time: Option<Scalar>,
    #[serde(rename = "cookTime")]
    cook_time: Option<Scalar>,
    #[serde(rename = "recipeIngredient")]
    recipe_ingredient: Option<OneOrMany<Scalar>>,
    #[serde(rename = "recipeInstructions")]
    recipe_instructions: Option<Value>,
    keywords: Option<OneOrMany<Scalar>>,
    #[serde(rename = "recipeCuisine")]
    recipe_cuisine: Option<OneOrMany<Scalar>>,
    #[serde(rename = "recipeCategory")]
    recipe_category: Option<OneOrMany<Scalar>>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Scalar {
    String(String),
    Number(Number),
    Other(Value),
}

impl Scalar {
    fn text(self) -> Option<String> {
        match self {
            Scalar::String(s) => Some(sanitize_text(&s)),
            Scalar::Number(n) => Some(n.to_string()),
            Scalar::Other(_) => None,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

/// An author or publisher: usually an object with `name`, sometimes a bare string
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Named {
    Object(Map<String, Value>),
    String(String),
    Other(Value),
}

impl Named {
    fn name(self) -> Option<String> {
        match self {
            Named::Object(obj) => field_text(&obj, "name"),
            Named::String(s) => Some(sanitize_text(&s)),
            Named::Other(_) => None,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "@type")]
enum HowTo {
    HowToStep(RawStep),
    HowToSection(RawSection),
}

#[derive(Debug, Deserialize)]
struct RawStep {
    #[serde(default)]
    text: Option<Scalar>,
}

#[derive(Debug, Deserialize)]
struct RawSection {
    #[serde(default)]
    name: Option<Scalar>,
    #[serde(rename = "itemListElement", default)]
    item_list_element: Vec<SectionItem>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SectionItem {
    Step(Map<String, Value>),
    Text(String),
    Other(Value),
}

impl SectionItem {
    fn text(self) -> String {
        match self {
            SectionItem::Step(step) => field_text(&step, "text").unwrap_or_default(),
            SectionItem::Text(s) => sanitize_text(&s),
            SectionItem::Other(_) => String::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawInstruction {
    Typed(HowTo),
    Other(Value),
}

impl From<RawInstruction> for Instruction {
    fn from(raw: RawInstruction) -> Self {
        match raw {
            RawInstruction::Typed(HowTo::HowToSection(section)) => {
                Instruction::Section(HowToSection {
                    name: section.name.and_then(Scalar::text),
                    steps: section
                        .item_list_element
                        .into_iter()
                        .map(SectionItem::text)
                        .collect(),
                })
            }
            RawInstruction::Typed(HowTo::HowToStep(step)) => {
                Instruction::Step(step.text.and_then(Scalar::text).unwrap_or_default())
            }
            RawInstruction::Other(value) => Instruction::Other(value),
        }
    }
}

impl RawRecipe {
    fn into_recipe(self) -> Recipe {
        let authors: Vec<String> = self
            .author
            .map(|a| {
                a.into_vec()
                    .into_iter()
                    .filter_map(Named::name)
                    .filter(|n| !n.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let recipe_yield = self
            .recipe_yield
            .and_then(|y| y.into_vec().into_iter().last())
            .and_then(Scalar::text)
            .and_then(non_empty);

        let description = self
            .description
            .and_then(Scalar::text)
            .and_then(non_empty)
            .or_else(|| self.article_body.and_then(Scalar::text).and_then(non_empty));

        Recipe {
            id: text_or_default(self.id),
            name: text_or_default(self.name),
            url: text_or_default(self.url),
            publisher: self.publisher.and_then(Named::name).unwrap_or_default(),
            image: self
                .image
                .as_ref()
                .and_then(resolve_image)
                .map(|url| sanitize_text(&url))
                .and_then(non_empty),
            description,
            authors,
            recipe_yield,
            total_time: optional_text(self.total_time),
            prep_time: optional_text(self.prep_time),
            cook_time: optional_text(self.cook_time),
            ingredients: texts(self.recipe_ingredient),
            instructions: decode_instructions(self.recipe_instructions),
            keywords: texts(self.keywords)
                .into_iter()
                .filter(|k| !k.is_empty())
                .collect(),
            cuisine: texts(self.recipe_cuisine),
            category: texts(self.recipe_category),
        }
    }
}

fn decode_instructions(raw: Option<Value>) -> Instructions {
    let Some(raw) = raw else {
        return Instructions::default();
    };

    let entries = match &raw {
        Value::Array(items) => items.iter().map(decode_instruction).collect(),
        Value::String(s) => vec![Instruction::Text(sanitize_text(s))],
        Value::Null => Vec::new(),
        other => vec![Instruction::Other(other.clone())],
    };

    Instructions { entries, raw }
}

/// Non-object entries never reach the tagged decoder, which would read a
/// sequence's first element as the `@type` tag.
fn decode_instruction(item: &Value) -> Instruction {
    match item {
        Value::Object(_) => serde_json::from_value::<RawInstruction>(item.clone())
            .map(Instruction::from)
            .unwrap_or_else(|_| Instruction::Other(item.clone())),
        Value::String(s) => Instruction::Text(sanitize_text(s)),
        other => Instruction::Other(other.clone()),
    }
}

fn field_text(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key)
        .cloned()
        .and_then(|v| serde_json::from_value::<Scalar>(v).ok())
        .and_then(Scalar::text)
}

fn texts(field: Option<OneOrMany<Scalar>>) -> Vec<String> {
    field
        .map(|f| f.into_vec().into_iter().filter_map(Scalar::text).collect())
        .unwrap_or_default()
}

fn optional_text(field: Option<Scalar>) -> Option<String> {
    field.and_then(Scalar::text).and_then(non_empty)
}

fn text_or_default(field: Option<Scalar>) -> String {
    field.and_then(Scalar::text).unwrap_or_default()
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

/// Unescape HTML entities, replace non-breaking spaces and trim
fn sanitize_text(text: &str) -> String {
    decode_html_entities(text)
        .replace('\u{a0}', " ")
        .trim()
        .to_string()
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
