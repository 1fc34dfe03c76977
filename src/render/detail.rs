use serde_json::Value;

use super::{attr, json_for_script_tag, text};
use crate::duration::display_time;
use crate::model::{Instruction, Recipe};

/// Image shown at the top of the detail page
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBlock {
    pub src: String,
    pub alt: String,
}

/// Total time, either alone or with a collapsible prep/cook breakdown
#[derive(Debug, Clone, PartialEq)]
pub enum TimeBlock {
    Flat(String),
    Breakdown {
        total: String,
        prep: Option<String>,
        cook: Option<String>,
    },
}

/// The `recipe-meta` block; only built when at least one part is present
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MetaBlock {
    pub author: Option<String>,
    pub recipe_yield: Option<String>,
    pub time: Option<TimeBlock>,
    pub description: Option<String>,
}

/// One rendered node inside the `directions` list
#[derive(Debug, Clone, PartialEq)]
pub enum DirectionNode {
    /// `<p class="section-header">`
    SectionHeader(String),
    /// `<ol start=..>` holding a section's steps
    Section {
        start: usize,
        name: Option<String>,
        steps: Vec<String>,
    },
    /// A flat, unnumbered list item
    Item(String),
    /// Unrecognized input dumped verbatim
    Raw(String),
}

/// Everything the detail page shows, derived from one recipe
#[derive(Debug, Clone, PartialEq)]
pub struct DetailPage {
    pub title: String,
    pub image: Option<ImageBlock>,
    pub meta: Option<MetaBlock>,
    pub ingredients: Vec<String>,
    pub directions: Vec<DirectionNode>,
    pub source_href: String,
    pub source_label: String,
    pub recipe_id: String,
}

/// Interactive state that changes how the page document is drawn
#[derive(Debug, Clone, PartialEq)]
pub struct Chrome {
    /// Whether `main` carries its width-constraining `container` class
    pub contained: bool,
    pub image_visible: bool,
    /// `max-height` in pixels of the time breakdown; `None` when collapsed
    pub times_max_height: Option<u32>,
    pub scroll_fade: bool,
}

impl Default for Chrome {
    fn default() -> Self {
        Self {
            contained: true,
            image_visible: true,
            times_max_height: None,
            scroll_fade: false,
        }
    }
}

impl DetailPage {
    pub fn from_recipe(recipe: &Recipe) -> Self {
        Self {
            title: recipe.name.clone(),
            image: recipe.image.as_ref().map(|src| ImageBlock {
                src: src.clone(),
                alt: recipe.name.clone(),
            }),
            meta: meta_block(recipe),
            ingredients: recipe.ingredients.clone(),
            directions: direction_nodes(recipe),
            source_href: recipe.url.clone(),
            source_label: recipe.publisher.clone(),
            recipe_id: recipe.id.clone(),
        }
    }

    /// Whether the image visibility switch is revealed
    pub fn has_image_toggle(&self) -> bool {
        self.image.is_some()
    }

    pub fn meta_html(&self, times_max_height: Option<u32>) -> Option<String> {
        let meta = self.meta.as_ref()?;
        let mut html = String::from(r#"<div class="recipe-meta">"#);

        if let Some(author) = &meta.author {
            html.push_str(&format!("<span><strong>Author:</strong> {}</span>", text(author)));
        }
        if let Some(recipe_yield) = &meta.recipe_yield {
            html.push_str(&format!(
                "<span><strong>Yield:</strong> {}</span>",
                text(recipe_yield)
            ));
        }
        match &meta.time {
            Some(TimeBlock::Flat(total)) => {
                html.push_str(&format!(
                    "<span><strong>Total Time:</strong> {}</span>",
                    text(total)
                ));
            }
            Some(TimeBlock::Breakdown { total, prep, cook }) => {
                let (arrow, max_height) = match times_max_height {
                    Some(px) => ("up", px),
                    None => ("down", 0),
                };
                html.push_str(&format!(
                    r#"<span id="times"><strong>Total Time:</strong> {} <span id="time-dropdown" class="arrow {}"></span><ul class="additional-time" style="max-height: {}px">"#,
                    text(total),
                    arrow,
                    max_height
                ));
                if let Some(prep) = prep {
                    html.push_str(&format!("<li><strong>Prep Time:</strong> {}</li>", text(prep)));
                }
                if let Some(cook) = cook {
                    html.push_str(&format!("<li><strong>Cook Time:</strong> {}</li>", text(cook)));
                }
                html.push_str("</ul></span>");
            }
            None => {}
        }
        if let Some(description) = &meta.description {
            html.push_str(&format!(
                r#"<p class="recipe-desc">{}</p>"#,
                text(description)
            ));
        }

        html.push_str("</div>");
        Some(html)
    }

    pub fn ingredients_html(&self) -> String {
        self.ingredients
            .iter()
            .map(|i| format!("<li>{}</li>", text(i)))
            .collect()
    }

    pub fn directions_html(&self) -> String {
        self.directions
            .iter()
            .map(|node| match node {
                DirectionNode::SectionHeader(header) => {
                    format!(r#"<p class="section-header">{}</p>"#, text(header))
                }
                DirectionNode::Section { start, name, steps } => {
                    let name = name
                        .as_deref()
                        .map(|n| format!(r#" name="{}""#, attr(n)))
                        .unwrap_or_default();
                    let items: String = steps
                        .iter()
                        .map(|s| format!("<li>{}</li>", text(s)))
                        .collect();
                    format!(r#"<ol start="{start}"{name} class="directions-section">{items}</ol>"#)
                }
                DirectionNode::Item(item) => format!("<li>{}</li>", text(item)),
                DirectionNode::Raw(raw) => text(raw),
            })
            .collect()
    }

    /// Full detail document in the given interactive state
    pub fn document(&self, chrome: &Chrome, payload: &Value) -> String {
        let switch_style = if self.has_image_toggle() {
            ""
        } else {
            r#" style="display: none""#
        };
        let image = self
            .image
            .as_ref()
            .map(|img| {
                format!(
                    r#"
    <div id="image-div" style="display: {}"><img class="recipe-image" src="{}" alt="{}"></div>"#,
                    if chrome.image_visible { "flex" } else { "none" },
                    attr(&img.src),
                    attr(&img.alt)
                )
            })
            .unwrap_or_default();
        let checked = if chrome.image_visible { " checked" } else { "" };
        let scroll_fade = if chrome.scroll_fade {
            r#"<div class="scroll-fade"></div>"#
        } else {
            ""
        };

        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{title}</title>
</head>
<body>
  <main{main_class}>
  <div class="recipe-top">
    <h1 id="title">{title}</h1>
    <div id="switch"{switch_style}><input type="checkbox" id="image-check"{checked}><label for="image-check">Show image</label></div>{image}
    {meta}
  </div>
  <div class="recipe-ingredients"><ul id="ingredients">{ingredients}</ul>{scroll_fade}</div>
  <div class="recipe-directions"><ol id="directions">{directions}</ol></div>
  <p>Source: <a id="source" href="{source_href}">{source_label}</a></p>
  <button id="print" type="button">Print</button>
  <button id="delete-button" type="button" recipe="{id}">Delete</button>
  </main>
  <script type="application/json" id="recipe">{payload}</script>
</body>
</html>
"#,
            title = text(&self.title),
            main_class = if chrome.contained { r#" class="container""# } else { "" },
            switch_style = switch_style,
            checked = checked,
            image = image,
            meta = self.meta_html(chrome.times_max_height).unwrap_or_default(),
            ingredients = self.ingredients_html(),
            scroll_fade = scroll_fade,
            directions = self.directions_html(),
            source_href = attr(&self.source_href),
            source_label = text(&self.source_label),
            id = attr(&self.recipe_id),
            payload = json_for_script_tag(payload),
        )
    }
}

fn meta_block(recipe: &Recipe) -> Option<MetaBlock> {
    if !recipe.has_metadata() {
        return None;
    }

    let time = recipe.total_time.as_deref().map(|total| {
        let total = display_time(total);
        if recipe.prep_time.is_some() || recipe.cook_time.is_some() {
            TimeBlock::Breakdown {
                total,
                prep: recipe.prep_time.as_deref().map(display_time),
                cook: recipe.cook_time.as_deref().map(display_time),
            }
        } else {
            TimeBlock::Flat(total)
        }
    });

    Some(MetaBlock {
        author: recipe.author().map(str::to_string),
        recipe_yield: recipe.recipe_yield.clone(),
        time,
        description: recipe.description.clone(),
    })
}

/// Lay out the directions with one step counter shared by every section
fn direction_nodes(recipe: &Recipe) -> Vec<DirectionNode> {
    let mut nodes = Vec::new();
    let mut counter = 1;

    for entry in &recipe.instructions.entries {
        match entry {
            Instruction::Section(section) => {
                if let Some(header) = section.header() {
                    nodes.push(DirectionNode::SectionHeader(header));
                }
                nodes.push(DirectionNode::Section {
                    start: counter,
                    name: section.name.clone(),
                    steps: section.steps.clone(),
                });
                counter += section.steps.len();
            }
            Instruction::Step(step) => nodes.push(DirectionNode::Item(step.clone())),
            Instruction::Text(step) => nodes.push(DirectionNode::Item(step.clone())),
            Instruction::Other(_) => {
                // whatever was rendered so far is replaced by the raw dump
                nodes.clear();
                nodes.push(DirectionNode::Raw(
                    serde_json::to_string(&recipe.instructions.raw).unwrap_or_default(),
                ));
            }
        }
    }

    nodes
}
