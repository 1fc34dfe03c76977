use log::debug;
use scraper::{Html, Selector};
use serde_json::Value;

use crate::error::RecipeError;

/// Element id holding the card list payload
pub const LIST_PAYLOAD_ID: &str = "data";
/// Element id holding the detail page payload
pub const RECIPE_PAYLOAD_ID: &str = "recipe";

/// Parse the JSON text of the element with `id` in an HTML document
pub fn read_embedded(html: &str, id: &str) -> Result<Value, RecipeError> {
    let selector = Selector::parse(&format!("[id=\"{id}\"]"))
        .map_err(|e| RecipeError::InvalidPayload(format!("bad element id '{id}': {e}")))?;
    let document = Html::parse_document(html);

    let element = document
        .select(&selector)
        .next()
        .ok_or_else(|| RecipeError::MissingPayload(id.to_string()))?;

    let text: String = element.text().collect();
    debug!("Embedded payload '{}' is {} bytes", id, text.len());
    Ok(serde_json::from_str(text.trim())?)
}

/// Accept either a host page (payload read from `id`) or bare JSON
pub fn read_input(input: &str, id: &str) -> Result<Value, RecipeError> {
    if input.trim_start().starts_with('<') {
        read_embedded(input, id)
    } else {
        Ok(serde_json::from_str(input)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_script_payload() {
        let html = r#"
            <html><body>
              <script type="application/json" id="data">[{"name": "Soup"}]</script>
              <div id="card-container"></div>
            </body></html>
        "#;
        let value = read_embedded(html, LIST_PAYLOAD_ID).unwrap();
        assert_eq!(value[0]["name"], "Soup");
    }

    #[test]
    fn test_missing_element() {
        let err = read_embedded("<html><body></body></html>", RECIPE_PAYLOAD_ID).unwrap_err();
        assert!(matches!(err, RecipeError::MissingPayload(ref id) if id == "recipe"));
    }

    #[test]
    fn test_invalid_json() {
        let html = r#"<div id="recipe">{not json</div>"#;
        assert!(matches!(
            read_embedded(html, RECIPE_PAYLOAD_ID),
            Err(RecipeError::Json(_))
        ));
    }

    #[test]
    fn test_read_input_accepts_bare_json() {
        let value = read_input(r#"{"name": "Soup"}"#, RECIPE_PAYLOAD_ID).unwrap();
        assert_eq!(value["name"], "Soup");
    }
}
