pub mod cards;
pub mod detail;

use html_escape::{encode_double_quoted_attribute, encode_text};
use serde_json::Value;

/// Escape text content
pub(crate) fn text(s: &str) -> String {
    encode_text(s).into_owned()
}

/// Escape a double-quoted attribute value
pub(crate) fn attr(s: &str) -> String {
    encode_double_quoted_attribute(s).into_owned()
}

/// Serialize a payload for an inline `<script>` element
pub(crate) fn json_for_script_tag(value: &Value) -> String {
    let json = serde_json::to_string(value).unwrap_or_else(|_| "null".to_string());
    json.replace("</", "<\\/")
}
