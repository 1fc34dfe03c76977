use serde_json::Value;

/// Resolve the `image` field to a single URL.
///
/// Arrays contribute their first element. A string is used as-is and an
/// object contributes its `url` property. Anything else yields `None`.
pub fn resolve_image(image: &Value) -> Option<String> {
    let candidate = match image {
        Value::Array(items) => items.first()?,
        other => other,
    };

    match candidate {
        Value::String(url) => Some(url.clone()),
        Value::Object(obj) => obj.get("url").and_then(Value::as_str).map(str::to_string),
        _ => None,
    }
}
