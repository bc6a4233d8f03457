//! Selective style forwarding.

use pagecraft_core::StyleMap;
use serde_json::Value;

/// Computed style view of a node's configured style.
///
/// Everything is forwarded verbatim except `backgroundImage`, whose bare or
/// relative value is normalized into a usable `url(...)` reference.
pub fn computed_style(style: &StyleMap) -> StyleMap {
    let mut computed = style.clone();
    if let Some(Value::String(image)) = style.get("backgroundImage") {
        if !image.trim_start().starts_with("url(") {
            computed.insert(
                "backgroundImage".to_string(),
                Value::String(format!("url({image})")),
            );
        }
    }
    computed
}

/// Placeholder height of a lazy boundary: the numeric prefix of
/// `style.height`. Missing, non-numeric, or zero heights fall back to a
/// minimal positive placeholder of 1.
pub fn placeholder_height(style: &StyleMap) -> f64 {
    match style.get("height").and_then(numeric_prefix) {
        Some(height) if height != 0.0 => height,
        _ => 1.0,
    }
}

fn numeric_prefix(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let s = s.trim_start();
            let mut seen_dot = false;
            let mut end = 0;
            for (i, c) in s.char_indices() {
                let keep = c.is_ascii_digit()
                    || (c == '.' && !seen_dot)
                    || (i == 0 && (c == '-' || c == '+'));
                if !keep {
                    break;
                }
                seen_dot |= c == '.';
                end = i + c.len_utf8();
            }
            s[..end].parse().ok()
        }
        _ => None,
    }
}

/// JavaScript-style truthiness, used for the reserved `lazy` prop.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn style_with(key: &str, value: Value) -> StyleMap {
        let mut style = StyleMap::new();
        style.insert(key.to_string(), value);
        style
    }

    #[test]
    fn height_takes_the_numeric_prefix() {
        assert_eq!(placeholder_height(&style_with("height", json!("120px"))), 120.0);
        assert_eq!(placeholder_height(&style_with("height", json!("33.5vh"))), 33.5);
        assert_eq!(placeholder_height(&style_with("height", json!(80))), 80.0);
    }

    #[test]
    fn height_defaults_to_one() {
        assert_eq!(placeholder_height(&StyleMap::new()), 1.0);
        assert_eq!(placeholder_height(&style_with("height", json!("auto"))), 1.0);
        assert_eq!(placeholder_height(&style_with("height", json!("0px"))), 1.0);
        assert_eq!(placeholder_height(&style_with("height", json!(null))), 1.0);
    }

    #[test]
    fn background_image_is_wrapped_as_a_url_reference() {
        let computed = computed_style(&style_with("backgroundImage", json!("cdn/banner.png")));
        assert_eq!(computed["backgroundImage"], json!("url(cdn/banner.png)"));

        let already = computed_style(&style_with("backgroundImage", json!("url(x.png)")));
        assert_eq!(already["backgroundImage"], json!("url(x.png)"));
    }

    #[test]
    fn other_styles_are_forwarded_verbatim() {
        let computed = computed_style(&style_with("color", json!("#ec78cf")));
        assert_eq!(computed["color"], json!("#ec78cf"));
    }

    #[test]
    fn truthiness_follows_the_config_language() {
        assert!(is_truthy(&json!(true)));
        assert!(is_truthy(&json!(1)));
        assert!(is_truthy(&json!("yes")));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!(null)));
    }
}
