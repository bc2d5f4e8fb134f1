//! Dotted-path lookup, truthiness and value-to-text conversion.
use serde_json::Value;

/// Look up a dotted path (`a.b.c`) in a context.
///
/// Each segment must name a key of a mapping; the walk stops with `None` as
/// soon as a segment is missing or the current value is not a mapping.
/// There is no index or bracket syntax.
///
/// # Examples
///
/// ```
/// use portfolio_cli::engine::resolve;
/// use serde_json::json;
///
/// let ctx = json!({ "profile": { "name": "Ada" } });
/// assert_eq!(resolve(&ctx, "profile.name"), Some(&json!("Ada")));
/// assert_eq!(resolve(&ctx, "profile.name.first"), None);
/// assert_eq!(resolve(&ctx, "missing"), None);
/// ```
#[must_use]
pub fn resolve<'a>(context: &'a Value, path: &str) -> Option<&'a Value> {
    descend(context, path.split('.'))
}

/// Walk the remaining segments of a path starting from `value`.
pub(super) fn descend<'a, 's>(
    value: &'a Value,
    segments: impl IntoIterator<Item = &'s str>,
) -> Option<&'a Value> {
    segments
        .into_iter()
        .try_fold(value, |current, segment| current.as_object()?.get(segment))
}

/// Truthiness used by `{{#if}}`.
///
/// Only absence, `null`, `false`, an empty list and an empty mapping are
/// false. `0` and `""` are true.
#[must_use]
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null | Value::Bool(false)) => false,
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(map)) => !map.is_empty(),
        Some(_) => true,
    }
}

/// Text substituted for a placeholder.
///
/// Absent and `null` give an empty string, a mapping is pretty-printed as
/// JSON, a list is joined with commas, and scalars use their natural form.
///
/// # Examples
///
/// ```
/// use portfolio_cli::engine::to_text;
/// use serde_json::json;
///
/// assert_eq!(to_text(None), "");
/// assert_eq!(to_text(Some(&json!(["a", 1, null]))), "a,1,");
/// assert_eq!(to_text(Some(&json!({ "a": 1 }))), "{\n  \"a\": 1\n}");
/// ```
#[must_use]
pub fn to_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::Array(items)) => join_sequence(items),
        Some(object @ Value::Object(_)) => {
            serde_json::to_string_pretty(object).unwrap_or_default()
        }
        Some(scalar) => scalar_text(scalar),
    }
}

fn join_sequence(items: &[Value]) -> String {
    items
        .iter()
        .map(|item| match item {
            Value::Null => String::new(),
            Value::Array(nested) => join_sequence(nested),
            Value::Object(_) => serde_json::to_string(item).unwrap_or_default(),
            scalar => scalar_text(scalar),
        })
        .collect::<Vec<_>>()
        .join(",")
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) if n.is_f64() => n
            .as_f64()
            .and_then(whole_float_text)
            .unwrap_or_else(|| n.to_string()),
        other => other.to_string(),
    }
}

/// `2.0` prints as `2`. Magnitudes from `1e21` up keep exponent notation.
fn whole_float_text(value: f64) -> Option<String> {
    (value.fract() == 0.0 && value.abs() < 1e21).then(|| {
        if value == 0.0 {
            "0".to_string()
        } else {
            format!("{value:.0}")
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn resolve_walks_nested_mappings() {
        let ctx = json!({ "a": { "b": { "c": 42 } } });
        assert_eq!(resolve(&ctx, "a.b.c"), Some(&json!(42)));
        assert_eq!(resolve(&ctx, "a.b"), Some(&json!({ "c": 42 })));
    }

    #[test]
    fn resolve_stops_on_non_mapping() {
        let ctx = json!({ "list": [1, 2, 3], "name": "x" });
        assert_eq!(resolve(&ctx, "list.0"), None);
        assert_eq!(resolve(&ctx, "name.length"), None);
    }

    #[test]
    fn resolve_returns_null_values() {
        let ctx = json!({ "a": null });
        assert_eq!(resolve(&ctx, "a"), Some(&Value::Null));
        assert_eq!(resolve(&ctx, "a.b"), None);
    }

    #[test]
    fn resolve_on_scalar_root_is_absent() {
        assert_eq!(resolve(&json!("text"), "a"), None);
    }

    #[test]
    fn truthiness_boundary() {
        assert!(is_truthy(Some(&json!(0))));
        assert!(is_truthy(Some(&json!(""))));
        assert!(is_truthy(Some(&json!(true))));
        assert!(is_truthy(Some(&json!([0]))));
        assert!(is_truthy(Some(&json!({ "k": null }))));

        assert!(!is_truthy(None));
        assert!(!is_truthy(Some(&Value::Null)));
        assert!(!is_truthy(Some(&json!(false))));
        assert!(!is_truthy(Some(&json!([]))));
        assert!(!is_truthy(Some(&json!({}))));
    }

    #[test]
    fn text_of_scalars() {
        assert_eq!(to_text(Some(&json!("plain"))), "plain");
        assert_eq!(to_text(Some(&json!(7))), "7");
        assert_eq!(to_text(Some(&json!(2.5))), "2.5");
        assert_eq!(to_text(Some(&json!(false))), "false");
    }

    #[test]
    fn text_of_whole_floats_drops_the_fraction() {
        let ctx: Value = serde_json::from_str(r#"{ "a": 2.0, "b": -3.0, "c": 0.0, "d": 1.5 }"#)
            .unwrap_or_default();
        assert_eq!(to_text(ctx.get("a")), "2");
        assert_eq!(to_text(ctx.get("b")), "-3");
        assert_eq!(to_text(ctx.get("c")), "0");
        assert_eq!(to_text(ctx.get("d")), "1.5");
        assert_eq!(to_text(Some(&json!([1.0, 2.5]))), "1,2.5");
    }

    #[test]
    fn text_of_nested_sequences_flattens() {
        assert_eq!(to_text(Some(&json!([["a", "b"], "c"]))), "a,b,c");
        assert_eq!(to_text(Some(&json!([]))), "");
    }

    #[test]
    fn text_of_mapping_in_sequence_is_compact_json() {
        assert_eq!(to_text(Some(&json!([{ "a": 1 }]))), "{\"a\":1}");
    }

    #[test]
    fn text_of_mapping_is_multiline() {
        let text = to_text(Some(&json!({ "a": 1, "b": { "c": "d" } })));
        assert_eq!(text, "{\n  \"a\": 1,\n  \"b\": {\n    \"c\": \"d\"\n  }\n}");
    }
}
