use crate::i18n::bundle::with_bundle;
use serde_json::Value;
use std::collections::BTreeMap;

fn get_nested_value<'a>(obj: &'a Value, key: &str) -> Option<&'a Value> {
    key.split('.').try_fold(obj, |current, part| current.get(part))
}

fn plural_category(count: f64) -> &'static str {
    if (count - 1.0).abs() < f64::EPSILON {
        "one"
    } else {
        "other"
    }
}

fn render_value(value: &Value, args: Option<&BTreeMap<&str, &str>>) -> Option<String> {
    let mut text = match value {
        Value::String(s) => s.clone(),
        Value::Object(map) => {
            let count = args
                .and_then(|m| m.get("count"))
                .and_then(|c| c.parse::<f64>().ok());
            count
                .and_then(|count| map.get(plural_category(count)))
                .or_else(|| map.get("other"))
                .and_then(Value::as_str)?
                .to_string()
        }
        _ => return None,
    };

    if let Some(args_map) = args {
        for (k, v) in args_map {
            text = text.replace(&format!("{{{{{k}}}}}"), v);
            text = text.replace(&format!("{{{k}}}"), v);
        }
    }
    Some(text)
}

fn resolve(key: &str, args: Option<&BTreeMap<&str, &str>>) -> Option<String> {
    with_bundle(|bundle| {
        get_nested_value(&bundle.translations, key)
            .and_then(|v| render_value(v, args))
            .or_else(|| get_nested_value(&bundle.fallback, key).and_then(|v| render_value(v, args)))
    })
}

/// Translate a key to the current language.
///
/// Falls back to English, then to the key itself.
#[must_use]
pub fn t(key: &str) -> String {
    tr(key, None)
}

/// Translate a key with `{name}` / `{{name}}` substitution. A `count`
/// argument selects the `one`/`other` plural form.
#[must_use]
pub fn tr(key: &str, args: Option<&BTreeMap<&str, &str>>) -> String {
    resolve(key, args).unwrap_or_else(|| key.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plural_selection_uses_count() {
        let value = serde_json::json!({ "one": "one viewer", "other": "{count} viewers" });
        let mut args = BTreeMap::new();
        args.insert("count", "1");
        assert_eq!(render_value(&value, Some(&args)).unwrap(), "one viewer");
        args.insert("count", "12");
        assert_eq!(render_value(&value, Some(&args)).unwrap(), "12 viewers");
        assert_eq!(render_value(&value, None).unwrap(), "{count} viewers");
    }

    #[test]
    fn interpolation_handles_braced_forms() {
        let value = Value::String("Save ${amount} now, {{amount}}!".into());
        let mut args = BTreeMap::new();
        args.insert("amount", "100");
        assert_eq!(
            render_value(&value, Some(&args)).unwrap(),
            "Save $100 now, 100!"
        );
    }

    #[test]
    fn missing_key_echoes_key() {
        crate::i18n::set_lang("en");
        assert_eq!(t("nope.missing"), "nope.missing");
        assert_eq!(t("reward.grab"), "Grab Now");
    }
}
