use crate::i18n::bundle::with_bundle;
use serde_json::Value;
use std::collections::BTreeMap;

/// Placeholder values keyed by name, as passed to [`tr`].
pub type Vars<'a> = BTreeMap<&'a str, &'a str>;

fn lookup<'v>(table: &'v Value, key: &str) -> Option<&'v Value> {
    key.split('.').try_fold(table, |node, part| node.get(part))
}

/// CLDR category for `count`. The browser asks `Intl.PluralRules`; elsewhere
/// the English rules apply.
fn plural_form(lang: &str, count: f64) -> String {
    #[cfg(target_arch = "wasm32")]
    {
        let tags = js_sys::Array::of1(&wasm_bindgen::JsValue::from_str(lang));
        let rules = js_sys::Intl::PluralRules::new(&tags, &js_sys::Object::new());
        if let Some(form) = rules.select(count).as_string() {
            return form;
        }
    }
    let _ = lang;
    let form = if count.abs() < f64::EPSILON {
        "zero"
    } else if (count - 1.0).abs() < f64::EPSILON {
        "one"
    } else {
        "other"
    };
    form.to_string()
}

/// Pick the template string for an entry. Plural entries are objects keyed
/// by category, with `_` as the form used when no count applies.
fn template<'v>(entry: &'v Value, lang: &str, vars: Option<&Vars<'_>>) -> Option<&'v str> {
    let Value::Object(forms) = entry else {
        return entry.as_str();
    };
    let count = vars
        .and_then(|v| v.get("count"))
        .and_then(|raw| raw.parse::<f64>().ok());
    count
        .and_then(|c| forms.get(&plural_form(lang, c)))
        .or_else(|| forms.get("_"))
        .and_then(Value::as_str)
}

fn fill(template: &str, vars: Option<&Vars<'_>>) -> String {
    vars.into_iter()
        .flatten()
        .fold(template.to_string(), |text, (name, value)| {
            text.replace(&format!("{{{name}}}"), value)
        })
}

fn render(entry: &Value, lang: &str, vars: Option<&Vars<'_>>) -> Option<String> {
    template(entry, lang, vars).map(|raw| fill(raw, vars))
}

/// Translate a key to the current language.
#[must_use]
pub fn t(key: &str) -> String {
    tr(key, None)
}

/// Translate with `{name}` placeholders filled from `vars`. Missing keys
/// fall back to English, then to the key itself.
#[must_use]
pub fn tr(key: &str, vars: Option<&Vars<'_>>) -> String {
    with_bundle(|bundle| {
        bundle
            .tables()
            .find_map(|table| lookup(table, key).and_then(|entry| render(entry, &bundle.lang, vars)))
    })
    .unwrap_or_else(|| key.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn count_selects_plural_form() {
        let entry = json!({ "one": "{count} monster", "other": "{count} monsters" });
        let mut vars = Vars::new();
        vars.insert("count", "1");
        assert_eq!(render(&entry, "en", Some(&vars)).as_deref(), Some("1 monster"));
        vars.insert("count", "6");
        assert_eq!(render(&entry, "en", Some(&vars)).as_deref(), Some("6 monsters"));
    }

    #[test]
    fn plural_entry_without_count() {
        let entry = json!({ "_": "team", "one": "member" });
        assert_eq!(render(&entry, "en", None).as_deref(), Some("team"));
        assert!(render(&json!({ "one": "x" }), "en", None).is_none());
        assert!(render(&json!(3), "en", None).is_none());
    }

    #[test]
    fn repeated_placeholders_are_all_filled() {
        let mut vars = Vars::new();
        vars.insert("name", "Misty");
        assert_eq!(fill("{name} vs {name}", Some(&vars)), "Misty vs Misty");
        assert_eq!(fill("{name}", None), "{name}");
    }

    #[test]
    fn dotted_keys_walk_nested_tables() {
        let table = json!({ "nav": { "home": "Home" } });
        assert_eq!(lookup(&table, "nav.home"), Some(&json!("Home")));
        assert!(lookup(&table, "nav.away").is_none());
    }
}
