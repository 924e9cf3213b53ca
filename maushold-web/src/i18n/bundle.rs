use crate::i18n::locales::{DEFAULT_LANG, is_known_lang, load_translations};
use serde_json::Value;
use std::cell::RefCell;

pub const LOCALE_STORAGE_KEY: &str = "maushold.locale";

/// Active string tables: the chosen locale plus English for missing keys.
pub struct I18nBundle {
    pub lang: String,
    pub translations: Value,
    /// `None` when the active locale already is the default.
    pub fallback: Option<Value>,
}

impl I18nBundle {
    fn load(lang: &str) -> Option<Self> {
        if !is_known_lang(lang) {
            return None;
        }
        let translations = load_translations(lang)?;
        let fallback = if lang == DEFAULT_LANG {
            None
        } else {
            load_translations(DEFAULT_LANG)
        };
        Some(Self {
            lang: lang.to_string(),
            translations,
            fallback,
        })
    }

    /// Default locale, or an empty table if even that fails to parse.
    fn default_bundle() -> Self {
        Self::load(DEFAULT_LANG).unwrap_or_else(|| Self {
            lang: DEFAULT_LANG.to_string(),
            translations: Value::Object(serde_json::Map::new()),
            fallback: None,
        })
    }

    /// Tables in lookup order.
    pub fn tables(&self) -> impl Iterator<Item = &Value> {
        std::iter::once(&self.translations).chain(self.fallback.as_ref())
    }
}

fn saved_lang() -> Option<String> {
    crate::dom::local_storage()?
        .get_item(LOCALE_STORAGE_KEY)
        .ok()
        .flatten()
}

thread_local! {
    static CURRENT: RefCell<I18nBundle> = RefCell::new(
        saved_lang()
            .and_then(|lang| I18nBundle::load(&lang))
            .unwrap_or_else(I18nBundle::default_bundle)
    );
}

pub(super) fn with_bundle<R>(f: impl FnOnce(&I18nBundle) -> R) -> R {
    CURRENT.with(|cell| f(&cell.borrow()))
}

/// Switch the active locale.
///
/// Unknown codes are ignored. In the browser the choice updates `<html lang>`
/// and is persisted for the next visit.
pub fn set_lang(lang: &str) {
    let Some(bundle) = I18nBundle::load(lang) else {
        log::warn!("ignoring unsupported locale '{lang}'");
        return;
    };
    CURRENT.with(|cell| cell.replace(bundle));
    if let Some(root) = crate::dom::document().and_then(|doc| doc.document_element()) {
        let _ = root.set_attribute("lang", lang);
    }
    if let Some(storage) = crate::dom::local_storage() {
        let _ = storage.set_item(LOCALE_STORAGE_KEY, lang);
    }
}

#[must_use]
pub fn current_lang() -> String {
    with_bundle(|bundle| bundle.lang.clone())
}
