use serde_json::Value;

/// A shipped locale: code, native name and its embedded string table.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct LocaleMeta {
    pub code: &'static str,
    pub name: &'static str,
    source: &'static str,
}

pub const DEFAULT_LANG: &str = "en";

const LOCALES: &[LocaleMeta] = &[
    LocaleMeta {
        code: DEFAULT_LANG,
        name: "English",
        source: include_str!("../../i18n/en.json"),
    },
    LocaleMeta {
        code: "es",
        name: "Español",
        source: include_str!("../../i18n/es.json"),
    },
];

/// Locales offered in the language selector, default first.
#[must_use]
pub const fn locales() -> &'static [LocaleMeta] {
    LOCALES
}

fn find(lang: &str) -> Option<&'static LocaleMeta> {
    LOCALES.iter().find(|meta| meta.code == lang)
}

#[must_use]
pub fn is_known_lang(lang: &str) -> bool {
    find(lang).is_some()
}

/// Parsed string table for `lang`; `None` for unknown codes or a broken table.
pub fn load_translations(lang: &str) -> Option<Value> {
    let meta = find(lang)?;
    serde_json::from_str(meta.source)
        .map_err(|err| log::error!("string table for '{lang}' is not valid JSON: {err}"))
        .ok()
}
