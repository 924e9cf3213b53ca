#[cfg(target_arch = "wasm32")]
use maushold_web::dom;
use maushold_web::i18n;
use maushold_web::router::Route;
use maushold_core::{BattleId, Screen};
use std::collections::BTreeMap;
use yew_router::Routable;

#[cfg(target_arch = "wasm32")]
#[test]
fn dom_helpers_find_window() {
    assert!(dom::window().is_some());
    assert!(dom::document().is_some());
}

#[test]
fn i18n_bundle_switches_and_falls_back() {
    i18n::set_lang("es");
    assert_eq!(i18n::current_lang(), "es");
    assert_eq!(i18n::t("nav.leaderboard"), "Clasificación");

    i18n::set_lang("xx");
    assert_eq!(i18n::current_lang(), "es");

    i18n::set_lang("en");
    let mut vars = BTreeMap::new();
    vars.insert("name", "Ash");
    assert_eq!(i18n::tr("home.welcome_back", Some(&vars)), "Welcome back, Ash!");
    assert_eq!(i18n::t("missing.key"), "missing.key");
    assert_eq!(i18n::fmt_points(1250), "1250");
}

#[test]
fn every_locale_translates_the_same_keys() {
    fn leaves(prefix: &str, value: &serde_json::Value, out: &mut Vec<String>) {
        match value {
            serde_json::Value::Object(map) if !map.contains_key("_") => {
                for (key, child) in map {
                    let path = if prefix.is_empty() {
                        key.clone()
                    } else {
                        format!("{prefix}.{key}")
                    };
                    leaves(&path, child, out);
                }
            }
            _ => out.push(prefix.to_string()),
        }
    }

    let en: serde_json::Value =
        serde_json::from_str(include_str!("../i18n/en.json")).unwrap();
    let es: serde_json::Value =
        serde_json::from_str(include_str!("../i18n/es.json")).unwrap();
    let (mut en_keys, mut es_keys) = (Vec::new(), Vec::new());
    leaves("", &en, &mut en_keys);
    leaves("", &es, &mut es_keys);
    en_keys.sort();
    es_keys.sort();
    assert_eq!(en_keys, es_keys);
    assert!(i18n::locales().iter().any(|meta| meta.code == "es"));
}

#[test]
fn routes_cover_every_screen() {
    assert_eq!(Route::from_screen(Screen::Home).to_path(), "/");
    assert_eq!(Route::from_screen(Screen::Leaderboard).to_path(), "/leaderboard");
    assert_eq!(
        Route::from_screen(Screen::BattleDetail(BattleId(7))).to_path(),
        "/history/7"
    );
    assert_eq!(Route::recognize("/battle/result"), Some(Route::BattleResult));
    assert_eq!(Route::recognize("/no/such/page"), Some(Route::NotFound));
}
