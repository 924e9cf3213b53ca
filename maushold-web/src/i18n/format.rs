//! Locale-aware display of points and timestamps.
//!
//! In the browser both go through `Intl`; native builds (tests, tooling) use
//! fixed plain forms so rendered markup stays deterministic.
use chrono::{DateTime, Utc};

#[cfg(target_arch = "wasm32")]
use crate::i18n::bundle::with_bundle;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[must_use]
pub fn fmt_points(points: i32) -> String {
    #[cfg(target_arch = "wasm32")]
    {
        with_bundle(|bundle| {
            let tags = js_sys::Array::of1(&JsValue::from_str(&bundle.lang));
            let formatter = js_sys::Intl::NumberFormat::new(&tags, &js_sys::Object::new());
            formatter
                .format()
                .call1(&formatter, &JsValue::from(points))
                .ok()
                .and_then(|out| out.as_string())
        })
        .unwrap_or_else(|| points.to_string())
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        points.to_string()
    }
}

/// Battle timestamps in the reader's locale.
#[must_use]
pub fn fmt_timestamp(at: &DateTime<Utc>) -> String {
    #[cfg(target_arch = "wasm32")]
    {
        #[allow(clippy::cast_precision_loss)]
        let millis = at.timestamp_millis() as f64;
        let date = js_sys::Date::new(&JsValue::from_f64(millis));
        with_bundle(|bundle| date.to_locale_string(&bundle.lang, &JsValue::UNDEFINED))
            .as_string()
            .unwrap_or_else(|| at.to_rfc3339())
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        at.format("%Y-%m-%d %H:%M UTC").to_string()
    }
}
