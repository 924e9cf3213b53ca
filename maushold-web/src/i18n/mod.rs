mod bundle;
mod format;
mod locales;
mod render;

pub use bundle::{I18nBundle, current_lang, set_lang};
pub use format::{fmt_points, fmt_timestamp};
pub use locales::{DEFAULT_LANG, LocaleMeta, locales};
pub use render::{Vars, t, tr};
