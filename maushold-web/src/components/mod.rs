pub mod alert_banner;
pub mod footer;
pub mod navbar;
pub mod ui;
