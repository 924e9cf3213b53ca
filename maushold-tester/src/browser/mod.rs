pub mod page;
pub mod session;

pub use page::AppPage;
pub use session::{BrowserConfig, BrowserKind, new_session};
