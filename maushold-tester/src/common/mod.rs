pub mod reports;
pub mod runner;
pub mod scenario;
pub mod util;

pub use runner::{ApiRunner, ApiTarget, ScenarioResult};
pub use util::{artifacts_dir, capture_artifacts, split_csv};
