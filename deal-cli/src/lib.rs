pub mod logging;
pub mod report;
pub mod settings;
pub mod utils;

pub use report::{QuoteReport, render_json, render_text, status_message};
pub use settings::{FeeDefaults, Settings, SettingsError};
