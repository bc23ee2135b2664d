//! Batch quoting of deal scenarios stored as CSV.

pub mod loader;

pub use loader::{
    DealResultRecord, DealScenario, DealScenarioLoader, DealScenarioLoaderError,
    DealScenarioRecord,
};
