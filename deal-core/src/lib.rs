pub mod calculations;
pub mod coordinator;
pub mod models;

pub use calculations::{DealCalculator, compute_deal};
pub use coordinator::{DealEdit, DealSession, ModeCoordinator, StampedQuote};
pub use models::*;
