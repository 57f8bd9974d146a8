pub mod health;
pub mod metrics;
pub mod query;

pub use health::health_check;
pub use query::{forward_query, preflight};
