pub mod inference;
pub mod metrics;

pub use inference::InferenceClient;
