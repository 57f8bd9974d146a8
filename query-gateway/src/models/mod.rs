pub mod query;

pub use query::{ErrorBody, QueryRequest};
