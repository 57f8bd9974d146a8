//! Gateway between the chat client and the document inference service.
//!
//! Reshapes the outbound payload, injects the deployment credential and
//! collapses every upstream failure into a single client-visible error.

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;

pub use models::query::{ErrorBody, QueryRequest, FAILURE_MESSAGE, QUERY_PATH};
