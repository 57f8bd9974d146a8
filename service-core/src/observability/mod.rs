pub mod logging;
pub mod propagation;

pub use logging::init_tracing;
pub use propagation::{REQUEST_ID_HEADER, TRACEPARENT_HEADER, TRACESTATE_HEADER, outbound_headers};
