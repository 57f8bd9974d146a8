//! Common test utilities for workflow integration tests.

#![allow(dead_code)]

use workflow_tests::WorkflowTestContext;

pub const DOC: &str = "https://x/policy.pdf";

/// Create a new workflow test context with a running gateway.
pub async fn setup() -> WorkflowTestContext {
    workflow_tests::init_tracing();

    WorkflowTestContext::new()
        .await
        .expect("Failed to create workflow test context")
}
