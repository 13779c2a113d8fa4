//! Server dependencies passed to domain activities.
//!
//! Everything external sits behind a trait so activities can run against the
//! in-memory gateway in tests.

use std::sync::Arc;

use crate::domains::moderation::SubmissionPolicy;
use crate::kernel::BaseGateway;

#[derive(Clone)]
pub struct ServerDeps {
    pub gateway: Arc<dyn BaseGateway>,
    pub submission_policy: SubmissionPolicy,
}

impl ServerDeps {
    pub fn new(gateway: Arc<dyn BaseGateway>, submission_policy: SubmissionPolicy) -> Self {
        Self {
            gateway,
            submission_policy,
        }
    }

    pub fn gateway(&self) -> &dyn BaseGateway {
        self.gateway.as_ref()
    }
}
