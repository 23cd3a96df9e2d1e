//! Clients and models for the Heidelpay payment gateway.

use crate::client::Environment;
use reqwest_middleware::ClientWithMiddleware;
use std::fmt::{Debug, Formatter};

pub mod payment_methods;
pub mod payments;
pub mod request;
pub mod response;

pub(crate) struct HeidelpayClientInner {
    pub(crate) client: ClientWithMiddleware,
    pub(crate) environment: Environment,
}

impl Debug for HeidelpayClientInner {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeidelpayClientInner")
            .field("environment", &self.environment)
            .finish_non_exhaustive()
    }
}
