//! Shared plumbing for outbound HTTP collaborators.
//!
//! Both the account and ledger gateways talk to independently-owned services
//! over HTTP with bounded timeouts. A timed-out call is indistinguishable
//! from any other transport failure: the caller only learns "remote failed".

use std::time::Duration;

use thiserror::Error;

use crate::config::RemoteServiceConfig;

/// Errors surfaced by remote collaborator gateways.
#[derive(Error, Debug, Clone)]
pub enum GatewayError {
    /// A conditional write was rejected: the expected prior balance no
    /// longer matched what the remote side holds (a concurrent writer won).
    #[error("precondition failed: account changed since it was read")]
    PreconditionFailed,

    /// Transport failure, timeout, or an unexpected remote response.
    #[error("remote call failed: {0}")]
    Remote(String),
}

impl From<reqwest::Error> for GatewayError {
    fn from(e: reqwest::Error) -> Self {
        GatewayError::Remote(e.to_string())
    }
}

/// Build the bounded-timeout HTTP client for a collaborator service.
pub fn http_client(config: &RemoteServiceConfig) -> Result<reqwest::Client, GatewayError> {
    reqwest::Client::builder()
        .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
        .timeout(Duration::from_millis(config.request_timeout_ms))
        .build()
        .map_err(GatewayError::from)
}
