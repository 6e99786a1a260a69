//! Gateway to the ledger service.

use async_trait::async_trait;
use tracing::debug;

use super::models::LedgerEntry;
use crate::config::RemoteServiceConfig;
use crate::remote::{self, GatewayError};

/// Remote interface of the ledger service.
///
/// The batch is submitted in one call; the remote side makes the entries
/// appear atomically from the ledger's perspective. No atomicity is claimed
/// across this gateway and the account gateway.
#[async_trait]
pub trait LedgerGateway: Send + Sync {
    async fn record_batch(
        &self,
        entries: &[LedgerEntry],
        reference: &str,
    ) -> Result<(), GatewayError>;
}

/// HTTP implementation against the ledger service REST surface.
pub struct HttpLedgerGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HttpLedgerGateway {
    pub fn new(config: &RemoteServiceConfig) -> Result<Self, GatewayError> {
        Ok(Self {
            client: remote::http_client(config)?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl LedgerGateway for HttpLedgerGateway {
    async fn record_batch(
        &self,
        entries: &[LedgerEntry],
        reference: &str,
    ) -> Result<(), GatewayError> {
        let response = self
            .client
            .post(format!("{}/transactions/internal", self.base_url))
            .query(&[("transactionReference", reference)])
            .json(entries)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(GatewayError::Remote(format!(
                "ledger batch returned {}",
                response.status()
            )));
        }

        debug!(reference = %reference, entries = entries.len(), "ledger batch recorded");
        Ok(())
    }
}


#[cfg(test)]
pub use mock::MockLedgerGateway;
