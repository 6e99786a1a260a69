//! Gateway to the account-owning service.

use async_trait::async_trait;
use reqwest::StatusCode;
use rust_decimal::Decimal;
use tracing::debug;

use super::models::Account;
use crate::config::RemoteServiceConfig;
use crate::remote::{self, GatewayError};

/// Remote interface of the account service.
///
/// `update_by_number` is conditional: `expected_balance` must still match the
/// stored available balance, otherwise the call fails with
/// [`GatewayError::PreconditionFailed`] and nothing is written. This is what
/// keeps two concurrent transfers from losing one of their debits.
#[async_trait]
pub trait AccountGateway: Send + Sync {
    /// Read an account snapshot. `None` when the number does not resolve.
    async fn read_by_number(&self, account_number: &str) -> Result<Option<Account>, GatewayError>;

    /// Replace the account, conditional on the expected prior balance.
    async fn update_by_number(
        &self,
        account_number: &str,
        account: &Account,
        expected_balance: Decimal,
    ) -> Result<(), GatewayError>;
}

/// HTTP implementation against the account service REST surface.
pub struct HttpAccountGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAccountGateway {
    pub fn new(config: &RemoteServiceConfig) -> Result<Self, GatewayError> {
        Ok(Self {
            client: remote::http_client(config)?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn account_url(&self, account_number: &str) -> String {
        format!("{}/accounts/{}", self.base_url, account_number)
    }
}

#[async_trait]
impl AccountGateway for HttpAccountGateway {
    async fn read_by_number(&self, account_number: &str) -> Result<Option<Account>, GatewayError> {
        let response = self.client.get(self.account_url(account_number)).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(GatewayError::Remote(format!(
                "account read returned {}",
                response.status()
            )));
        }

        let account = response.json::<Account>().await?;
        debug!(account = %account_number, balance = %account.available_balance, "account read");
        Ok(Some(account))
    }

    async fn update_by_number(
        &self,
        account_number: &str,
        account: &Account,
        expected_balance: Decimal,
    ) -> Result<(), GatewayError> {
        let response = self
            .client
            .put(self.account_url(account_number))
            .query(&[("expectedBalance", expected_balance.to_string())])
            .json(account)
            .send()
            .await?;

        match response.status() {
            StatusCode::PRECONDITION_FAILED | StatusCode::CONFLICT => {
                Err(GatewayError::PreconditionFailed)
            }
            status if status.is_success() => Ok(()),
            status => Err(GatewayError::Remote(format!(
                "account update returned {}",
                status
            ))),
        }
    }
}


#[cfg(test)]
pub use mock::MockAccountGateway;
