//! Ledger boundary: the signed entry DTO and the gateway used to record
//! entry batches in the transaction-owning service.

pub mod gateway;
pub mod models;

pub use gateway::{HttpLedgerGateway, LedgerGateway};
pub use models::LedgerEntry;

#[cfg(test)]
pub use gateway::MockLedgerGateway;
