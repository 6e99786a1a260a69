//! Fundflow - fund transfer orchestration service
//!
//! Moves money between two accounts owned by the account service, records the
//! resulting debit/credit pair in the ledger service, and keeps its own
//! transfer records in PostgreSQL.
//!
//! # Modules
//!
//! - [`config`] - YAML application configuration
//! - [`logging`] - tracing initialization (rolling file + stdout)
//! - [`remote`] - shared plumbing for outbound HTTP collaborators
//! - [`account`] - account snapshot DTO and the account service gateway
//! - [`ledger`] - ledger entry DTO and the ledger service gateway
//! - [`reference`] - transaction reference allocation
//! - [`transfer`] - the orchestration core: validation, saga, store, HTTP API
//! - [`openapi`] - OpenAPI document for the HTTP surface

pub mod account;
pub mod config;
pub mod ledger;
pub mod logging;
pub mod openapi;
pub mod reference;
pub mod remote;
pub mod transfer;

// Convenient re-exports at crate root
pub use account::{Account, AccountGateway, AccountStatus, HttpAccountGateway};
pub use ledger::{HttpLedgerGateway, LedgerEntry, LedgerGateway};
pub use reference::{ReferenceAllocator, UuidReferenceAllocator};
pub use remote::GatewayError;
pub use transfer::{
    FundTransferOrchestrator, FundTransferRequest, FundTransferResponse, PgTransferStore,
    TransferError, TransferRecord, TransferRecordStore, TransferStatus, TransferType,
};
