//! Account boundary: the snapshot DTO owned by the account service and the
//! gateway used to read and conditionally write it.

pub mod gateway;
pub mod models;

pub use gateway::{AccountGateway, HttpAccountGateway};
pub use models::{Account, AccountStatus};

#[cfg(test)]
pub use gateway::MockAccountGateway;
