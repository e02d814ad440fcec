//! The Ethereum DAO hard fork's irregular state transition: a one-time, non-consensus-rule
//! balance migration rather than an ordinary protocol rule delta. Everything else about the
//! `DaoInit` fork definition is identical to `Homestead`; only the block processor changes.

pub mod addresses;
pub mod processor;

pub use addresses::{dao_hardfork_accounts, DAO_REFUND_CONTRACT};
pub use processor::DaoForkBlockProcessor;
