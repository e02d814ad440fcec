//! Assembles a hard-fork-aware registry of mainnet Ethereum execution rules.
//!
//! A [`ProtocolSpec`] is one fork's fully-bound, immutable set of rule-function references: the
//! gas schedule, the EVM variant, the transaction and block validators, the receipt encoding, and
//! so on. A [`ProtocolSchedule`] assembles one `ProtocolSpec` per activated fork by folding the
//! fork-delta [`registry`](forks::registry) over a [`GenesisConfig`], and resolves "which spec
//! governs this block" the same way a real client's block importer would: by the greatest
//! activation key at or below the queried block.
//!
//! Everything this crate does not itself implement — running EVM bytecode, encoding/decoding the
//! wire format, driving block import — is named but not defined here; see [`external`] for those
//! seams.

pub mod builder;
pub mod config;
pub mod external;
pub mod forks;
pub mod schedule;
pub mod spec;

pub use builder::ProtocolSpecBuilder;
pub use config::{EvmTuning, GenesisConfig, JumpdestCachePolicy, PowAlgorithm};
pub use forks::{registry, ForkDefinition, ForkDelta};
pub use schedule::ProtocolSchedule;
pub use spec::ProtocolSpec;

pub use protocol_errors::{BlockProcessingError, DaoForkError, InvalidConfigReason, SpecError};
pub use protocol_forks::{ChainHardforks, EthereumHardfork, EthereumHardforks, ForkCondition, Head};
