//! Errors raised while assembling a protocol schedule or resolving it against a block header.
//!
//! None of these are execution-time errors (a reverted transaction, a bad signature): those
//! belong to the external block importer. Everything here fires at construction time, or at
//! the single DAO block, and is never retried.

use alloy_primitives::Address;

/// A required [`ProtocolSpec`](../protocol_spec/struct.ProtocolSpec.html) field was never bound
/// before `build()` was called.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SpecError {
    #[error("protocol spec is missing a binding for required field `{field}`")]
    IncompleteSpec { field: &'static str },

    #[error("invalid protocol spec configuration: {reason}")]
    InvalidConfig { reason: InvalidConfigReason },

    #[error("genesis config references unknown hard fork `{name}`")]
    UnknownFork { name: &'static str },

    #[error("no protocol spec is activated at height {height}")]
    NoSpecAtHeight { height: u64 },

    #[error("DAO irregular-state account list could not be loaded")]
    StateRewriteUnavailable,
}

/// Why a [`SpecError::InvalidConfig`] was raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidConfigReason {
    NegativeOrZeroStackSizeLimit,
    NegativeOrZeroContractSizeLimit,
    BaseFeeMarketRequestedWithoutBaseFee,
    MutuallyExclusiveBaseFeeOptions,
    EmptyForkSchedule,
}

impl core::fmt::Display for InvalidConfigReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            Self::NegativeOrZeroStackSizeLimit => "stack size limit must be positive",
            Self::NegativeOrZeroContractSizeLimit => "contract size limit must be positive",
            Self::BaseFeeMarketRequestedWithoutBaseFee => {
                "a base-fee fee market was requested but no base fee was provided and \
                 zero-base-fee was not enabled"
            }
            Self::MutuallyExclusiveBaseFeeOptions => {
                "`base_fee_per_gas` and `is_zero_base_fee` are mutually exclusive"
            }
            Self::EmptyForkSchedule => "genesis config does not activate any hard fork",
        };
        f.write_str(msg)
    }
}

/// Failures that can occur while the DAO irregular-state processor rewrites balances at its
/// single activation height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DaoForkError {
    #[error("DAO affected-account list could not be loaded from the embedded resource")]
    AddressListUnavailable,

    #[error("overflow while crediting the DAO refund contract with balance drained from {0}")]
    RefundBalanceOverflow(Address),
}

impl From<DaoForkError> for SpecError {
    fn from(err: DaoForkError) -> Self {
        match err {
            DaoForkError::AddressListUnavailable => Self::StateRewriteUnavailable,
            DaoForkError::RefundBalanceOverflow(_) => Self::StateRewriteUnavailable,
        }
    }
}

/// Errors a [`BlockProcessor`](../protocol_evm/trait.BlockProcessor.html) can raise while
/// processing a single block. These are deliberately narrow: anything about transaction
/// execution proper belongs to the external EVM/importer.
#[derive(Debug, Clone, thiserror::Error)]
pub enum BlockProcessingError {
    #[error(transparent)]
    Dao(#[from] DaoForkError),

    #[error("balance increment for {address} would overflow")]
    BalanceOverflow { address: Address },
}
