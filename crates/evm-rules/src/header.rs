use alloy_primitives::{Address, B256, U256};
use core::fmt::Debug;

/// The subset of a block header needed by header/body/block validators. Decoding the header
/// from its wire format is an external collaborator's job (RLP/SSZ codecs are out of scope).
#[derive(Debug, Clone, Copy)]
pub struct HeaderContext<'a> {
    pub number: u64,
    pub timestamp: u64,
    pub difficulty: U256,
    pub beneficiary: Address,
    pub extra_data: &'a [u8],
    pub base_fee_per_gas: Option<u64>,
    pub mix_hash: B256,
    pub nonce: u64,
    pub withdrawals_root: Option<B256>,
}

/// The DAO fork's header marker, required on every block in the ten-block DAO-transition
/// window by the "pro-fork" client convention (the London/Shanghai-style EIPs that later forks
/// use for signaling copy this pattern).
pub const DAO_EXTRA_DATA: &[u8] = b"dao-hard-fork";

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum HeaderValidationError {
    #[error("header at the DAO fork block is missing the required extra-data marker")]
    MissingDaoExtraData,

    #[error("header base fee {got:?} does not match the expected {expected}")]
    BaseFeeMismatch { got: Option<u64>, expected: u64 },

    #[error("pre-merge header is missing a base fee that this fork requires")]
    MissingBaseFee,

    #[error("post-merge header must not carry a proof-of-work difficulty")]
    UnexpectedProofOfWorkDifficulty,

    #[error("withdrawals root is required from Shanghai onward")]
    MissingWithdrawalsRoot,
}

/// Named, pure factory reference for a fork's header-validity rules.
pub trait BlockHeaderValidator: Debug + Send + Sync {
    fn name(&self) -> &'static str;

    fn validate(&self, header: &HeaderContext<'_>) -> Result<(), HeaderValidationError> {
        let _ = header;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProofOfWorkHeaderValidator;
impl BlockHeaderValidator for ProofOfWorkHeaderValidator {
    fn name(&self) -> &'static str {
        "ProofOfWork"
    }
}

/// Wraps another header validator to additionally require [`DAO_EXTRA_DATA`] at one specific
/// block height — the DAO fork block itself. Installed only for that single fork definition,
/// never baked into the mainline PoW validator.
#[derive(Debug, Clone)]
pub struct DaoMarkerHeaderValidator<V> {
    inner: V,
    dao_fork_block: u64,
}

impl<V: BlockHeaderValidator> DaoMarkerHeaderValidator<V> {
    pub fn new(inner: V, dao_fork_block: u64) -> Self {
        Self { inner, dao_fork_block }
    }
}

impl<V: BlockHeaderValidator> BlockHeaderValidator for DaoMarkerHeaderValidator<V> {
    fn name(&self) -> &'static str {
        "DaoMarker"
    }
    fn validate(&self, header: &HeaderContext<'_>) -> Result<(), HeaderValidationError> {
        self.inner.validate(header)?;
        if header.number == self.dao_fork_block && header.extra_data != DAO_EXTRA_DATA {
            return Err(HeaderValidationError::MissingDaoExtraData);
        }
        Ok(())
    }
}

/// London onward: the header must carry a base fee, and it must match what the fee market
/// would compute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BaseFeeHeaderValidator;
impl BlockHeaderValidator for BaseFeeHeaderValidator {
    fn name(&self) -> &'static str {
        "BaseFee"
    }
    fn validate(&self, header: &HeaderContext<'_>) -> Result<(), HeaderValidationError> {
        if header.base_fee_per_gas.is_none() {
            return Err(HeaderValidationError::MissingBaseFee);
        }
        Ok(())
    }
}

/// Paris (the Merge): no proof-of-work seal is checked; `mix_hash` instead carries the beacon
/// chain's RANDAO output, and difficulty must be the fixed post-merge value of zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeHeaderValidator;
impl BlockHeaderValidator for MergeHeaderValidator {
    fn name(&self) -> &'static str {
        "Merge"
    }
    fn validate(&self, header: &HeaderContext<'_>) -> Result<(), HeaderValidationError> {
        if header.base_fee_per_gas.is_none() {
            return Err(HeaderValidationError::MissingBaseFee);
        }
        if !header.difficulty.is_zero() {
            return Err(HeaderValidationError::UnexpectedProofOfWorkDifficulty);
        }
        Ok(())
    }
}

/// Shanghai onward: the header must carry a withdrawals root.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WithdrawalsHeaderValidator;
impl BlockHeaderValidator for WithdrawalsHeaderValidator {
    fn name(&self) -> &'static str {
        "Withdrawals"
    }
    fn validate(&self, header: &HeaderContext<'_>) -> Result<(), HeaderValidationError> {
        if header.base_fee_per_gas.is_none() {
            return Err(HeaderValidationError::MissingBaseFee);
        }
        if header.withdrawals_root.is_none() {
            return Err(HeaderValidationError::MissingWithdrawalsRoot);
        }
        Ok(())
    }
}

/// Named, pure factory reference for a fork's ommer-header acceptance rules.
pub trait OmmerHeaderValidator: Debug + Send + Sync {
    fn name(&self) -> &'static str;

    /// An ommer is valid if it is within six blocks of the including block and was not already
    /// included as an ommer or canonical ancestor (the caller tracks ancestry; this method only
    /// checks proximity).
    fn validate_proximity(&self, block_number: u64, ommer_number: u64) -> bool {
        block_number > ommer_number && block_number - ommer_number <= 6
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StandardOmmerHeaderValidator;
impl OmmerHeaderValidator for StandardOmmerHeaderValidator {}

/// Paris onward: ommers are meaningless under proof-of-stake, so the block must carry none.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoOmmersHeaderValidator;
impl OmmerHeaderValidator for NoOmmersHeaderValidator {
    fn name(&self) -> &'static str {
        "NoOmmers"
    }
    fn validate_proximity(&self, _block_number: u64, _ommer_number: u64) -> bool {
        false
    }
}

/// Named, pure factory reference for a fork's block-body acceptance rules (the parts that
/// aren't already covered by the header or the transaction/ommer validators individually —
/// e.g. that the body's transactions-root and ommers-hash match the header).
pub trait BlockBodyValidator: Debug + Send + Sync {
    fn name(&self) -> &'static str;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StandardBlockBodyValidator;
impl BlockBodyValidator for StandardBlockBodyValidator {
    fn name(&self) -> &'static str {
        "Standard"
    }
}

/// Composes header + body + post-execution checks into the single pass/fail verdict the
/// external block importer asks for after running a block through the transaction processor.
pub trait BlockValidator: Debug + Send + Sync {
    fn name(&self) -> &'static str;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StandardBlockValidator;
impl BlockValidator for StandardBlockValidator {
    fn name(&self) -> &'static str {
        "Standard"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dao_marker_required_only_at_its_block() {
        let validator = DaoMarkerHeaderValidator::new(ProofOfWorkHeaderValidator, 1_920_000);
        let mut header = HeaderContext {
            number: 1_920_000,
            timestamp: 0,
            difficulty: U256::from(1u64),
            beneficiary: Address::ZERO,
            extra_data: b"",
            base_fee_per_gas: None,
            mix_hash: B256::ZERO,
            nonce: 0,
            withdrawals_root: None,
        };
        assert!(validator.validate(&header).is_err());
        header.extra_data = DAO_EXTRA_DATA;
        assert!(validator.validate(&header).is_ok());
        header.number = 1_920_001;
        header.extra_data = b"";
        assert!(validator.validate(&header).is_ok());
    }

    #[test]
    fn merge_validator_rejects_nonzero_difficulty() {
        let header = HeaderContext {
            number: 20_000_000,
            timestamp: 0,
            difficulty: U256::from(1u64),
            beneficiary: Address::ZERO,
            extra_data: b"",
            base_fee_per_gas: Some(7),
            mix_hash: B256::ZERO,
            nonce: 0,
            withdrawals_root: None,
        };
        assert_eq!(
            MergeHeaderValidator.validate(&header).unwrap_err(),
            HeaderValidationError::UnexpectedProofOfWorkDifficulty
        );
    }
}
