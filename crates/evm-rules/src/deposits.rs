use alloy_primitives::B256;
use core::fmt::Debug;

/// A validator deposit request, surfaced from the deposit contract's logs starting with the
/// experimental fork track. Tracks an unratified proposal; field shape is expected to change,
/// see DESIGN.md.
#[derive(Debug, Clone, Copy)]
pub struct Deposit {
    pub pubkey: [u8; 48],
    pub withdrawal_credentials: B256,
    pub amount_gwei: u64,
    pub signature: [u8; 96],
    pub index: u64,
}

/// Named, pure factory reference for a fork's deposits acceptance rule. Only the experimental
/// fork enables this; every shipped mainnet fork leaves the field unbound.
pub trait DepositsValidator: Debug + Send + Sync {
    fn name(&self) -> &'static str;
    fn validate(&self, deposits: &[Deposit]) -> Result<(), DepositsValidationError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DepositsValidationError {
    #[error("deposit indices must be strictly increasing")]
    IndicesNotIncreasing,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AllowedDeposits;
impl DepositsValidator for AllowedDeposits {
    fn name(&self) -> &'static str {
        "AllowedDeposits"
    }
    fn validate(&self, deposits: &[Deposit]) -> Result<(), DepositsValidationError> {
        if deposits.windows(2).any(|pair| pair[1].index <= pair[0].index) {
            return Err(DepositsValidationError::IndicesNotIncreasing);
        }
        Ok(())
    }
}
