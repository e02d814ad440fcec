use crate::processor::WorldStateUpdater;
use alloy_primitives::Address;
use core::fmt::Debug;
use protocol_errors::BlockProcessingError;

/// A validator-balance withdrawal, as handed down from the consensus layer from Shanghai
/// onward. Amounts are denominated in Gwei on the wire; this crate stores the wei-converted
/// value since that's what the world state deals in.
#[derive(Debug, Clone, Copy)]
pub struct Withdrawal {
    pub index: u64,
    pub validator_index: u64,
    pub address: Address,
    pub amount_wei: u128,
}

/// Named, pure factory reference for a fork's withdrawals acceptance rule. `None` before
/// Shanghai (the field itself is optional on [`crate::ProtocolSpec`]); `AllowedWithdrawals`
/// from Shanghai onward.
pub trait WithdrawalsValidator: Debug + Send + Sync {
    fn name(&self) -> &'static str;
    fn validate(&self, withdrawals: &[Withdrawal]) -> Result<(), WithdrawalsValidationError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum WithdrawalsValidationError {
    #[error("withdrawal indices must be strictly increasing")]
    IndicesNotIncreasing,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AllowedWithdrawals;
impl WithdrawalsValidator for AllowedWithdrawals {
    fn name(&self) -> &'static str {
        "AllowedWithdrawals"
    }
    fn validate(&self, withdrawals: &[Withdrawal]) -> Result<(), WithdrawalsValidationError> {
        if withdrawals.windows(2).any(|pair| pair[1].index <= pair[0].index) {
            return Err(WithdrawalsValidationError::IndicesNotIncreasing);
        }
        Ok(())
    }
}

/// Named, pure factory reference for a fork's withdrawals-processing rule: crediting each
/// withdrawal's balance directly, with no gas charge and no EVM execution (unlike a normal
/// transaction).
pub trait WithdrawalsProcessor: Debug + Send + Sync {
    fn name(&self) -> &'static str;
    fn process(
        &self,
        world_state: &mut dyn WorldStateUpdater,
        withdrawals: &[Withdrawal],
    ) -> Result<(), BlockProcessingError>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MainnetWithdrawalsProcessor;
impl WithdrawalsProcessor for MainnetWithdrawalsProcessor {
    fn name(&self) -> &'static str {
        "Mainnet"
    }
    fn process(
        &self,
        world_state: &mut dyn WorldStateUpdater,
        withdrawals: &[Withdrawal],
    ) -> Result<(), BlockProcessingError> {
        for withdrawal in withdrawals {
            world_state.increment_balance(withdrawal.address, withdrawal.amount_wei)?;
        }
        Ok(())
    }
}
