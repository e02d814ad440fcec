use alloy_primitives::{Address, U256};
use auto_impl::auto_impl;
use core::fmt::Debug;
use protocol_errors::BlockProcessingError;

/// Mutable access to account balances during block processing. The external storage layer
/// provides the real implementation; the DAO irregular-state processor and reward crediting
/// only need this much of it. Callers are responsible for excluding other writers while a
/// `&mut dyn WorldStateUpdater` is live — see the crate-level concurrency notes.
pub trait WorldStateUpdater {
    fn balance_of(&self, address: Address) -> u128;
    fn set_balance(&mut self, address: Address, balance: u128);

    /// Adds `amount` to `address`'s balance, creating the account at zero balance first if it
    /// does not exist. Returns an error if the addition would overflow a `u128`.
    fn increment_balance(&mut self, address: Address, amount: u128) -> Result<(), BlockProcessingError> {
        let current = self.balance_of(address);
        let updated =
            current.checked_add(amount).ok_or(BlockProcessingError::BalanceOverflow { address })?;
        self.set_balance(address, updated);
        Ok(())
    }
}

/// An in-memory [`WorldStateUpdater`] used by tests and by any caller that does not need a
/// persistent backing store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryWorldState {
    balances: std::collections::HashMap<Address, u128>,
}

impl InMemoryWorldState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_balance(mut self, address: Address, balance: u128) -> Self {
        self.balances.insert(address, balance);
        self
    }
}

impl WorldStateUpdater for InMemoryWorldState {
    fn balance_of(&self, address: Address) -> u128 {
        self.balances.get(&address).copied().unwrap_or_default()
    }
    fn set_balance(&mut self, address: Address, balance: u128) {
        self.balances.insert(address, balance);
    }
}

/// The block-level facts a [`BlockProcessor`] needs beyond what's already bound into the
/// enclosing [`crate::ProtocolSpec`] fields it was constructed with.
#[derive(Debug, Clone, Copy)]
pub struct BlockContext {
    pub number: u64,
    pub timestamp: u64,
    pub difficulty: U256,
    pub total_difficulty: U256,
    pub beneficiary: Address,
    pub ommer_count: usize,
}

/// Named, pure(-ish) factory reference for a fork's whole-block processing pipeline: applying
/// rewards, withdrawals, and any irregular one-shot state change, before or after delegating to
/// the external transaction processor.
///
/// This is the one place in the catalog that is allowed to mutate state, because "process a
/// block" is inherently about producing a new world state from an old one. Everything else in
/// this crate stays a pure function of its inputs.
#[auto_impl(Arc)]
pub trait BlockProcessor: Debug + Send + Sync {
    fn name(&self) -> &'static str;

    fn process_block(
        &self,
        world_state: &mut dyn WorldStateUpdater,
        block: &BlockContext,
    ) -> Result<(), BlockProcessingError>;
}

/// Applies the standard block reward (and nephew/ommer rewards, when configured) to a block's
/// beneficiary. Does not itself know about the DAO rewrite; see `protocol_dao_fork` for the
/// wrapper that layers that in.
#[derive(Debug, Clone)]
pub struct MainnetBlockProcessor {
    base_block_reward: u128,
    skip_zero_block_rewards: bool,
}

impl MainnetBlockProcessor {
    pub fn new(base_block_reward: u128, skip_zero_block_rewards: bool) -> Self {
        Self { base_block_reward, skip_zero_block_rewards }
    }
}

impl BlockProcessor for MainnetBlockProcessor {
    fn name(&self) -> &'static str {
        "Mainnet"
    }

    fn process_block(
        &self,
        world_state: &mut dyn WorldStateUpdater,
        block: &BlockContext,
    ) -> Result<(), BlockProcessingError> {
        if self.base_block_reward == 0 && self.skip_zero_block_rewards {
            return Ok(());
        }
        let reward = self.base_block_reward
            + crate::reward::nephew_reward(self.base_block_reward, block.ommer_count);
        world_state.increment_balance(block.beneficiary, reward)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skip_zero_block_rewards_is_a_true_noop() {
        let processor = MainnetBlockProcessor::new(0, true);
        let mut world_state = InMemoryWorldState::new();
        let beneficiary = Address::repeat_byte(0xAA);
        let block = BlockContext {
            number: 20_000_001,
            timestamp: 0,
            difficulty: U256::ZERO,
            total_difficulty: U256::ZERO,
            beneficiary,
            ommer_count: 0,
        };
        processor.process_block(&mut world_state, &block).unwrap();
        assert_eq!(world_state.balance_of(beneficiary), 0);
    }

    #[test]
    fn reward_includes_nephew_bonus_per_ommer() {
        let processor = MainnetBlockProcessor::new(crate::reward::FRONTIER_BLOCK_REWARD, false);
        let mut world_state = InMemoryWorldState::new();
        let beneficiary = Address::repeat_byte(0xBB);
        let block = BlockContext {
            number: 100,
            timestamp: 0,
            difficulty: U256::ZERO,
            total_difficulty: U256::ZERO,
            beneficiary,
            ommer_count: 2,
        };
        processor.process_block(&mut world_state, &block).unwrap();
        let expected = crate::reward::FRONTIER_BLOCK_REWARD
            + crate::reward::nephew_reward(crate::reward::FRONTIER_BLOCK_REWARD, 2);
        assert_eq!(world_state.balance_of(beneficiary), expected);
    }
}
