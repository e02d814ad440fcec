use crate::addresses::{dao_hardfork_accounts, DAO_REFUND_CONTRACT};
use protocol_errors::BlockProcessingError;
use protocol_evm::processor::{BlockContext, BlockProcessor, WorldStateUpdater};

/// Wraps a [`BlockProcessor`] to perform the one-shot DAO balance migration immediately before
/// delegating to it. Installed for exactly one fork definition (`DaoInit`) at exactly one block
/// height; every surrounding height uses the unwrapped inner processor directly, so there is no
/// per-block branching anywhere in the mainline.
#[derive(Debug, Clone)]
pub struct DaoForkBlockProcessor<P> {
    inner: P,
    dao_fork_block: u64,
}

impl<P: BlockProcessor> DaoForkBlockProcessor<P> {
    pub fn new(inner: P, dao_fork_block: u64) -> Self {
        Self { inner, dao_fork_block }
    }

    /// Drains the full balance of every DAO-affected account into the refund contract. Returns
    /// the total drained, which the caller credits to the refund contract in the same pass that
    /// applies ordinary block rewards (mirroring how a normal balance-increments map is built).
    fn migrate_balances(
        &self,
        world_state: &mut dyn WorldStateUpdater,
    ) -> Result<u128, BlockProcessingError> {
        let accounts = dao_hardfork_accounts()?;
        let mut drained_total: u128 = 0;
        for &account in accounts {
            let balance = world_state.balance_of(account);
            world_state.set_balance(account, 0);
            drained_total = drained_total
                .checked_add(balance)
                .ok_or(BlockProcessingError::BalanceOverflow { address: DAO_REFUND_CONTRACT })?;
        }
        Ok(drained_total)
    }
}

impl<P: BlockProcessor> BlockProcessor for DaoForkBlockProcessor<P> {
    fn name(&self) -> &'static str {
        "DaoFork"
    }

    fn process_block(
        &self,
        world_state: &mut dyn WorldStateUpdater,
        block: &BlockContext,
    ) -> Result<(), BlockProcessingError> {
        if block.number == self.dao_fork_block {
            let drained = self.migrate_balances(world_state)?;
            world_state.increment_balance(DAO_REFUND_CONTRACT, drained)?;
            tracing::info!(
                block_number = block.number,
                drained_wei = drained,
                "applied DAO irregular state transition"
            );
        }
        self.inner.process_block(world_state, block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::Address;
    use alloy_primitives::U256;
    use protocol_evm::processor::InMemoryWorldState;

    #[derive(Debug)]
    struct NoopProcessor;
    impl BlockProcessor for NoopProcessor {
        fn name(&self) -> &'static str {
            "Noop"
        }
        fn process_block(
            &self,
            _world_state: &mut dyn WorldStateUpdater,
            _block: &BlockContext,
        ) -> Result<(), BlockProcessingError> {
            Ok(())
        }
    }

    fn block_at(number: u64) -> BlockContext {
        BlockContext {
            number,
            timestamp: 0,
            difficulty: U256::ZERO,
            total_difficulty: U256::ZERO,
            beneficiary: Address::ZERO,
            ommer_count: 0,
        }
    }

    #[test]
    fn migrates_balances_only_at_the_fork_block() {
        let accounts = dao_hardfork_accounts().unwrap();
        let first_account = accounts[0];
        let processor = DaoForkBlockProcessor::new(NoopProcessor, 1_920_000);

        let mut world_state = InMemoryWorldState::new().with_balance(first_account, 100);
        processor.process_block(&mut world_state, &block_at(1_920_000)).unwrap();
        assert_eq!(world_state.balance_of(first_account), 0);
        assert_eq!(world_state.balance_of(DAO_REFUND_CONTRACT), 100);
    }

    #[test]
    fn does_not_touch_balances_at_other_heights() {
        let accounts = dao_hardfork_accounts().unwrap();
        let first_account = accounts[0];
        let processor = DaoForkBlockProcessor::new(NoopProcessor, 1_920_000);

        let mut world_state = InMemoryWorldState::new().with_balance(first_account, 100);
        processor.process_block(&mut world_state, &block_at(1_920_001)).unwrap();
        assert_eq!(world_state.balance_of(first_account), 100);
        assert_eq!(world_state.balance_of(DAO_REFUND_CONTRACT), 0);
    }

    #[test]
    fn reapplying_at_the_fork_block_is_idempotent_past_the_first_drain() {
        // A test harness that calls process_block twice at the fork height must observe the
        // second call moving zero additional wei: the accounts are already drained.
        let accounts = dao_hardfork_accounts().unwrap();
        let first_account = accounts[0];
        let processor = DaoForkBlockProcessor::new(NoopProcessor, 1_920_000);

        let mut world_state = InMemoryWorldState::new().with_balance(first_account, 100);
        processor.process_block(&mut world_state, &block_at(1_920_000)).unwrap();
        processor.process_block(&mut world_state, &block_at(1_920_000)).unwrap();
        assert_eq!(world_state.balance_of(DAO_REFUND_CONTRACT), 100);
    }
}
