use crate::{condition::Head, hardfork::Hardfork, ForkCondition};

/// An ordered, deduplicated chain of `(fork, activation condition)` pairs.
///
/// This is the container a genesis config folds into: forks are appended in the order they
/// historically activated, and lookups always scan in that order so that "the greatest
/// activated fork at this head" falls out of a simple linear scan (the list is short, at most
/// ~20 entries, so this beats maintaining a sorted index).
#[derive(Debug, Clone, Default)]
pub struct ChainHardforks {
    forks: Vec<(Box<dyn Hardfork>, ForkCondition)>,
}

impl ChainHardforks {
    /// Builds a registry from an explicit, caller-ordered list. The order is trusted as-is;
    /// callers (the fork delta registry) are responsible for historical ordering.
    pub fn new(forks: Vec<(Box<dyn Hardfork>, ForkCondition)>) -> Self {
        Self { forks }
    }

    /// The activation condition for `fork`, if this chain knows about it at all.
    pub fn get<H: Hardfork + Clone>(&self, fork: H) -> Option<ForkCondition> {
        self.forks
            .iter()
            .find(|(f, _)| f.name() == fork.name())
            .map(|(_, condition)| *condition)
    }

    /// The activation condition for `fork`, defaulting to [`ForkCondition::Never`] for forks
    /// this chain never registered.
    pub fn fork<H: Hardfork + Clone>(&self, fork: H) -> ForkCondition {
        self.get(fork).unwrap_or(ForkCondition::Never)
    }

    /// Whether `fork` is active for the given head.
    pub fn is_fork_active_at_head<H: Hardfork + Clone>(&self, fork: H, head: &Head) -> bool {
        self.fork(fork).active_at_head(head)
    }

    /// Whether `fork` is active at the given block number (pre-Paris convenience).
    pub fn is_fork_active_at_block<H: Hardfork + Clone>(&self, fork: H, block_number: u64) -> bool {
        self.fork(fork).active_at_head(&Head { number: block_number, ..Default::default() })
    }

    /// Iterate forks in activation order.
    pub fn iter(&self) -> impl Iterator<Item = &(Box<dyn Hardfork>, ForkCondition)> {
        self.forks.iter()
    }

    /// The last (most-recently-activated) fork in the list, if any.
    pub fn last(&self) -> Option<&(Box<dyn Hardfork>, ForkCondition)> {
        self.forks.last()
    }
}

/// Convenience queries shared by any chain family built on [`crate::EthereumHardfork`].
///
/// This crate tracks a single fork family (mainnet Ethereum); a collaborator that tracked a
/// second one (an L2, a private test network) would implement this trait over its own embedded
/// [`ChainHardforks`] the same way this one does, rather than this crate growing a submodule per
/// family.
pub trait EthereumHardforks {
    fn ethereum_hardforks(&self) -> &ChainHardforks;

    fn is_spurious_dragon_active_at_block(&self, block_number: u64) -> bool {
        self.ethereum_hardforks()
            .is_fork_active_at_block(crate::EthereumHardfork::SpuriousDragon, block_number)
    }

    fn is_shanghai_active_at_timestamp(&self, timestamp: u64) -> bool {
        self.ethereum_hardforks().is_fork_active_at_head(
            crate::EthereumHardfork::Shanghai,
            &Head { timestamp, ..Default::default() },
        )
    }

    fn is_paris_active_at_head(&self, head: &Head) -> bool {
        self.ethereum_hardforks().is_fork_active_at_head(crate::EthereumHardfork::Paris, head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hardfork::HardforkExt;
    use crate::EthereumHardfork;

    fn sample_chain() -> ChainHardforks {
        ChainHardforks::new(vec![
            (EthereumHardfork::Frontier.boxed(), ForkCondition::Block(0)),
            (EthereumHardfork::SpuriousDragon.boxed(), ForkCondition::Block(2_675_000)),
            (EthereumHardfork::Shanghai.boxed(), ForkCondition::Timestamp(1_681_338_455)),
        ])
    }

    struct SampleChain(ChainHardforks);
    impl EthereumHardforks for SampleChain {
        fn ethereum_hardforks(&self) -> &ChainHardforks {
            &self.0
        }
    }

    #[test]
    fn get_returns_the_registered_condition() {
        let chain = sample_chain();
        assert_eq!(chain.get(EthereumHardfork::SpuriousDragon), Some(ForkCondition::Block(2_675_000)));
    }

    #[test]
    fn get_returns_none_for_an_unregistered_fork() {
        let chain = sample_chain();
        assert_eq!(chain.get(EthereumHardfork::Cancun), None);
    }

    #[test]
    fn fork_defaults_to_never_for_an_unregistered_fork() {
        let chain = sample_chain();
        assert_eq!(chain.fork(EthereumHardfork::Cancun), ForkCondition::Never);
    }

    #[test]
    fn is_fork_active_at_block_consults_the_block_number() {
        let chain = sample_chain();
        assert!(chain.is_fork_active_at_block(EthereumHardfork::SpuriousDragon, 2_675_000));
        assert!(!chain.is_fork_active_at_block(EthereumHardfork::SpuriousDragon, 2_674_999));
    }

    #[test]
    fn iter_and_last_expose_entries_in_insertion_order() {
        let chain = sample_chain();
        assert_eq!(chain.iter().count(), 3);
        let (fork, condition) = chain.last().unwrap();
        assert_eq!(fork.name(), "Shanghai");
        assert_eq!(*condition, ForkCondition::Timestamp(1_681_338_455));
    }

    #[test]
    fn extension_trait_methods_delegate_to_the_embedded_chain() {
        let chain = SampleChain(sample_chain());
        assert!(chain.is_spurious_dragon_active_at_block(2_675_000));
        assert!(!chain.is_spurious_dragon_active_at_block(0));
        assert!(chain.is_shanghai_active_at_timestamp(1_681_338_455));
        assert!(!chain.is_shanghai_active_at_timestamp(0));
    }

    #[test]
    fn empty_chain_activates_nothing() {
        let chain = ChainHardforks::default();
        assert!(!chain.is_fork_active_at_block(EthereumHardfork::Frontier, 0));
        assert!(chain.last().is_none());
    }
}
