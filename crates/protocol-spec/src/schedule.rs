//! Assembles a [`ProtocolSchedule`] from a [`GenesisConfig`] by folding the fork-delta
//! [`registry`](crate::forks::registry) once, and answers "which spec governs this block" by the
//! same greatest-activation-key-at-or-below-the-query rule the fork conditions themselves encode.

use std::sync::Arc;

use protocol_errors::SpecError;
use protocol_forks::{EthereumHardfork, ForkCondition, Head};

use crate::builder::ProtocolSpecBuilder;
use crate::config::GenesisConfig;
use crate::forks::registry;
use crate::spec::ProtocolSpec;

/// One fork this genesis config actually activates, together with the fully-bound spec the fold
/// produced for it at that point in the chain.
#[derive(Debug, Clone)]
struct ScheduleEntry {
    hardfork: EthereumHardfork,
    condition: ForkCondition,
    spec: Arc<ProtocolSpec>,
}

/// The materialized, queryable fork schedule for one genesis configuration: every hard fork the
/// config activates, each bound to the [`ProtocolSpec`] assembled by folding the fork-delta
/// registry up to and including it.
///
/// Every fork in [`crate::forks::registry`] still runs its delta during construction, whether or
/// not this genesis activates it — a fork with no counterpart in `fork_schedule` simply never
/// becomes a queryable entry, but its delta still had to run to hand the next fork the builder
/// state it expects.
#[derive(Debug, Clone)]
pub struct ProtocolSchedule {
    entries: Vec<ScheduleEntry>,
}

impl ProtocolSchedule {
    /// Builds the full schedule for `config`, in one pass over the fork chain.
    pub fn new(config: &GenesisConfig) -> Result<Self, SpecError> {
        config.validate()?;

        let mut builder = ProtocolSpecBuilder::new();
        let mut entries = Vec::new();
        for definition in registry() {
            builder = (definition.delta)(builder, config)?;
            if let Some(condition) = config.activation(definition.hardfork) {
                let spec = Arc::new(builder.clone().build()?);
                tracing::debug!(fork = %definition.hardfork, ?condition, "activated protocol spec");
                entries.push(ScheduleEntry { hardfork: definition.hardfork, condition, spec });
            }
        }

        if entries.is_empty() {
            return Err(SpecError::InvalidConfig {
                reason: protocol_errors::InvalidConfigReason::EmptyForkSchedule,
            });
        }
        Ok(Self { entries })
    }

    /// The spec that governs a block at the given header-derived [`Head`]: the most-recently
    /// activated fork whose condition is satisfied.
    ///
    /// Entries are stored in the registry's historical order, and every condition within a
    /// single activation domain (block number, then timestamp, then the one total-difficulty
    /// entry for Paris) only ever increases going forward, so the last entry that is active at
    /// `head` is always the correct (and only) match — callers never see a schedule "downgrade"
    /// to an earlier fork as later fields of `head` advance.
    pub fn by_block_header(&self, head: &Head) -> Result<Arc<ProtocolSpec>, SpecError> {
        self.entries
            .iter()
            .rev()
            .find(|entry| entry.condition.active_at_head(head))
            .map(|entry| entry.spec.clone())
            .ok_or(SpecError::NoSpecAtHeight { height: head.number })
    }

    /// Convenience form of [`Self::by_block_header`] for pre-merge callers that only have a
    /// block number and timestamp in hand.
    pub fn by_block_number_and_timestamp(
        &self,
        number: u64,
        timestamp: u64,
    ) -> Result<Arc<ProtocolSpec>, SpecError> {
        self.by_block_header(&Head { number, timestamp, ..Default::default() })
    }

    /// The spec bound to a specific named fork, if this genesis activates it.
    pub fn spec_for(&self, fork: EthereumHardfork) -> Option<Arc<ProtocolSpec>> {
        self.entries.iter().find(|entry| entry.hardfork == fork).map(|entry| entry.spec.clone())
    }

    /// Every activated fork in historical order, paired with the condition it activates under.
    pub fn activations(&self) -> Vec<(EthereumHardfork, ForkCondition)> {
        self.entries.iter().map(|entry| (entry.hardfork, entry.condition)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EvmTuning, PowAlgorithm};

    fn mainnet_like_config() -> GenesisConfig {
        GenesisConfig {
            fork_schedule: vec![
                (EthereumHardfork::Frontier, ForkCondition::Block(0)),
                (EthereumHardfork::Homestead, ForkCondition::Block(1_150_000)),
                (EthereumHardfork::DaoInit, ForkCondition::Block(1_920_000)),
                (EthereumHardfork::DaoTransition, ForkCondition::Block(1_920_001)),
                (EthereumHardfork::Tangerine, ForkCondition::Block(2_463_000)),
                (EthereumHardfork::SpuriousDragon, ForkCondition::Block(2_675_000)),
                (EthereumHardfork::Byzantium, ForkCondition::Block(4_370_000)),
                (EthereumHardfork::Constantinople, ForkCondition::Block(7_280_000)),
                (EthereumHardfork::Petersburg, ForkCondition::Block(7_280_000)),
                (EthereumHardfork::Istanbul, ForkCondition::Block(9_069_000)),
                (EthereumHardfork::MuirGlacier, ForkCondition::Block(9_200_000)),
                (EthereumHardfork::Berlin, ForkCondition::Block(12_244_000)),
                (EthereumHardfork::London, ForkCondition::Block(12_965_000)),
                (EthereumHardfork::ArrowGlacier, ForkCondition::Block(13_773_000)),
                (EthereumHardfork::GrayGlacier, ForkCondition::Block(15_050_000)),
                (EthereumHardfork::Paris, ForkCondition::Block(15_537_394)),
                (EthereumHardfork::Shanghai, ForkCondition::Timestamp(1_681_338_455)),
                (EthereumHardfork::Cancun, ForkCondition::Timestamp(1_710_338_135)),
            ],
            chain_id: Some(1),
            terminal_total_difficulty: None,
            base_fee_per_gas: Some(1_000_000_000),
            is_zero_base_fee: false,
            london_block_number: Some(12_965_000),
            pow_algorithm: PowAlgorithm::Ethash,
            quorum_compatible: false,
            evm_tuning: EvmTuning::default(),
            enable_revert_reason: false,
            contract_size_limit_override: None,
            stack_size_limit_override: None,
        }
    }

    #[test]
    fn genesis_block_resolves_to_frontier() {
        let schedule = ProtocolSchedule::new(&mainnet_like_config()).unwrap();
        let spec = schedule.by_block_number_and_timestamp(0, 0).unwrap();
        assert_eq!(spec.name, "Frontier");
        assert!(!spec.is_proof_of_stake);
    }

    #[test]
    fn dao_fork_block_resolves_to_dao_init_spec() {
        let schedule = ProtocolSchedule::new(&mainnet_like_config()).unwrap();
        let spec = schedule.by_block_number_and_timestamp(1_920_000, 0).unwrap();
        assert_eq!(spec.name, "DaoInit");
    }

    #[test]
    fn london_activation_switches_to_a_base_fee_market() {
        let schedule = ProtocolSchedule::new(&mainnet_like_config()).unwrap();
        let spec = schedule.by_block_number_and_timestamp(12_965_000, 0).unwrap();
        assert!(spec.fee_market.supports_base_fee());
    }

    #[test]
    fn london_gas_limit_calculator_is_bound_at_the_configured_activation_block() {
        use protocol_evm::gas_limit::{london_activation_gas_limit, LondonGasLimitCalculator};

        let schedule = ProtocolSchedule::new(&mainnet_like_config()).unwrap();
        let spec = schedule.by_block_number_and_timestamp(12_965_000, 0).unwrap();
        assert_eq!(spec.gas_limit_calculator.name(), "London");

        // The schedule binds a calculator built from the same `london_block_number` the genesis
        // config carries, so the one-shot elasticity doubling (a free function, not itself a
        // trait method, since it rewrites the *parent's* limit before any calculator sees it)
        // lands on the right block.
        let calculator = LondonGasLimitCalculator::new(12_965_000);
        assert!(calculator.is_activation_block(12_965_000));
        assert!(!calculator.is_activation_block(12_965_001));
        assert_eq!(london_activation_gas_limit(30_000_000), 60_000_000);
        assert_eq!(calculator.next_gas_limit(60_000_000, 60_000_000), 60_000_000);
    }

    /// A variant of the mainnet-shaped config where Paris activates by total difficulty crossing
    /// the terminal value, the way it actually did on mainnet, rather than by the block number
    /// alias most genesis files also carry.
    fn config_with_ttd_paris() -> GenesisConfig {
        let mut config = mainnet_like_config();
        config.terminal_total_difficulty = Some(terminal_total_difficulty());
        for (fork, condition) in config.fork_schedule.iter_mut() {
            if *fork == EthereumHardfork::Paris {
                *condition = ForkCondition::TotalDifficulty(terminal_total_difficulty());
            }
        }
        config
    }

    fn terminal_total_difficulty() -> alloy_primitives::U256 {
        alloy_primitives::U256::from(58_750_000_000_000_000_000_000u128)
    }

    #[test]
    fn paris_activates_by_total_difficulty_crossing_the_terminal_value() {
        let schedule = ProtocolSchedule::new(&config_with_ttd_paris()).unwrap();

        let pre_merge = Head {
            number: 15_537_393,
            total_difficulty: terminal_total_difficulty() - alloy_primitives::U256::from(1),
            ..Default::default()
        };
        let spec = schedule.by_block_header(&pre_merge).unwrap();
        assert_eq!(spec.name, "GrayGlacier");
        assert!(!spec.is_proof_of_stake);

        let terminal_pow_block = Head {
            number: 15_537_394,
            total_difficulty: terminal_total_difficulty(),
            ..Default::default()
        };
        let spec = schedule.by_block_header(&terminal_pow_block).unwrap();
        assert_eq!(spec.name, "Paris");
        assert!(spec.is_proof_of_stake);
        assert_eq!(spec.block_reward, 0);

        let post_merge = Head {
            number: 15_537_395,
            total_difficulty: terminal_total_difficulty() + alloy_primitives::U256::from(1),
            ..Default::default()
        };
        let spec = schedule.by_block_header(&post_merge).unwrap();
        assert_eq!(spec.name, "Paris");
    }

    #[test]
    fn paris_onward_is_proof_of_stake() {
        let schedule = ProtocolSchedule::new(&mainnet_like_config()).unwrap();
        let spec = schedule.by_block_number_and_timestamp(15_537_394, 0).unwrap();
        assert!(spec.is_proof_of_stake);
    }

    #[test]
    fn shanghai_is_selected_by_timestamp_not_block_number() {
        let schedule = ProtocolSchedule::new(&mainnet_like_config()).unwrap();
        let spec = schedule
            .by_block_header(&Head { number: 17_034_870, timestamp: 1_681_338_455, ..Default::default() })
            .unwrap();
        assert_eq!(spec.name, "Shanghai");
    }

    #[test]
    fn height_before_any_activation_is_an_error() {
        let mut config = mainnet_like_config();
        config.fork_schedule.retain(|(fork, _)| *fork != EthereumHardfork::Frontier);
        let schedule = ProtocolSchedule::new(&config).unwrap();
        let err = schedule.by_block_number_and_timestamp(0, 0).unwrap_err();
        assert_eq!(err, SpecError::NoSpecAtHeight { height: 0 });
    }

    #[test]
    fn empty_fork_schedule_is_rejected_up_front() {
        let mut config = mainnet_like_config();
        config.fork_schedule.clear();
        assert_eq!(
            ProtocolSchedule::new(&config).unwrap_err(),
            SpecError::InvalidConfig {
                reason: protocol_errors::InvalidConfigReason::EmptyForkSchedule
            }
        );
    }
}
