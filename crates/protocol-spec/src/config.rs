use alloy_primitives::U256;
use protocol_errors::{InvalidConfigReason, SpecError};
use protocol_forks::{EthereumHardfork, ForkCondition};

/// Which proof-of-work algorithm a pre-merge chain seals blocks with. Actual seal verification
/// is an external collaborator's job (the interpreter/header codec); this only distinguishes
/// mainnet Ethash chains from the alternatives some private networks substitute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PowAlgorithm {
    #[default]
    Ethash,
    Keccak256,
    Unsupported,
}

/// Whether the external interpreter caches `JUMPDEST` analysis across calls to the same code.
/// Purely a performance knob the interpreter consumes; this crate only threads the choice
/// through from genesis configuration to whatever binds the EVM factory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JumpdestCachePolicy {
    Disabled,
    #[default]
    Enabled,
}

/// Tuning knobs the external EVM interpreter factory consumes. Not consulted by any rule in
/// this crate directly; carried only so a genesis config can be threaded through to whatever
/// constructs the real interpreter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EvmTuning {
    pub jumpdest_cache_policy: JumpdestCachePolicy,
}

/// Every externally-supplied input the fork-delta registry and schedule selector need: the
/// genesis fork-activation mapping plus the handful of chain-level parameters that vary between
/// a mainnet deployment and a private or test network built from the same fork chain.
#[derive(Debug, Clone)]
pub struct GenesisConfig {
    /// Maps each hard fork this chain activates to the key it activates at. A fork absent from
    /// this list is never activated (equivalent to `ForkCondition::Never`).
    pub fork_schedule: Vec<(EthereumHardfork, ForkCondition)>,
    pub chain_id: Option<u64>,
    pub terminal_total_difficulty: Option<U256>,
    pub base_fee_per_gas: Option<u64>,
    pub is_zero_base_fee: bool,
    /// Redundant with `fork_schedule`'s `London` entry when that entry is a `Block` condition,
    /// but kept as its own field because the gas-limit-elasticity doubling needs it even for a
    /// chain whose `London` entry was (unusually) expressed some other way upstream.
    pub london_block_number: Option<u64>,
    pub pow_algorithm: PowAlgorithm,
    /// Selects the zero-base-fee, otherwise-EIP-1559-shaped fee market some private networks
    /// run instead of a priced base fee. Orthogonal to fork activation — see DESIGN.md.
    pub quorum_compatible: bool,
    pub evm_tuning: EvmTuning,
    pub enable_revert_reason: bool,
    pub contract_size_limit_override: Option<usize>,
    pub stack_size_limit_override: Option<i64>,
}

impl GenesisConfig {
    /// The activation condition for `fork`, or `None` if this genesis never activates it.
    pub fn activation(&self, fork: EthereumHardfork) -> Option<ForkCondition> {
        self.fork_schedule.iter().find(|(f, _)| *f == fork).map(|(_, c)| *c)
    }

    /// The DAO fork's own block number, derived from its entry in `fork_schedule`. `None` if
    /// this genesis never activates `DaoInit`, or if it was (invalidly) bound to something
    /// other than a block number.
    pub fn dao_fork_block(&self) -> Option<u64> {
        match self.activation(EthereumHardfork::DaoInit)? {
            ForkCondition::Block(block) => Some(block),
            _ => None,
        }
    }

    /// Structural validation independent of any single fork's delta: mutually exclusive or
    /// out-of-range options that would otherwise surface as confusing failures deep inside a
    /// specific fork's builder calls.
    pub fn validate(&self) -> Result<(), SpecError> {
        if self.fork_schedule.is_empty() {
            return Err(SpecError::InvalidConfig { reason: InvalidConfigReason::EmptyForkSchedule });
        }
        if let Some(limit) = self.contract_size_limit_override {
            if limit == 0 {
                return Err(SpecError::InvalidConfig {
                    reason: InvalidConfigReason::NegativeOrZeroContractSizeLimit,
                });
            }
        }
        if let Some(limit) = self.stack_size_limit_override {
            if limit <= 0 {
                return Err(SpecError::InvalidConfig {
                    reason: InvalidConfigReason::NegativeOrZeroStackSizeLimit,
                });
            }
        }
        if self.base_fee_per_gas.is_some() && self.is_zero_base_fee {
            return Err(SpecError::InvalidConfig {
                reason: InvalidConfigReason::MutuallyExclusiveBaseFeeOptions,
            });
        }
        let activates_base_fee_market = self.activation(EthereumHardfork::London).is_some();
        if activates_base_fee_market
            && self.base_fee_per_gas.is_none()
            && !self.is_zero_base_fee
            && !self.quorum_compatible
        {
            return Err(SpecError::InvalidConfig {
                reason: InvalidConfigReason::BaseFeeMarketRequestedWithoutBaseFee,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> GenesisConfig {
        GenesisConfig {
            fork_schedule: vec![(EthereumHardfork::Frontier, ForkCondition::Block(0))],
            chain_id: Some(1),
            terminal_total_difficulty: None,
            base_fee_per_gas: None,
            is_zero_base_fee: false,
            london_block_number: None,
            pow_algorithm: PowAlgorithm::Ethash,
            quorum_compatible: false,
            evm_tuning: EvmTuning::default(),
            enable_revert_reason: false,
            contract_size_limit_override: None,
            stack_size_limit_override: None,
        }
    }

    #[test]
    fn zero_contract_size_override_is_invalid() {
        let mut config = base_config();
        config.contract_size_limit_override = Some(0);
        assert_eq!(
            config.validate().unwrap_err(),
            SpecError::InvalidConfig { reason: InvalidConfigReason::NegativeOrZeroContractSizeLimit }
        );
    }

    #[test]
    fn london_without_any_base_fee_option_is_invalid() {
        let mut config = base_config();
        config.fork_schedule.push((EthereumHardfork::London, ForkCondition::Block(12_965_000)));
        assert_eq!(
            config.validate().unwrap_err(),
            SpecError::InvalidConfig {
                reason: InvalidConfigReason::BaseFeeMarketRequestedWithoutBaseFee
            }
        );
    }

    #[test]
    fn both_base_fee_options_together_is_invalid() {
        let mut config = base_config();
        config.base_fee_per_gas = Some(1_000_000_000);
        config.is_zero_base_fee = true;
        assert_eq!(
            config.validate().unwrap_err(),
            SpecError::InvalidConfig { reason: InvalidConfigReason::MutuallyExclusiveBaseFeeOptions }
        );
    }

    #[test]
    fn quorum_compatible_chain_may_activate_london_without_a_base_fee() {
        let mut config = base_config();
        config.quorum_compatible = true;
        config.fork_schedule.push((EthereumHardfork::London, ForkCondition::Block(12_965_000)));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn dao_fork_block_reads_back_the_schedule_entry() {
        let mut config = base_config();
        config.fork_schedule.push((EthereumHardfork::DaoInit, ForkCondition::Block(1_920_000)));
        assert_eq!(config.dao_fork_block(), Some(1_920_000));
    }
}
