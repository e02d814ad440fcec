use std::sync::Arc;

use protocol_errors::SpecError;
use protocol_evm::deposits::DepositsValidator;
use protocol_evm::difficulty::DifficultyCalculator;
use protocol_evm::evm::EvmFactory;
use protocol_evm::fee_market::FeeMarket;
use protocol_evm::gas::GasCalculator;
use protocol_evm::gas_limit::GasLimitCalculator;
use protocol_evm::header::{BlockBodyValidator, BlockHeaderValidator, BlockValidator, OmmerHeaderValidator};
use protocol_evm::precompiles::PrecompileRegistry;
use protocol_evm::processor::BlockProcessor;
use protocol_evm::reward::MiningBeneficiaryCalculator;
use protocol_evm::validators::{ContractCreationProcessor, TransactionValidator};
use protocol_evm::withdrawals::{WithdrawalsProcessor, WithdrawalsValidator};
use protocol_receipts::ReceiptFactory;

use crate::external::{BlockHeaderFunctions, BlockImporterFactory, MessageCallProcessor, PrivateTransactionProcessor, TransactionProcessor};
use crate::spec::ProtocolSpec;

/// Mutable accumulator of rule bindings for one fork. A fork definition is a pure function from
/// `(builder, genesis config)` to a new builder with its own deltas layered on top; `build()` is
/// only ever called once the fold over the whole fork chain reaches an activated fork.
///
/// Every setter takes a direct, already-constructed value — there is no separate factory-closure
/// form, because by the time fork deltas run, `GenesisConfig` has already resolved every runtime
/// choice a factory closure would otherwise have deferred (see DESIGN.md).
#[derive(Debug, Clone, Default)]
pub struct ProtocolSpecBuilder {
    name: Option<String>,

    gas_calculator: Option<Arc<dyn GasCalculator>>,
    gas_limit_calculator: Option<Arc<dyn GasLimitCalculator>>,
    evm: Option<Arc<dyn EvmFactory>>,
    precompile_registry: Option<Arc<dyn PrecompileRegistry>>,

    message_call_processor: Option<Arc<dyn MessageCallProcessor>>,
    contract_creation_processor: Option<Arc<dyn ContractCreationProcessor>>,
    transaction_validator: Option<Arc<dyn TransactionValidator>>,
    transaction_processor: Option<Arc<dyn TransactionProcessor>>,
    private_transaction_processor: Option<Arc<dyn PrivateTransactionProcessor>>,

    block_header_validator: Option<Arc<dyn BlockHeaderValidator>>,
    ommer_header_validator: Option<Arc<dyn OmmerHeaderValidator>>,
    block_body_validator: Option<Arc<dyn BlockBodyValidator>>,
    block_processor: Option<Arc<dyn BlockProcessor>>,
    block_validator: Option<Arc<dyn BlockValidator>>,
    block_importer_factory: Option<Arc<dyn BlockImporterFactory>>,
    block_header_functions: Option<Arc<dyn BlockHeaderFunctions>>,
    transaction_receipt_factory: Option<Arc<dyn ReceiptFactory>>,

    difficulty_calculator: Option<Arc<dyn DifficultyCalculator>>,
    fee_market: Option<Arc<dyn FeeMarket>>,
    block_reward: Option<u128>,
    skip_zero_block_rewards: bool,
    mining_beneficiary_calculator: Option<Arc<dyn MiningBeneficiaryCalculator>>,

    withdrawals_validator: Option<Arc<dyn WithdrawalsValidator>>,
    withdrawals_processor: Option<Arc<dyn WithdrawalsProcessor>>,
    deposits_validator: Option<Arc<dyn DepositsValidator>>,

    is_proof_of_stake: bool,
}

macro_rules! trait_setter {
    ($field:ident, $trait_name:ident) => {
        pub fn $field(mut self, value: impl $trait_name + 'static) -> Self {
            self.$field = Some(Arc::new(value));
            self
        }
    };
}

macro_rules! trait_setter_arc {
    ($with_arc:ident, $field:ident, $trait_name:ident) => {
        pub fn $with_arc(mut self, value: Arc<dyn $trait_name>) -> Self {
            self.$field = Some(value);
            self
        }
    };
}

impl ProtocolSpecBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    trait_setter!(gas_calculator, GasCalculator);
    trait_setter!(gas_limit_calculator, GasLimitCalculator);
    trait_setter!(evm, EvmFactory);
    trait_setter!(precompile_registry, PrecompileRegistry);

    trait_setter!(message_call_processor, MessageCallProcessor);
    trait_setter!(contract_creation_processor, ContractCreationProcessor);
    trait_setter!(transaction_validator, TransactionValidator);
    trait_setter!(transaction_processor, TransactionProcessor);

    pub fn private_transaction_processor(mut self, value: impl PrivateTransactionProcessor + 'static) -> Self {
        self.private_transaction_processor = Some(Arc::new(value));
        self
    }

    trait_setter!(block_header_validator, BlockHeaderValidator);
    trait_setter!(ommer_header_validator, OmmerHeaderValidator);
    trait_setter!(block_body_validator, BlockBodyValidator);
    // `block_processor` also needs an Arc-accepting form: `protocol_dao_fork::DaoForkBlockProcessor`
    // wraps a previously-bound processor that the DAO-init fork step already holds as an `Arc`.
    trait_setter!(block_processor, BlockProcessor);
    trait_setter_arc!(block_processor_arc, block_processor, BlockProcessor);
    trait_setter!(block_validator, BlockValidator);
    trait_setter!(block_importer_factory, BlockImporterFactory);
    trait_setter!(block_header_functions, BlockHeaderFunctions);
    trait_setter!(transaction_receipt_factory, ReceiptFactory);

    trait_setter!(difficulty_calculator, DifficultyCalculator);
    trait_setter!(fee_market, FeeMarket);
    // London and Cancun pick between three concrete fee-market shapes at runtime depending on
    // genesis configuration (priced, zero-base-fee, or blob-aware); the delta function builds
    // the chosen one behind an `Arc<dyn FeeMarket>` up front rather than needing a fourth
    // wrapper type here.
    trait_setter_arc!(fee_market_arc, fee_market, FeeMarket);

    pub fn block_reward(mut self, reward: u128) -> Self {
        self.block_reward = Some(reward);
        self
    }

    pub fn skip_zero_block_rewards(mut self, skip: bool) -> Self {
        self.skip_zero_block_rewards = skip;
        self
    }

    trait_setter!(mining_beneficiary_calculator, MiningBeneficiaryCalculator);

    pub fn withdrawals_validator(mut self, value: impl WithdrawalsValidator + 'static) -> Self {
        self.withdrawals_validator = Some(Arc::new(value));
        self
    }

    pub fn withdrawals_processor(mut self, value: impl WithdrawalsProcessor + 'static) -> Self {
        self.withdrawals_processor = Some(Arc::new(value));
        self
    }

    pub fn clear_withdrawals(mut self) -> Self {
        self.withdrawals_validator = None;
        self.withdrawals_processor = None;
        self
    }

    pub fn deposits_validator(mut self, value: impl DepositsValidator + 'static) -> Self {
        self.deposits_validator = Some(Arc::new(value));
        self
    }

    pub fn is_proof_of_stake(mut self, value: bool) -> Self {
        self.is_proof_of_stake = value;
        self
    }

    /// Shares this builder's current `block_processor` binding, if any — used by the DAO-init
    /// fork step to wrap whatever processor Homestead left bound without needing to know its
    /// concrete type.
    pub fn block_processor_ref(&self) -> Option<Arc<dyn BlockProcessor>> {
        self.block_processor.clone()
    }

    /// The reward value currently bound, if any — used by the DAO-transition fork step to
    /// rebuild a plain, unwrapped [`protocol_evm::processor::MainnetBlockProcessor`] from
    /// whatever reward era was active when the DAO wrapper was installed.
    pub fn block_reward_value(&self) -> Option<u128> {
        self.block_reward
    }

    pub fn skip_zero_block_rewards_value(&self) -> bool {
        self.skip_zero_block_rewards
    }

    /// Resolves every binding in the dependency order the design lays out — `gas_calculator →
    /// evm → precompile_registry → message_call_processor → contract_creation_processor →
    /// transaction_validator → transaction_processor → private_transaction_processor`, then the
    /// header/body/block validators, which only depend on the fee market and configuration
    /// already folded into this builder — and emits an immutable [`ProtocolSpec`].
    ///
    /// There is nothing left to *resolve* at this point (every setter already stores a
    /// constructed value), so "dependency order" here means only the order in which missing
    /// required fields are reported: the first absent field earlier in the chain is the one
    /// named in the returned error, matching which field a real factory-based resolver would
    /// have failed to construct first.
    pub fn build(self) -> Result<ProtocolSpec, SpecError> {
        macro_rules! require {
            ($field:ident) => {
                self.$field.ok_or(SpecError::IncompleteSpec { field: stringify!($field) })?
            };
        }

        Ok(ProtocolSpec {
            name: self.name.clone().ok_or(SpecError::IncompleteSpec { field: "name" })?,

            gas_calculator: require!(gas_calculator),
            evm: require!(evm),
            precompile_registry: require!(precompile_registry),
            message_call_processor: require!(message_call_processor),
            contract_creation_processor: require!(contract_creation_processor),
            transaction_validator: require!(transaction_validator),
            transaction_processor: require!(transaction_processor),
            private_transaction_processor: self.private_transaction_processor,

            gas_limit_calculator: require!(gas_limit_calculator),
            block_header_validator: require!(block_header_validator),
            ommer_header_validator: require!(ommer_header_validator),
            block_body_validator: require!(block_body_validator),
            block_processor: require!(block_processor),
            block_validator: require!(block_validator),
            block_importer_factory: require!(block_importer_factory),
            block_header_functions: require!(block_header_functions),
            transaction_receipt_factory: require!(transaction_receipt_factory),

            difficulty_calculator: require!(difficulty_calculator),
            fee_market: require!(fee_market),
            block_reward: require!(block_reward),
            skip_zero_block_rewards: self.skip_zero_block_rewards,
            mining_beneficiary_calculator: require!(mining_beneficiary_calculator),

            withdrawals_validator: self.withdrawals_validator,
            withdrawals_processor: self.withdrawals_processor,
            deposits_validator: self.deposits_validator,

            is_proof_of_stake: self.is_proof_of_stake,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use protocol_evm::evm::FrontierEvm;
    use protocol_evm::gas::FrontierGasCalculator;
    use protocol_evm::gas_limit::FrontierGasLimitCalculator;
    use protocol_evm::header::{ProofOfWorkHeaderValidator, StandardBlockBodyValidator, StandardOmmerHeaderValidator};
    use protocol_evm::precompiles::FrontierPrecompiles;
    use protocol_evm::processor::MainnetBlockProcessor;
    use protocol_evm::reward::DefaultMiningBeneficiaryCalculator;
    use protocol_evm::validators::{FrontierContractCreation, FrontierTransactionValidator};

    fn frontier_builder() -> ProtocolSpecBuilder {
        use crate::external::*;
        use protocol_evm::difficulty::FrontierDifficultyCalculator;
        use protocol_evm::fee_market::LegacyFeeMarket;
        use protocol_evm::header::StandardBlockValidator;
        use protocol_receipts::FrontierReceiptFactory;

        ProtocolSpecBuilder::new()
            .name("Frontier")
            .gas_calculator(FrontierGasCalculator)
            .gas_limit_calculator(FrontierGasLimitCalculator)
            .evm(FrontierEvm)
            .precompile_registry(FrontierPrecompiles::default())
            .message_call_processor(FrontierMessageCallProcessor)
            .contract_creation_processor(FrontierContractCreation)
            .transaction_validator(FrontierTransactionValidator)
            .transaction_processor(MainnetTransactionProcessor)
            .block_header_validator(ProofOfWorkHeaderValidator)
            .ommer_header_validator(StandardOmmerHeaderValidator)
            .block_body_validator(StandardBlockBodyValidator)
            .block_processor(MainnetBlockProcessor::new(protocol_evm::reward::FRONTIER_BLOCK_REWARD, false))
            .block_validator(StandardBlockValidator)
            .block_importer_factory(MainnetBlockImporterFactory)
            .block_header_functions(FrontierBlockHeaderFunctions)
            .transaction_receipt_factory(FrontierReceiptFactory)
            .difficulty_calculator(FrontierDifficultyCalculator)
            .fee_market(LegacyFeeMarket)
            .block_reward(protocol_evm::reward::FRONTIER_BLOCK_REWARD)
            .mining_beneficiary_calculator(DefaultMiningBeneficiaryCalculator)
    }

    #[test]
    fn missing_required_field_names_it() {
        let err = ProtocolSpecBuilder::new().name("Incomplete").build().unwrap_err();
        assert_eq!(err, SpecError::IncompleteSpec { field: "gas_calculator" });
    }

    #[test]
    fn fully_bound_builder_emits_a_spec() {
        let spec = frontier_builder().build().unwrap();
        assert_eq!(spec.name, "Frontier");
        assert_eq!(spec.block_reward, protocol_evm::reward::FRONTIER_BLOCK_REWARD);
        assert!(!spec.is_proof_of_stake);
        assert!(spec.withdrawals_validator.is_none());
    }
}
