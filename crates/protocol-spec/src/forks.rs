//! The fork delta registry: one pure function per fork, each layering only the behaviors its
//! fork changes onto the builder state the previous fork left behind. A fork that changes
//! nothing about a rule family simply never calls that family's setter, so the prior binding
//! carries forward untouched — this is what "delta monotonicity" (no unintended field resets)
//! means in practice.
//!
//! Composition is an explicit left-fold over [`registry`] (see
//! [`crate::schedule::ProtocolSchedule::new`]), not recursive calls between fork functions: the
//! fold already chains each fork's definition after its immediate predecessor's accumulated
//! state, so a fork's own function only needs to state what it adds or changes.

use std::sync::Arc;

use protocol_dao_fork::DaoForkBlockProcessor;
use protocol_errors::SpecError;
use protocol_evm::difficulty::{
    ByzantiumDifficultyCalculator, ConstantinopleDifficultyCalculator, FrontierDifficultyCalculator,
    GrayGlacierDifficultyCalculator, HomesteadDifficultyCalculator, MuirGlacierDifficultyCalculator,
    ParisDifficultyCalculator,
};
use protocol_evm::difficulty::{ArrowGlacierDifficultyCalculator, LondonDifficultyCalculator};
use protocol_evm::evm::{
    ArrowGlacierEvm, BerlinEvm, ByzantiumEvm, CancunEvm, ConstantinopleEvm, ExperimentalEvm, FrontierEvm,
    FutureEvm, GrayGlacierEvm, HomesteadEvm, IstanbulEvm, LondonEvm, MuirGlacierEvm, ParisEvm, PetersburgEvm,
    ShanghaiEvm, SpuriousDragonEvm, TangerineEvm,
};
use protocol_evm::fee_market::{CancunFeeMarket, FeeMarket, LegacyFeeMarket, LondonFeeMarket, ZeroBaseFeeMarket};
use protocol_evm::gas::{
    BerlinGasCalculator, ByzantiumGasCalculator, CancunGasCalculator, ConstantinopleGasCalculator,
    FrontierGasCalculator, HomesteadGasCalculator, IstanbulGasCalculator, PetersburgGasCalculator,
    ShanghaiGasCalculator, SpuriousDragonGasCalculator, TangerineGasCalculator,
};
use protocol_evm::gas_limit::{CancunGasLimitCalculator, FrontierGasLimitCalculator, LondonGasLimitCalculator};
use protocol_evm::header::{DaoMarkerHeaderValidator, ProofOfWorkHeaderValidator};
use protocol_evm::precompiles::{
    ByzantiumPrecompiles, CancunPrecompiles, FrontierPrecompiles, IstanbulPrecompiles, SpuriousDragonPrecompiles,
};
use protocol_evm::processor::MainnetBlockProcessor;
use protocol_evm::reward::{
    BYZANTIUM_BLOCK_REWARD, CONSTANTINOPLE_BLOCK_REWARD, FRONTIER_BLOCK_REWARD, PARIS_BLOCK_REWARD,
};
use protocol_evm::validators::{
    BerlinTransactionValidator, CancunContractCreation, CancunTransactionValidator, FrontierContractCreation,
    FrontierTransactionValidator, HomesteadContractCreation, HomesteadTransactionValidator,
    LondonContractCreation, LondonTransactionValidator, OverridableContractCreation, ShanghaiTransactionValidator,
    SpuriousDragonContractCreation, SpuriousDragonTransactionValidator,
};
use protocol_evm::deposits::AllowedDeposits;
use protocol_evm::withdrawals::{AllowedWithdrawals, MainnetWithdrawalsProcessor};
use protocol_forks::EthereumHardfork;
use protocol_receipts::{
    ByzantiumReceiptFactory, ByzantiumWithReasonReceiptFactory, FrontierReceiptFactory, TypedReceiptFactory,
};

use crate::builder::ProtocolSpecBuilder;
use crate::config::GenesisConfig;
use crate::external::{
    FrontierBlockHeaderFunctions, FrontierMessageCallProcessor, MainnetBlockImporterFactory,
    MainnetTransactionProcessor, ParisBlockHeaderFunctions,
};

pub type ForkDelta = fn(ProtocolSpecBuilder, &GenesisConfig) -> Result<ProtocolSpecBuilder, SpecError>;

/// One entry in the fork registry: the fork it builds a spec for, and the pure delta function
/// that layers it onto whatever the previous entry left behind.
#[derive(Clone, Copy)]
pub struct ForkDefinition {
    pub hardfork: EthereumHardfork,
    pub delta: ForkDelta,
}

/// The full mainnet fork chain, oldest first — the same order as
/// [`EthereumHardfork::all`](protocol_forks::EthereumHardfork::all).
pub fn registry() -> Vec<ForkDefinition> {
    vec![
        ForkDefinition { hardfork: EthereumHardfork::Frontier, delta: frontier },
        ForkDefinition { hardfork: EthereumHardfork::Homestead, delta: homestead },
        ForkDefinition { hardfork: EthereumHardfork::DaoInit, delta: dao_init },
        ForkDefinition { hardfork: EthereumHardfork::DaoTransition, delta: dao_transition },
        ForkDefinition { hardfork: EthereumHardfork::Tangerine, delta: tangerine },
        ForkDefinition { hardfork: EthereumHardfork::SpuriousDragon, delta: spurious_dragon },
        ForkDefinition { hardfork: EthereumHardfork::Byzantium, delta: byzantium },
        ForkDefinition { hardfork: EthereumHardfork::Constantinople, delta: constantinople },
        ForkDefinition { hardfork: EthereumHardfork::Petersburg, delta: petersburg },
        ForkDefinition { hardfork: EthereumHardfork::Istanbul, delta: istanbul },
        ForkDefinition { hardfork: EthereumHardfork::MuirGlacier, delta: muir_glacier },
        ForkDefinition { hardfork: EthereumHardfork::Berlin, delta: berlin },
        ForkDefinition { hardfork: EthereumHardfork::London, delta: london },
        ForkDefinition { hardfork: EthereumHardfork::ArrowGlacier, delta: arrow_glacier },
        ForkDefinition { hardfork: EthereumHardfork::GrayGlacier, delta: gray_glacier },
        ForkDefinition { hardfork: EthereumHardfork::Paris, delta: paris },
        ForkDefinition { hardfork: EthereumHardfork::Shanghai, delta: shanghai },
        ForkDefinition { hardfork: EthereumHardfork::Cancun, delta: cancun },
        ForkDefinition { hardfork: EthereumHardfork::Future, delta: future },
        ForkDefinition { hardfork: EthereumHardfork::Experimental, delta: experimental },
    ]
}

fn fee_market_for(config: &GenesisConfig, cancun: bool) -> Arc<dyn FeeMarket> {
    if config.quorum_compatible || config.is_zero_base_fee {
        return Arc::new(ZeroBaseFeeMarket);
    }
    let initial_base_fee = config.base_fee_per_gas.unwrap_or(LondonFeeMarket::DEFAULT_INITIAL_BASE_FEE);
    if cancun {
        Arc::new(CancunFeeMarket::new(initial_base_fee))
    } else {
        Arc::new(LondonFeeMarket::new(initial_base_fee))
    }
}

fn frontier(_builder: ProtocolSpecBuilder, config: &GenesisConfig) -> Result<ProtocolSpecBuilder, SpecError> {
    Ok(ProtocolSpecBuilder::new()
        .name("Frontier")
        .gas_calculator(FrontierGasCalculator)
        .gas_limit_calculator(FrontierGasLimitCalculator)
        .evm(FrontierEvm)
        .precompile_registry(FrontierPrecompiles::default())
        .message_call_processor(FrontierMessageCallProcessor)
        .contract_creation_processor(OverridableContractCreation::new(
            FrontierContractCreation,
            config.contract_size_limit_override,
        ))
        .transaction_validator(FrontierTransactionValidator)
        .transaction_processor(MainnetTransactionProcessor)
        .block_header_validator(ProofOfWorkHeaderValidator)
        .ommer_header_validator(protocol_evm::header::StandardOmmerHeaderValidator)
        .block_body_validator(protocol_evm::header::StandardBlockBodyValidator)
        .block_processor(MainnetBlockProcessor::new(FRONTIER_BLOCK_REWARD, false))
        .block_validator(protocol_evm::header::StandardBlockValidator)
        .block_importer_factory(MainnetBlockImporterFactory)
        .block_header_functions(FrontierBlockHeaderFunctions)
        .transaction_receipt_factory(FrontierReceiptFactory)
        .difficulty_calculator(FrontierDifficultyCalculator)
        .fee_market(LegacyFeeMarket)
        .block_reward(FRONTIER_BLOCK_REWARD)
        .skip_zero_block_rewards(false)
        .mining_beneficiary_calculator(protocol_evm::reward::DefaultMiningBeneficiaryCalculator)
        .is_proof_of_stake(false))
}

fn homestead(builder: ProtocolSpecBuilder, config: &GenesisConfig) -> Result<ProtocolSpecBuilder, SpecError> {
    Ok(builder
        .name("Homestead")
        .gas_calculator(HomesteadGasCalculator)
        .evm(HomesteadEvm)
        .contract_creation_processor(OverridableContractCreation::new(
            HomesteadContractCreation,
            config.contract_size_limit_override,
        ))
        .transaction_validator(HomesteadTransactionValidator)
        .difficulty_calculator(HomesteadDifficultyCalculator))
}

/// Installs the DAO irregular-state wrapper over whatever header validator and block processor
/// Homestead left bound. A no-op if this genesis never activates `DaoInit` at all — a private
/// chain that skips the DAO fork entirely has no height to wrap around.
fn dao_init(builder: ProtocolSpecBuilder, config: &GenesisConfig) -> Result<ProtocolSpecBuilder, SpecError> {
    let Some(dao_fork_block) = config.dao_fork_block() else {
        return Ok(builder.name("DaoInit"));
    };
    let base_processor = builder
        .block_processor_ref()
        .ok_or(SpecError::IncompleteSpec { field: "block_processor" })?;
    Ok(builder
        .name("DaoInit")
        .block_header_validator(DaoMarkerHeaderValidator::new(ProofOfWorkHeaderValidator, dao_fork_block))
        .block_processor_arc(Arc::new(DaoForkBlockProcessor::new(base_processor, dao_fork_block))))
}

/// Unwraps the DAO processor: normal processing resumes with a plain
/// [`MainnetBlockProcessor`] carrying whatever reward era was active, and the header marker
/// requirement is dropped.
fn dao_transition(builder: ProtocolSpecBuilder, config: &GenesisConfig) -> Result<ProtocolSpecBuilder, SpecError> {
    if config.dao_fork_block().is_none() {
        return Ok(builder.name("DaoTransition"));
    }
    let reward = builder.block_reward_value().unwrap_or(FRONTIER_BLOCK_REWARD);
    let skip_zero = builder.skip_zero_block_rewards_value();
    Ok(builder
        .name("DaoTransition")
        .block_header_validator(ProofOfWorkHeaderValidator)
        .block_processor(MainnetBlockProcessor::new(reward, skip_zero)))
}

fn tangerine(builder: ProtocolSpecBuilder, _config: &GenesisConfig) -> Result<ProtocolSpecBuilder, SpecError> {
    Ok(builder.name("Tangerine").gas_calculator(TangerineGasCalculator).evm(TangerineEvm))
}

fn spurious_dragon(builder: ProtocolSpecBuilder, config: &GenesisConfig) -> Result<ProtocolSpecBuilder, SpecError> {
    Ok(builder
        .name("SpuriousDragon")
        .gas_calculator(SpuriousDragonGasCalculator)
        .evm(SpuriousDragonEvm)
        .precompile_registry(SpuriousDragonPrecompiles::default())
        .contract_creation_processor(OverridableContractCreation::new(
            SpuriousDragonContractCreation,
            config.contract_size_limit_override,
        ))
        .transaction_validator(SpuriousDragonTransactionValidator)
        .skip_zero_block_rewards(true))
}

fn byzantium(builder: ProtocolSpecBuilder, config: &GenesisConfig) -> Result<ProtocolSpecBuilder, SpecError> {
    let mut builder = builder
        .name("Byzantium")
        .gas_calculator(ByzantiumGasCalculator)
        .evm(ByzantiumEvm)
        .precompile_registry(ByzantiumPrecompiles::default())
        .difficulty_calculator(ByzantiumDifficultyCalculator)
        .block_reward(BYZANTIUM_BLOCK_REWARD);
    builder = if config.enable_revert_reason {
        builder.transaction_receipt_factory(ByzantiumWithReasonReceiptFactory)
    } else {
        builder.transaction_receipt_factory(ByzantiumReceiptFactory)
    };
    Ok(builder)
}

fn constantinople(builder: ProtocolSpecBuilder, _config: &GenesisConfig) -> Result<ProtocolSpecBuilder, SpecError> {
    Ok(builder
        .name("Constantinople")
        .gas_calculator(ConstantinopleGasCalculator)
        .evm(ConstantinopleEvm)
        .difficulty_calculator(ConstantinopleDifficultyCalculator)
        .block_reward(CONSTANTINOPLE_BLOCK_REWARD))
}

fn petersburg(builder: ProtocolSpecBuilder, _config: &GenesisConfig) -> Result<ProtocolSpecBuilder, SpecError> {
    Ok(builder.name("Petersburg").gas_calculator(PetersburgGasCalculator).evm(PetersburgEvm))
}

fn istanbul(builder: ProtocolSpecBuilder, _config: &GenesisConfig) -> Result<ProtocolSpecBuilder, SpecError> {
    Ok(builder
        .name("Istanbul")
        .gas_calculator(IstanbulGasCalculator)
        .evm(IstanbulEvm)
        .precompile_registry(IstanbulPrecompiles::default()))
}

fn muir_glacier(builder: ProtocolSpecBuilder, _config: &GenesisConfig) -> Result<ProtocolSpecBuilder, SpecError> {
    Ok(builder
        .name("MuirGlacier")
        .evm(MuirGlacierEvm)
        .difficulty_calculator(MuirGlacierDifficultyCalculator))
}

fn berlin(builder: ProtocolSpecBuilder, config: &GenesisConfig) -> Result<ProtocolSpecBuilder, SpecError> {
    Ok(builder
        .name("Berlin")
        .gas_calculator(BerlinGasCalculator)
        .evm(BerlinEvm)
        .transaction_validator(BerlinTransactionValidator)
        .transaction_receipt_factory(TypedReceiptFactory::new(config.enable_revert_reason)))
}

fn london(builder: ProtocolSpecBuilder, config: &GenesisConfig) -> Result<ProtocolSpecBuilder, SpecError> {
    let london_block = config.london_block_number.unwrap_or(0);
    Ok(builder
        .name("London")
        .evm(LondonEvm)
        .fee_market_arc(fee_market_for(config, false))
        .gas_limit_calculator(LondonGasLimitCalculator::new(london_block))
        .transaction_validator(LondonTransactionValidator)
        .contract_creation_processor(OverridableContractCreation::new(
            LondonContractCreation,
            config.contract_size_limit_override,
        ))
        .block_header_validator(protocol_evm::header::BaseFeeHeaderValidator)
        .difficulty_calculator(LondonDifficultyCalculator))
}

fn arrow_glacier(builder: ProtocolSpecBuilder, _config: &GenesisConfig) -> Result<ProtocolSpecBuilder, SpecError> {
    Ok(builder
        .name("ArrowGlacier")
        .evm(ArrowGlacierEvm)
        .difficulty_calculator(ArrowGlacierDifficultyCalculator))
}

fn gray_glacier(builder: ProtocolSpecBuilder, _config: &GenesisConfig) -> Result<ProtocolSpecBuilder, SpecError> {
    Ok(builder
        .name("GrayGlacier")
        .evm(GrayGlacierEvm)
        .difficulty_calculator(GrayGlacierDifficultyCalculator))
}

fn paris(builder: ProtocolSpecBuilder, _config: &GenesisConfig) -> Result<ProtocolSpecBuilder, SpecError> {
    Ok(builder
        .name("Paris")
        .evm(ParisEvm)
        .difficulty_calculator(ParisDifficultyCalculator)
        .block_header_validator(protocol_evm::header::MergeHeaderValidator)
        .ommer_header_validator(protocol_evm::header::NoOmmersHeaderValidator)
        .block_header_functions(ParisBlockHeaderFunctions)
        .block_reward(PARIS_BLOCK_REWARD)
        .is_proof_of_stake(true))
}

fn shanghai(builder: ProtocolSpecBuilder, _config: &GenesisConfig) -> Result<ProtocolSpecBuilder, SpecError> {
    Ok(builder
        .name("Shanghai")
        .gas_calculator(ShanghaiGasCalculator)
        .evm(ShanghaiEvm)
        .transaction_validator(ShanghaiTransactionValidator)
        .block_header_validator(protocol_evm::header::WithdrawalsHeaderValidator)
        .withdrawals_validator(AllowedWithdrawals)
        .withdrawals_processor(MainnetWithdrawalsProcessor))
}

fn cancun(builder: ProtocolSpecBuilder, config: &GenesisConfig) -> Result<ProtocolSpecBuilder, SpecError> {
    let london_block = config.london_block_number.unwrap_or(0);
    Ok(builder
        .name("Cancun")
        .gas_calculator(CancunGasCalculator)
        .evm(CancunEvm)
        .fee_market_arc(fee_market_for(config, true))
        .gas_limit_calculator(CancunGasLimitCalculator::new(london_block))
        .transaction_validator(CancunTransactionValidator)
        .contract_creation_processor(OverridableContractCreation::new(
            CancunContractCreation,
            config.contract_size_limit_override,
        ))
        .precompile_registry(CancunPrecompiles::default()))
}

fn future(builder: ProtocolSpecBuilder, _config: &GenesisConfig) -> Result<ProtocolSpecBuilder, SpecError> {
    Ok(builder.name("Future").evm(FutureEvm))
}

fn experimental(builder: ProtocolSpecBuilder, _config: &GenesisConfig) -> Result<ProtocolSpecBuilder, SpecError> {
    Ok(builder.name("Experimental").evm(ExperimentalEvm).deposits_validator(AllowedDeposits))
}
