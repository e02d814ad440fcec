use std::sync::Arc;

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

/// A fully bound, immutable rule bundle for one activated fork. Every field is either a shared
/// reference to a named rule implementation or a plain value; nothing here is mutated after
/// [`crate::ProtocolSpecBuilder::build`] returns it, which is what makes it safe to hand the
/// same `Arc<ProtocolSpec>` to any number of concurrent readers.
#[derive(Debug, Clone)]
pub struct ProtocolSpec {
    pub name: String,

    pub gas_calculator: Arc<dyn GasCalculator>,
    pub gas_limit_calculator: Arc<dyn GasLimitCalculator>,
    pub evm: Arc<dyn EvmFactory>,
    pub precompile_registry: Arc<dyn PrecompileRegistry>,

    pub message_call_processor: Arc<dyn MessageCallProcessor>,
    pub contract_creation_processor: Arc<dyn ContractCreationProcessor>,
    pub transaction_validator: Arc<dyn TransactionValidator>,
    pub transaction_processor: Arc<dyn TransactionProcessor>,
    pub private_transaction_processor: Option<Arc<dyn PrivateTransactionProcessor>>,

    pub block_header_validator: Arc<dyn BlockHeaderValidator>,
    pub ommer_header_validator: Arc<dyn OmmerHeaderValidator>,
    pub block_body_validator: Arc<dyn BlockBodyValidator>,
    pub block_processor: Arc<dyn BlockProcessor>,
    pub block_validator: Arc<dyn BlockValidator>,
    pub block_importer_factory: Arc<dyn BlockImporterFactory>,
    pub block_header_functions: Arc<dyn BlockHeaderFunctions>,
    pub transaction_receipt_factory: Arc<dyn ReceiptFactory>,

    pub difficulty_calculator: Arc<dyn DifficultyCalculator>,
    pub fee_market: Arc<dyn FeeMarket>,
    pub block_reward: u128,
    pub skip_zero_block_rewards: bool,
    pub mining_beneficiary_calculator: Arc<dyn MiningBeneficiaryCalculator>,

    pub withdrawals_validator: Option<Arc<dyn WithdrawalsValidator>>,
    pub withdrawals_processor: Option<Arc<dyn WithdrawalsProcessor>>,
    pub deposits_validator: Option<Arc<dyn DepositsValidator>>,

    pub is_proof_of_stake: bool,
}
