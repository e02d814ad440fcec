use auto_impl::auto_impl;
use core::fmt::Debug;

/// The wire format of a transaction, as far as acceptance rules care.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionType {
    Legacy,
    AccessList,
    Eip1559,
    Blob,
}

/// Why a [`TransactionValidator`] rejected a transaction. These are static, pre-execution
/// checks (type acceptance, chain id binding, init-code size); anything about balance,
/// nonce, or EVM execution belongs to the external block importer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TxValidationError {
    #[error("transaction type {0:?} is not accepted before this fork")]
    UnsupportedType(TransactionType),

    #[error("transaction is missing a chain id binding required from this fork onward")]
    MissingChainId,

    #[error("signature s-value is in the upper half of the curve order")]
    SignatureSValueTooHigh,

    #[error("init code size {actual} exceeds the limit of {limit} bytes")]
    InitCodeTooLarge { limit: usize, actual: usize },
}

/// Named, pure factory reference for a fork's transaction-acceptance rules.
pub trait TransactionValidator: Debug + Send + Sync {
    fn name(&self) -> &'static str;

    fn accepts(&self, tx_type: TransactionType) -> bool;

    fn requires_chain_id(&self) -> bool {
        false
    }

    fn requires_low_s_signature(&self) -> bool {
        false
    }

    fn max_init_code_size(&self) -> Option<usize> {
        None
    }

    /// Validates everything this trait can check statically about a creation transaction's
    /// init code and type. Execution (running the init code) is out of scope.
    fn validate(&self, tx_type: TransactionType, init_code_len: usize, has_chain_id: bool) -> Result<(), TxValidationError> {
        if !self.accepts(tx_type) {
            return Err(TxValidationError::UnsupportedType(tx_type));
        }
        if self.requires_chain_id() && !has_chain_id {
            return Err(TxValidationError::MissingChainId);
        }
        if let Some(limit) = self.max_init_code_size() {
            if init_code_len > limit {
                return Err(TxValidationError::InitCodeTooLarge { limit, actual: init_code_len });
            }
        }
        Ok(())
    }
}

macro_rules! tx_validator {
    ($ident:ident, $name:literal, [$($ty:expr),* $(,)?] $(, $flag:ident)*) => {
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
        pub struct $ident;
        impl TransactionValidator for $ident {
            fn name(&self) -> &'static str {
                $name
            }
            fn accepts(&self, tx_type: TransactionType) -> bool {
                matches!(tx_type, $($ty)|*)
            }
            $(
                fn $flag(&self) -> bool {
                    true
                }
            )*
        }
    };
}

tx_validator!(FrontierTransactionValidator, "Frontier", [TransactionType::Legacy]);
tx_validator!(HomesteadTransactionValidator, "Homestead", [TransactionType::Legacy], requires_low_s_signature);
tx_validator!(
    SpuriousDragonTransactionValidator,
    "SpuriousDragon",
    [TransactionType::Legacy],
    requires_low_s_signature,
    requires_chain_id
);
tx_validator!(
    BerlinTransactionValidator,
    "Berlin",
    [TransactionType::Legacy, TransactionType::AccessList],
    requires_low_s_signature,
    requires_chain_id
);
tx_validator!(
    LondonTransactionValidator,
    "London",
    [TransactionType::Legacy, TransactionType::AccessList, TransactionType::Eip1559],
    requires_low_s_signature,
    requires_chain_id
);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShanghaiTransactionValidator;
impl TransactionValidator for ShanghaiTransactionValidator {
    fn name(&self) -> &'static str {
        "Shanghai"
    }
    fn accepts(&self, tx_type: TransactionType) -> bool {
        matches!(tx_type, TransactionType::Legacy | TransactionType::AccessList | TransactionType::Eip1559)
    }
    fn requires_low_s_signature(&self) -> bool {
        true
    }
    fn requires_chain_id(&self) -> bool {
        true
    }
    fn max_init_code_size(&self) -> Option<usize> {
        Some(crate::SHANGHAI_INIT_CODE_SIZE_LIMIT)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CancunTransactionValidator;
impl TransactionValidator for CancunTransactionValidator {
    fn name(&self) -> &'static str {
        "Cancun"
    }
    fn accepts(&self, tx_type: TransactionType) -> bool {
        matches!(
            tx_type,
            TransactionType::Legacy
                | TransactionType::AccessList
                | TransactionType::Eip1559
                | TransactionType::Blob
        )
    }
    fn requires_low_s_signature(&self) -> bool {
        true
    }
    fn requires_chain_id(&self) -> bool {
        true
    }
    fn max_init_code_size(&self) -> Option<usize> {
        Some(crate::SHANGHAI_INIT_CODE_SIZE_LIMIT)
    }
}

/// Named, pure factory reference for a fork's contract-creation policy: what code a CREATE(2)
/// may deploy and at what cost.
#[auto_impl(Arc)]
pub trait ContractCreationProcessor: Debug + Send + Sync {
    fn name(&self) -> &'static str;

    /// Maximum deployed-code size.
    fn max_code_size(&self) -> usize;

    /// The nonce a freshly created contract account starts with.
    fn initial_contract_nonce(&self) -> u64 {
        0
    }

    /// Whether an overflowing code-deposit-cost calculation fails the creation (post-Homestead)
    /// or is tolerated as a legacy quirk (Frontier only).
    fn fails_on_code_deposit_cost_overflow(&self) -> bool {
        false
    }

    /// EIP-3541: reject code starting with the `0xEF` byte (reserved for the EOF format).
    fn rejects_ef_prefix(&self) -> bool {
        false
    }

    /// Whether deployed code must additionally pass EOF container validation (Cancun+,
    /// experimental).
    fn validates_eof_container(&self) -> bool {
        false
    }

    fn validate_deployed_code(&self, code: &[u8]) -> Result<(), ContractCreationError> {
        if code.len() > self.max_code_size() {
            return Err(ContractCreationError::CodeTooLarge { limit: self.max_code_size(), actual: code.len() });
        }
        if self.rejects_ef_prefix() && code.first() == Some(&0xEF) {
            return Err(ContractCreationError::InvalidCodePrefix);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ContractCreationError {
    #[error("deployed code size {actual} exceeds the limit of {limit} bytes")]
    CodeTooLarge { limit: usize, actual: usize },

    #[error("deployed code begins with the reserved 0xEF byte (EIP-3541)")]
    InvalidCodePrefix,

    #[error("deployed code failed EOF container validation")]
    InvalidEofContainer,
}

/// `2^31 - 1`: Frontier's contract-size "limit" is really no limit at all in practice.
pub const FRONTIER_CONTRACT_SIZE_LIMIT: usize = (1usize << 31) - 1;
/// 24 576 bytes, EIP-170, active from Spurious Dragon onward.
pub const SPURIOUS_DRAGON_CONTRACT_SIZE_LIMIT: usize = 24_576;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrontierContractCreation;
impl ContractCreationProcessor for FrontierContractCreation {
    fn name(&self) -> &'static str {
        "Frontier"
    }
    fn max_code_size(&self) -> usize {
        FRONTIER_CONTRACT_SIZE_LIMIT
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HomesteadContractCreation;
impl ContractCreationProcessor for HomesteadContractCreation {
    fn name(&self) -> &'static str {
        "Homestead"
    }
    fn max_code_size(&self) -> usize {
        FRONTIER_CONTRACT_SIZE_LIMIT
    }
    fn fails_on_code_deposit_cost_overflow(&self) -> bool {
        true
    }
}

/// Spurious Dragon (EIP-170): the 24 576-byte cap, and newly created accounts start at nonce 1
/// (EIP-161) instead of 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpuriousDragonContractCreation;
impl ContractCreationProcessor for SpuriousDragonContractCreation {
    fn name(&self) -> &'static str {
        "SpuriousDragon"
    }
    fn max_code_size(&self) -> usize {
        SPURIOUS_DRAGON_CONTRACT_SIZE_LIMIT
    }
    fn initial_contract_nonce(&self) -> u64 {
        1
    }
    fn fails_on_code_deposit_cost_overflow(&self) -> bool {
        true
    }
}

/// London (EIP-3541): additionally rejects deployed code starting with `0xEF`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LondonContractCreation;
impl ContractCreationProcessor for LondonContractCreation {
    fn name(&self) -> &'static str {
        "London"
    }
    fn max_code_size(&self) -> usize {
        SPURIOUS_DRAGON_CONTRACT_SIZE_LIMIT
    }
    fn initial_contract_nonce(&self) -> u64 {
        1
    }
    fn fails_on_code_deposit_cost_overflow(&self) -> bool {
        true
    }
    fn rejects_ef_prefix(&self) -> bool {
        true
    }
}

/// Cancun/experimental EOF validation, layered on top of London's rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CancunContractCreation;
impl ContractCreationProcessor for CancunContractCreation {
    fn name(&self) -> &'static str {
        "Cancun"
    }
    fn max_code_size(&self) -> usize {
        SPURIOUS_DRAGON_CONTRACT_SIZE_LIMIT
    }
    fn initial_contract_nonce(&self) -> u64 {
        1
    }
    fn fails_on_code_deposit_cost_overflow(&self) -> bool {
        true
    }
    fn rejects_ef_prefix(&self) -> bool {
        true
    }
    fn validates_eof_container(&self) -> bool {
        true
    }
}

/// Wraps another [`ContractCreationProcessor`] to substitute a genesis-configured code-size
/// limit, leaving every other rule (nonce start, EOF/0xEF checks) delegated unchanged. Mirrors
/// [`crate::header::DaoMarkerHeaderValidator`]'s generic-wrapper shape: the override is a
/// first-class named rule, not a field mutated on the base struct.
#[derive(Debug, Clone, Copy)]
pub struct OverridableContractCreation<P> {
    inner: P,
    max_code_size_override: Option<usize>,
}

impl<P: ContractCreationProcessor> OverridableContractCreation<P> {
    pub fn new(inner: P, max_code_size_override: Option<usize>) -> Self {
        Self { inner, max_code_size_override }
    }
}

impl<P: ContractCreationProcessor> ContractCreationProcessor for OverridableContractCreation<P> {
    fn name(&self) -> &'static str {
        self.inner.name()
    }
    fn max_code_size(&self) -> usize {
        self.max_code_size_override.unwrap_or_else(|| self.inner.max_code_size())
    }
    fn initial_contract_nonce(&self) -> u64 {
        self.inner.initial_contract_nonce()
    }
    fn fails_on_code_deposit_cost_overflow(&self) -> bool {
        self.inner.fails_on_code_deposit_cost_overflow()
    }
    fn rejects_ef_prefix(&self) -> bool {
        self.inner.rejects_ef_prefix()
    }
    fn validates_eof_container(&self) -> bool {
        self.inner.validates_eof_container()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_replaces_only_the_code_size_limit() {
        let overridden = OverridableContractCreation::new(LondonContractCreation, Some(1_000));
        assert_eq!(overridden.max_code_size(), 1_000);
        assert!(overridden.rejects_ef_prefix());
        assert_eq!(overridden.initial_contract_nonce(), 1);
    }

    #[test]
    fn no_override_falls_back_to_the_inner_limit() {
        let not_overridden = OverridableContractCreation::new(LondonContractCreation, None);
        assert_eq!(not_overridden.max_code_size(), SPURIOUS_DRAGON_CONTRACT_SIZE_LIMIT);
    }

    #[test]
    fn shanghai_rejects_oversized_init_code() {
        let err = ShanghaiTransactionValidator
            .validate(TransactionType::Legacy, 49_153, true)
            .unwrap_err();
        assert_eq!(err, TxValidationError::InitCodeTooLarge { limit: 49_152, actual: 49_153 });
    }

    #[test]
    fn berlin_accepts_access_list_but_not_blob() {
        assert!(BerlinTransactionValidator.accepts(TransactionType::AccessList));
        assert!(!BerlinTransactionValidator.accepts(TransactionType::Blob));
    }

    #[test]
    fn frontier_rejects_missing_chain_id_is_a_noop() {
        // Frontier never required a chain id; validation of a Legacy tx with none succeeds.
        assert!(FrontierTransactionValidator.validate(TransactionType::Legacy, 0, false).is_ok());
    }

    #[test]
    fn london_rejects_ef_prefixed_code() {
        let err = LondonContractCreation.validate_deployed_code(&[0xEF, 0x00]).unwrap_err();
        assert_eq!(err, ContractCreationError::InvalidCodePrefix);
    }
}
