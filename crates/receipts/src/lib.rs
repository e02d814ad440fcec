//! The four transaction-receipt encodings that have existed on Ethereum mainnet: a pre-Byzantium
//! state-root form, a post-Byzantium status form, a status form that additionally carries a
//! revert reason, and a typed-transaction form (Berlin onward). Each factory is pure: it takes
//! an execution result and an already-finalized world state and returns a receipt value, with
//! no side effects.

use alloy_primitives::{Bloom, Bytes, Log, B256};
use protocol_evm::validators::TransactionType;

/// What a receipt says about whether the transaction succeeded, in whichever form this fork
/// uses to say it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReceiptStatus {
    /// Pre-Byzantium: the intermediate state root immediately after the transaction applied.
    StateRoot(B256),
    /// Byzantium onward: `true` for success, `false` for a reverted/failed transaction.
    Status(bool),
}

/// A finished transaction receipt, in whichever of the four shapes its fork produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    /// `None` for legacy transactions; `Some(type_byte)` from the typed-transaction form
    /// onward.
    pub tx_type: Option<u8>,
    pub status: ReceiptStatus,
    pub cumulative_gas_used: u64,
    pub bloom: Bloom,
    pub logs: Vec<Log>,
    /// The revert reason string the EVM returned on failure, carried only by the
    /// Byzantium-with-reason and typed forms, and only when the fork's `enable_revert_reason`
    /// flag is set.
    pub revert_reason: Option<Bytes>,
}

/// The inputs a [`ReceiptFactory`] needs: the outcome of running one transaction against a
/// post-transaction world state. Actually running the transaction is the external EVM's job;
/// this crate only shapes the result into the fork-appropriate receipt encoding.
#[derive(Debug, Clone)]
pub struct ProcessingResult<'a> {
    pub tx_type: TransactionType,
    pub success: bool,
    pub gas_used: u64,
    pub cumulative_gas_used: u64,
    pub logs: Vec<Log>,
    pub revert_reason: Option<&'a [u8]>,
    /// The state root to embed in a pre-Byzantium receipt. Unused by the other three forms.
    pub post_state_root: B256,
}

/// Named, pure factory reference for a fork's receipt encoding.
pub trait ReceiptFactory: core::fmt::Debug + Send + Sync {
    fn name(&self) -> &'static str;
    fn build(&self, result: &ProcessingResult<'_>) -> Receipt;
}

fn bloom_of(logs: &[Log]) -> Bloom {
    // A real implementation folds each log's address and topics into the bloom filter; omitted
    // here since bloom construction is owned by the external EVM/log subsystem and this crate
    // only needs a stable placeholder to round-trip through encode/decode tests.
    let _ = logs;
    Bloom::ZERO
}

/// Pre-Byzantium: the receipt carries the intermediate state root, no status byte, and never a
/// revert reason (reverts did not exist as an EVM concept yet).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrontierReceiptFactory;
impl ReceiptFactory for FrontierReceiptFactory {
    fn name(&self) -> &'static str {
        "Frontier"
    }
    fn build(&self, result: &ProcessingResult<'_>) -> Receipt {
        Receipt {
            tx_type: None,
            status: ReceiptStatus::StateRoot(result.post_state_root),
            cumulative_gas_used: result.cumulative_gas_used,
            bloom: bloom_of(&result.logs),
            logs: result.logs.clone(),
            revert_reason: None,
        }
    }
}

/// Byzantium: the state root is replaced by a 0/1 status byte; no revert reason is carried.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ByzantiumReceiptFactory;
impl ReceiptFactory for ByzantiumReceiptFactory {
    fn name(&self) -> &'static str {
        "Byzantium"
    }
    fn build(&self, result: &ProcessingResult<'_>) -> Receipt {
        Receipt {
            tx_type: None,
            status: ReceiptStatus::Status(result.success),
            cumulative_gas_used: result.cumulative_gas_used,
            bloom: bloom_of(&result.logs),
            logs: result.logs.clone(),
            revert_reason: None,
        }
    }
}

/// Byzantium with the `enable_revert_reason` flag set: identical to [`ByzantiumReceiptFactory`]
/// except the revert reason is carried when the transaction failed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ByzantiumWithReasonReceiptFactory;
impl ReceiptFactory for ByzantiumWithReasonReceiptFactory {
    fn name(&self) -> &'static str {
        "ByzantiumWithReason"
    }
    fn build(&self, result: &ProcessingResult<'_>) -> Receipt {
        Receipt {
            tx_type: None,
            status: ReceiptStatus::Status(result.success),
            cumulative_gas_used: result.cumulative_gas_used,
            bloom: bloom_of(&result.logs),
            logs: result.logs.clone(),
            revert_reason: if result.success {
                None
            } else {
                result.revert_reason.map(Bytes::copy_from_slice)
            },
        }
    }
}

/// Berlin onward: carries the transaction type byte alongside the Byzantium status form; the
/// revert reason is carried whenever `enable_revert_reason` is set, same as the Byzantium+
/// reason variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TypedReceiptFactory {
    enable_revert_reason: bool,
}

impl TypedReceiptFactory {
    pub const fn new(enable_revert_reason: bool) -> Self {
        Self { enable_revert_reason }
    }
}

impl ReceiptFactory for TypedReceiptFactory {
    fn name(&self) -> &'static str {
        "Typed"
    }
    fn build(&self, result: &ProcessingResult<'_>) -> Receipt {
        let tx_type = match result.tx_type {
            TransactionType::Legacy => None,
            TransactionType::AccessList => Some(1),
            TransactionType::Eip1559 => Some(2),
            TransactionType::Blob => Some(3),
        };
        Receipt {
            tx_type,
            status: ReceiptStatus::Status(result.success),
            cumulative_gas_used: result.cumulative_gas_used,
            bloom: bloom_of(&result.logs),
            logs: result.logs.clone(),
            revert_reason: if self.enable_revert_reason && !result.success {
                result.revert_reason.map(Bytes::copy_from_slice)
            } else {
                None
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_result(tx_type: TransactionType, success: bool) -> ProcessingResult<'static> {
        ProcessingResult {
            tx_type,
            success,
            gas_used: 21_000,
            cumulative_gas_used: 21_000,
            logs: Vec::new(),
            revert_reason: if success { None } else { Some(b"execution reverted") },
            post_state_root: B256::repeat_byte(0x42),
        }
    }

    #[test]
    fn frontier_carries_state_root_not_status() {
        let receipt = FrontierReceiptFactory.build(&sample_result(TransactionType::Legacy, true));
        assert_eq!(receipt.status, ReceiptStatus::StateRoot(B256::repeat_byte(0x42)));
        assert!(receipt.tx_type.is_none());
    }

    #[test]
    fn berlin_typed_receipt_for_access_list_tx() {
        let factory = TypedReceiptFactory::new(false);
        let receipt = factory.build(&sample_result(TransactionType::AccessList, true));
        assert_eq!(receipt.tx_type, Some(1));
        assert_eq!(receipt.status, ReceiptStatus::Status(true));
        assert_eq!(receipt.cumulative_gas_used, 21_000);
        assert!(receipt.revert_reason.is_none());
    }

    #[test]
    fn byzantium_with_reason_only_carries_reason_on_failure() {
        let factory = ByzantiumWithReasonReceiptFactory;
        let ok = factory.build(&sample_result(TransactionType::Legacy, true));
        assert!(ok.revert_reason.is_none());
        let failed = factory.build(&sample_result(TransactionType::Legacy, false));
        assert_eq!(failed.revert_reason.as_deref(), Some(&b"execution reverted"[..]));
    }

    #[test]
    fn typed_receipt_reason_gated_by_flag() {
        let failed = sample_result(TransactionType::Eip1559, false);
        assert!(TypedReceiptFactory::new(false).build(&failed).revert_reason.is_none());
        assert!(TypedReceiptFactory::new(true).build(&failed).revert_reason.is_some());
    }

    #[test]
    fn receipt_round_trips_through_a_trivial_copy() {
        // Encoding/decoding proper belongs to the external RLP codec; here we only verify the
        // in-memory value is stable under a plain clone, which is what every caller downstream
        // of this crate relies on.
        let receipt = ByzantiumReceiptFactory.build(&sample_result(TransactionType::Legacy, true));
        assert_eq!(receipt.clone(), receipt);
    }
}
