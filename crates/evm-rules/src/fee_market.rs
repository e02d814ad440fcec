use core::fmt::Debug;

/// EIP-1559 tuning constants Besu and geth agree on for mainnet.
const ELASTICITY_MULTIPLIER: u64 = 2;
const BASE_FEE_MAX_CHANGE_DENOMINATOR: u64 = 8;
/// EIP-4844 blob-fee tuning constants.
const MIN_BLOB_BASE_FEE: u128 = 1;
const BLOB_BASE_FEE_UPDATE_FRACTION: u128 = 3_338_477;

/// Named, pure factory reference for a fork's transaction-priority and base-fee rules.
pub trait FeeMarket: Debug + Send + Sync {
    fn name(&self) -> &'static str;

    /// Whether this market carries an EIP-1559 base fee at all.
    fn supports_base_fee(&self) -> bool {
        false
    }

    /// The base fee the first block under this market must set, if the caller did not
    /// otherwise configure one explicitly (used only at the London activation block).
    fn initial_base_fee(&self) -> Option<u64> {
        None
    }

    /// Computes the next block's base fee from the parent's base fee and gas usage.
    fn next_base_fee(&self, parent_base_fee: u64, parent_gas_used: u64, parent_gas_target: u64) -> u64 {
        let _ = (parent_gas_used, parent_gas_target);
        parent_base_fee
    }

    /// The per-byte blob gas price at the given excess blob gas, if this market prices blobs.
    fn blob_base_fee(&self, _excess_blob_gas: u64) -> Option<u128> {
        None
    }
}

/// Pre-London: no base fee, miners are paid the full gas price offered by the sender.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LegacyFeeMarket;
impl FeeMarket for LegacyFeeMarket {
    fn name(&self) -> &'static str {
        "Legacy"
    }
}

/// London's EIP-1559 base-fee market with a configurable genesis base fee.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LondonFeeMarket {
    initial_base_fee: u64,
}

impl LondonFeeMarket {
    pub const DEFAULT_INITIAL_BASE_FEE: u64 = 1_000_000_000;

    pub const fn new(initial_base_fee: u64) -> Self {
        Self { initial_base_fee }
    }
}

impl Default for LondonFeeMarket {
    fn default() -> Self {
        Self::new(Self::DEFAULT_INITIAL_BASE_FEE)
    }
}

impl FeeMarket for LondonFeeMarket {
    fn name(&self) -> &'static str {
        "London"
    }
    fn supports_base_fee(&self) -> bool {
        true
    }
    fn initial_base_fee(&self) -> Option<u64> {
        Some(self.initial_base_fee)
    }
    fn next_base_fee(&self, parent_base_fee: u64, parent_gas_used: u64, parent_gas_target: u64) -> u64 {
        eip1559_next_base_fee(parent_base_fee, parent_gas_used, parent_gas_target)
    }
}

/// Quorum-compatibility variant: an EIP-1559-shaped market whose base fee is pinned at zero,
/// used by private-network configurations that want the London gas-limit elasticity behavior
/// without paying a base fee. Orthogonal to fork activation, see DESIGN.md.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ZeroBaseFeeMarket;
impl FeeMarket for ZeroBaseFeeMarket {
    fn name(&self) -> &'static str {
        "ZeroBaseFee"
    }
    fn supports_base_fee(&self) -> bool {
        true
    }
    fn initial_base_fee(&self) -> Option<u64> {
        Some(0)
    }
    fn next_base_fee(&self, _parent_base_fee: u64, _parent_gas_used: u64, _parent_gas_target: u64) -> u64 {
        0
    }
}

/// Cancun adds a second, independent fee dimension for blob-carrying transactions (EIP-4844).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CancunFeeMarket {
    initial_base_fee: u64,
}

impl CancunFeeMarket {
    pub const fn new(initial_base_fee: u64) -> Self {
        Self { initial_base_fee }
    }
}

impl Default for CancunFeeMarket {
    fn default() -> Self {
        Self::new(LondonFeeMarket::DEFAULT_INITIAL_BASE_FEE)
    }
}

impl FeeMarket for CancunFeeMarket {
    fn name(&self) -> &'static str {
        "Cancun"
    }
    fn supports_base_fee(&self) -> bool {
        true
    }
    fn initial_base_fee(&self) -> Option<u64> {
        Some(self.initial_base_fee)
    }
    fn next_base_fee(&self, parent_base_fee: u64, parent_gas_used: u64, parent_gas_target: u64) -> u64 {
        eip1559_next_base_fee(parent_base_fee, parent_gas_used, parent_gas_target)
    }
    fn blob_base_fee(&self, excess_blob_gas: u64) -> Option<u128> {
        Some(fake_exponential(MIN_BLOB_BASE_FEE, excess_blob_gas as u128, BLOB_BASE_FEE_UPDATE_FRACTION))
    }
}

fn eip1559_next_base_fee(parent_base_fee: u64, parent_gas_used: u64, parent_gas_target: u64) -> u64 {
    if parent_gas_target == 0 {
        return parent_base_fee;
    }
    use core::cmp::Ordering;
    match parent_gas_used.cmp(&parent_gas_target) {
        Ordering::Equal => parent_base_fee,
        Ordering::Greater => {
            let gas_used_delta = parent_gas_used - parent_gas_target;
            let base_fee_delta = ((parent_base_fee as u128 * gas_used_delta as u128)
                / parent_gas_target as u128
                / BASE_FEE_MAX_CHANGE_DENOMINATOR as u128)
                .max(1) as u64;
            parent_base_fee.saturating_add(base_fee_delta)
        }
        Ordering::Less => {
            let gas_used_delta = parent_gas_target - parent_gas_used;
            let base_fee_delta = (parent_base_fee as u128 * gas_used_delta as u128)
                / parent_gas_target as u128
                / BASE_FEE_MAX_CHANGE_DENOMINATOR as u128;
            parent_base_fee.saturating_sub(base_fee_delta as u64)
        }
    }
}

/// `factor * e^(numerator / denominator)`, approximated via the Taylor-series method EIP-4844
/// specifies, so blob fees move the same way on every conformant client.
fn fake_exponential(factor: u128, numerator: u128, denominator: u128) -> u128 {
    let mut i = 1u128;
    let mut output = 0u128;
    let mut numerator_accum = factor * denominator;
    while numerator_accum > 0 {
        output += numerator_accum;
        numerator_accum = (numerator_accum * numerator) / (denominator * i);
        i += 1;
    }
    output / denominator
}

/// The gas-limit elasticity target the London gas-limit calculator aims for: parent gas limit
/// divided by the elasticity multiplier.
pub const fn gas_target(parent_gas_limit: u64) -> u64 {
    parent_gas_limit / ELASTICITY_MULTIPLIER
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_fee_unchanged_at_target_usage() {
        assert_eq!(eip1559_next_base_fee(1_000_000_000, 15_000_000, 15_000_000), 1_000_000_000);
    }

    #[test]
    fn base_fee_rises_above_target() {
        let next = eip1559_next_base_fee(1_000_000_000, 30_000_000, 15_000_000);
        assert!(next > 1_000_000_000);
    }

    #[test]
    fn base_fee_falls_below_target() {
        let next = eip1559_next_base_fee(1_000_000_000, 0, 15_000_000);
        assert!(next < 1_000_000_000);
    }

    #[test]
    fn blob_base_fee_floors_at_minimum() {
        assert_eq!(fake_exponential(1, 0, BLOB_BASE_FEE_UPDATE_FRACTION), 1);
    }
}
