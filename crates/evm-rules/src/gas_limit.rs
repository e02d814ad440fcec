use core::fmt::Debug;

const GAS_LIMIT_BOUND_DIVISOR: u64 = 1024;
const MIN_GAS_LIMIT: u64 = 5_000;
/// Per EIP-4844: the maximum blob gas a single block may consume.
pub const MAX_BLOB_GAS_PER_BLOCK: u64 = 786_432;

/// Named, pure factory reference for a fork's block gas-limit-adjustment rule.
pub trait GasLimitCalculator: Debug + Send + Sync {
    fn name(&self) -> &'static str;

    /// The gas limit a child of `parent_gas_limit` (proposing `desired_limit`) is allowed to
    /// set.
    fn next_gas_limit(&self, parent_gas_limit: u64, desired_limit: u64) -> u64;

    /// The maximum blob gas a block under this schedule may consume, if this schedule prices
    /// blobs at all.
    fn max_blob_gas_per_block(&self) -> Option<u64> {
        None
    }
}

/// Frontier through pre-London: the limit may move by at most `parent / 1024` per block, floored
/// at [`MIN_GAS_LIMIT`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrontierGasLimitCalculator;
impl GasLimitCalculator for FrontierGasLimitCalculator {
    fn name(&self) -> &'static str {
        "Frontier"
    }
    fn next_gas_limit(&self, parent_gas_limit: u64, desired_limit: u64) -> u64 {
        bounded_step(parent_gas_limit, desired_limit)
    }
}

fn bounded_step(parent_gas_limit: u64, desired_limit: u64) -> u64 {
    let max_delta = parent_gas_limit / GAS_LIMIT_BOUND_DIVISOR;
    let bounded = if desired_limit > parent_gas_limit {
        parent_gas_limit.saturating_add(max_delta.min(desired_limit - parent_gas_limit))
    } else {
        parent_gas_limit.saturating_sub(max_delta.min(parent_gas_limit - desired_limit))
    };
    bounded.max(MIN_GAS_LIMIT)
}

/// London (EIP-1559): at the activation block, the parent gas limit is interpreted as already
/// being the *gas target* and the child's limit is doubled to make room for full blocks at
/// 2x target (the "elasticity" the fee market burns back down over time); afterward the usual
/// bounded-step rule applies to the now-doubled ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LondonGasLimitCalculator {
    activation_block: u64,
}

impl LondonGasLimitCalculator {
    pub const fn new(activation_block: u64) -> Self {
        Self { activation_block }
    }

    /// Whether `block_number` is exactly the London activation block, where the one-shot
    /// doubling applies.
    pub fn is_activation_block(&self, block_number: u64) -> bool {
        block_number == self.activation_block
    }
}

impl GasLimitCalculator for LondonGasLimitCalculator {
    fn name(&self) -> &'static str {
        "London"
    }
    fn next_gas_limit(&self, parent_gas_limit: u64, desired_limit: u64) -> u64 {
        bounded_step(parent_gas_limit, desired_limit)
    }
}

/// The gas limit to use for the London activation block itself: double the parent's, so the
/// pre-London gas limit is reinterpreted as the post-London gas *target*.
pub fn london_activation_gas_limit(parent_gas_limit: u64) -> u64 {
    parent_gas_limit.saturating_mul(2)
}

/// Cancun: identical gas-limit elasticity rule to London, plus a hard per-block cap on blob gas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CancunGasLimitCalculator {
    london: LondonGasLimitCalculator,
}

impl CancunGasLimitCalculator {
    pub const fn new(london_activation_block: u64) -> Self {
        Self { london: LondonGasLimitCalculator::new(london_activation_block) }
    }
}

impl GasLimitCalculator for CancunGasLimitCalculator {
    fn name(&self) -> &'static str {
        "Cancun"
    }
    fn next_gas_limit(&self, parent_gas_limit: u64, desired_limit: u64) -> u64 {
        self.london.next_gas_limit(parent_gas_limit, desired_limit)
    }
    fn max_blob_gas_per_block(&self) -> Option<u64> {
        Some(MAX_BLOB_GAS_PER_BLOCK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn london_doubles_the_limit_at_activation() {
        assert_eq!(london_activation_gas_limit(15_000_000), 30_000_000);
    }

    #[test]
    fn bounded_step_never_exceeds_one_over_1024th() {
        let next = FrontierGasLimitCalculator.next_gas_limit(30_000_000, u64::MAX);
        assert_eq!(next, 30_000_000 + 30_000_000 / 1024);
    }

    #[test]
    fn bounded_step_floors_at_minimum_gas_limit() {
        let next = FrontierGasLimitCalculator.next_gas_limit(MIN_GAS_LIMIT, 0);
        assert_eq!(next, MIN_GAS_LIMIT);
    }
}
