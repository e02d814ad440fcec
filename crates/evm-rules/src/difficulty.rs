use alloy_primitives::U256;
use core::fmt::Debug;

/// Inputs a difficulty calculator needs from the parent and candidate block headers.
#[derive(Debug, Clone, Copy)]
pub struct DifficultyParams {
    pub block_number: u64,
    pub block_timestamp: u64,
    pub parent_timestamp: u64,
    pub parent_difficulty: U256,
    pub parent_has_ommers: bool,
}

/// Named, pure factory reference for a fork's difficulty-adjustment formula.
pub trait DifficultyCalculator: Debug + Send + Sync {
    fn name(&self) -> &'static str;

    /// The difficulty a block at `params.block_number` must carry.
    fn calculate_difficulty(&self, params: &DifficultyParams) -> U256;
}

const DIFFICULTY_BOUND_DIVISOR: u64 = 2048;
const MIN_DIFFICULTY: u64 = 131_072;
const EXP_DIFFICULTY_PERIOD: u64 = 100_000;

fn bound_adjustment(parent_difficulty: U256, sign: i64) -> U256 {
    let step = parent_difficulty / U256::from(DIFFICULTY_BOUND_DIVISOR);
    if sign >= 0 {
        parent_difficulty.saturating_add(step * U256::from(sign as u64))
    } else {
        parent_difficulty.saturating_sub(step * U256::from((-sign) as u64))
    }
}

/// The exponential "ice age" bomb component, shifted back by `bomb_delay` blocks.
fn bomb_component(block_number: u64, bomb_delay: u64) -> U256 {
    let fake_block_number = block_number.saturating_sub(bomb_delay);
    if fake_block_number < EXP_DIFFICULTY_PERIOD {
        return U256::ZERO;
    }
    let exponent = (fake_block_number / EXP_DIFFICULTY_PERIOD).saturating_sub(2);
    U256::from(1u64) << (exponent.min(255) as usize)
}

/// Frontier: `parent_diff/2048` up if the block landed within 13s, down otherwise, plus the
/// undelayed bomb.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrontierDifficultyCalculator;
impl DifficultyCalculator for FrontierDifficultyCalculator {
    fn name(&self) -> &'static str {
        "Frontier"
    }
    fn calculate_difficulty(&self, p: &DifficultyParams) -> U256 {
        let sign: i64 = if p.block_timestamp < p.parent_timestamp + 13 { 1 } else { -1 };
        let adjusted = bound_adjustment(p.parent_difficulty, sign);
        let floor = adjusted.max(U256::from(MIN_DIFFICULTY));
        floor + bomb_component(p.block_number, 0)
    }
}

/// Shared formula for Homestead through Muir Glacier: `max(sign - (timestamp_diff / divisor),
/// -99) * parent_diff/2048`, where `sign` and `divisor` vary and `ommer_bonus` switches the
/// Byzantium+ "does the parent have ommers" adjustment on.
fn homestead_style_difficulty(
    p: &DifficultyParams,
    divisor: i64,
    ommer_bonus: bool,
    bomb_delay: u64,
) -> U256 {
    let timestamp_diff = p.block_timestamp.saturating_sub(p.parent_timestamp) as i64;
    let base: i64 = if ommer_bonus {
        if p.parent_has_ommers {
            2
        } else {
            1
        }
    } else {
        1
    };
    let sign = (base - timestamp_diff / divisor).max(-99);
    let adjusted = bound_adjustment(p.parent_difficulty, sign);
    let floor = adjusted.max(U256::from(MIN_DIFFICULTY));
    floor + bomb_component(p.block_number, bomb_delay)
}

macro_rules! homestead_style {
    ($ident:ident, $name:literal, $divisor:expr, $ommer_bonus:expr, $bomb_delay:expr) => {
        #[doc = concat!("Difficulty formula active from ", $name, " onward.")]
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
        pub struct $ident;
        impl DifficultyCalculator for $ident {
            fn name(&self) -> &'static str {
                $name
            }
            fn calculate_difficulty(&self, p: &DifficultyParams) -> U256 {
                homestead_style_difficulty(p, $divisor, $ommer_bonus, $bomb_delay)
            }
        }
    };
}

homestead_style!(HomesteadDifficultyCalculator, "Homestead", 10, false, 0);
homestead_style!(ByzantiumDifficultyCalculator, "Byzantium", 9, true, 3_000_000);
homestead_style!(ConstantinopleDifficultyCalculator, "Constantinople", 9, true, 5_000_000);
homestead_style!(MuirGlacierDifficultyCalculator, "MuirGlacier", 9, true, 9_000_000);
homestead_style!(LondonDifficultyCalculator, "London", 9, true, 9_700_000);
homestead_style!(ArrowGlacierDifficultyCalculator, "ArrowGlacier", 9, true, 10_700_000);
homestead_style!(GrayGlacierDifficultyCalculator, "GrayGlacier", 9, true, 11_400_000);

/// Paris (the Merge): difficulty is fixed at zero, proof-of-work is no longer meaningful.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParisDifficultyCalculator;
impl DifficultyCalculator for ParisDifficultyCalculator {
    fn name(&self) -> &'static str {
        "Paris"
    }
    fn calculate_difficulty(&self, _params: &DifficultyParams) -> U256 {
        U256::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paris_is_always_zero() {
        let params = DifficultyParams {
            block_number: 20_000_000,
            block_timestamp: 1,
            parent_timestamp: 0,
            parent_difficulty: U256::from(1_000_000_000u64),
            parent_has_ommers: false,
        };
        assert_eq!(ParisDifficultyCalculator.calculate_difficulty(&params), U256::ZERO);
    }

    #[test]
    fn frontier_floors_at_minimum_difficulty() {
        let params = DifficultyParams {
            block_number: 1,
            block_timestamp: 100,
            parent_timestamp: 0,
            parent_difficulty: U256::from(100u64),
            parent_has_ommers: false,
        };
        assert_eq!(
            FrontierDifficultyCalculator.calculate_difficulty(&params),
            U256::from(MIN_DIFFICULTY)
        );
    }

    #[test]
    fn bomb_delay_shifts_the_ice_age_later() {
        let params = DifficultyParams {
            block_number: 9_500_000,
            block_timestamp: 10,
            parent_timestamp: 0,
            parent_difficulty: U256::from(2_000_000_000_000u64),
            parent_has_ommers: false,
        };
        // Without delay the bomb would already be biting hard; Muir Glacier's 9M delay defers
        // it until fake_block_number = 500_000, which is still within the dormant period.
        let delayed = MuirGlacierDifficultyCalculator.calculate_difficulty(&params);
        let undelayed = homestead_style_difficulty(&params, 9, true, 0);
        assert!(delayed < undelayed);
    }
}
