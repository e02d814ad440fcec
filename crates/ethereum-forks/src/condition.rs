use crate::hardfork::TotalDifficulty;
use alloy_primitives::U256;

/// The governing values of a block header that fork activation is checked against.
///
/// Pre-Paris forks activate by block number, Shanghai onward activate by timestamp, and the
/// Paris transition itself activates by total difficulty crossing the terminal value. A
/// [`ChainHardforks`](crate::ChainHardforks) consults whichever field each fork's
/// [`ForkCondition`] cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Head {
    pub number: u64,
    pub timestamp: u64,
    pub difficulty: U256,
    pub total_difficulty: U256,
}

/// The rule that determines when a single hard fork becomes active.
///
/// Every unlisted behavior is inherited from whatever activated before it; a `ForkCondition`
/// only answers "has this fork turned on yet", it does not encode the delta itself (see
/// `protocol_spec::forks` for that).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ForkCondition {
    /// Activates at and after the given block number (inclusive).
    Block(u64),
    /// Activates at and after the given unix timestamp (inclusive). Used from Shanghai onward.
    Timestamp(u64),
    /// Activates once the chain's cumulative proof-of-work difficulty reaches or exceeds this
    /// value. Used only for the Paris (the Merge) transition.
    TotalDifficulty(TotalDifficulty),
    /// Never activates. Used to park `Future`/`Experimental` definitions that a genesis config
    /// did not opt into.
    Never,
}

impl ForkCondition {
    /// True if this fork has activated for the given header-derived [`Head`].
    pub fn active_at_head(&self, head: &Head) -> bool {
        match self {
            Self::Block(block) => head.number >= *block,
            Self::Timestamp(timestamp) => head.timestamp >= *timestamp,
            Self::TotalDifficulty(ttd) => head.total_difficulty >= *ttd,
            Self::Never => false,
        }
    }

    /// True if this fork activates at exactly `block_number`, i.e. it is the first block
    /// produced under the new rules. Used by the DAO processor to fire only at its one height.
    pub fn transitions_at_block(&self, block_number: u64) -> bool {
        matches!(self, Self::Block(block) if *block == block_number)
    }

    /// True if the condition is expressed as a block number.
    pub const fn is_block(&self) -> bool {
        matches!(self, Self::Block(_))
    }

    /// True if the condition is expressed as a timestamp.
    pub const fn is_timestamp(&self) -> bool {
        matches!(self, Self::Timestamp(_))
    }

    /// True if the condition is expressed as a total difficulty threshold.
    pub const fn is_total_difficulty(&self) -> bool {
        matches!(self, Self::TotalDifficulty(_))
    }

    /// The raw activation key as a sortable `u64`, for schedule ordering. Total-difficulty
    /// conditions saturate at `u64::MAX` when the threshold does not fit, which is fine since
    /// only one such condition ever appears in a schedule.
    pub fn sort_key(&self) -> u64 {
        match self {
            Self::Block(n) | Self::Timestamp(n) => *n,
            Self::TotalDifficulty(ttd) => u64::try_from(*ttd).unwrap_or(u64::MAX),
            Self::Never => u64::MAX,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_condition_activates_at_and_after_its_height() {
        let condition = ForkCondition::Block(100);
        assert!(!condition.active_at_head(&Head { number: 99, ..Default::default() }));
        assert!(condition.active_at_head(&Head { number: 100, ..Default::default() }));
        assert!(condition.active_at_head(&Head { number: 101, ..Default::default() }));
    }

    #[test]
    fn timestamp_condition_activates_at_and_after_its_timestamp() {
        let condition = ForkCondition::Timestamp(1_000);
        assert!(!condition.active_at_head(&Head { timestamp: 999, ..Default::default() }));
        assert!(condition.active_at_head(&Head { timestamp: 1_000, ..Default::default() }));
    }

    #[test]
    fn total_difficulty_condition_activates_once_ttd_is_reached() {
        let ttd = U256::from(58_750_000_000_000_000_000_000u128);
        let condition = ForkCondition::TotalDifficulty(ttd);

        let below = Head { total_difficulty: ttd - U256::from(1), ..Default::default() };
        assert!(!condition.active_at_head(&below));

        let at = Head { total_difficulty: ttd, ..Default::default() };
        assert!(condition.active_at_head(&at));

        let above = Head { total_difficulty: ttd + U256::from(1), ..Default::default() };
        assert!(condition.active_at_head(&above));
    }

    #[test]
    fn never_never_activates() {
        let condition = ForkCondition::Never;
        assert!(!condition.active_at_head(&Head::default()));
        assert!(!condition.active_at_head(&Head {
            number: u64::MAX,
            timestamp: u64::MAX,
            total_difficulty: U256::MAX,
            ..Default::default()
        }));
    }

    #[test]
    fn transitions_at_block_only_matches_its_own_height() {
        let condition = ForkCondition::Block(1_920_000);
        assert!(condition.transitions_at_block(1_920_000));
        assert!(!condition.transitions_at_block(1_920_001));
        assert!(!ForkCondition::Timestamp(1_920_000).transitions_at_block(1_920_000));
    }

    #[test]
    fn condition_kind_predicates_are_mutually_exclusive() {
        assert!(ForkCondition::Block(0).is_block());
        assert!(!ForkCondition::Block(0).is_timestamp());
        assert!(ForkCondition::Timestamp(0).is_timestamp());
        assert!(ForkCondition::TotalDifficulty(U256::ZERO).is_total_difficulty());
        assert!(!ForkCondition::Never.is_block());
    }

    #[test]
    fn sort_key_passes_through_block_and_timestamp_values() {
        assert_eq!(ForkCondition::Block(42).sort_key(), 42);
        assert_eq!(ForkCondition::Timestamp(42).sort_key(), 42);
        assert_eq!(ForkCondition::Never.sort_key(), u64::MAX);
    }

    #[test]
    fn sort_key_saturates_when_total_difficulty_does_not_fit_in_u64() {
        let huge = U256::from(u64::MAX) + U256::from(1);
        assert_eq!(ForkCondition::TotalDifficulty(huge).sort_key(), u64::MAX);
    }
}
