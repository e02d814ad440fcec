use alloy_primitives::U256;
use core::{
    any::Any,
    fmt::{self, Debug, Display},
    str::FromStr,
};
use dyn_clone::DynClone;

/// A consensus-relevant hard fork.
///
/// Implemented by [`EthereumHardfork`] for the mainnet chain and is open for extension by
/// collaborators that track their own fork families (side chains, L2s, dev chains) the way
/// [`EthereumHardfork`] tracks the mainnet chain.
pub trait Hardfork: Any + DynClone + Send + Sync + 'static {
    /// Canonical, lowercase-kebab name of the fork, e.g. `"spurious-dragon"`.
    fn name(&self) -> &'static str;

    /// Upcast for comparisons against `dyn Hardfork` trait objects.
    fn as_any(&self) -> &dyn Any;
}

dyn_clone::clone_trait_object!(Hardfork);

impl PartialEq for dyn Hardfork {
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name()
    }
}
impl Eq for dyn Hardfork {}

impl Debug for dyn Hardfork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Display for dyn Hardfork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Convenience extension so callers can write `EthereumHardfork::Byzantium.boxed()`.
pub trait HardforkExt: Hardfork + Sized + Clone {
    fn boxed(self) -> Box<dyn Hardfork> {
        Box::new(self)
    }
}
impl<T: Hardfork + Clone> HardforkExt for T {}

/// Every hard fork ever activated (or reserved for activation) on Ethereum mainnet, in
/// ascending historical order. `DaoInit`/`DaoTransition` are not forks a client advertises
/// externally — they bracket the single irregular state rewrite block, see
/// `protocol_dao_fork`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EthereumHardfork {
    Frontier,
    Homestead,
    DaoInit,
    DaoTransition,
    Tangerine,
    SpuriousDragon,
    Byzantium,
    Constantinople,
    Petersburg,
    Istanbul,
    MuirGlacier,
    Berlin,
    London,
    ArrowGlacier,
    GrayGlacier,
    Paris,
    Shanghai,
    Cancun,
    Future,
    Experimental,
}

impl EthereumHardfork {
    /// All mainnet forks, oldest first. Used by the registry to fold deltas in order.
    pub const fn all() -> [Self; 20] {
        [
            Self::Frontier,
            Self::Homestead,
            Self::DaoInit,
            Self::DaoTransition,
            Self::Tangerine,
            Self::SpuriousDragon,
            Self::Byzantium,
            Self::Constantinople,
            Self::Petersburg,
            Self::Istanbul,
            Self::MuirGlacier,
            Self::Berlin,
            Self::London,
            Self::ArrowGlacier,
            Self::GrayGlacier,
            Self::Paris,
            Self::Shanghai,
            Self::Cancun,
            Self::Future,
            Self::Experimental,
        ]
    }

    /// Whether this fork activates by timestamp (Shanghai onward) rather than block number.
    pub const fn activates_by_timestamp(&self) -> bool {
        matches!(self, Self::Shanghai | Self::Cancun | Self::Future | Self::Experimental)
    }
}

impl Hardfork for EthereumHardfork {
    fn name(&self) -> &'static str {
        match self {
            Self::Frontier => "Frontier",
            Self::Homestead => "Homestead",
            Self::DaoInit => "DaoInit",
            Self::DaoTransition => "DaoTransition",
            Self::Tangerine => "Tangerine",
            Self::SpuriousDragon => "SpuriousDragon",
            Self::Byzantium => "Byzantium",
            Self::Constantinople => "Constantinople",
            Self::Petersburg => "Petersburg",
            Self::Istanbul => "Istanbul",
            Self::MuirGlacier => "MuirGlacier",
            Self::Berlin => "Berlin",
            Self::London => "London",
            Self::ArrowGlacier => "ArrowGlacier",
            Self::GrayGlacier => "GrayGlacier",
            Self::Paris => "Paris",
            Self::Shanghai => "Shanghai",
            Self::Cancun => "Cancun",
            Self::Future => "Future",
            Self::Experimental => "Experimental",
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Display for EthereumHardfork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EthereumHardfork {
    type Err = UnknownHardfork;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .into_iter()
            .find(|fork| fork.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownHardfork(s.to_string()))
    }
}

/// A fork name that does not appear in [`EthereumHardfork::all`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown hard fork: {0}")]
pub struct UnknownHardfork(pub String);

/// Total difficulty accumulated by the chain, used only to resolve the Paris transition.
pub type TotalDifficulty = U256;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_lists_every_fork_oldest_first() {
        let all = EthereumHardfork::all();
        assert_eq!(all.len(), 20);
        assert_eq!(all[0], EthereumHardfork::Frontier);
        assert_eq!(all[19], EthereumHardfork::Experimental);
    }

    #[test]
    fn from_str_is_case_insensitive_and_round_trips_name() {
        assert_eq!("spurious-dragon".parse::<EthereumHardfork>(), Err(UnknownHardfork("spurious-dragon".into())));
        for fork in EthereumHardfork::all() {
            assert_eq!(fork.name().to_ascii_uppercase().parse::<EthereumHardfork>().unwrap(), fork);
        }
    }

    #[test]
    fn from_str_rejects_an_unknown_name() {
        let err = "not-a-real-fork".parse::<EthereumHardfork>().unwrap_err();
        assert_eq!(err, UnknownHardfork("not-a-real-fork".to_string()));
    }

    #[test]
    fn display_matches_name() {
        assert_eq!(EthereumHardfork::Byzantium.to_string(), "Byzantium");
    }

    #[test]
    fn only_shanghai_onward_activates_by_timestamp() {
        assert!(!EthereumHardfork::Paris.activates_by_timestamp());
        assert!(EthereumHardfork::Shanghai.activates_by_timestamp());
        assert!(EthereumHardfork::Cancun.activates_by_timestamp());
        assert!(EthereumHardfork::Experimental.activates_by_timestamp());
    }

    #[test]
    fn boxed_hardforks_compare_by_name() {
        let a: Box<dyn Hardfork> = EthereumHardfork::London.boxed();
        let b: Box<dyn Hardfork> = EthereumHardfork::London.boxed();
        let c: Box<dyn Hardfork> = EthereumHardfork::Paris.boxed();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
