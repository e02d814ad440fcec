//! Hard-fork types shared by the protocol-spec registry: a fork is just a name with an
//! activation [`ForkCondition`]; the behavior delta it carries lives one layer up in
//! `protocol_spec`.

mod condition;
mod hardfork;
mod hardforks;

pub use condition::{ForkCondition, Head};
pub use hardfork::{EthereumHardfork, Hardfork, HardforkExt, TotalDifficulty, UnknownHardfork};
pub use hardforks::{ChainHardforks, EthereumHardforks};
