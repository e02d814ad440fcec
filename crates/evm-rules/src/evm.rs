use core::fmt::Debug;
use revm_primitives::SpecId;

/// Named, pure factory reference for a fork's EVM opcode set.
///
/// The interpreter itself is an external collaborator (see the crate-level Non-goals); what the
/// spec needs is the [`SpecId`] each fork binds to, so that the external EVM factory can be
/// constructed from it.
pub trait EvmFactory: Debug + Send + Sync {
    fn name(&self) -> &'static str;
    fn spec_id(&self) -> SpecId;
}

macro_rules! evm_variant {
    ($ident:ident, $name:literal, $spec_id:expr) => {
        #[doc = concat!("Opcode set introduced by ", $name, ".")]
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
        pub struct $ident;

        impl EvmFactory for $ident {
            fn name(&self) -> &'static str {
                $name
            }
            fn spec_id(&self) -> SpecId {
                $spec_id
            }
        }
    };
}

evm_variant!(FrontierEvm, "Frontier", SpecId::FRONTIER);
// + DELEGATECALL
evm_variant!(HomesteadEvm, "Homestead", SpecId::HOMESTEAD);
evm_variant!(TangerineEvm, "Tangerine", SpecId::TANGERINE);
evm_variant!(SpuriousDragonEvm, "SpuriousDragon", SpecId::SPURIOUS_DRAGON);
// + REVERT, RETURNDATACOPY, STATICCALL
evm_variant!(ByzantiumEvm, "Byzantium", SpecId::BYZANTIUM);
// + CREATE2, EXTCODEHASH, SHL/SHR/SAR
evm_variant!(ConstantinopleEvm, "Constantinople", SpecId::CONSTANTINOPLE);
evm_variant!(PetersburgEvm, "Petersburg", SpecId::PETERSBURG);
// + CHAINID, SELFBALANCE
evm_variant!(IstanbulEvm, "Istanbul", SpecId::ISTANBUL);
evm_variant!(MuirGlacierEvm, "MuirGlacier", SpecId::MUIR_GLACIER);
evm_variant!(BerlinEvm, "Berlin", SpecId::BERLIN);
evm_variant!(LondonEvm, "London", SpecId::LONDON);
evm_variant!(ArrowGlacierEvm, "ArrowGlacier", SpecId::ARROW_GLACIER);
evm_variant!(GrayGlacierEvm, "GrayGlacier", SpecId::GRAY_GLACIER);
// PREVRANDAO replaces DIFFICULTY; no new opcode, behavior change of an existing one.
evm_variant!(ParisEvm, "Paris", SpecId::MERGE);
// + PUSH0
evm_variant!(ShanghaiEvm, "Shanghai", SpecId::SHANGHAI);
evm_variant!(CancunEvm, "Cancun", SpecId::CANCUN);
// Tracks unratified proposals; parameterized rather than frozen, see DESIGN.md.
evm_variant!(FutureEvm, "Future", SpecId::PRAGUE);
evm_variant!(ExperimentalEvm, "Experimental", SpecId::PRAGUE);
