use alloy_primitives::{address, Address};
use once_cell::sync::Lazy;
use std::collections::BTreeSet;

/// The RIPEMD-160 precompile address. Subject to a consensus bug: it is force-deleted when
/// empty from Spurious Dragon onward regardless of whether the call that touched it succeeded,
/// because the account-clearing rule force-deletes any empty account and nobody special-cased
/// precompiles out of that sweep before it shipped.
pub const RIPEMD160_PRECOMPILE: Address = address!("0000000000000000000000000000000000000003");

const ECRECOVER: Address = address!("0000000000000000000000000000000000000001");
const SHA256: Address = address!("0000000000000000000000000000000000000002");
const IDENTITY: Address = address!("0000000000000000000000000000000000000004");
/// Arbitrary-precision modular exponentiation precompile, added at Byzantium.
pub const MODEXP: Address = address!("0000000000000000000000000000000000000005");
/// bn256 addition precompile, added at Byzantium.
pub const BN256_ADD: Address = address!("0000000000000000000000000000000000000006");
/// bn256 scalar multiplication precompile, added at Byzantium.
pub const BN256_SCALAR_MUL: Address = address!("0000000000000000000000000000000000000007");
/// bn256 pairing check precompile, added at Byzantium.
pub const BN256_PAIRING: Address = address!("0000000000000000000000000000000000000008");
/// BLAKE2 compression function precompile, added at Istanbul (EIP-152).
pub const BLAKE2F: Address = address!("0000000000000000000000000000000000000009");
/// KZG point evaluation precompile, added at Cancun (EIP-4844).
pub const POINT_EVALUATION: Address = address!("000000000000000000000000000000000000000a");

static RIPEMD_ONLY: Lazy<BTreeSet<Address>> = Lazy::new(|| BTreeSet::from([RIPEMD160_PRECOMPILE]));
static NONE: Lazy<BTreeSet<Address>> = Lazy::new(BTreeSet::new);

/// Named, pure factory reference for a fork's set of active precompiled contracts.
///
/// Precompile *implementations* (the actual cryptography) are external collaborators; the
/// registry only tracks which addresses are wired up for a given fork, which is what the
/// contract-creation and account-clearing rules need to know.
pub trait PrecompileRegistry: core::fmt::Debug + Send + Sync {
    fn name(&self) -> &'static str;

    /// Addresses active for this fork.
    fn active_addresses(&self) -> &BTreeSet<Address>;

    /// The bug-compatible force-delete-when-empty set: empty before Spurious Dragon, and
    /// exactly [`RIPEMD160_PRECOMPILE`] from Spurious Dragon onward, forever — this behavior is
    /// a first-class named rule rather than a conditional buried in account clearing.
    fn force_delete_when_empty(&self) -> &BTreeSet<Address> {
        &NONE
    }
}

macro_rules! precompile_set {
    ($ident:ident, $name:literal, $force_delete:expr, [$($addr:expr),* $(,)?]) => {
        #[doc = concat!("Precompile set active from ", $name, " onward.")]
        #[derive(Debug, Clone)]
        pub struct $ident {
            active: BTreeSet<Address>,
        }

        impl Default for $ident {
            fn default() -> Self {
                Self { active: BTreeSet::from([$($addr),*]) }
            }
        }

        impl PrecompileRegistry for $ident {
            fn name(&self) -> &'static str {
                $name
            }
            fn active_addresses(&self) -> &BTreeSet<Address> {
                &self.active
            }
            fn force_delete_when_empty(&self) -> &BTreeSet<Address> {
                $force_delete
            }
        }
    };
}

precompile_set!(FrontierPrecompiles, "Frontier", &NONE, [ECRECOVER, SHA256, RIPEMD160_PRECOMPILE, IDENTITY]);

precompile_set!(
    SpuriousDragonPrecompiles,
    "SpuriousDragon",
    &RIPEMD_ONLY,
    [ECRECOVER, SHA256, RIPEMD160_PRECOMPILE, IDENTITY]
);

precompile_set!(
    ByzantiumPrecompiles,
    "Byzantium",
    &RIPEMD_ONLY,
    [ECRECOVER, SHA256, RIPEMD160_PRECOMPILE, IDENTITY, MODEXP, BN256_ADD, BN256_SCALAR_MUL, BN256_PAIRING]
);

precompile_set!(
    IstanbulPrecompiles,
    "Istanbul",
    &RIPEMD_ONLY,
    [
        ECRECOVER,
        SHA256,
        RIPEMD160_PRECOMPILE,
        IDENTITY,
        MODEXP,
        BN256_ADD,
        BN256_SCALAR_MUL,
        BN256_PAIRING,
        BLAKE2F,
    ]
);

precompile_set!(
    CancunPrecompiles,
    "Cancun",
    &RIPEMD_ONLY,
    [
        ECRECOVER,
        SHA256,
        RIPEMD160_PRECOMPILE,
        IDENTITY,
        MODEXP,
        BN256_ADD,
        BN256_SCALAR_MUL,
        BN256_PAIRING,
        BLAKE2F,
        POINT_EVALUATION,
    ]
);
