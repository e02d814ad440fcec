//! Named references for rule families this crate only *binds*, never implements. Section 6 of
//! the design lists these as external collaborators (the interpreter, the transaction processor,
//! block import orchestration); what lives here is the minimal named-factory contract the spec
//! record exposes to them, not an implementation of their behavior.

use core::fmt::Debug;

/// The interpreter-facing entry point for running a single message call (a top-level
/// transaction or an internal `CALL`/`DELEGATECALL`). Actually executing EVM bytecode is the
/// external interpreter's job.
pub trait MessageCallProcessor: Debug + Send + Sync {
    fn name(&self) -> &'static str;
}

/// Drives message-call and contract-creation processors across a transaction, producing a
/// receipt-ready result. Owned by the external block importer; this crate only names which
/// variant a fork binds.
pub trait TransactionProcessor: Debug + Send + Sync {
    fn name(&self) -> &'static str;
}

/// The private-transaction pipeline some mainnet-compatible clients run alongside the public
/// one. Optional on every `ProtocolSpec`; mainnet forks never bind it.
pub trait PrivateTransactionProcessor: Debug + Send + Sync {
    fn name(&self) -> &'static str;
}

/// Produces the block importer used to append a validated block to the external canonical
/// chain. Out of scope per section 1; named here only so `ProtocolSpec` can carry a binding for
/// it.
pub trait BlockImporterFactory: Debug + Send + Sync {
    fn name(&self) -> &'static str;
}

/// Fork-specific pure functions over a block header that don't belong to any other rule family
/// (e.g. computing the value a header's mix-hash field carries post-merge). Named rather than
/// inlined so a fork's delta can swap the whole bundle.
pub trait BlockHeaderFunctions: Debug + Send + Sync {
    fn name(&self) -> &'static str;
}

macro_rules! external_marker {
    ($trait_name:ident, $doc:literal, $($ident:ident => $name:literal),+ $(,)?) => {
        $(
            #[doc = $doc]
            #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
            pub struct $ident;
            impl $trait_name for $ident {
                fn name(&self) -> &'static str {
                    $name
                }
            }
        )+
    };
}

external_marker!(
    MessageCallProcessor,
    "A named placeholder for the external interpreter's message-call entry point.",
    FrontierMessageCallProcessor => "Frontier",
);

external_marker!(
    TransactionProcessor,
    "A named placeholder for the external block importer's transaction processor.",
    MainnetTransactionProcessor => "Mainnet",
);

external_marker!(
    BlockImporterFactory,
    "A named placeholder for the external block import orchestration entry point.",
    MainnetBlockImporterFactory => "Mainnet",
);

external_marker!(
    BlockHeaderFunctions,
    "A named placeholder for fork-specific header helper functions.",
    FrontierBlockHeaderFunctions => "Frontier",
    ParisBlockHeaderFunctions => "Paris",
);
