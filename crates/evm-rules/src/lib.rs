//! The rule-function catalog: named, pure references to every swappable execution rule a
//! [`ProtocolSpec`](../protocol_spec/struct.ProtocolSpec.html) binds — gas schedules, EVM
//! opcode sets, precompile registries, difficulty and fee-market formulas, rewards, and the
//! validators/processors that gate transactions, contract creation, headers, and whole blocks.
//!
//! Every trait here is a contract this crate *consumes*: the concrete implementations below are
//! the mainnet reference bindings, not a restatement of the EVM interpreter or precompile
//! cryptography (both are external collaborators, see the workspace root DESIGN.md).

pub mod deposits;
pub mod difficulty;
pub mod evm;
pub mod fee_market;
pub mod gas;
pub mod gas_limit;
pub mod header;
pub mod precompiles;
pub mod processor;
pub mod reward;
pub mod validators;
pub mod withdrawals;

/// `2 * 24_576`: the maximum init-code length a creation transaction may submit from Shanghai
/// onward (EIP-3860).
pub const SHANGHAI_INIT_CODE_SIZE_LIMIT: usize = 2 * validators::SPURIOUS_DRAGON_CONTRACT_SIZE_LIMIT;
