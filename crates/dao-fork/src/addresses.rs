use alloy_primitives::{address, Address};
use once_cell::sync::Lazy;
use protocol_errors::DaoForkError;

/// The embedded DAO-affected-account list, in array order — the order balances are drained in.
/// Bundled at build time and parsed once; any malformed resource is a programmer error, not a
/// runtime condition, which is why loading it can only fail through [`DaoForkError`] rather than
/// panicking: a caller who constructs a schedule without ever activating `DaoInit` never pays
/// for this at all.
const DAO_ADDRESSES_JSON: &str = include_str!("../resources/daoAddresses.json");

/// The single account balances are migrated *into* at the DAO fork block.
pub const DAO_REFUND_CONTRACT: Address = address!("bf4ed7b27f1d666546e30d74d50d173d20bca754");

static DAO_HARDFORK_ACCOUNTS: Lazy<Result<Vec<Address>, DaoForkError>> = Lazy::new(|| {
    let raw: Vec<String> =
        serde_json::from_str(DAO_ADDRESSES_JSON).map_err(|_| DaoForkError::AddressListUnavailable)?;
    raw.iter()
        .map(|entry| entry.parse::<Address>().map_err(|_| DaoForkError::AddressListUnavailable))
        .collect()
});

/// The accounts whose balances are migrated to [`DAO_REFUND_CONTRACT`], in the order they
/// appear in the embedded resource.
pub fn dao_hardfork_accounts() -> Result<&'static [Address], DaoForkError> {
    DAO_HARDFORK_ACCOUNTS.as_deref().map_err(|err| *err)
}
