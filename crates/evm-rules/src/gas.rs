use core::fmt::Debug;

/// Named, pure factory reference for a fork's gas schedule.
///
/// Full opcode-level gas accounting is the EVM interpreter's job (an external collaborator,
/// see the module docs); what the protocol spec needs from a gas calculator are the handful of
/// schedule-level facts that other rules (contract creation, the transaction validator) consult
/// directly.
pub trait GasCalculator: Debug + Send + Sync {
    /// Canonical name, used in `ProtocolSpec::name` assembly and logging.
    fn name(&self) -> &'static str;

    /// Per-32-byte-word cost of metering init code (EIP-3860). Zero before Shanghai.
    fn init_code_word_cost(&self) -> u64 {
        0
    }

    /// Total init-code metering cost for code of the given length.
    fn init_code_cost(&self, init_code_len: usize) -> u64 {
        self.init_code_word_cost() * word_count(init_code_len)
    }

    /// Whether SSTORE uses net-gas metering (EIP-1283/EIP-2200) rather than the original flat
    /// schedule. Constantinople turns this on; Petersburg turns it back off; Istanbul turns it
    /// on again under EIP-2200.
    fn net_sstore_metering(&self) -> bool {
        false
    }

    /// Whether account/storage access is split into warm/cold tiers (EIP-2929, Berlin+).
    fn access_list_warm_cold_accounting(&self) -> bool {
        false
    }

    /// Whether this schedule additionally meters a blob-gas dimension (EIP-4844, Cancun+).
    fn blob_gas_accounting(&self) -> bool {
        false
    }
}

const fn word_count(len: usize) -> u64 {
    ((len as u64) + 31) / 32
}

macro_rules! gas_calculator {
    ($ident:ident, $name:literal $(, $method:ident)*) => {
        #[doc = concat!("Gas schedule at ", $name, ".")]
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
        pub struct $ident;

        impl GasCalculator for $ident {
            fn name(&self) -> &'static str {
                $name
            }
            $(
                fn $method(&self) -> bool {
                    true
                }
            )*
        }
    };
}

gas_calculator!(FrontierGasCalculator, "Frontier");
gas_calculator!(HomesteadGasCalculator, "Homestead");
gas_calculator!(TangerineGasCalculator, "Tangerine");
gas_calculator!(SpuriousDragonGasCalculator, "SpuriousDragon");
gas_calculator!(ByzantiumGasCalculator, "Byzantium");
gas_calculator!(ConstantinopleGasCalculator, "Constantinople", net_sstore_metering);
// EIP-1283 was reverted for security review; Petersburg is Constantinople's schedule minus
// net-metering, nothing else changed.
gas_calculator!(PetersburgGasCalculator, "Petersburg");
gas_calculator!(IstanbulGasCalculator, "Istanbul", net_sstore_metering);
gas_calculator!(BerlinGasCalculator, "Berlin", net_sstore_metering, access_list_warm_cold_accounting);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LondonGasCalculator;
impl GasCalculator for LondonGasCalculator {
    fn name(&self) -> &'static str {
        "London"
    }
    fn net_sstore_metering(&self) -> bool {
        true
    }
    fn access_list_warm_cold_accounting(&self) -> bool {
        true
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShanghaiGasCalculator;
impl GasCalculator for ShanghaiGasCalculator {
    fn name(&self) -> &'static str {
        "Shanghai"
    }
    fn net_sstore_metering(&self) -> bool {
        true
    }
    fn access_list_warm_cold_accounting(&self) -> bool {
        true
    }
    fn init_code_word_cost(&self) -> u64 {
        2
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CancunGasCalculator;
impl GasCalculator for CancunGasCalculator {
    fn name(&self) -> &'static str {
        "Cancun"
    }
    fn net_sstore_metering(&self) -> bool {
        true
    }
    fn access_list_warm_cold_accounting(&self) -> bool {
        true
    }
    fn init_code_word_cost(&self) -> u64 {
        2
    }
    fn blob_gas_accounting(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_code_cost_is_zero_before_shanghai() {
        assert_eq!(LondonGasCalculator.init_code_cost(49_153), 0);
    }

    #[test]
    fn init_code_cost_rounds_up_to_the_word() {
        // 49_152 bytes = 1536 words exactly; one extra byte rounds up to 1537.
        assert_eq!(ShanghaiGasCalculator.init_code_cost(49_152), 2 * 1536);
        assert_eq!(ShanghaiGasCalculator.init_code_cost(49_153), 2 * 1537);
    }

    #[test]
    fn petersburg_reverts_net_metering() {
        assert!(ConstantinopleGasCalculator.net_sstore_metering());
        assert!(!PetersburgGasCalculator.net_sstore_metering());
    }
}
