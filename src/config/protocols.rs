use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// Compound protocol addresses
pub struct ProtocolAddresses;

impl ProtocolAddresses {
    pub const COMPOUND_COMPTROLLER_V2: &'static str = "0x3d9819210A31b4961b30EF54bE2aeD79B9c9Cd3B";
    pub const COMPOUND_CUSDC: &'static str = "0x39AA39c021dfbaE8faC545936693aC917d5E7563";
    pub const COMPOUND_CDAI: &'static str = "0x5d3a536E4D6DbD6114cc1Ead35777bAB948E3643";
    pub const COMPOUND_CETH: &'static str = "0x4Ddc2D193948926D02f9B1fE9e1daa0718270ED5";
    pub const COMPOUND_CUSDT: &'static str = "0xf650C3d88D12dB855b8bf7D11Be6C55A4e07dCC9";
    pub const COMPOUND_CWBTC: &'static str = "0xC11b1268C1A384e55C48c2391d8d480264A3A7F4";
    pub const COMPOUND_V3_USDC: &'static str = "0xc3d688B66703497DAA19211EEdff47f25384cdc3";
    pub const COMPOUND_V3_ETH: &'static str = "0xA17581A9E3356d9A858b789D68B4d866e593aE94";

    pub fn compound() -> Vec<&'static str> {
        vec![
            Self::COMPOUND_COMPTROLLER_V2,
            Self::COMPOUND_CUSDC,
            Self::COMPOUND_CDAI,
            Self::COMPOUND_CETH,
            Self::COMPOUND_CUSDT,
            Self::COMPOUND_CWBTC,
            Self::COMPOUND_V3_USDC,
            Self::COMPOUND_V3_ETH,
        ]
    }
}

/// Immutable set of protocol contract addresses, stored lower-cased.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct KnownProtocols {
    addresses: HashSet<String>,
}

impl KnownProtocols {
    pub fn new<I, S>(addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let addresses = addresses
            .into_iter()
            .map(|a| a.as_ref().trim().to_lowercase())
            .filter(|a| !a.is_empty())
            .collect();
        Self { addresses }
    }

    pub fn compound() -> Self {
        Self::new(ProtocolAddresses::compound())
    }

    /// Case-insensitive membership test.
    pub fn contains(&self, address: &str) -> bool {
        self.addresses.contains(&address.trim().to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.addresses.iter().map(String::as_str)
    }
}

impl Default for KnownProtocols {
    fn default() -> Self {
        Self::compound()
    }
}

impl From<Vec<String>> for KnownProtocols {
    fn from(addresses: Vec<String>) -> Self {
        Self::new(addresses)
    }
}

impl From<KnownProtocols> for Vec<String> {
    fn from(protocols: KnownProtocols) -> Self {
        let mut addresses: Vec<String> = protocols.addresses.into_iter().collect();
        addresses.sort();
        addresses
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compound_set_is_lower_cased() {
        let protocols = KnownProtocols::compound();
        assert_eq!(protocols.len(), 8);
        assert!(protocols.iter().all(|a| a == a.to_lowercase()));
    }

    #[test]
    fn test_contains_ignores_case() {
        let protocols = KnownProtocols::compound();
        assert!(protocols.contains("0x4DDC2D193948926D02F9B1FE9E1DAA0718270ED5"));
        assert!(protocols.contains("0x4ddc2d193948926d02f9b1fe9e1daa0718270ed5"));
        assert!(!protocols.contains("0x0000000000000000000000000000000000000000"));
        assert!(!protocols.contains(""));
    }

    #[test]
    fn test_deduplicates_and_drops_blanks() {
        let protocols = KnownProtocols::new(["0xABC", "0xabc", " ", ""]);
        assert_eq!(protocols.len(), 1);
    }
}
