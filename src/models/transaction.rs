use ethers::types::U256;
use ethers::utils::format_ether;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One normal transaction as reported by the explorer's `txlist` action.
///
/// The explorer encodes every field as a string, but fixtures and other
/// sources may use numbers; both are accepted. Anything else (null, objects,
/// missing keys) deserializes to `None` so a partial record is never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,

    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,

    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,

    #[serde(
        rename = "isError",
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub is_error: Option<String>,

    #[serde(
        rename = "gasUsed",
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub gas_used: Option<String>,

    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    #[serde(
        rename = "timeStamp",
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub time_stamp: Option<String>,
}

impl TransactionRecord {
    /// Lower-cased destination, or `None` for contract creations and blanks.
    pub fn to_address(&self) -> Option<String> {
        present(&self.to).map(str::to_lowercase)
    }

    pub fn is_failed(&self) -> bool {
        present(&self.is_error) == Some("1")
    }

    pub fn gas_used(&self) -> Option<u64> {
        present(&self.gas_used)?.parse().ok()
    }

    pub fn value_wei(&self) -> Option<U256> {
        U256::from_dec_str(present(&self.value)?).ok()
    }

    /// Value converted from wei to whole ether.
    pub fn value_eth(&self) -> Option<f64> {
        self.value_wei().map(wei_to_eth)
    }

    /// Block inclusion time, Unix seconds.
    pub fn timestamp(&self) -> Option<i64> {
        present(&self.time_stamp)?.parse().ok()
    }
}

/// ERC-20 transfer as reported by the explorer's `tokentx` action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenTransfer {
    #[serde(rename = "contractAddress", default, deserialize_with = "lenient_string")]
    pub contract_address: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub from: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub to: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub value: Option<String>,

    #[serde(rename = "tokenDecimal", default, deserialize_with = "lenient_string")]
    pub token_decimal: Option<String>,

    #[serde(rename = "tokenSymbol", default, deserialize_with = "lenient_string")]
    pub token_symbol: Option<String>,

    #[serde(rename = "timeStamp", default, deserialize_with = "lenient_string")]
    pub time_stamp: Option<String>,
}

/// Everything fetched for one wallet.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WalletActivity {
    #[serde(default)]
    pub transactions: Vec<TransactionRecord>,
    #[serde(default)]
    pub token_transfers: Vec<TokenTransfer>,
}

impl WalletActivity {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty() && self.token_transfers.is_empty()
    }
}

pub fn wei_to_eth(wei: U256) -> f64 {
    format_ether(wei).parse().unwrap_or(0.0)
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
