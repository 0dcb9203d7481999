use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::{
    chains::{
        client::TransactionSource,
        resilience::{rate_limited, retry_with_backoff, RetryConfig},
    },
    config::ExplorerSettings,
    models::{Result, RiskScoreError, TokenTransfer, TransactionRecord},
};

const NO_RECORDS_MESSAGE: &str = "No transactions found";
const SERVICE_NAME: &str = "explorer";

/// Client for an Etherscan-compatible `account` API.
pub struct ExplorerClient {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
    retry: RetryConfig,
}

#[derive(Debug, Deserialize)]
struct ExplorerEnvelope {
    #[serde(default)]
    status: String,
    #[serde(default)]
    message: String,
    #[serde(default)]
    result: Value,
}

impl ExplorerClient {
    pub fn new(settings: &ExplorerSettings) -> Result<Self> {
        let api_key = settings
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                RiskScoreError::ConfigError(
                    "Explorer API key is missing (set explorer.api_key or WALLET_RISK__EXPLORER__API_KEY)"
                        .to_string(),
                )
            })?;

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .build()
            .map_err(|e| RiskScoreError::ConfigError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: settings.base_url.clone(),
            api_key,
            retry: settings.retry.clone(),
        })
    }

    async fn fetch_account_list<T: DeserializeOwned>(&self, action: &str, address: &str) -> Result<Vec<T>> {
        let operation = format!("{action}:{address}");
        retry_with_backoff(&self.retry, &operation, || self.request_once(action, address)).await
    }

    async fn request_once<T: DeserializeOwned>(&self, action: &str, address: &str) -> Result<Vec<T>> {
        let params = [
            ("module", "account"),
            ("action", action),
            ("address", address),
            ("startblock", "0"),
            ("endblock", "99999999"),
            ("sort", "desc"),
            ("apikey", self.api_key.as_str()),
        ];

        let envelope: ExplorerEnvelope = self
            .http_client
            .get(&self.base_url)
            .query(&params)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let records = parse_envelope(envelope, address)?;
        debug!("Fetched {} {} records for {}", records.len(), action, address);
        Ok(records)
    }
}

fn parse_envelope<T: DeserializeOwned>(envelope: ExplorerEnvelope, address: &str) -> Result<Vec<T>> {
    if envelope.status == "1" {
        return Ok(serde_json::from_value(envelope.result)?);
    }

    // On failure the explorer puts the detail in `result` as a string
    let detail = match &envelope.result {
        Value::String(s) if !s.is_empty() => s.clone(),
        _ => envelope.message.clone(),
    };

    if envelope.message == NO_RECORDS_MESSAGE || detail == NO_RECORDS_MESSAGE {
        return Ok(Vec::new());
    }

    if detail.to_lowercase().contains("rate limit") {
        return Err(rate_limited(SERVICE_NAME));
    }

    Err(RiskScoreError::ExplorerError {
        address: address.to_string(),
        message: detail,
    })
}

#[async_trait]
impl TransactionSource for ExplorerClient {
    async fn fetch_transactions(&self, address: &str) -> Result<Vec<TransactionRecord>> {
        self.fetch_account_list("txlist", address).await
    }

    async fn fetch_token_transfers(&self, address: &str) -> Result<Vec<TokenTransfer>> {
        self.fetch_account_list("tokentx", address).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope(json: &str) -> ExplorerEnvelope {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_successful_envelope() {
        let env = envelope(
            r#"{"status":"1","message":"OK","result":[
                {"hash":"0x1","to":"0xabc","isError":"0","gasUsed":"21000","value":"1","timeStamp":"1700000000","nonce":"4"},
                {"to":"","isError":"1"}
            ]}"#,
        );
        let txs: Vec<TransactionRecord> = parse_envelope(env, "0xwallet").unwrap();
        assert_eq!(txs.len(), 2);
        assert_eq!(txs[0].gas_used(), Some(21000));
        assert!(txs[1].is_failed());
    }

    #[test]
    fn test_no_transactions_is_empty() {
        let env = envelope(r#"{"status":"0","message":"No transactions found","result":[]}"#);
        let txs: Vec<TransactionRecord> = parse_envelope(env, "0xwallet").unwrap();
        assert!(txs.is_empty());
    }

    #[test]
    fn test_rate_limit_is_retryable() {
        let env = envelope(r#"{"status":"0","message":"NOTOK","result":"Max rate limit reached"}"#);
        let err = parse_envelope::<TransactionRecord>(env, "0xwallet").unwrap_err();
        assert!(matches!(err, RiskScoreError::RateLimitExceeded { .. }));
        assert!(err.is_retryable());
    }

    #[test]
    fn test_other_failures_surface_detail() {
        let env = envelope(r#"{"status":"0","message":"NOTOK","result":"Invalid API Key"}"#);
        let err = parse_envelope::<TransactionRecord>(env, "0xwallet").unwrap_err();
        match err {
            RiskScoreError::ExplorerError { address, message } => {
                assert_eq!(address, "0xwallet");
                assert_eq!(message, "Invalid API Key");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_token_transfer_envelope() {
        let env = envelope(
            r#"{"status":"1","message":"OK","result":[
                {"contractAddress":"0xdac17f958d2ee523a2206206994597c13d831ec7","value":"1000000","tokenDecimal":"6","tokenSymbol":"USDT"}
            ]}"#,
        );
        let transfers: Vec<TokenTransfer> = parse_envelope(env, "0xwallet").unwrap();
        assert_eq!(transfers[0].token_symbol.as_deref(), Some("USDT"));
    }

    #[test]
    fn test_missing_api_key_is_config_error() {
        let settings = ExplorerSettings {
            api_key: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            ExplorerClient::new(&settings),
            Err(RiskScoreError::ConfigError(_))
        ));
    }
}
