use async_trait::async_trait;
use std::path::PathBuf;
use tracing::debug;

use crate::{
    chains::client::TransactionSource,
    models::{Result, TokenTransfer, TransactionRecord, WalletActivity},
    utils::normalize_address,
};

/// Offline source reading `<dir>/<address>.json` files.
///
/// Each file holds `{"transactions": [...], "token_transfers": [...]}` in the
/// explorer's record format. A wallet without a file has no history.
pub struct FixtureSource {
    dir: PathBuf,
}

impl FixtureSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, address: &str) -> PathBuf {
        self.dir.join(format!("{}.json", normalize_address(address)))
    }

    async fn load(&self, address: &str) -> Result<WalletActivity> {
        let path = self.path_for(address);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No fixture at {}, treating as empty wallet", path.display());
                Ok(WalletActivity::empty())
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl TransactionSource for FixtureSource {
    async fn fetch_transactions(&self, address: &str) -> Result<Vec<TransactionRecord>> {
        Ok(self.load(address).await?.transactions)
    }

    async fn fetch_token_transfers(&self, address: &str) -> Result<Vec<TokenTransfer>> {
        Ok(self.load(address).await?.token_transfers)
    }

    async fn fetch_activity(&self, address: &str, include_token_transfers: bool) -> Result<WalletActivity> {
        let mut activity = self.load(address).await?;
        if !include_token_transfers {
            activity.token_transfers.clear();
        }
        Ok(activity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RiskScoreError;

    #[tokio::test]
    async fn test_reads_fixture_by_lower_cased_address() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("0xabcdef.json"),
            r#"{"transactions": [{"to": "0x1", "isError": "1"}, {}],
                "token_transfers": [{"tokenSymbol": "DAI"}]}"#,
        )
        .unwrap();

        let source = FixtureSource::new(dir.path());
        let activity = source.fetch_activity(" 0xABCDEF ", true).await.unwrap();
        assert_eq!(activity.transactions.len(), 2);
        assert_eq!(activity.token_transfers.len(), 1);

        let without_tokens = source.fetch_activity("0xabcdef", false).await.unwrap();
        assert!(without_tokens.token_transfers.is_empty());
    }

    #[tokio::test]
    async fn test_missing_fixture_is_empty_wallet() {
        let dir = tempfile::tempdir().unwrap();
        let source = FixtureSource::new(dir.path());
        let activity = source.fetch_activity("0x404", true).await.unwrap();
        assert!(activity.is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_fixture_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("0xbad.json"), "not json").unwrap();
        let source = FixtureSource::new(dir.path());
        let err = source.fetch_transactions("0xbad").await.unwrap_err();
        assert!(matches!(err, RiskScoreError::SerializationError(_)));
    }
}
