use async_trait::async_trait;

use crate::models::{Result, TokenTransfer, TransactionRecord, WalletActivity};

/// Supplier of raw on-chain history for a wallet.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TransactionSource: Send + Sync {
    /// Normal transactions sent from or to the address
    async fn fetch_transactions(&self, address: &str) -> Result<Vec<TransactionRecord>>;

    /// ERC-20 transfers involving the address
    async fn fetch_token_transfers(&self, address: &str) -> Result<Vec<TokenTransfer>>;

    /// Fetch everything needed to score one wallet.
    async fn fetch_activity(&self, address: &str, include_token_transfers: bool) -> Result<WalletActivity> {
        let transactions = self.fetch_transactions(address).await?;
        let token_transfers = if include_token_transfers {
            self.fetch_token_transfers(address).await?
        } else {
            Vec::new()
        };

        Ok(WalletActivity {
            transactions,
            token_transfers,
        })
    }
}
