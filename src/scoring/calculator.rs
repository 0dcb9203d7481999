use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::{
    chains::TransactionSource,
    config::{BatchSettings, Settings},
    models::{FeatureRecord, ScoreSummary, TransactionRecord, WalletActivity, WalletScore},
    scoring::{FeatureExtractor, RiskScorer},
};

/// Result of scoring a single wallet.
#[derive(Debug, Clone)]
pub struct WalletOutcome {
    pub score: WalletScore,
    pub features: FeatureRecord,
    /// The source failed and the wallet was scored as if it had no history.
    pub fetch_failed: bool,
    pub token_transfers: usize,
}

#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub scores: Vec<WalletScore>,
    pub fetch_failures: Vec<String>,
    pub summary: ScoreSummary,
}

/// Drives fetch, extraction and scoring for one or many wallets.
pub struct WalletScorer {
    source: Arc<dyn TransactionSource>,
    extractor: FeatureExtractor,
    scorer: RiskScorer,
    batch: BatchSettings,
    include_token_transfers: bool,
}

impl WalletScorer {
    pub fn new(
        source: Arc<dyn TransactionSource>,
        extractor: FeatureExtractor,
        scorer: RiskScorer,
        batch: BatchSettings,
    ) -> Self {
        Self {
            source,
            extractor,
            scorer,
            batch,
            include_token_transfers: false,
        }
    }

    pub fn from_settings(source: Arc<dyn TransactionSource>, settings: &Settings) -> Self {
        Self::new(
            source,
            FeatureExtractor::new(settings.protocols.clone()),
            RiskScorer::new(settings.scoring.clone()),
            settings.batch.clone(),
        )
        .with_token_transfers(settings.explorer.fetch_token_transfers)
    }

    pub fn with_token_transfers(mut self, include: bool) -> Self {
        self.include_token_transfers = include;
        self
    }

    pub fn scorer(&self) -> &RiskScorer {
        &self.scorer
    }

    /// Pure part of the pipeline: features and score for a known history.
    pub fn evaluate(&self, address: &str, transactions: &[TransactionRecord], now: DateTime<Utc>) -> (FeatureRecord, u32) {
        let features = self.extractor.extract_at(address, transactions, now);
        let score = self.scorer.score(&features);
        (features, score)
    }

    pub async fn score_wallet(&self, address: &str) -> WalletOutcome {
        let (activity, fetch_failed) = match self
            .source
            .fetch_activity(address, self.include_token_transfers)
            .await
        {
            Ok(activity) => (activity, false),
            Err(e) => {
                // Indistinguishable from a wallet without history from here on
                warn!("Failed to fetch activity for {}: {}", address, e);
                (WalletActivity::empty(), true)
            }
        };

        let (features, score) = self.evaluate(address, &activity.transactions, Utc::now());
        debug!(?features, score, "Scored wallet {}", address);

        WalletOutcome {
            score: WalletScore {
                wallet_id: address.to_string(),
                score,
            },
            features,
            fetch_failed,
            token_transfers: activity.token_transfers.len(),
        }
    }

    /// Score wallets one at a time, pausing between requests.
    pub async fn score_wallets(&self, wallets: &[String]) -> BatchReport {
        info!("Processing {} wallets...", wallets.len());

        let delay = Duration::from_millis(self.batch.request_delay_ms);
        let mut scores = Vec::with_capacity(wallets.len());
        let mut fetch_failures = Vec::new();

        for (i, wallet) in wallets.iter().enumerate() {
            if i > 0 && !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }

            info!("Processing {}/{}: {}", i + 1, wallets.len(), wallet);
            let outcome = self.score_wallet(wallet).await;

            if outcome.fetch_failed {
                fetch_failures.push(wallet.clone());
            }
            scores.push(outcome.score);
        }

        let summary = ScoreSummary::from_scores(&scores);

        BatchReport {
            scores,
            fetch_failures,
            summary,
        }
    }
}
