pub mod chains;
pub mod config;
pub mod models;
pub mod scoring;
pub mod tables;
pub mod utils;

pub use config::{KnownProtocols, Settings};
pub use models::{FeatureRecord, Result, RiskBucket, RiskScoreError, TransactionRecord, WalletScore};
pub use scoring::{FeatureExtractor, RiskScorer, RiskWeights, WalletScorer};
