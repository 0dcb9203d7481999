pub mod algorithm;
pub mod calculator;
pub mod features;
pub mod weights;

pub use algorithm::RiskScorer;
pub use calculator::{BatchReport, WalletOutcome, WalletScorer};
pub use features::FeatureExtractor;
pub use weights::{ProtectiveFactors, ProtectiveTerm, RiskFactors, RiskWeights};
