use serde::{Deserialize, Serialize};
use std::fmt;

/// One row of the scores table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletScore {
    pub wallet_id: String,
    pub score: u32,
}

impl WalletScore {
    pub fn bucket(&self) -> RiskBucket {
        RiskBucket::from_score(self.score)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskBucket {
    Low,
    Medium,
    High,
}

impl RiskBucket {
    /// `> 700` is high, `< 300` is low, and both boundaries belong to medium.
    pub fn from_score(score: u32) -> Self {
        match score {
            s if s > 700 => RiskBucket::High,
            s if s < 300 => RiskBucket::Low,
            _ => RiskBucket::Medium,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskBucket::Low => "Low Risk",
            RiskBucket::Medium => "Medium Risk",
            RiskBucket::High => "High Risk",
        }
    }

    pub fn range_label(&self) -> &'static str {
        match self {
            RiskBucket::Low => "0-300",
            RiskBucket::Medium => "300-700",
            RiskBucket::High => "700-1000",
        }
    }
}

impl fmt::Display for RiskBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Individual contributions that make up a score, before clamping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub baseline: f64,

    // Risk increments
    pub failed_ratio: f64,
    pub inactivity: f64,
    pub low_activity: f64,
    pub no_protocol_usage: f64,
    pub high_gas: f64,

    // Protective reductions, stored as positive amounts
    pub transaction_count: f64,
    pub account_age: f64,
    pub protocol_usage: f64,
    pub contract_diversity: f64,
    pub value_volume: f64,
}

impl ScoreBreakdown {
    pub fn total_risk(&self) -> f64 {
        self.failed_ratio + self.inactivity + self.low_activity + self.no_protocol_usage + self.high_gas
    }

    pub fn total_protection(&self) -> f64 {
        self.transaction_count
            + self.account_age
            + self.protocol_usage
            + self.contract_diversity
            + self.value_volume
    }

    /// Running total before clamping and truncation.
    pub fn raw_total(&self) -> f64 {
        self.baseline + self.total_risk() - self.total_protection()
    }
}

/// Aggregate view over a set of scores.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub count: usize,
    pub mean: f64,
    pub min: Option<u32>,
    pub max: Option<u32>,
    pub high_risk: usize,
    pub medium_risk: usize,
    pub low_risk: usize,
}

impl ScoreSummary {
    pub fn from_scores(scores: &[WalletScore]) -> Self {
        let mut summary = ScoreSummary {
            count: scores.len(),
            ..Default::default()
        };

        if scores.is_empty() {
            return summary;
        }

        let total: u64 = scores.iter().map(|s| u64::from(s.score)).sum();
        summary.mean = total as f64 / scores.len() as f64;
        summary.min = scores.iter().map(|s| s.score).min();
        summary.max = scores.iter().map(|s| s.score).max();

        for score in scores {
            match score.bucket() {
                RiskBucket::High => summary.high_risk += 1,
                RiskBucket::Medium => summary.medium_risk += 1,
                RiskBucket::Low => summary.low_risk += 1,
            }
        }

        summary
    }

    pub fn bucket_count(&self, bucket: RiskBucket) -> usize {
        match bucket {
            RiskBucket::High => self.high_risk,
            RiskBucket::Medium => self.medium_risk,
            RiskBucket::Low => self.low_risk,
        }
    }
}
