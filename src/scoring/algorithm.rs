use crate::{
    models::{FeatureRecord, ScoreBreakdown},
    scoring::weights::RiskWeights,
};

/// Baseline-plus-adjustments heuristic mapping features to a bounded score.
#[derive(Debug, Clone, Default)]
pub struct RiskScorer {
    weights: RiskWeights,
}

impl RiskScorer {
    pub fn new(weights: RiskWeights) -> Self {
        Self { weights }
    }

    /// Score in `[floor, ceiling]`, truncated toward zero.
    pub fn score(&self, features: &FeatureRecord) -> u32 {
        self.clamp(self.breakdown(features).raw_total())
    }

    pub fn breakdown(&self, features: &FeatureRecord) -> ScoreBreakdown {
        let risk = &self.weights.risk;
        let protective = &self.weights.protective;

        let inactivity = if features.days_since_last_tx > risk.inactivity_threshold_days {
            features.days_since_last_tx.min(risk.inactivity_cap_days) * risk.inactivity_weight
        } else {
            0.0
        };

        let low_activity = if features.total_transactions < risk.low_activity_threshold {
            risk.low_activity_penalty
        } else {
            0.0
        };

        let no_protocol_usage = if features.compound_transactions == 0 {
            risk.no_protocol_penalty
        } else {
            0.0
        };

        let high_gas = if features.avg_gas_used > risk.high_gas_threshold {
            risk.high_gas_penalty
        } else {
            0.0
        };

        ScoreBreakdown {
            baseline: self.weights.baseline,
            failed_ratio: features.failed_tx_ratio * risk.failed_ratio_weight,
            inactivity,
            low_activity,
            no_protocol_usage,
            high_gas,
            transaction_count: protective.total_transactions.apply(features.total_transactions as f64),
            account_age: protective.account_age_days.apply(features.account_age_days),
            protocol_usage: protective.compound_transactions.apply(features.compound_transactions as f64),
            contract_diversity: protective.unique_contracts.apply(features.unique_contracts as f64),
            value_volume: protective.total_value_eth.apply(features.total_value_eth),
        }
    }

    fn clamp(&self, raw: f64) -> u32 {
        // NaN falls through to the floor
        let bounded = if raw.is_nan() {
            self.weights.floor
        } else {
            raw.clamp(self.weights.floor, self.weights.ceiling)
        };
        bounded.trunc() as u32
    }
}
