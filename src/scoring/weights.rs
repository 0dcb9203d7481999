use serde::{Deserialize, Serialize};

/// Every constant of the risk heuristic, kept as data so it can be tuned
/// from configuration without touching the scoring control flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskWeights {
    /// Starting point before any adjustment (neutral risk).
    pub baseline: f64,
    pub risk: RiskFactors,
    pub protective: ProtectiveFactors,
    pub floor: f64,
    pub ceiling: f64,
}

/// Increments that push a wallet towards high risk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFactors {
    pub failed_ratio_weight: f64,
    pub inactivity_threshold_days: f64,
    pub inactivity_cap_days: f64,
    pub inactivity_weight: f64,
    pub low_activity_threshold: u64,
    pub low_activity_penalty: f64,
    pub no_protocol_penalty: f64,
    pub high_gas_threshold: f64,
    pub high_gas_penalty: f64,
}

/// A linear reduction capped independently of every other term.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProtectiveTerm {
    pub weight: f64,
    pub cap: f64,
}

impl ProtectiveTerm {
    pub const fn new(weight: f64, cap: f64) -> Self {
        Self { weight, cap }
    }

    pub fn apply(&self, value: f64) -> f64 {
        (value * self.weight).min(self.cap)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtectiveFactors {
    pub total_transactions: ProtectiveTerm,
    pub account_age_days: ProtectiveTerm,
    pub compound_transactions: ProtectiveTerm,
    pub unique_contracts: ProtectiveTerm,
    pub total_value_eth: ProtectiveTerm,
}

impl Default for RiskWeights {
    fn default() -> Self {
        Self {
            baseline: 500.0,
            risk: RiskFactors::default(),
            protective: ProtectiveFactors::default(),
            floor: 0.0,
            ceiling: 1000.0,
        }
    }
}

impl Default for RiskFactors {
    fn default() -> Self {
        Self {
            failed_ratio_weight: 200.0,
            inactivity_threshold_days: 90.0, // 3+ months idle
            inactivity_cap_days: 365.0,
            inactivity_weight: 1.0,
            low_activity_threshold: 10,
            low_activity_penalty: 100.0,
            no_protocol_penalty: 50.0,
            high_gas_threshold: 500_000.0,
            high_gas_penalty: 30.0,
        }
    }
}

impl Default for ProtectiveFactors {
    fn default() -> Self {
        Self {
            total_transactions: ProtectiveTerm::new(0.5, 100.0),
            account_age_days: ProtectiveTerm::new(0.1, 100.0),
            compound_transactions: ProtectiveTerm::new(2.0, 150.0),
            unique_contracts: ProtectiveTerm::new(5.0, 100.0),
            total_value_eth: ProtectiveTerm::new(1.0, 200.0),
        }
    }
}

impl ProtectiveFactors {
    fn terms(&self) -> [(&'static str, &ProtectiveTerm); 5] {
        [
            ("total_transactions", &self.total_transactions),
            ("account_age_days", &self.account_age_days),
            ("compound_transactions", &self.compound_transactions),
            ("unique_contracts", &self.unique_contracts),
            ("total_value_eth", &self.total_value_eth),
        ]
    }
}

impl RiskWeights {
    pub fn validate(&self) -> Result<(), String> {
        let r = &self.risk;
        let scalars = [
            ("baseline", self.baseline),
            ("floor", self.floor),
            ("ceiling", self.ceiling),
            ("failed_ratio_weight", r.failed_ratio_weight),
            ("inactivity_threshold_days", r.inactivity_threshold_days),
            ("inactivity_cap_days", r.inactivity_cap_days),
            ("inactivity_weight", r.inactivity_weight),
            ("low_activity_penalty", r.low_activity_penalty),
            ("no_protocol_penalty", r.no_protocol_penalty),
            ("high_gas_threshold", r.high_gas_threshold),
            ("high_gas_penalty", r.high_gas_penalty),
        ];

        for (name, value) in scalars {
            if !value.is_finite() {
                return Err(format!("Risk weight {name} must be finite, got {value}"));
            }
        }

        if self.floor > self.ceiling {
            return Err(format!(
                "Score floor {} must not exceed ceiling {}",
                self.floor, self.ceiling
            ));
        }

        for (name, term) in self.protective.terms() {
            if !term.weight.is_finite() || !term.cap.is_finite() {
                return Err(format!("Protective term {name} must be finite"));
            }
            if term.weight < 0.0 || term.cap < 0.0 {
                return Err(format!("Protective term {name} must be non-negative"));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(RiskWeights::default().validate().is_ok());
    }

    #[test]
    fn test_protective_term_caps() {
        let term = ProtectiveTerm::new(5.0, 100.0);
        assert_eq!(term.apply(10.0), 50.0);
        assert_eq!(term.apply(20.0), 100.0);
        assert_eq!(term.apply(1_000.0), 100.0);
    }

    #[test]
    fn test_rejects_inverted_bounds() {
        let weights = RiskWeights {
            floor: 10.0,
            ceiling: 5.0,
            ..Default::default()
        };
        assert!(weights.validate().is_err());
    }

    #[test]
    fn test_rejects_negative_cap() {
        let mut weights = RiskWeights::default();
        weights.protective.unique_contracts.cap = -1.0;
        assert!(weights.validate().is_err());
    }

    #[test]
    fn test_rejects_nan() {
        let mut weights = RiskWeights::default();
        weights.risk.failed_ratio_weight = f64::NAN;
        assert!(weights.validate().is_err());
    }
}
