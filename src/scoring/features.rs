use chrono::{DateTime, Utc};
use std::collections::HashSet;

use crate::{
    config::KnownProtocols,
    models::{FeatureRecord, TransactionRecord, NO_ACTIVITY_DAYS},
};

const SECONDS_PER_DAY: f64 = 86_400.0;
const HIGH_VALUE_ETH: f64 = 1.0;

/// Reduces a wallet's transaction history to a `FeatureRecord`.
///
/// Extraction is total: malformed or missing fields on individual records are
/// treated as absent, never as errors.
#[derive(Debug, Clone, Default)]
pub struct FeatureExtractor {
    protocols: KnownProtocols,
}

impl FeatureExtractor {
    pub fn new(protocols: KnownProtocols) -> Self {
        Self { protocols }
    }

    /// Extract features relative to the current wall-clock time.
    pub fn extract(&self, address: &str, transactions: &[TransactionRecord]) -> FeatureRecord {
        self.extract_at(address, transactions, Utc::now())
    }

    pub fn extract_at(
        &self,
        address: &str,
        transactions: &[TransactionRecord],
        now: DateTime<Utc>,
    ) -> FeatureRecord {
        if transactions.is_empty() {
            return FeatureRecord::inactive(address);
        }

        let total = transactions.len() as u64;

        let compound_transactions = transactions
            .iter()
            .filter_map(TransactionRecord::to_address)
            .filter(|to| self.protocols.contains(to))
            .count() as u64;

        let failed = transactions.iter().filter(|tx| tx.is_failed()).count();
        let failed_tx_ratio = failed as f64 / total as f64;

        let gas: Vec<u64> = transactions.iter().filter_map(TransactionRecord::gas_used).collect();
        let avg_gas_used = mean(&gas);

        let values: Vec<f64> = transactions.iter().filter_map(TransactionRecord::value_eth).collect();
        let total_value_eth = values.iter().sum();
        let high_value_txs = values.iter().filter(|v| **v > HIGH_VALUE_ETH).count() as u64;

        let (account_age_days, days_since_last_tx) = activity_window(transactions, now);

        let unique_contracts = transactions
            .iter()
            .filter_map(TransactionRecord::to_address)
            .collect::<HashSet<_>>()
            .len() as u64;

        FeatureRecord {
            wallet_id: address.to_string(),
            total_transactions: total,
            compound_transactions,
            failed_tx_ratio,
            avg_gas_used,
            total_value_eth,
            account_age_days,
            days_since_last_tx,
            unique_contracts,
            high_value_txs,
        }
    }
}

fn mean(values: &[u64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let sum: f64 = values.iter().map(|v| *v as f64).sum();
    sum / values.len() as f64
}

/// Account age and idle time in days. Records need not be sorted.
fn activity_window(transactions: &[TransactionRecord], now: DateTime<Utc>) -> (f64, f64) {
    let mut timestamps = transactions.iter().filter_map(TransactionRecord::timestamp);

    let Some(first_seen) = timestamps.next() else {
        return (0.0, NO_ACTIVITY_DAYS);
    };

    let (first, last) = timestamps.fold((first_seen, first_seen), |(lo, hi), ts| {
        (lo.min(ts), hi.max(ts))
    });

    let now = now.timestamp() as f64;
    let age = (now - first as f64) / SECONDS_PER_DAY;
    let since_last = (now - last as f64) / SECONDS_PER_DAY;
    (age, since_last)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const COMPTROLLER: &str = "0x3d9819210A31b4961b30EF54bE2aeD79B9c9Cd3B";

    fn now() -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000, 0).unwrap()
    }

    fn days_ago(days: i64) -> String {
        (now().timestamp() - days * 86_400).to_string()
    }

    fn tx(to: &str, value: &str, gas: &str, ts: &str, is_error: &str) -> TransactionRecord {
        let field = |s: &str| (!s.is_empty()).then(|| s.to_string());
        TransactionRecord {
            to: field(to),
            value: field(value),
            gas_used: field(gas),
            time_stamp: field(ts),
            is_error: field(is_error),
            ..Default::default()
        }
    }

    fn extractor() -> FeatureExtractor {
        FeatureExtractor::new(KnownProtocols::compound())
    }

    #[test]
    fn test_empty_history_is_inactive() {
        let features = extractor().extract_at("0xabc", &[], now());
        assert_eq!(features, FeatureRecord::inactive("0xabc"));
        assert_eq!(features.days_since_last_tx, 999.0);
    }

    #[test]
    fn test_failed_transaction_without_other_fields() {
        let txs = vec![tx("", "", "", "", "1")];
        let features = extractor().extract_at("0xabc", &txs, now());

        assert_eq!(features.total_transactions, 1);
        assert_eq!(features.failed_tx_ratio, 1.0);
        assert_eq!(features.avg_gas_used, 0.0);
        assert_eq!(features.total_value_eth, 0.0);
        assert_eq!(features.account_age_days, 0.0);
        assert_eq!(features.days_since_last_tx, 999.0);
        assert_eq!(features.unique_contracts, 0);
    }

    #[test]
    fn test_malformed_records_match_defaults_except_count() {
        let txs = vec![TransactionRecord::default(), tx("", "abc", "x", "yesterday", "")];
        let features = extractor().extract_at("0xabc", &txs, now());
        let expected = FeatureRecord {
            total_transactions: 2,
            ..FeatureRecord::inactive("0xabc")
        };
        assert_eq!(features, expected);
    }

    #[test]
    fn test_protocol_membership_is_case_insensitive() {
        let txs = vec![
            tx(COMPTROLLER, "0", "", "", "0"),
            tx(&COMPTROLLER.to_uppercase().replace("0X", "0x"), "0", "", "", "0"),
            tx("0x1111111111111111111111111111111111111111", "0", "", "", "0"),
        ];
        let features = extractor().extract_at("0xabc", &txs, now());
        assert_eq!(features.compound_transactions, 2);
        assert_eq!(features.unique_contracts, 2);
    }

    #[test]
    fn test_injected_protocol_set_is_used() {
        let custom = FeatureExtractor::new(KnownProtocols::new(["0x1111111111111111111111111111111111111111"]));
        let txs = vec![
            tx(COMPTROLLER, "", "", "", ""),
            tx("0x1111111111111111111111111111111111111111", "", "", "", ""),
        ];
        assert_eq!(custom.extract_at("0xabc", &txs, now()).compound_transactions, 1);
    }

    #[test]
    fn test_gas_mean_over_present_values_only() {
        let txs = vec![
            tx("", "", "21000", "", ""),
            tx("", "", "0", "", ""),
            tx("", "", "", "", ""),
            tx("", "", "63000", "", ""),
        ];
        let features = extractor().extract_at("0xabc", &txs, now());
        assert_eq!(features.avg_gas_used, 28_000.0);
    }

    #[test]
    fn test_value_sum_and_strict_high_value_threshold() {
        let txs = vec![
            tx("", "1000000000000000000", "", "", ""),
            tx("", "1500000000000000000", "", "", ""),
            tx("", "500000000000000000", "", "", ""),
            tx("", "", "", "", ""),
        ];
        let features = extractor().extract_at("0xabc", &txs, now());
        assert!((features.total_value_eth - 3.0).abs() < 1e-9);
        assert_eq!(features.high_value_txs, 1);
    }

    #[test]
    fn test_unsorted_timestamps_use_min_and_max() {
        let txs = vec![
            tx("", "", "", &days_ago(10), ""),
            tx("", "", "", &days_ago(400), ""),
            tx("", "", "", "", ""),
            tx("", "", "", &days_ago(3), ""),
        ];
        let features = extractor().extract_at("0xabc", &txs, now());
        assert!((features.account_age_days - 400.0).abs() < 1e-9);
        assert!((features.days_since_last_tx - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_fractional_days() {
        let half_day_ago = (now().timestamp() - 43_200).to_string();
        let txs = vec![tx("", "", "", &half_day_ago, "")];
        let features = extractor().extract_at("0xabc", &txs, now());
        assert_eq!(features.account_age_days, 0.5);
        assert_eq!(features.days_since_last_tx, 0.5);
    }

    #[test]
    fn test_contract_creation_excluded_from_unique_contracts() {
        let txs = vec![
            tx("", "", "", "", ""),
            tx("0xAAAA", "", "", "", ""),
            tx("0xaaaa", "", "", "", ""),
            tx("0xbbbb", "", "", "", ""),
        ];
        let features = extractor().extract_at("0xabc", &txs, now());
        assert_eq!(features.unique_contracts, 2);
    }

    #[test]
    fn test_extreme_timestamps_do_not_overflow() {
        let txs = vec![
            tx("", "", "", &i64::MIN.to_string(), ""),
            tx("", "", "", &i64::MAX.to_string(), ""),
        ];
        let features = extractor().extract_at("0xabc", &txs, now());
        assert_eq!(features.total_transactions, 2);
        assert!(features.account_age_days.is_finite());
        assert!(features.account_age_days > 0.0);
        assert!(features.days_since_last_tx < 0.0);

        let score = crate::scoring::RiskScorer::default().score(&features);
        assert!(score <= 1000);
    }

    #[test]
    fn test_extract_measures_from_wall_clock() {
        let an_hour_ago = (Utc::now().timestamp() - 3_600).to_string();
        let txs = vec![tx("0xbbbb", "", "", &an_hour_ago, "")];
        let features = extractor().extract("0xabc", &txs);
        assert!(features.days_since_last_tx > 0.0);
        assert!(features.days_since_last_tx < 1.0);
    }

    #[test]
    fn test_extraction_is_repeatable() {
        let txs = vec![
            tx(COMPTROLLER, "2000000000000000000", "90000", &days_ago(30), "0"),
            tx("0xbbbb", "0", "21000", &days_ago(5), "1"),
        ];
        let ex = extractor();
        assert_eq!(ex.extract_at("0xabc", &txs, now()), ex.extract_at("0xabc", &txs, now()));
    }
}
