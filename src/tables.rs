//! Wallet-list input and score-table output.

use std::io::{Read, Write};
use std::path::Path;

use crate::models::{Result, RiskScoreError, WalletScore};

pub const WALLET_COLUMN: &str = "wallet_id";

pub fn read_wallets<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let file = std::fs::File::open(path.as_ref())?;
    read_wallets_from(file)
}

/// Read the `wallet_id` column, trimming values and skipping blanks.
pub fn read_wallets_from<R: Read>(reader: R) -> Result<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let column = reader
        .headers()?
        .iter()
        .position(|h| h.eq_ignore_ascii_case(WALLET_COLUMN))
        .ok_or_else(|| RiskScoreError::MissingColumn(WALLET_COLUMN.to_string()))?;

    let mut wallets = Vec::new();
    for record in reader.records() {
        let record = record?;
        if let Some(wallet) = record.get(column).filter(|w| !w.is_empty()) {
            wallets.push(wallet.to_string());
        }
    }

    Ok(wallets)
}

pub fn write_scores<P: AsRef<Path>>(path: P, scores: &[WalletScore]) -> Result<()> {
    let file = std::fs::File::create(path.as_ref())?;
    write_scores_to(file, scores)
}

/// Write `wallet_id,score` rows in the given order.
pub fn write_scores_to<W: Write>(writer: W, scores: &[WalletScore]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    if scores.is_empty() {
        writer.write_record([WALLET_COLUMN, "score"])?;
    }
    for score in scores {
        writer.serialize(score)?;
    }
    writer.flush()?;
    Ok(())
}
