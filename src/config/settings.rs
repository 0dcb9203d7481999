use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::{
    chains::RetryConfig,
    config::KnownProtocols,
    scoring::RiskWeights,
    utils::validate_address,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub app: AppSettings,
    pub scoring: RiskWeights,
    pub protocols: KnownProtocols,
    pub explorer: ExplorerSettings,
    pub batch: BatchSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub name: String,
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplorerSettings {
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout_seconds: u64,
    pub retry: RetryConfig,
    /// Token transfers are not used by feature extraction; fetching them costs
    /// an extra request per wallet.
    pub fetch_token_transfers: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSettings {
    /// Pause between wallets to stay under the explorer's rate limit.
    pub request_delay_ms: u64,
    pub input_path: PathBuf,
    pub output_path: PathBuf,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "Wallet Risk Scorer".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for ExplorerSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.etherscan.io/api".to_string(),
            api_key: None,
            timeout_seconds: 30,
            retry: RetryConfig::default(),
            fetch_token_transfers: false,
        }
    }
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self {
            request_delay_ms: 200,
            input_path: PathBuf::from("wallet_addresses.csv"),
            output_path: PathBuf::from("wallet_risk_scores.csv"),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app: AppSettings::default(),
            scoring: RiskWeights::default(),
            protocols: KnownProtocols::compound(),
            explorer: ExplorerSettings::default(),
            batch: BatchSettings::default(),
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(env_source())
            .build()?;

        s.try_deserialize()
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(File::from(path.as_ref()))
            .add_source(env_source())
            .build()?;

        s.try_deserialize()
    }

    pub fn validate(&self) -> Result<(), String> {
        self.scoring.validate()?;

        for address in self.protocols.iter() {
            validate_address(address).map_err(|e| format!("Invalid protocol address: {}", e))?;
        }

        if !self.explorer.base_url.starts_with("http://") && !self.explorer.base_url.starts_with("https://") {
            return Err(format!("Explorer base_url must be an http(s) URL, got {}", self.explorer.base_url));
        }

        if self.explorer.timeout_seconds == 0 {
            return Err("Explorer timeout must be at least one second".to_string());
        }

        Ok(())
    }
}

fn env_source() -> config::Environment {
    config::Environment::with_prefix("WALLET_RISK").separator("__")
}
