//! Configuration for the enrollment and transfer submitters
//!
//! Values are layered, later layers winning:
//! 1. JSON file given with `--config` (or built-in defaults)
//! 2. Environment variables (a `.env` file is loaded first)
//! 3. Command-line flags
//!
//! No object ids, addresses or key paths are compiled in. Whatever a command
//! needs is checked by [`Config::enroll_params`] / [`Config::transfer_params`].

pub mod rpc;

use crate::builder::{ENROLL_FUNCTION, ENROLL_MODULE};
use crate::types::{ObjectId, SuiAddress};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub use rpc::{ExplorerLink, RpcConfig, DEFAULT_EXPLORER_URL};

pub const NETWORK_ENV: &str = "SUI_NETWORK";
pub const RPC_URL_ENV: &str = "SUI_RPC_URL";
pub const EXPLORER_URL_ENV: &str = "SUI_EXPLORER_URL";
pub const GAS_BUDGET_ENV: &str = "SUI_GAS_BUDGET";
pub const ENROLL_KEY_FILE_ENV: &str = "ENROLL_KEY_FILE";
pub const ENROLL_PACKAGE_ID_ENV: &str = "ENROLL_PACKAGE_ID";
pub const ENROLL_COHORT_ID_ENV: &str = "ENROLL_COHORT_ID";
pub const ENROLL_GITHUB_ENV: &str = "ENROLL_GITHUB";
pub const TRANSFER_KEY_FILE_ENV: &str = "TRANSFER_KEY_FILE";
pub const TRANSFER_RECIPIENT_ENV: &str = "TRANSFER_RECIPIENT";

/// Upper bound used for the dry-run probe (50 SUI)
pub const DEFAULT_MAX_GAS_BUDGET: u64 = 50_000_000_000;

/// Sui networks with public fullnodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    #[default]
    Testnet,
    Devnet,
    Localnet,
}

impl Network {
    pub fn name(&self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
            Network::Devnet => "devnet",
            Network::Localnet => "localnet",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Network {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mainnet" => Ok(Network::Mainnet),
            "testnet" => Ok(Network::Testnet),
            "devnet" => Ok(Network::Devnet),
            "localnet" => Ok(Network::Localnet),
            other => Err(Error::Config(format!(
                "unknown network {:?} (expected mainnet, testnet, devnet or localnet)",
                other
            ))),
        }
    }
}

/// Gas price and budget selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GasSettings {
    /// Fixed gas price; the reference price is fetched when unset
    pub price: Option<u64>,
    /// Fixed budget; estimated by dry run when unset
    pub budget: Option<u64>,
    /// Budget given to the dry-run probe
    pub max_budget: u64,
}

impl Default for GasSettings {
    fn default() -> Self {
        Self {
            price: None,
            budget: None,
            max_budget: DEFAULT_MAX_GAS_BUDGET,
        }
    }
}

/// Settings for the `enroll` command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrollSettings {
    pub key_file: Option<PathBuf>,
    /// Package that publishes the enrollment module
    pub package_id: Option<String>,
    pub module: String,
    pub function: String,
    /// Shared cohort object passed as the first argument
    pub cohort_object_id: Option<String>,
    /// GitHub handle recorded on chain
    pub github: Option<String>,
}

impl Default for EnrollSettings {
    fn default() -> Self {
        Self {
            key_file: None,
            package_id: None,
            module: ENROLL_MODULE.to_string(),
            function: ENROLL_FUNCTION.to_string(),
            cohort_object_id: None,
            github: None,
        }
    }
}

/// Settings for the `transfer` command
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransferSettings {
    pub key_file: Option<PathBuf>,
    pub recipient: Option<String>,
}

/// Everything `enroll` needs, validated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrollParams {
    pub key_file: PathBuf,
    pub package_id: ObjectId,
    pub module: String,
    pub function: String,
    pub cohort_object_id: ObjectId,
    pub github: String,
}

/// Everything `transfer` needs, validated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferParams {
    pub key_file: PathBuf,
    pub recipient: SuiAddress,
}

/// Main configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub network: Network,
    /// Overrides the network's public fullnode
    pub rpc_url: Option<String>,
    pub explorer_url: String,
    pub gas_price: Option<u64>,
    pub gas_budget: Option<u64>,
    pub max_gas_budget: u64,
    pub enroll: EnrollSettings,
    pub transfer: TransferSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            network: Network::default(),
            rpc_url: None,
            explorer_url: DEFAULT_EXPLORER_URL.to_string(),
            gas_price: None,
            gas_budget: None,
            max_gas_budget: DEFAULT_MAX_GAS_BUDGET,
            enroll: EnrollSettings::default(),
            transfer: TransferSettings::default(),
        }
    }
}

impl Config {
    /// Read `path` as JSON, or start from defaults when no file is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let raw = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("cannot read config file {}: {}", path.display(), e))
        })?;
        let config = serde_json::from_str(&raw)?;
        tracing::debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    /// Overlay values from the process environment
    pub fn apply_process_env(&mut self) -> Result<()> {
        self.apply_env(|key| std::env::var(key).ok())
    }

    /// Overlay values from `lookup`; empty values are ignored
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(network) = get(NETWORK_ENV) {
            self.network = network.parse()?;
        }
        if let Some(url) = get(RPC_URL_ENV) {
            self.rpc_url = Some(url);
        }
        if let Some(url) = get(EXPLORER_URL_ENV) {
            self.explorer_url = url;
        }
        if let Some(budget) = get(GAS_BUDGET_ENV) {
            let budget = budget.trim().parse().map_err(|e| {
                Error::Config(format!("{} must be an integer: {}", GAS_BUDGET_ENV, e))
            })?;
            self.gas_budget = Some(budget);
        }
        if let Some(path) = get(ENROLL_KEY_FILE_ENV) {
            self.enroll.key_file = Some(PathBuf::from(path));
        }
        if let Some(id) = get(ENROLL_PACKAGE_ID_ENV) {
            self.enroll.package_id = Some(id);
        }
        if let Some(id) = get(ENROLL_COHORT_ID_ENV) {
            self.enroll.cohort_object_id = Some(id);
        }
        if let Some(handle) = get(ENROLL_GITHUB_ENV) {
            self.enroll.github = Some(handle);
        }
        if let Some(path) = get(TRANSFER_KEY_FILE_ENV) {
            self.transfer.key_file = Some(PathBuf::from(path));
        }
        if let Some(recipient) = get(TRANSFER_RECIPIENT_ENV) {
            self.transfer.recipient = Some(recipient);
        }
        Ok(())
    }

    pub fn gas(&self) -> GasSettings {
        GasSettings {
            price: self.gas_price,
            budget: self.gas_budget,
            max_budget: self.max_gas_budget,
        }
    }

    pub fn rpc(&self) -> Result<RpcConfig> {
        RpcConfig::resolve(self.network, self.rpc_url.as_deref())
    }

    pub fn explorer(&self) -> Result<ExplorerLink> {
        ExplorerLink::new(&self.explorer_url, self.network)
    }

    pub fn enroll_params(&self) -> Result<EnrollParams> {
        let enroll = &self.enroll;
        Ok(EnrollParams {
            key_file: required(enroll.key_file.clone(), "enroll.key_file", ENROLL_KEY_FILE_ENV)?,
            package_id: parse_id(
                required(enroll.package_id.as_deref(), "enroll.package_id", ENROLL_PACKAGE_ID_ENV)?,
                "enroll.package_id",
            )?,
            module: enroll.module.clone(),
            function: enroll.function.clone(),
            cohort_object_id: parse_id(
                required(
                    enroll.cohort_object_id.as_deref(),
                    "enroll.cohort_object_id",
                    ENROLL_COHORT_ID_ENV,
                )?,
                "enroll.cohort_object_id",
            )?,
            github: required(enroll.github.clone(), "enroll.github", ENROLL_GITHUB_ENV)?,
        })
    }

    pub fn transfer_params(&self) -> Result<TransferParams> {
        let transfer = &self.transfer;
        Ok(TransferParams {
            key_file: required(
                transfer.key_file.clone(),
                "transfer.key_file",
                TRANSFER_KEY_FILE_ENV,
            )?,
            recipient: parse_id(
                required(
                    transfer.recipient.as_deref(),
                    "transfer.recipient",
                    TRANSFER_RECIPIENT_ENV,
                )?,
                "transfer.recipient",
            )?,
        })
    }
}

fn required<T>(value: Option<T>, field: &str, env: &str) -> Result<T> {
    value.ok_or_else(|| Error::Config(format!("{} is not set (config file or {})", field, env)))
}

fn parse_id<T>(value: &str, field: &str) -> Result<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    value
        .parse()
        .map_err(|e| Error::Config(format!("{} {:?}: {}", field, value, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_have_no_ids() {
        let config = Config::default();
        assert_eq!(config.network, Network::Testnet);
        assert_eq!(config.enroll.module, "enrollment");
        assert_eq!(config.enroll.function, "enroll");
        assert!(config.enroll.package_id.is_none());
        assert!(config.transfer.recipient.is_none());
        assert_eq!(config.gas().max_budget, DEFAULT_MAX_GAS_BUDGET);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"network": "devnet", "gas_price": 750, "enroll": {{"github": "codenix-sv"}}}}"#
        )
        .unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.network, Network::Devnet);
        assert_eq!(config.gas_price, Some(750));
        assert_eq!(config.enroll.github.as_deref(), Some("codenix-sv"));
        assert_eq!(config.enroll.module, "enrollment");
        assert_eq!(config.explorer_url, DEFAULT_EXPLORER_URL);
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let err = Config::load(Some(Path::new("/nonexistent/wba-sui.json"))).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn environment_overrides_file() {
        let mut config = Config {
            network: Network::Devnet,
            ..Config::default()
        };
        config
            .apply_env(env(&[
                (NETWORK_ENV, "Mainnet"),
                (GAS_BUDGET_ENV, "10000000"),
                (ENROLL_GITHUB_ENV, "someone"),
                (TRANSFER_RECIPIENT_ENV, "0x2"),
                (RPC_URL_ENV, ""),
            ]))
            .unwrap();
        assert_eq!(config.network, Network::Mainnet);
        assert_eq!(config.gas_budget, Some(10_000_000));
        assert_eq!(config.enroll.github.as_deref(), Some("someone"));
        assert_eq!(config.transfer.recipient.as_deref(), Some("0x2"));
        assert!(config.rpc_url.is_none());
    }

    #[test]
    fn bad_environment_values_are_rejected() {
        let mut config = Config::default();
        assert!(config.apply_env(env(&[(NETWORK_ENV, "moonnet")])).is_err());
        assert!(config.apply_env(env(&[(GAS_BUDGET_ENV, "lots")])).is_err());
    }

    #[test]
    fn enroll_params_require_every_field() {
        let mut config = Config::default();
        let err = config.enroll_params().unwrap_err();
        assert!(err.to_string().contains("enroll.key_file"));

        config.enroll.key_file = Some(PathBuf::from("keys/enroll.json"));
        config.enroll.package_id = Some("0x5b6f".to_string());
        config.enroll.cohort_object_id = Some("0xc0".to_string());
        let err = config.enroll_params().unwrap_err();
        assert!(err.to_string().contains(ENROLL_GITHUB_ENV));

        config.enroll.github = Some("codenix-sv".to_string());
        let params = config.enroll_params().unwrap();
        assert_eq!(params.package_id.to_string(), format!("0x{:0>64}", "5b6f"));
        assert_eq!(params.cohort_object_id.as_bytes()[31], 0xc0);
        assert_eq!(params.module, "enrollment");
    }

    #[test]
    fn malformed_ids_are_config_errors() {
        let mut config = Config::default();
        config.transfer.key_file = Some(PathBuf::from("keys/dev.json"));
        config.transfer.recipient = Some("0xnothex".to_string());
        let err = config.transfer_params().unwrap_err();
        assert!(matches!(err, Error::Config(message) if message.contains("transfer.recipient")));
    }

    #[test]
    fn rpc_and_explorer_follow_network() {
        let config = Config {
            network: Network::Devnet,
            ..Config::default()
        };
        assert_eq!(config.rpc().unwrap().url().host_str(), Some("fullnode.devnet.sui.io"));
        let link = config
            .explorer()
            .unwrap()
            .transaction_url(&crate::types::TransactionDigest::new("D1"));
        assert!(link.ends_with("txblock/D1?network=devnet"));
    }
}
