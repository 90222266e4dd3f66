//! Fullnode endpoint and explorer link configuration
//!
//! The endpoint comes from the network preset unless overridden:
//! 1. `SUI_RPC_URL` / `rpc_url` - explicit fullnode URL
//! 2. Network preset (`mainnet`, `testnet`, `devnet`, `localnet`)
//!
//! ```bash
//! export SUI_NETWORK=testnet
//! export SUI_RPC_URL="https://my-fullnode.example.com:443"
//! ```

use super::Network;
use crate::types::TransactionDigest;
use crate::{Error, Result};
use url::Url;

/// Public explorer used for result links
pub const DEFAULT_EXPLORER_URL: &str = "https://suiexplorer.com/";

/// Public fullnode endpoints
mod public_rpcs {
    pub const MAINNET: &str = "https://fullnode.mainnet.sui.io:443";
    pub const TESTNET: &str = "https://fullnode.testnet.sui.io:443";
    pub const DEVNET: &str = "https://fullnode.devnet.sui.io:443";
    pub const LOCALNET: &str = "http://127.0.0.1:9000";
}

impl Network {
    /// Public fullnode URL for this network
    pub fn fullnode_url(&self) -> &'static str {
        match self {
            Network::Mainnet => public_rpcs::MAINNET,
            Network::Testnet => public_rpcs::TESTNET,
            Network::Devnet => public_rpcs::DEVNET,
            Network::Localnet => public_rpcs::LOCALNET,
        }
    }
}

fn parse_url(value: &str, what: &str) -> Result<Url> {
    Url::parse(value).map_err(|e| Error::Config(format!("invalid {} {:?}: {}", what, value, e)))
}

/// Resolved fullnode endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RpcConfig {
    network: Network,
    url: Url,
}

impl RpcConfig {
    /// Public endpoint of `network`
    pub fn for_network(network: Network) -> Result<Self> {
        Self::with_url(network, network.fullnode_url())
    }

    /// Explicit endpoint for `network`
    pub fn with_url(network: Network, url: &str) -> Result<Self> {
        Ok(Self {
            network,
            url: parse_url(url, "RPC URL")?,
        })
    }

    /// Preset endpoint unless `override_url` is given
    pub fn resolve(network: Network, override_url: Option<&str>) -> Result<Self> {
        match override_url {
            Some(url) => {
                tracing::debug!(%url, "Using configured RPC URL");
                Self::with_url(network, url)
            }
            None => Self::for_network(network),
        }
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

/// Builds block-explorer links for submitted transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplorerLink {
    base: Url,
    network: Network,
}

impl ExplorerLink {
    pub fn new(base: &str, network: Network) -> Result<Self> {
        Ok(Self {
            base: parse_url(base, "explorer URL")?,
            network,
        })
    }

    /// `<base>/txblock/<digest>?network=<network>`
    pub fn transaction_url(&self, digest: &TransactionDigest) -> String {
        format!(
            "{}/txblock/{}?network={}",
            self.base.as_str().trim_end_matches('/'),
            digest,
            self.network.name()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_resolve_to_public_fullnodes() {
        let config = RpcConfig::for_network(Network::Testnet).unwrap();
        assert_eq!(config.url().host_str(), Some("fullnode.testnet.sui.io"));
        assert_eq!(config.network(), Network::Testnet);

        let config = RpcConfig::for_network(Network::Devnet).unwrap();
        assert_eq!(config.url().host_str(), Some("fullnode.devnet.sui.io"));
    }

    #[test]
    fn override_wins_over_preset() {
        let config =
            RpcConfig::resolve(Network::Testnet, Some("https://custom.rpc:9000")).unwrap();
        assert_eq!(config.url().as_str(), "https://custom.rpc:9000/");
        assert_eq!(config.network(), Network::Testnet);
    }

    #[test]
    fn invalid_override_is_a_config_error() {
        let err = RpcConfig::resolve(Network::Testnet, Some("not a url")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn explorer_link_format() {
        let link = ExplorerLink::new(DEFAULT_EXPLORER_URL, Network::Testnet).unwrap();
        assert_eq!(
            link.transaction_url(&TransactionDigest::new("ABC123")),
            "https://suiexplorer.com/txblock/ABC123?network=testnet"
        );

        let link = ExplorerLink::new("https://explorer.example.com/sui", Network::Devnet).unwrap();
        assert_eq!(
            link.transaction_url(&TransactionDigest::new("XYZ")),
            "https://explorer.example.com/sui/txblock/XYZ?network=devnet"
        );
    }
}
