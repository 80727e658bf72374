use crate::domain::{DiscoveryConfig, PeerId};
use crate::ports::ConfigProvider;

// ============================================================================
// StaticConfigProvider - Hardcoded config for testing/development
// ============================================================================

/// Static configuration provider with hardcoded values.
///
/// Useful for tests and the demo node. For deployments, use `TomlConfigProvider`.
#[derive(Debug, Clone, Default)]
pub struct StaticConfigProvider {
    bootstrap_peers: Vec<PeerId>,
    config: DiscoveryConfig,
}

impl StaticConfigProvider {
    /// Create with default config and no bootstrap peers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_bootstrap_peers(mut self, peers: Vec<PeerId>) -> Self {
        self.bootstrap_peers = peers;
        self
    }

    #[must_use]
    pub fn with_config(mut self, config: DiscoveryConfig) -> Self {
        self.config = config;
        self
    }
}

impl ConfigProvider for StaticConfigProvider {
    fn get_bootstrap_peers(&self) -> Vec<PeerId> {
        self.bootstrap_peers.clone()
    }

    fn get_discovery_config(&self) -> DiscoveryConfig {
        self.config.clone()
    }
}

// ============================================================================
// TomlConfigProvider - File-based config (requires "config-file" feature)
// ============================================================================

#[cfg(feature = "config-file")]
mod toml_config {
    use super::*;
    use crate::domain::NodeId;
    use serde::Deserialize;
    use std::fs;
    use std::path::Path;
    use thiserror::Error;

    #[derive(Debug, Deserialize)]
    struct ConfigFile {
        #[serde(default)]
        bootstrap: BootstrapSection,
        #[serde(default)]
        discovery: DiscoverySection,
    }

    #[derive(Debug, Deserialize, Default)]
    struct BootstrapSection {
        #[serde(default)]
        peers: Vec<String>,
    }

    #[derive(Debug, Deserialize, Default)]
    struct DiscoverySection {
        k: Option<usize>,
        alpha: Option<usize>,
        disable_ping: Option<bool>,
        disable_pong: Option<bool>,
        disable_lookup: Option<bool>,
    }

    /// TOML-based configuration provider.
    ///
    /// # Config File Format
    ///
    /// ```toml
    /// [bootstrap]
    /// peers = [
    ///     "10.0.0.1:3000@<64 hex chars>",
    /// ]
    ///
    /// [discovery]
    /// k = 16
    /// alpha = 8
    /// disable_ping = false
    /// disable_pong = false
    /// disable_lookup = false
    /// ```
    ///
    /// Missing keys fall back to `DiscoveryConfig::default()`.
    #[derive(Debug, Clone)]
    pub struct TomlConfigProvider {
        bootstrap_peers: Vec<PeerId>,
        config: DiscoveryConfig,
    }

    impl TomlConfigProvider {
        /// Load configuration from a TOML file.
        ///
        /// # Errors
        ///
        /// Returns error if the file cannot be read or parsed, or names a
        /// malformed bootstrap peer.
        pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
            let content = fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
                path: path.as_ref().display().to_string(),
                error: e.to_string(),
            })?;

            Self::parse(&content)
        }

        /// Parse configuration from a TOML string.
        pub fn parse(content: &str) -> Result<Self, ConfigError> {
            let file: ConfigFile =
                toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;

            let bootstrap_peers = file
                .bootstrap
                .peers
                .iter()
                .map(|entry| Self::parse_peer(entry))
                .collect::<Result<Vec<_>, _>>()?;

            let defaults = DiscoveryConfig::default();
            let dc = file.discovery;
            let config = DiscoveryConfig {
                k: dc.k.unwrap_or(defaults.k),
                alpha: dc.alpha.unwrap_or(defaults.alpha),
                disable_ping: dc.disable_ping.unwrap_or(defaults.disable_ping),
                disable_pong: dc.disable_pong.unwrap_or(defaults.disable_pong),
                disable_lookup: dc.disable_lookup.unwrap_or(defaults.disable_lookup),
            };
            if config.k == 0 || config.alpha == 0 {
                return Err(ConfigError::Parse(
                    "k and alpha must be at least 1".to_string(),
                ));
            }

            Ok(Self {
                bootstrap_peers,
                config,
            })
        }

        /// Parse `"address@hexid"`. The address itself may contain `@`.
        fn parse_peer(entry: &str) -> Result<PeerId, ConfigError> {
            let (address, hex) = entry
                .rsplit_once('@')
                .ok_or_else(|| ConfigError::InvalidPeer(entry.to_string()))?;
            if address.is_empty() {
                return Err(ConfigError::InvalidPeer(entry.to_string()));
            }
            let id =
                NodeId::from_hex(hex).ok_or_else(|| ConfigError::InvalidPeer(entry.to_string()))?;
            Ok(PeerId::new(address, id))
        }
    }

    impl ConfigProvider for TomlConfigProvider {
        fn get_bootstrap_peers(&self) -> Vec<PeerId> {
            self.bootstrap_peers.clone()
        }

        fn get_discovery_config(&self) -> DiscoveryConfig {
            self.config.clone()
        }
    }

    /// Errors that can occur during config loading.
    #[derive(Debug, Clone, PartialEq, Eq, Error)]
    pub enum ConfigError {
        #[error("Failed to read {path}: {error}")]
        Io { path: String, error: String },

        #[error("Failed to parse config: {0}")]
        Parse(String),

        /// Bootstrap entry is not `address@hexid`
        #[error("Invalid bootstrap peer: {0}")]
        InvalidPeer(String),
    }

}

#[cfg(feature = "config-file")]
pub use toml_config::{ConfigError, TomlConfigProvider};
