//! Agent configuration
//!
//! Loaded once at start-up from a YAML file. Connection settings can be
//! set globally under `defaults` and overridden per host; a host entry
//! with only a name inherits everything else.

use std::path::Path;
use std::time::Duration;

use secrecy::SecretString;
use serde::Deserialize;

use crate::error::ConfigError;

/// Default remote-session port
const DEFAULT_PORT: u16 = 22;

const fn default_poll_interval() -> u64 {
    10
}

/// Top-level agent configuration
#[derive(Debug, Deserialize)]
pub struct AgentConfig {
    /// Monitored hosts, in polling order
    pub hosts: Vec<HostEntry>,
    /// Global connection defaults
    #[serde(default)]
    pub defaults: ConnectionDefaults,
    /// Seconds to sleep between passes
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
    /// Indexing sink endpoint
    pub sink: SinkConfig,
}

/// Global connection defaults applied to hosts that do not override them
#[derive(Debug, Default, Deserialize)]
pub struct ConnectionDefaults {
    /// Remote-session port
    pub port: Option<u16>,
    /// Login user
    pub user: Option<String>,
    /// Login password
    pub password: Option<SecretString>,
}

/// One monitored host as written in the configuration file
#[derive(Debug, Deserialize)]
pub struct HostEntry {
    /// Host name; the network address and the record grouping key
    pub name: String,
    /// Per-host port override
    pub port: Option<u16>,
    /// Per-host user override
    pub user: Option<String>,
    /// Per-host password override
    pub password: Option<SecretString>,
}

/// Sink endpoint configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SinkConfig {
    /// Base URL of the indexing store
    pub url: String,
    /// Index to write documents into
    pub index: String,
}

/// A host with all connection fields resolved
#[derive(Debug)]
pub struct Host {
    /// Host name, also used as the record grouping key
    pub name: String,
    /// Remote-session port
    pub port: u16,
    /// Login user
    pub user: String,
    /// Login password
    pub password: SecretString,
}

impl AgentConfig {
    /// Loads and validates the configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read or parsed,
    /// lists no hosts, has a zero poll interval, or leaves a host without
    /// a resolvable user or password.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config: Self = serde_yaml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.hosts.is_empty() {
            return Err(ConfigError::NoHosts);
        }
        if self.poll_interval_secs == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        for entry in &self.hosts {
            if entry.user.is_none() && self.defaults.user.is_none() {
                return Err(ConfigError::MissingCredential {
                    host: entry.name.clone(),
                    field: "user",
                });
            }
            if entry.password.is_none() && self.defaults.password.is_none() {
                return Err(ConfigError::MissingCredential {
                    host: entry.name.clone(),
                    field: "password",
                });
            }
        }
        Ok(())
    }

    /// Resolves every host entry against the global defaults, preserving
    /// the configured order.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingCredential`] for a host that resolves
    /// no user or password.
    pub fn resolved_hosts(&self) -> Result<Vec<Host>, ConfigError> {
        self.hosts
            .iter()
            .map(|entry| {
                let user = entry
                    .user
                    .clone()
                    .or_else(|| self.defaults.user.clone())
                    .ok_or_else(|| ConfigError::MissingCredential {
                        host: entry.name.clone(),
                        field: "user",
                    })?;
                let password = entry
                    .password
                    .clone()
                    .or_else(|| self.defaults.password.clone())
                    .ok_or_else(|| ConfigError::MissingCredential {
                        host: entry.name.clone(),
                        field: "password",
                    })?;
                Ok(Host {
                    name: entry.name.clone(),
                    port: entry.port.or(self.defaults.port).unwrap_or(DEFAULT_PORT),
                    user,
                    password,
                })
            })
            .collect()
    }

    /// Poll interval as a [`Duration`]
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}
