//! Error types shared across the collector core.

use thiserror::Error;

/// Errors raised while loading or validating the agent configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read
    #[error("Failed to read config file {path}: {source}")]
    Read {
        /// Path that was attempted
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid YAML for the expected shape
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        /// Path that was attempted
        path: String,
        /// Underlying deserialization error
        #[source]
        source: serde_yaml::Error,
    },

    /// The host list is empty
    #[error("Configuration lists no hosts")]
    NoHosts,

    /// The poll interval is zero
    #[error("poll_interval_secs must be positive")]
    ZeroInterval,

    /// A host resolves no value for a required credential field
    #[error("Host {host} has no {field} (set it on the host or under defaults)")]
    MissingCredential {
        /// Host missing the field
        host: String,
        /// Which field is missing
        field: &'static str,
    },
}

/// Errors raised by the remote-session transport
#[derive(Debug, Error)]
pub enum TransportError {
    /// The transport could not reach the host
    #[error("Failed to connect to {host}: {reason}")]
    Connect {
        /// Target host
        host: String,
        /// What went wrong
        reason: String,
    },

    /// The host rejected the configured credentials
    #[error("Authentication failed for {host}: {reason}")]
    Auth {
        /// Target host
        host: String,
        /// What went wrong
        reason: String,
    },

    /// Command execution failed on an established session
    #[error("Command {command:?} failed on {host}: {reason}")]
    Exec {
        /// Host the command ran on
        host: String,
        /// Command that failed
        command: String,
        /// What went wrong
        reason: String,
    },

    /// No session is open for the named host
    #[error("No open session for host {host}")]
    UnknownHost {
        /// Host that was looked up
        host: String,
    },
}

/// A probe's output did not have the expected shape
#[derive(Debug, Error)]
#[error("{probe} output from {host}: {reason}")]
pub struct ParseError {
    /// Probe whose output failed to parse
    pub probe: &'static str,
    /// Host the output came from
    pub host: String,
    /// What was wrong with the output
    pub reason: String,
}

/// Errors raised while forwarding a record to the sink
#[derive(Debug, Error)]
pub enum SinkError {
    /// The record could not be serialized into a document
    #[error("Failed to serialize record: {0}")]
    Serialize(String),

    /// The sink endpoint could not be reached
    #[error("Sink request failed: {0}")]
    Request(String),

    /// The sink answered with a non-success status
    #[error("Sink rejected document: HTTP {0}")]
    Status(u16),
}
