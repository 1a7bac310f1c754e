//! Agent error types and exit codes.

use clustermon_core::error::{ConfigError, SinkError, TransportError};

/// Exit codes for the agent process
pub mod exit_codes {
    /// General error - configuration, sink, or other non-transport errors
    pub const GENERAL_ERROR: i32 = 1;
    /// Transport failure - a session could not be opened or a remote
    /// command failed
    pub const TRANSPORT_FAILURE: i32 = 2;
}

/// Fatal agent error
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Transport error
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Sink error
    #[error("Sink error: {0}")]
    Sink(#[from] SinkError),
}

impl AgentError {
    /// Returns the process exit code for this error type.
    ///
    /// Exit codes:
    /// - 0: Success (not an error)
    /// - 1: General error (configuration, sink)
    /// - 2: Transport failure (session open or command execution)
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Transport(_) => exit_codes::TRANSPORT_FAILURE,
            Self::Config(_) | Self::Sink(_) => exit_codes::GENERAL_ERROR,
        }
    }
}
