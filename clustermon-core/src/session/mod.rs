//! Per-host session lifecycle
//!
//! The session manager opens one remote-execution session per configured
//! host at start-up and keeps it for the process lifetime. There is no
//! retry, reconnect, or pooling; a session that dies surfaces as an
//! execution error on its next use.

mod ssh;

pub use ssh::SshTransport;

use std::collections::HashMap;

use async_trait::async_trait;

use crate::config::Host;
use crate::error::TransportError;

/// An open remote command-execution session bound to one host
#[async_trait]
pub trait RemoteSession: Send + Sync {
    /// Executes a command and returns its standard output.
    ///
    /// Blocks the caller until the remote command completes; output is
    /// read in full before returning.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Exec`] if the session is no longer
    /// usable or the command fails remotely.
    async fn run(&self, command: &str) -> Result<String, TransportError>;
}

/// Opens sessions; the seam between the collector and the network
#[async_trait]
pub trait Transport: Send + Sync {
    /// Authenticates against a host and establishes a session.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Auth`] when credentials are rejected and
    /// [`TransportError::Connect`] for any other connection failure.
    async fn connect(&self, host: &Host) -> Result<Box<dyn RemoteSession>, TransportError>;
}

/// Owns the per-host sessions for the lifetime of the process
pub struct SessionManager {
    sessions: HashMap<String, Box<dyn RemoteSession>>,
}

impl SessionManager {
    /// Opens one session per host, in order. Called exactly once per
    /// process.
    ///
    /// # Errors
    ///
    /// Propagates the first [`TransportError`]; there is no partial
    /// retry, an unreachable host aborts start-up.
    pub async fn connect_all(
        transport: &dyn Transport,
        hosts: &[Host],
    ) -> Result<Self, TransportError> {
        let mut sessions = HashMap::with_capacity(hosts.len());
        for host in hosts {
            tracing::info!(host = %host.name, port = host.port, "Opening session");
            let session = transport.connect(host).await?;
            sessions.insert(host.name.clone(), session);
        }
        Ok(Self { sessions })
    }

    /// Executes `command` on the named host's session.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::UnknownHost`] for a host with no open
    /// session, or the session's own execution error.
    pub async fn run(&self, host: &str, command: &str) -> Result<String, TransportError> {
        let session = self
            .sessions
            .get(host)
            .ok_or_else(|| TransportError::UnknownHost {
                host: host.to_string(),
            })?;
        session.run(command).await
    }
}
