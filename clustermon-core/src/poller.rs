//! The polling control loop
//!
//! One pass visits every host in configured order and runs the six probes
//! in fixed order, so records for a given host/probe pair are separated by
//! at least the poll interval and strictly increase in capture time. The
//! shutdown token is read once per pass boundary; a request issued
//! mid-pass takes effect only after the current pass and the following
//! sleep complete.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use crate::error::TransportError;
use crate::probe::{PROBES, Probe};
use crate::session::SessionManager;
use crate::shutdown::ShutdownToken;
use crate::sink::Sink;

/// Drives the probe battery across all configured hosts
pub struct Poller {
    hosts: Vec<String>,
    sessions: SessionManager,
    sink: Arc<dyn Sink>,
    interval: Duration,
    shutdown: ShutdownToken,
}

impl Poller {
    /// Creates a poller over `hosts` in their configured order.
    #[must_use]
    pub fn new(
        hosts: Vec<String>,
        sessions: SessionManager,
        sink: Arc<dyn Sink>,
        interval: Duration,
        shutdown: ShutdownToken,
    ) -> Self {
        Self {
            hosts,
            sessions,
            sink,
            interval,
            shutdown,
        }
    }

    /// Runs passes until shutdown is requested.
    ///
    /// Parse failures skip the affected probe for the pass; sink failures
    /// lose the affected record. Both are logged and neither is retried.
    ///
    /// # Errors
    ///
    /// Returns the first [`TransportError`] encountered; transport
    /// failures are fatal to the loop.
    pub async fn run(&self) -> Result<(), TransportError> {
        while !self.shutdown.is_stopped() {
            self.pass().await?;
            tokio::time::sleep(self.interval).await;
        }
        tracing::info!("Poller stopped");
        Ok(())
    }

    /// One full pass over every host and probe.
    async fn pass(&self) -> Result<(), TransportError> {
        for host in &self.hosts {
            for probe in PROBES {
                self.collect(host, probe).await?;
            }
        }
        Ok(())
    }

    async fn collect(&self, host: &str, probe: Probe) -> Result<(), TransportError> {
        let raw = match self.sessions.run(host, probe.command()).await {
            Ok(raw) => raw,
            Err(err) => {
                tracing::error!(host, probe = %probe, error = %err, "Transport failure, aborting");
                return Err(err);
            }
        };
        let ts = Utc::now().timestamp();
        let record = match probe.parse(host, ts, &raw) {
            Ok(record) => record,
            Err(err) => {
                tracing::warn!(error = %err, "Skipping probe for this pass");
                return Ok(());
            }
        };
        tracing::debug!(host, probe = %probe, ts, "Collected record");
        if let Err(err) = self.sink.put(probe.name(), &record).await {
            tracing::warn!(host, probe = %probe, error = %err, "Record not persisted");
        }
        Ok(())
    }
}
