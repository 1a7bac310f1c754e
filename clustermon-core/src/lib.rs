//! `clustermon` core library
//!
//! Agentless metrics collection for clusters of data-store hosts. The agent
//! keeps one long-lived SSH session per monitored host, runs a fixed battery
//! of six diagnostic commands each pass, parses their plaintext output into
//! typed records, and forwards every record to an indexing sink.
//!
//! # Crate structure
//!
//! - [`config`] - Agent configuration (hosts, credentials, sink, interval)
//! - [`probe`] - The six diagnostic probes and their output parsers
//! - [`record`] - Typed metric records and their sink document form
//! - [`session`] - Per-host session lifecycle and the SSH transport
//! - [`sink`] - Indexing sink trait, HTTP implementation, in-memory sink
//! - [`poller`] - The polling control loop
//! - [`shutdown`] - Cooperative shutdown signalling
//! - [`error`] - Error types shared across the crate

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod poller;
pub mod probe;
pub mod record;
pub mod session;
pub mod shutdown;
pub mod sink;

pub use config::{AgentConfig, ConnectionDefaults, Host, HostEntry, SinkConfig};
pub use error::{ConfigError, ParseError, SinkError, TransportError};
pub use poller::Poller;
pub use probe::{PROBES, Probe};
pub use record::{
    DeviceCounters, DiskIoMetrics, FreeMetrics, GcStatsMetrics, MetricRecord, ProbeMetrics,
    ThreadPoolCounters, TopMetrics, TpStatsMetrics, VmstatMetrics,
};
pub use session::{RemoteSession, SessionManager, SshTransport, Transport};
pub use shutdown::{ShutdownHandle, ShutdownToken, install_interrupt_handler, shutdown_channel};
pub use sink::{HttpSink, MemorySink, Sink};
