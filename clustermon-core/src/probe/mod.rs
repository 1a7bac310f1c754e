//! The six diagnostic probes and their output parsers
//!
//! A probe pairs one remote diagnostic command with a parser for its
//! plaintext output. Header-skip counts and column positions mirror the
//! fixed, script-oriented formats of the underlying tools; column
//! positions, not names, determine field identity, so a version drift in
//! a command surfaces as a parse error rather than silently wrong fields.

mod disk;
mod free;
mod gcstats;
mod lines;
mod top;
mod tpstats;
mod vmstat;

pub use lines::tokenize;
pub use tpstats::normalize_pool_name;

use crate::error::ParseError;
use crate::record::{MetricRecord, ProbeMetrics};

/// The fixed probe battery, in per-pass execution order
pub const PROBES: [Probe; 6] = [
    Probe::Vmstat,
    Probe::Free,
    Probe::Top,
    Probe::Disk,
    Probe::GcStats,
    Probe::TpStats,
];

/// One diagnostic probe: a remote command plus its output parser
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Probe {
    /// Virtual-memory statistics (`vmstat`)
    Vmstat,
    /// Memory and swap totals (`free`)
    Free,
    /// Process and CPU snapshot (`top`)
    Top,
    /// Per-disk I/O counters (`vmstat -d`)
    Disk,
    /// Data-store garbage-collector statistics (`nodetool gcstats`)
    GcStats,
    /// Data-store thread-pool statistics (`nodetool tpstats`)
    TpStats,
}

impl Probe {
    /// The remote command this probe executes
    #[must_use]
    pub const fn command(self) -> &'static str {
        match self {
            Self::Vmstat => "vmstat",
            Self::Free => "free",
            Self::Top => "top -b -n 1 | head -3",
            Self::Disk => "vmstat -d",
            Self::GcStats => "nodetool gcstats",
            Self::TpStats => "nodetool tpstats",
        }
    }

    /// Short name, also used as the record's document type
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Vmstat => "vmstat",
            Self::Free => "free",
            Self::Top => "top",
            Self::Disk => "disk",
            Self::GcStats => "gcstats",
            Self::TpStats => "tpstats",
        }
    }

    /// Parses one command invocation's output into a record.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] when the output has fewer lines or columns
    /// than the probe's fixed format requires.
    pub fn parse(self, machine: &str, ts: i64, raw: &str) -> Result<MetricRecord, ParseError> {
        let metrics = match self {
            Self::Vmstat => vmstat::parse(raw).map(ProbeMetrics::Vmstat),
            Self::Free => free::parse(raw).map(ProbeMetrics::Free),
            Self::Top => top::parse(raw).map(ProbeMetrics::Top),
            Self::Disk => disk::parse(raw).map(ProbeMetrics::Disk),
            Self::GcStats => gcstats::parse(raw).map(ProbeMetrics::GcStats),
            Self::TpStats => tpstats::parse(raw).map(ProbeMetrics::TpStats),
        }
        .map_err(|reason| ParseError {
            probe: self.name(),
            host: machine.to_string(),
            reason,
        })?;

        Ok(MetricRecord {
            machine: machine.to_string(),
            ts,
            metrics,
        })
    }
}

impl std::fmt::Display for Probe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
