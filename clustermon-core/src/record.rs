//! Typed metric records produced by the probes
//!
//! One record is produced per probe invocation per host. Records are
//! strongly typed at the parser boundary (one variant per probe) and are
//! flattened into a schemaless JSON document only when handed to the sink.
//! Wire field names live on the types as serde renames, so the mapping
//! from column position to document field is declared in one place.

use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

/// A normalized metric record for one host at one capture time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricRecord {
    /// Monitored host the record describes
    pub machine: String,
    /// Capture time, seconds since the Unix epoch
    pub ts: i64,
    /// Probe-specific payload
    pub metrics: ProbeMetrics,
}

impl MetricRecord {
    /// Flattens the record into the schemaless document shape the sink
    /// indexes: `type`, `machine`, `ts`, and the probe's own fields at the
    /// top level.
    ///
    /// # Errors
    ///
    /// Propagates serialization failures from the payload types.
    pub fn to_document(&self) -> Result<serde_json::Value, serde_json::Error> {
        use serde::ser::Error as _;

        let mut doc = serde_json::Map::new();
        doc.insert("type".to_string(), self.metrics.doc_type().into());
        doc.insert("machine".to_string(), self.machine.clone().into());
        doc.insert("ts".to_string(), self.ts.into());

        let fields = match &self.metrics {
            ProbeMetrics::Vmstat(m) => serde_json::to_value(m)?,
            ProbeMetrics::Free(m) => serde_json::to_value(m)?,
            ProbeMetrics::Top(m) => serde_json::to_value(m)?,
            ProbeMetrics::Disk(m) => serde_json::to_value(m)?,
            ProbeMetrics::GcStats(m) => serde_json::to_value(m)?,
            ProbeMetrics::TpStats(m) => serde_json::to_value(m)?,
        };
        match fields {
            serde_json::Value::Object(map) => doc.extend(map),
            _ => return Err(serde_json::Error::custom("record payload is not a map")),
        }

        Ok(serde_json::Value::Object(doc))
    }
}

/// Probe-specific metric payloads, one variant per probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeMetrics {
    /// `vmstat` system snapshot
    Vmstat(VmstatMetrics),
    /// `free` memory/swap totals
    Free(FreeMetrics),
    /// `top` task and CPU summary
    Top(TopMetrics),
    /// Per-device I/O counters
    Disk(DiskIoMetrics),
    /// Data-store garbage-collector statistics
    GcStats(GcStatsMetrics),
    /// Data-store thread-pool statistics
    TpStats(TpStatsMetrics),
}

impl ProbeMetrics {
    /// The document type tag stored in the record's `type` field
    #[must_use]
    pub const fn doc_type(&self) -> &'static str {
        match self {
            Self::Vmstat(_) => "vmstat",
            Self::Free(_) => "free",
            Self::Top(_) => "top",
            Self::Disk(_) => "disk",
            Self::GcStats(_) => "gcstats",
            Self::TpStats(_) => "tpstats",
        }
    }
}

/// Fields of one `vmstat` data line, kept in their literal form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VmstatMetrics {
    /// Runnable processes
    #[serde(rename = "prs-r")]
    pub procs_runnable: String,
    /// Processes in uninterruptible sleep
    #[serde(rename = "prs-b")]
    pub procs_blocked: String,
    /// Swapped-out virtual memory
    #[serde(rename = "mem-swpd")]
    pub mem_swapped: String,
    /// Idle memory
    #[serde(rename = "mem-free")]
    pub mem_free: String,
    /// Memory used as buffers
    #[serde(rename = "mem-buff")]
    pub mem_buffers: String,
    /// Memory used as cache
    #[serde(rename = "mem-cache")]
    pub mem_cache: String,
    /// Memory swapped in per second
    #[serde(rename = "swp-si")]
    pub swap_in: String,
    /// Memory swapped out per second
    #[serde(rename = "swp-so")]
    pub swap_out: String,
    /// Blocks received from block devices
    #[serde(rename = "io-bi")]
    pub io_blocks_in: String,
    /// Blocks sent to block devices
    #[serde(rename = "io-bo")]
    pub io_blocks_out: String,
    /// Interrupts per second
    #[serde(rename = "sys-in")]
    pub sys_interrupts: String,
    /// Context switches per second
    #[serde(rename = "sys-cs")]
    pub sys_context_switches: String,
    /// User CPU time
    #[serde(rename = "cpu-us")]
    pub cpu_user: String,
    /// System CPU time
    #[serde(rename = "cpu-sy")]
    pub cpu_system: String,
    /// Idle CPU time
    #[serde(rename = "cpu-id")]
    pub cpu_idle: String,
    /// I/O-wait CPU time
    #[serde(rename = "cpu-wa")]
    pub cpu_wait: String,
    /// Time stolen by the hypervisor
    #[serde(rename = "cpu-st")]
    pub cpu_stolen: String,
}

/// Fields of the `free` memory and swap lines
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FreeMetrics {
    /// Total physical memory
    #[serde(rename = "mem-total")]
    pub mem_total: String,
    /// Used memory
    #[serde(rename = "mem-used")]
    pub mem_used: String,
    /// Free memory
    #[serde(rename = "mem-free")]
    pub mem_free: String,
    /// Shared memory
    #[serde(rename = "mem-shared")]
    pub mem_shared: String,
    /// Buffer memory
    #[serde(rename = "mem-buffers")]
    pub mem_buffers: String,
    /// Cached memory
    #[serde(rename = "mem-cached")]
    pub mem_cached: String,
    /// Total swap space
    #[serde(rename = "swp-total")]
    pub swap_total: String,
    /// Used swap space
    #[serde(rename = "swp-used")]
    pub swap_used: String,
    /// Free swap space
    #[serde(rename = "swp-free")]
    pub swap_free: String,
}

/// Fields of the `top` task and CPU summary lines
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopMetrics {
    /// Total task count
    #[serde(rename = "tsk-total")]
    pub tasks_total: String,
    /// Running tasks
    #[serde(rename = "tsk-run")]
    pub tasks_running: String,
    /// Sleeping tasks
    #[serde(rename = "tsk-sleep")]
    pub tasks_sleeping: String,
    /// Stopped tasks
    #[serde(rename = "tsk-stop")]
    pub tasks_stopped: String,
    /// Zombie tasks
    #[serde(rename = "tsk-zombie")]
    pub tasks_zombie: String,
    /// User CPU share, `%<state>,` suffix stripped
    #[serde(rename = "cpu-user")]
    pub cpu_user: String,
    /// System CPU share
    #[serde(rename = "cpu-sys")]
    pub cpu_system: String,
    /// Nice CPU share
    #[serde(rename = "cpu-nice")]
    pub cpu_nice: String,
    /// Idle CPU share
    #[serde(rename = "cpu-idle")]
    pub cpu_idle: String,
    /// I/O-wait CPU share
    #[serde(rename = "cpu-wait")]
    pub cpu_wait: String,
}

/// Per-device I/O counters
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiskIoMetrics {
    /// Devices in output order, pseudo devices excluded
    pub devices: Vec<DeviceCounters>,
}

/// One block device and its ten counters, kept verbatim
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceCounters {
    /// Device name (e.g. `sda`)
    pub device: String,
    /// The ten counter columns, in output order
    pub counters: Vec<String>,
}

// Serializes as `{"sda": ["123", ...]}` so the document's device list is an
// ordered sequence of single-entry objects.
impl Serialize for DeviceCounters {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.device, &self.counters)?;
        map.end()
    }
}

/// Fields of the `nodetool gcstats` data line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GcStatsMetrics {
    /// Sampling interval
    #[serde(rename = "interval")]
    pub interval: String,
    /// Longest GC pause in the interval
    #[serde(rename = "max-gc-elapsed")]
    pub max_elapsed: String,
    /// Total GC time in the interval
    #[serde(rename = "total-gc-elapsed")]
    pub total_elapsed: String,
    /// Standard deviation of GC pauses
    #[serde(rename = "stdev-gc-elapsed")]
    pub stdev_elapsed: String,
    /// Memory reclaimed by GC
    #[serde(rename = "gc-reclaimed")]
    pub reclaimed: String,
    /// Collection count
    #[serde(rename = "collections")]
    pub collections: String,
    /// Direct memory in use
    #[serde(rename = "direct-memory")]
    pub direct_memory: String,
}

/// Thread-pool rows from `nodetool tpstats`, in output order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TpStatsMetrics {
    /// The twenty pools, in output order
    pub pools: Vec<ThreadPoolCounters>,
}

/// One thread pool's normalized key and its five counters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadPoolCounters {
    /// Normalized pool key (e.g. `read_stage`)
    pub pool: String,
    /// Active, pending, completed, blocked, all-time-blocked
    pub counters: [u64; 5],
}

// Pools flatten into the document as one field per pool, each holding its
// ordered five-counter sequence.
impl Serialize for TpStatsMetrics {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.pools.len()))?;
        for pool in &self.pools {
            map.serialize_entry(&pool.pool, &pool.counters)?;
        }
        map.end()
    }
}
