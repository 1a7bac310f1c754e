//! End-to-end poller tests over a stub transport and an in-memory sink.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use clustermon_core::config::Host;
use clustermon_core::error::{SinkError, TransportError};
use clustermon_core::poller::Poller;
use clustermon_core::probe::PROBES;
use clustermon_core::record::MetricRecord;
use clustermon_core::session::{RemoteSession, SessionManager, Transport};
use clustermon_core::shutdown::{ShutdownHandle, shutdown_channel};
use clustermon_core::sink::{MemorySink, Sink};

const VMSTAT_OUTPUT: &str = "\
procs -----------memory---------- ---swap-- -----io---- -system-- ------cpu-----
 r  b   swpd   free   buff  cache   si   so    bi    bo   in   cs us sy id wa st
 1  0      0 811544  95716 921308    0    0     5     9  101  215  3  1 95  1  0
";

const FREE_OUTPUT: &str = "\
             total       used       free     shared    buffers     cached
Mem:      16432892   15934984     497908          0     193868   13082908
-/+ buffers/cache:    2658208   13774684
Swap:      2097148        332    2096816
";

const TOP_OUTPUT: &str = "\
top - 20:11:12 up 30 days,  4:52,  2 users,  load average: 0.18, 0.11, 0.09
Tasks: 292 total,   1 running, 290 sleeping,   0 stopped,   1 zombie
Cpu(s):  5.3%us,  1.2%sy,  0.0%ni, 93.0%id,  0.4%wa,  0.0%hi,  0.1%si,  0.0%st
";

const DISK_OUTPUT: &str = "\
disk- ------------reads------------ ------------writes----------- -----IO------
       total merged sectors      ms  total merged sectors      ms    cur    sec
sda    57437  10441 1328154  378907  63679  62574 1011134  760799      0    356
ram0       0      0       0       0      0      0       0       0      0      0
loop1      0      0       0       0      0      0       0       0      0      0
sdb     8432    119  212918   41952   2342   1559   31202   20043      0     14
";

const GCSTATS_OUTPUT: &str = "
       Interval (ms) Max GC Elapsed (ms) Total GC Elapsed (ms) Stdev GC Elapsed (ms)   GC Reclaimed (MB)         Collections      Direct Memory Bytes
             3491665                  42                   318                    12           804168408                  12                       -1
";

const TPSTATS_OUTPUT: &str = "
Pool Name                    Active   Pending      Completed   Blocked  All time blocked
ReadStage                         0         0         113702         0                 0
MutationStage                     0         0         466644         0                 0
CounterMutationStage              0         0              0         0                 0
ViewMutationStage                 0         0              0         0                 0
GossipStage                       0         0         807708         0                 0
RequestResponseStage              0         0         471604         0                 0
AntiEntropyStage                  0         0              0         0                 0
MigrationStage                    0         0             12         0                 0
MiscStage                         0         0              0         0                 0
CompactionExecutor                0         0          94581         0                 0
ValidationExecutor                0         0              0         0                 0
MemtableFlushWriter               0         0           1627         0                 0
MemtableReclaimMemory             0         0           1627         0                 0
MemtablePostFlush                 0         0           3378         0                 0
PendingRangeCalculator            0         0              5         0                 0
SecondaryIndexManagement          0         0              0         0                 0
HintsDispatcher                   0         0              2         0                 0
Native-Transport-Requests         1         0        1715937         0                64
InternalResponseStage             0         0              0         0                 0
CacheCleanupExecutor              0         0              0         0                 0
";

fn canned_output(command: &str) -> Option<&'static str> {
    match command {
        "vmstat" => Some(VMSTAT_OUTPUT),
        "free" => Some(FREE_OUTPUT),
        "top -b -n 1 | head -3" => Some(TOP_OUTPUT),
        "vmstat -d" => Some(DISK_OUTPUT),
        "nodetool gcstats" => Some(GCSTATS_OUTPUT),
        "nodetool tpstats" => Some(TPSTATS_OUTPUT),
        _ => None,
    }
}

/// Transport whose sessions always answer with fixed canned output
struct StubTransport {
    /// Command whose execution should fail, if any
    failing_command: Option<&'static str>,
}

struct StubSession {
    host: String,
    failing_command: Option<&'static str>,
}

#[async_trait]
impl Transport for StubTransport {
    async fn connect(&self, host: &Host) -> Result<Box<dyn RemoteSession>, TransportError> {
        Ok(Box::new(StubSession {
            host: host.name.clone(),
            failing_command: self.failing_command,
        }))
    }
}

#[async_trait]
impl RemoteSession for StubSession {
    async fn run(&self, command: &str) -> Result<String, TransportError> {
        if self.failing_command == Some(command) {
            return Err(TransportError::Exec {
                host: self.host.clone(),
                command: command.to_string(),
                reason: "stub failure".to_string(),
            });
        }
        canned_output(command)
            .map(str::to_string)
            .ok_or_else(|| TransportError::Exec {
                host: self.host.clone(),
                command: command.to_string(),
                reason: "no canned output".to_string(),
            })
    }
}

/// Sink wrapper that requests shutdown once a target record count arrives
struct StopAfter {
    inner: Arc<MemorySink>,
    remaining: Mutex<usize>,
    handle: Mutex<Option<ShutdownHandle>>,
}

impl StopAfter {
    fn new(inner: Arc<MemorySink>, count: usize, handle: ShutdownHandle) -> Self {
        Self {
            inner,
            remaining: Mutex::new(count),
            handle: Mutex::new(Some(handle)),
        }
    }
}

#[async_trait]
impl Sink for StopAfter {
    async fn put(&self, doc_type: &str, record: &MetricRecord) -> Result<(), SinkError> {
        self.inner.put(doc_type, record).await?;
        let mut remaining = self.remaining.lock().unwrap();
        if *remaining > 0 {
            *remaining -= 1;
            if *remaining == 0
                && let Some(handle) = self.handle.lock().unwrap().take()
            {
                handle.request();
            }
        }
        Ok(())
    }
}

fn host(name: &str) -> Host {
    Host {
        name: name.to_string(),
        port: 22,
        user: "monitor".to_string(),
        password: "hunter2".to_string().into(),
    }
}

async fn run_poller(
    host_names: &[&str],
    interval: Duration,
    stop_after: usize,
    failing_command: Option<&'static str>,
) -> (Arc<MemorySink>, Result<(), TransportError>) {
    let hosts: Vec<Host> = host_names.iter().map(|n| host(n)).collect();
    let transport = StubTransport { failing_command };
    let sessions = SessionManager::connect_all(&transport, &hosts).await.unwrap();

    let sink = Arc::new(MemorySink::new());
    let (handle, token) = shutdown_channel();
    let stopper = Arc::new(StopAfter::new(Arc::clone(&sink), stop_after, handle));

    let poller = Poller::new(
        host_names.iter().map(|n| (*n).to_string()).collect(),
        sessions,
        stopper,
        interval,
        token,
    );
    let result = poller.run().await;
    (sink, result)
}

#[tokio::test]
async fn two_hosts_two_passes_produce_twentyfour_records() {
    let (sink, result) =
        run_poller(&["cass-1", "cass-2"], Duration::from_secs(1), 24, None).await;
    result.unwrap();

    let received = sink.received();
    assert_eq!(received.len(), 2 * 2 * 6);

    // Each pass visits hosts in configured order, probes in fixed order.
    for pass in 0..2 {
        for (h, name) in ["cass-1", "cass-2"].iter().enumerate() {
            for (p, probe) in PROBES.iter().enumerate() {
                let (doc_type, record) = &received[pass * 12 + h * 6 + p];
                assert_eq!(doc_type, probe.name());
                assert_eq!(record.machine, *name);
                assert_eq!(record.metrics.doc_type(), probe.name());
            }
        }
    }
}

#[tokio::test]
async fn shutdown_mid_pass_finishes_the_pass() {
    // Shutdown is requested as record 3 of the pass arrives; probes 4..6
    // still run and no second pass begins.
    let (sink, result) =
        run_poller(&["cass-1"], Duration::from_millis(50), 3, None).await;
    result.unwrap();

    let received = sink.received();
    assert_eq!(received.len(), 6);
    let types: Vec<&str> = received.iter().map(|(t, _)| t.as_str()).collect();
    assert_eq!(types, vec!["vmstat", "free", "top", "disk", "gcstats", "tpstats"]);
}

#[tokio::test]
async fn capture_times_increase_by_at_least_the_interval() {
    let (sink, result) =
        run_poller(&["cass-1"], Duration::from_secs(1), 12, None).await;
    result.unwrap();

    let received = sink.received();
    assert_eq!(received.len(), 12);
    for probe in 0..6 {
        let first = received[probe].1.ts;
        let second = received[6 + probe].1.ts;
        assert!(second > first, "ts must strictly increase across passes");
        assert!(second - first >= 1, "ts gap must cover the poll interval");
    }
}

#[tokio::test]
async fn transport_failure_is_fatal() {
    let (sink, result) = run_poller(
        &["cass-1"],
        Duration::from_millis(50),
        usize::MAX,
        Some("nodetool gcstats"),
    )
    .await;

    match result {
        Err(TransportError::Exec { host, command, .. }) => {
            assert_eq!(host, "cass-1");
            assert_eq!(command, "nodetool gcstats");
        }
        other => panic!("expected Exec error, got {other:?}"),
    }
    // The four probes before the failing one still produced records.
    assert_eq!(sink.len(), 4);
}

#[tokio::test]
async fn unknown_host_surfaces_as_transport_error() {
    let transport = StubTransport { failing_command: None };
    let sessions = SessionManager::connect_all(&transport, &[]).await.unwrap();
    let (_handle, token) = shutdown_channel();
    let poller = Poller::new(
        vec!["ghost".to_string()],
        sessions,
        Arc::new(MemorySink::new()),
        Duration::from_millis(50),
        token,
    );
    let err = poller.run().await.unwrap_err();
    assert!(matches!(err, TransportError::UnknownHost { host } if host == "ghost"));
}
