//! Parser for `nodetool tpstats` thread-pool rows.
//!
//! Two header lines, then exactly twenty pool rows: the raw pool name and
//! five integer counters (active, pending, completed, blocked, all-time
//! blocked). Anything after the twentieth row (the dropped-message table)
//! is ignored.

use super::lines::OutputLines;
use crate::record::{ThreadPoolCounters, TpStatsMetrics};

const HEADER_LINES: usize = 2;
const POOL_ROWS: usize = 20;
const COUNTERS: usize = 5;

/// Normalizes a raw pool name to its record key.
///
/// Hyphens are removed first, then an underscore is inserted before each
/// internal upper-case run and the whole name is lower-cased:
/// `"Read-Stage"` becomes `"read_stage"`, `"Native-Transport-Requests"`
/// becomes `"native_transport_requests"`.
#[must_use]
pub fn normalize_pool_name(raw: &str) -> String {
    let mut key = String::with_capacity(raw.len() + 4);
    let mut prev_lower = false;
    for c in raw.chars().filter(|c| *c != '-') {
        if c.is_ascii_uppercase() && prev_lower {
            key.push('_');
        }
        prev_lower = !c.is_ascii_uppercase();
        key.push(c.to_ascii_lowercase());
    }
    key
}

pub(super) fn parse(raw: &str) -> Result<TpStatsMetrics, String> {
    let mut lines = OutputLines::new(raw);
    lines.skip_headers(HEADER_LINES)?;

    let mut pools = Vec::with_capacity(POOL_ROWS);
    for n in 0..POOL_ROWS {
        let row = lines.row(&format!("pool row {n}"), COUNTERS + 1)?;
        let mut counters = [0u64; COUNTERS];
        for (slot, token) in counters.iter_mut().zip(&row[1..=COUNTERS]) {
            *slot = token
                .parse()
                .map_err(|_| format!("pool {} has non-integer counter {token:?}", row[0]))?;
        }
        pools.push(ThreadPoolCounters {
            pool: normalize_pool_name(row[0]),
            counters,
        });
    }

    Ok(TpStatsMetrics { pools })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "
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

    #[test]
    fn consumes_exactly_twenty_rows() {
        let m = parse(SAMPLE).unwrap();
        assert_eq!(m.pools.len(), 20);
        assert_eq!(m.pools[0].pool, "read_stage");
        assert_eq!(m.pools[0].counters, [0, 0, 113_702, 0, 0]);
        assert_eq!(m.pools[17].pool, "native_transport_requests");
        assert_eq!(m.pools[17].counters, [1, 0, 1_715_937, 0, 64]);
    }

    #[test]
    fn trailing_dropped_message_table_is_ignored() {
        let with_trailer = format!(
            "{SAMPLE}\nMessage type           Dropped\nREAD                         0\n"
        );
        let m = parse(&with_trailer).unwrap();
        assert_eq!(m.pools.len(), 20);
    }

    #[test]
    fn fewer_than_twenty_rows_is_an_error() {
        let mut truncated: Vec<&str> = SAMPLE.lines().collect();
        truncated.truncate(SAMPLE.lines().count() - 2);
        assert!(parse(&truncated.join("\n")).is_err());
    }

    #[test]
    fn non_integer_counter_is_an_error() {
        let broken = SAMPLE.replacen("113702", "broken", 1);
        assert!(parse(&broken).is_err());
    }

    #[test]
    fn normalizes_hyphenated_names() {
        assert_eq!(normalize_pool_name("Read-Stage"), "read_stage");
    }

    #[test]
    fn normalizes_camel_case_runs() {
        assert_eq!(normalize_pool_name("MemtableFlushWriter"), "memtable_flush_writer");
        assert_eq!(normalize_pool_name("GossipStage"), "gossip_stage");
        assert_eq!(normalize_pool_name("Sampler"), "sampler");
    }
}
