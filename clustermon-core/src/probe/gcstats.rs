//! Parser for `nodetool gcstats` output.
//!
//! Two header lines, then a single data line of seven positional columns.

use super::lines::OutputLines;
use crate::record::GcStatsMetrics;

const HEADER_LINES: usize = 2;
const COLUMNS: usize = 7;

pub(super) fn parse(raw: &str) -> Result<GcStatsMetrics, String> {
    let mut lines = OutputLines::new(raw);
    lines.skip_headers(HEADER_LINES)?;
    let row = lines.row("data", COLUMNS)?;

    Ok(GcStatsMetrics {
        interval: row[0].to_string(),
        max_elapsed: row[1].to_string(),
        total_elapsed: row[2].to_string(),
        stdev_elapsed: row[3].to_string(),
        reclaimed: row[4].to_string(),
        collections: row[5].to_string(),
        direct_memory: row[6].to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "
       Interval (ms) Max GC Elapsed (ms) Total GC Elapsed (ms) Stdev GC Elapsed (ms)   GC Reclaimed (MB)         Collections      Direct Memory Bytes
             3491665                  42                   318                    12           804168408                  12                       -1
";

    #[test]
    fn parses_gc_statistics_row() {
        let m = parse(SAMPLE).unwrap();
        assert_eq!(m.interval, "3491665");
        assert_eq!(m.max_elapsed, "42");
        assert_eq!(m.total_elapsed, "318");
        assert_eq!(m.stdev_elapsed, "12");
        assert_eq!(m.reclaimed, "804168408");
        assert_eq!(m.collections, "12");
        assert_eq!(m.direct_memory, "-1");
    }

    #[test]
    fn non_numeric_stdev_is_kept_verbatim() {
        let sample = "
header
             3491665                   0                   0                 NaN                   0                   0                       -1
";
        let m = parse(sample).unwrap();
        assert_eq!(m.stdev_elapsed, "NaN");
    }

    #[test]
    fn rejects_missing_data_line() {
        assert!(parse("\nheader\n").is_err());
    }
}
