//! Parser for `vmstat -d` per-device I/O counters.
//!
//! Two header lines, then one row per block device: the device name
//! followed by ten counters, kept verbatim. Pseudo devices (`ram*`,
//! `loop*`) are excluded. The row loop stops at the first line that is
//! too short to be a device row.

use super::lines::OutputLines;
use crate::record::{DeviceCounters, DiskIoMetrics};

const HEADER_LINES: usize = 2;
const COUNTERS: usize = 10;

fn is_excluded(device: &str) -> bool {
    device.starts_with("ram") || device.starts_with("loop")
}

pub(super) fn parse(raw: &str) -> Result<DiskIoMetrics, String> {
    let mut lines = OutputLines::new(raw);
    lines.skip_headers(HEADER_LINES)?;

    let mut devices = Vec::new();
    while let Some(row) = lines.next_row() {
        if row.len() < COUNTERS + 1 {
            break;
        }
        if is_excluded(row[0]) {
            continue;
        }
        devices.push(DeviceCounters {
            device: row[0].to_string(),
            counters: row[1..=COUNTERS].iter().map(|t| (*t).to_string()).collect(),
        });
    }

    Ok(DiskIoMetrics { devices })
}
