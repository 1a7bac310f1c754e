//! Parser for `vmstat` output.
//!
//! Two header lines, then a single data line of seventeen positional
//! columns covering processes, memory, swap, I/O, system, and CPU.

use super::lines::OutputLines;
use crate::record::VmstatMetrics;

const HEADER_LINES: usize = 2;
const COLUMNS: usize = 17;

pub(super) fn parse(raw: &str) -> Result<VmstatMetrics, String> {
    let mut lines = OutputLines::new(raw);
    lines.skip_headers(HEADER_LINES)?;
    let row = lines.row("data", COLUMNS)?;
    let col = |i: usize| row[i].to_string();

    Ok(VmstatMetrics {
        procs_runnable: col(0),
        procs_blocked: col(1),
        mem_swapped: col(2),
        mem_free: col(3),
        mem_buffers: col(4),
        mem_cache: col(5),
        swap_in: col(6),
        swap_out: col(7),
        io_blocks_in: col(8),
        io_blocks_out: col(9),
        sys_interrupts: col(10),
        sys_context_switches: col(11),
        cpu_user: col(12),
        cpu_system: col(13),
        cpu_idle: col(14),
        cpu_wait: col(15),
        cpu_stolen: col(16),
    })
}
