//! Parser for `free` output.
//!
//! One header line precedes each of the two sections: the column header
//! before the memory line, and the buffers/cache line before the swap line.

use super::lines::OutputLines;
use crate::record::FreeMetrics;

const SECTION_HEADER_LINES: usize = 1;
const MEM_COLUMNS: usize = 7;
const SWAP_COLUMNS: usize = 4;

pub(super) fn parse(raw: &str) -> Result<FreeMetrics, String> {
    let mut lines = OutputLines::new(raw);
    lines.skip_headers(SECTION_HEADER_LINES)?;
    let mem = lines.row("memory", MEM_COLUMNS)?;
    lines.skip_headers(SECTION_HEADER_LINES)?;
    let swap = lines.row("swap", SWAP_COLUMNS)?;

    Ok(FreeMetrics {
        mem_total: mem[1].to_string(),
        mem_used: mem[2].to_string(),
        mem_free: mem[3].to_string(),
        mem_shared: mem[4].to_string(),
        mem_buffers: mem[5].to_string(),
        mem_cached: mem[6].to_string(),
        swap_total: swap[1].to_string(),
        swap_used: swap[2].to_string(),
        swap_free: swap[3].to_string(),
    })
}
