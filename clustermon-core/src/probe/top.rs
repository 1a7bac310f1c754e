//! Parser for `top -b -n 1` summary output.
//!
//! One header line, then the task summary and CPU summary lines. CPU
//! values carry a `%<state>,` suffix that is stripped before the value is
//! stored.

use std::sync::LazyLock;

use regex::Regex;

use super::lines::OutputLines;
use crate::record::TopMetrics;

const HEADER_LINES: usize = 1;
const TASK_COLUMNS: usize = 10;
const CPU_COLUMNS: usize = 6;

static CPU_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%[a-z]+,").expect("CPU_SUFFIX is a valid regex pattern"));

fn strip_cpu_suffix(token: &str) -> String {
    CPU_SUFFIX.replace_all(token, "").into_owned()
}

pub(super) fn parse(raw: &str) -> Result<TopMetrics, String> {
    let mut lines = OutputLines::new(raw);
    lines.skip_headers(HEADER_LINES)?;
    let tasks = lines.row("task summary", TASK_COLUMNS)?;
    let cpu = lines.row("cpu summary", CPU_COLUMNS)?;

    Ok(TopMetrics {
        tasks_total: tasks[1].to_string(),
        tasks_running: tasks[3].to_string(),
        tasks_sleeping: tasks[5].to_string(),
        tasks_stopped: tasks[7].to_string(),
        tasks_zombie: tasks[9].to_string(),
        cpu_user: strip_cpu_suffix(cpu[1]),
        cpu_system: strip_cpu_suffix(cpu[2]),
        cpu_nice: strip_cpu_suffix(cpu[3]),
        cpu_idle: strip_cpu_suffix(cpu[4]),
        cpu_wait: strip_cpu_suffix(cpu[5]),
    })
}
