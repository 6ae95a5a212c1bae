//! Readers for the text records under `/proc`.
//!
//! Every `parse_*` function is pure and works on the record contents, so the
//! rules can be tested without a live proc filesystem. [`ProcFs`] does the
//! file I/O relative to a configurable root and hands the text to the parsers.

use std::fs;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use super::process::ProcessState;
use super::snapshot::NetworkInterfaceSample;

/// Tokens required after the closing `)` of `/proc/<pid>/stat`.
const MIN_STAT_FIELDS: usize = 22;
/// Numeric columns required after the interface name in `/proc/net/dev`.
const MIN_NET_FIELDS: usize = 10;
const MAX_NET_FIELDS: usize = 16;

#[derive(Debug, Error)]
pub enum ReadError {
    #[error("cannot read {}: {source}", path.display())]
    Unavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed {record}: {reason}")]
    Malformed {
        record: &'static str,
        reason: String,
    },
}

impl ReadError {
    fn malformed(record: &'static str, reason: impl Into<String>) -> Self {
        ReadError::Malformed {
            record,
            reason: reason.into(),
        }
    }

    /// The record went away between listing and reading (process exited).
    pub fn is_vanished(&self) -> bool {
        match self {
            ReadError::Unavailable { source, .. } => {
                source.kind() == io::ErrorKind::NotFound || source.raw_os_error() == Some(3)
            }
            ReadError::Malformed { .. } => false,
        }
    }
}

pub type ReadResult<T> = Result<T, ReadError>;

/// Aggregate tick counters from the `cpu` line of `/proc/stat`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CpuTotals {
    pub total: u64,
    pub idle: u64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MemoryTotals {
    pub total_kb: u64,
    pub free_kb: u64,
    pub used_kb: u64,
}

/// Fields of `/proc/<pid>/stat` the monitor cares about.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatRecord {
    pub name: String,
    pub state: ProcessState,
    pub ppid: u32,
    pub utime: u64,
    pub stime: u64,
    pub start_time: u64,
    pub rss_pages: u64,
}

pub fn parse_cpu_totals(contents: &str) -> ReadResult<CpuTotals> {
    let line = contents
        .lines()
        .find(|l| l.split_whitespace().next() == Some("cpu"))
        .ok_or_else(|| ReadError::malformed("cpu totals", "no aggregate cpu line"))?;

    let mut fields = [0u64; 8];
    let mut tokens = line.split_whitespace().skip(1);
    for (i, slot) in fields.iter_mut().enumerate() {
        let token = tokens
            .next()
            .ok_or_else(|| ReadError::malformed("cpu totals", format!("only {i} of 8 fields")))?;
        *slot = token
            .parse()
            .map_err(|_| ReadError::malformed("cpu totals", format!("bad field {token:?}")))?;
    }

    // user nice system idle iowait irq softirq steal
    let total = fields.iter().fold(0u64, |acc, v| acc.saturating_add(*v));
    let idle = fields[3].saturating_add(fields[4]);
    Ok(CpuTotals { total, idle })
}

/// `MemAvailable` wins over `MemFree` when present and nonzero.
pub fn parse_meminfo(contents: &str) -> MemoryTotals {
    let mut total_kb = 0u64;
    let mut available_kb = 0u64;
    let mut mem_free_kb = 0u64;

    for line in contents.lines() {
        let mut parts = line.split_whitespace();
        let (Some(key), Some(value)) = (parts.next(), parts.next()) else {
            continue;
        };
        let Ok(value) = value.parse::<u64>() else {
            continue;
        };
        match key {
            "MemTotal:" => total_kb = value,
            "MemAvailable:" => available_kb = value,
            "MemFree:" => mem_free_kb = value,
            _ => {}
        }
    }

    let free_kb = if available_kb > 0 {
        available_kb
    } else {
        mem_free_kb
    };
    let used_kb = if total_kb > 0 {
        total_kb.saturating_sub(free_kb)
    } else {
        0
    };

    MemoryTotals {
        total_kb,
        free_kb,
        used_kb,
    }
}

/// All three figures parse, or none are reported.
pub fn parse_loadavg(contents: &str) -> ReadResult<[f64; 3]> {
    let mut tokens = contents.split_whitespace();
    let mut out = [0.0f64; 3];
    for slot in out.iter_mut() {
        *slot = tokens
            .next()
            .and_then(|t| t.parse().ok())
            .ok_or_else(|| ReadError::malformed("loadavg", "expected three numbers"))?;
    }
    Ok(out)
}

pub fn parse_net_dev(contents: &str) -> Vec<NetworkInterfaceSample> {
    let mut interfaces = Vec::new();

    for line in contents.lines().skip(2) {
        let (name, rest) = match line.split_once(':') {
            Some((name, rest)) => (name.trim(), rest),
            None => {
                let trimmed = line.trim_start();
                match trimmed.split_once(char::is_whitespace) {
                    Some((name, rest)) => (name, rest),
                    None => (trimmed, ""),
                }
            }
        };
        if name.is_empty() || name == "lo" {
            continue;
        }

        let values: Vec<u64> = rest
            .split_whitespace()
            .map_while(|t| t.parse().ok())
            .take(MAX_NET_FIELDS)
            .collect();
        if values.len() < MIN_NET_FIELDS {
            continue;
        }

        interfaces.push(NetworkInterfaceSample {
            name: name.to_string(),
            rx_bytes: values[0],
            rx_packets: values[1],
            tx_bytes: values[8],
            tx_packets: values[9],
        });
    }

    interfaces
}

/// Parses one `/proc/<pid>/stat` line.
///
/// The command name sits between the first `(` and the last `)`, since names
/// may contain parentheses and spaces themselves.
pub fn parse_pid_stat(line: &str) -> ReadResult<StatRecord> {
    let open = line
        .find('(')
        .ok_or_else(|| ReadError::malformed("pid stat", "missing '('"))?;
    let close = line
        .rfind(')')
        .filter(|&close| close > open)
        .ok_or_else(|| ReadError::malformed("pid stat", "missing ')'"))?;

    let name = &line[open + 1..close];
    let fields: Vec<&str> = line[close + 1..].split_whitespace().collect();
    if fields.len() < MIN_STAT_FIELDS {
        return Err(ReadError::malformed(
            "pid stat",
            format!("{} fields after name, need {MIN_STAT_FIELDS}", fields.len()),
        ));
    }

    // state(0) ppid(1) ... utime(11) stime(12) ... starttime(19) vsize(20) rss(21)
    let state = fields[0]
        .chars()
        .next()
        .map(ProcessState::from_code)
        .ok_or_else(|| ReadError::malformed("pid stat", "empty state"))?;

    Ok(StatRecord {
        name: name.to_string(),
        state,
        ppid: stat_number(&fields, 1)?,
        utime: stat_number(&fields, 11)?,
        stime: stat_number(&fields, 12)?,
        start_time: stat_number(&fields, 19)?,
        rss_pages: stat_number(&fields, 21)?,
    })
}

fn stat_number<T: std::str::FromStr>(fields: &[&str], index: usize) -> ReadResult<T> {
    fields[index]
        .parse()
        .map_err(|_| ReadError::malformed("pid stat", format!("field {index} is not a number")))
}

/// First (real) uid on the `Uid:` line of `/proc/<pid>/status`.
pub fn parse_status_uid(contents: &str) -> ReadResult<u32> {
    contents
        .lines()
        .find_map(|line| line.strip_prefix("Uid:"))
        .and_then(|rest| rest.split_whitespace().next())
        .and_then(|uid| uid.parse().ok())
        .ok_or_else(|| ReadError::malformed("pid status", "no numeric Uid line"))
}

/// File-backed access to a proc tree rooted at `root` (normally `/proc`).
#[derive(Clone, Debug)]
pub struct ProcFs {
    root: PathBuf,
}

impl Default for ProcFs {
    fn default() -> Self {
        Self::new("/proc")
    }
}

impl ProcFs {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn cpu_totals(&self) -> ReadResult<CpuTotals> {
        parse_cpu_totals(&self.read("stat")?)
    }

    pub fn memory(&self) -> ReadResult<MemoryTotals> {
        Ok(parse_meminfo(&self.read("meminfo")?))
    }

    pub fn load_average(&self) -> ReadResult<[f64; 3]> {
        parse_loadavg(&self.read("loadavg")?)
    }

    pub fn network(&self) -> ReadResult<Vec<NetworkInterfaceSample>> {
        Ok(parse_net_dev(&self.read("net/dev")?))
    }

    /// Numeric directory entries of the root, i.e. live process ids.
    pub fn pids(&self) -> ReadResult<Vec<u32>> {
        let entries = fs::read_dir(&self.root).map_err(|source| ReadError::Unavailable {
            path: self.root.clone(),
            source,
        })?;

        let mut pids: Vec<u32> = entries
            .flatten()
            .filter_map(|entry| {
                let name = entry.file_name();
                let name = name.to_str()?;
                if name.is_empty() || !name.bytes().all(|b| b.is_ascii_digit()) {
                    return None;
                }
                name.parse().ok()
            })
            .collect();
        pids.sort_unstable();
        Ok(pids)
    }

    pub fn process_stat(&self, pid: u32) -> ReadResult<StatRecord> {
        let contents = self.read(&format!("{pid}/stat"))?;
        parse_pid_stat(contents.lines().next().unwrap_or(""))
    }

    pub fn process_uid(&self, pid: u32) -> ReadResult<u32> {
        parse_status_uid(&self.read(&format!("{pid}/status"))?)
    }

    fn read(&self, relative: &str) -> ReadResult<String> {
        let path = self.root.join(relative);
        fs::read_to_string(&path).map_err(|source| ReadError::Unavailable { path, source })
    }
}
