//! Resident memory sampling and per-stage timers.

use std::time::{Duration, Instant};

use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System};
use tracing::debug;

/// Resident set size of this process at one point in time.
#[derive(Debug, Clone, Copy)]
pub struct RssSample {
    pub rss_bytes: u64,
    pub taken_at: Instant,
}

#[derive(Debug, Clone)]
pub enum MemoryError {
    ProcessNotFound { pid: u32 },
}

impl MemoryError {
    pub fn code(&self) -> &'static str {
        match self {
            MemoryError::ProcessNotFound { .. } => "PROCESS_NOT_FOUND",
        }
    }
}

impl std::fmt::Display for MemoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MemoryError::ProcessNotFound { pid } => {
                write!(f, "[{}] failed to locate process {}", self.code(), pid)
            }
        }
    }
}

impl std::error::Error for MemoryError {}

impl RssSample {
    /// Sample the current process.
    ///
    /// # Errors
    ///
    /// Returns an error if the current process cannot be located.
    pub fn take() -> Result<Self, MemoryError> {
        let raw_pid = std::process::id();
        let pid = Pid::from_u32(raw_pid);

        // Refresh only this process, and only its memory counters.
        let mut sys = System::new();
        sys.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[pid]),
            true,
            ProcessRefreshKind::nothing().with_memory(),
        );
        let process = sys
            .process(pid)
            .ok_or(MemoryError::ProcessNotFound { pid: raw_pid })?;

        Ok(RssSample {
            rss_bytes: process.memory(),
            taken_at: Instant::now(),
        })
    }

    /// Growth in bytes from `earlier` to `self` (negative when memory shrank).
    pub fn delta_since(&self, earlier: &RssSample) -> i64 {
        self.rss_bytes as i64 - earlier.rss_bytes as i64
    }
}

/// Resident set size in bytes, or `None` when it cannot be read.
pub fn current_rss() -> Option<u64> {
    RssSample::take().ok().map(|sample| sample.rss_bytes)
}

/// One completed stage of a timer.
#[derive(Debug, Clone, PartialEq)]
pub struct StageRecord {
    pub stage: String,
    /// Wall time since the previous stage ended (or the timer started)
    pub elapsed: Duration,
    pub rss_bytes: Option<u64>,
    /// RSS growth over the stage; `None` if either sample failed
    pub rss_delta: Option<i64>,
}

impl StageRecord {
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }
}

/// Records consecutive stages of work with their durations and RSS changes.
#[derive(Debug)]
pub struct StageTimer {
    started: Instant,
    last_mark: Instant,
    last_sample: Option<RssSample>,
    records: Vec<StageRecord>,
}

impl StageTimer {
    pub fn start() -> Self {
        let now = Instant::now();
        StageTimer {
            started: now,
            last_mark: now,
            last_sample: RssSample::take().ok(),
            records: Vec::new(),
        }
    }

    /// Close the current stage under `stage` and begin the next one.
    pub fn mark(&mut self, stage: &str) -> &StageRecord {
        let now = Instant::now();
        let sample = RssSample::take().ok();
        let rss_delta = match (&sample, &self.last_sample) {
            (Some(current), Some(previous)) => Some(current.delta_since(previous)),
            _ => None,
        };
        let record = StageRecord {
            stage: stage.to_string(),
            elapsed: now.duration_since(self.last_mark),
            rss_bytes: sample.map(|s| s.rss_bytes),
            rss_delta,
        };
        debug!(
            component = "timer",
            operation = "mark",
            status = "ok",
            stage = stage,
            elapsed_ms = record.elapsed_ms(),
            rss_bytes = ?record.rss_bytes,
            rss_delta = ?record.rss_delta,
            "Stage complete"
        );
        self.last_mark = now;
        if sample.is_some() {
            self.last_sample = sample;
        }
        self.records.push(record);
        &self.records[self.records.len() - 1]
    }

    /// Wall time since the timer started.
    pub fn total(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn records(&self) -> &[StageRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<StageRecord> {
        self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_current_process() {
        let sample = RssSample::take().unwrap_or_else(|err| panic!("{}", err));
        assert!(sample.rss_bytes > 0);
        assert!(current_rss().is_some());
    }

    #[test]
    fn test_delta_since() {
        let earlier = RssSample {
            rss_bytes: 1500,
            taken_at: Instant::now(),
        };
        let later = RssSample {
            rss_bytes: 1000,
            taken_at: Instant::now(),
        };
        assert_eq!(later.delta_since(&earlier), -500);
    }

    #[test]
    fn test_timer_records_stages_in_order() {
        let mut timer = StageTimer::start();
        let _buffer = vec![0u8; 1 << 16];
        timer.mark("build");
        timer.mark("run");

        let stages: Vec<_> = timer.records().iter().map(|r| r.stage.as_str()).collect();
        assert_eq!(stages, vec!["build", "run"]);
        assert!(timer.records().iter().all(|r| r.rss_delta.is_some()));
        assert!(timer.total() >= timer.records()[0].elapsed);
    }

    #[test]
    fn test_error_display() {
        let err = MemoryError::ProcessNotFound { pid: 7 };
        assert_eq!(
            err.to_string(),
            "[PROCESS_NOT_FOUND] failed to locate process 7"
        );
    }
}
