use crate::errors::WorkerFailure;
use std::time::Duration;

/// Frames per second, or zero when nothing was sent or no time elapsed.
pub fn throughput(frames: u64, elapsed: Duration) -> f64 {
    let secs = elapsed.as_secs_f64();
    if frames == 0 || secs <= 0.0 {
        return 0.0;
    }
    frames as f64 / secs
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionReport {
    pub connection: usize,
    pub records: u64,
    pub frames_sent: u64,
    pub elapsed: Duration,
}

impl ConnectionReport {
    pub fn frames_per_second(&self) -> f64 {
        throughput(self.frames_sent, self.elapsed)
    }
}

#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub completed: Vec<ConnectionReport>,
    pub failed: Vec<WorkerFailure>,
    pub elapsed: Duration,
}

impl RunReport {
    pub fn total_frames(&self) -> u64 {
        let completed: u64 = self.completed.iter().map(|r| r.frames_sent).sum();
        let failed: u64 = self.failed.iter().map(|f| f.frames_sent).sum();
        completed + failed
    }

    pub fn frames_per_second(&self) -> f64 {
        throughput(self.total_frames(), self.elapsed)
    }

    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// First failure that was not a cancellation triggered by another one.
    pub fn root_failure(&self) -> Option<&WorkerFailure> {
        self.failed.iter().find(|f| !f.source.is_cancelled())
    }

    pub fn finalize(mut self, elapsed: Duration) -> Self {
        self.elapsed = elapsed;
        self.completed.sort_by_key(|r| r.connection);
        self.failed.sort_by_key(|f| f.connection);
        self
    }
}
