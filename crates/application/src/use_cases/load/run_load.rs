use super::RunConnectionUseCase;
use crate::services::CorpusGenerator;
use dnstap_gen_domain::{FailurePolicy, GeneratorError, RunReport, WorkerFailure, WorkerPhase};
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

/// Runs one worker per connection in parallel and waits for all of them.
pub struct RunLoadUseCase {
    worker: Arc<RunConnectionUseCase>,
    connections: usize,
    policy: FailurePolicy,
    seed: u64,
}

impl RunLoadUseCase {
    pub fn new(
        worker: Arc<RunConnectionUseCase>,
        connections: usize,
        policy: FailurePolicy,
        seed: u64,
    ) -> Self {
        Self {
            worker,
            connections,
            policy,
            seed,
        }
    }

    /// Cancelling `shutdown` stops every worker at its next frame boundary.
    pub async fn execute(&self, shutdown: CancellationToken) -> RunReport {
        let plan = self.worker.plan();
        info!(
            connections = self.connections,
            records = plan.records,
            skip_queries = plan.skip_queries,
            skip_replies = plan.skip_replies,
            policy = %self.policy,
            seed = self.seed,
            "Starting load run"
        );

        let started = Instant::now();
        let mut seeds = CorpusGenerator::with_seed(self.seed);
        let mut workers = JoinSet::new();
        let mut pending: BTreeSet<usize> = BTreeSet::new();

        for connection in 1..=self.connections {
            let worker = Arc::clone(&self.worker);
            let token = shutdown.child_token();
            let seed = seeds.child_seed();
            pending.insert(connection);
            workers.spawn(async move {
                let result = worker.execute(connection, seed, token).await;
                (connection, result)
            });
        }

        let mut report = RunReport::default();

        while let Some(joined) = workers.join_next().await {
            let (connection, result) = match joined {
                Ok(outcome) => outcome,
                Err(e) => {
                    error!(error = %e, "Connection worker terminated abnormally");
                    self.on_failure(&shutdown);
                    continue;
                }
            };
            pending.remove(&connection);

            match result {
                Ok(connection_report) => report.completed.push(connection_report),
                Err(failure) => {
                    if failure.source.is_cancelled() {
                        warn!(connection, frames = failure.frames_sent, "Connection cancelled");
                    } else {
                        error!(
                            connection,
                            phase = %failure.phase,
                            frames = failure.frames_sent,
                            error = %failure.source,
                            "Connection failed"
                        );
                        self.on_failure(&shutdown);
                    }
                    report.failed.push(failure);
                }
            }
        }

        // workers whose task panicked never reported back
        for connection in pending {
            report.failed.push(WorkerFailure::new(
                connection,
                WorkerPhase::Send,
                GeneratorError::Transmit("worker task terminated abnormally".to_string()),
            ));
        }

        let report = report.finalize(started.elapsed());
        info!(
            succeeded = report.completed.len(),
            failed = report.failed.len(),
            frames = report.total_frames(),
            elapsed_ms = report.elapsed.as_millis() as u64,
            "Load run finished"
        );
        report
    }

    fn on_failure(&self, shutdown: &CancellationToken) {
        if self.policy == FailurePolicy::FailFast && !shutdown.is_cancelled() {
            warn!("Fail-fast policy: cancelling remaining connections");
            shutdown.cancel();
        }
    }
}
