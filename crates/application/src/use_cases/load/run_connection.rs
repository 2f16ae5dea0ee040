use crate::ports::{EnvelopeEncoder, FrameSession, SessionConnector, SessionState};
use crate::services::{CorpusGenerator, EnvelopeBuilder};
use crate::use_cases::dns::SynthesizeExchangeUseCase;
use dnstap_gen_domain::{
    ConnectionReport, Envelope, GeneratorError, LoadConfig, WorkerFailure, WorkerPhase,
};
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

/// Which sides of each exchange get written to the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SendPlan {
    pub records: u64,
    pub skip_queries: bool,
    pub skip_replies: bool,
}

impl From<&LoadConfig> for SendPlan {
    fn from(config: &LoadConfig) -> Self {
        Self {
            records: config.records_per_connection,
            skip_queries: config.skip_queries,
            skip_replies: config.skip_replies,
        }
    }
}

/// One connection worker: connect, handshake, generate-encode-send loop, close.
pub struct RunConnectionUseCase {
    connector: Arc<dyn SessionConnector>,
    synthesizer: Arc<SynthesizeExchangeUseCase>,
    envelopes: EnvelopeBuilder,
    encoder: Arc<dyn EnvelopeEncoder>,
    plan: SendPlan,
}

impl RunConnectionUseCase {
    pub fn new(
        connector: Arc<dyn SessionConnector>,
        synthesizer: Arc<SynthesizeExchangeUseCase>,
        envelopes: EnvelopeBuilder,
        encoder: Arc<dyn EnvelopeEncoder>,
        plan: SendPlan,
    ) -> Self {
        Self {
            connector,
            synthesizer,
            envelopes,
            encoder,
            plan,
        }
    }

    pub fn plan(&self) -> SendPlan {
        self.plan
    }

    pub async fn execute(
        &self,
        connection: usize,
        seed: u64,
        shutdown: CancellationToken,
    ) -> Result<ConnectionReport, WorkerFailure> {
        let mut session = self
            .connector
            .connect()
            .await
            .map_err(|e| WorkerFailure::new(connection, WorkerPhase::Connect, e))?;
        debug!(connection, target = %self.connector.describe(), "Connected to collector");

        if let Err(e) = session.handshake().await {
            return Err(WorkerFailure::new(connection, WorkerPhase::Handshake, e));
        }
        info!(connection, "Frame stream ready");

        let mut corpus = CorpusGenerator::with_seed(seed);
        let started = Instant::now();

        if let Err((phase, e)) = self
            .send_records(session.as_mut(), &mut corpus, &shutdown)
            .await
        {
            let frames_sent = session.frames_sent();
            if session.state() != SessionState::Closed {
                close_quietly(session.as_mut(), connection).await;
            }
            return Err(WorkerFailure::new(connection, phase, e).with_frames_sent(frames_sent));
        }

        let elapsed = started.elapsed();
        let frames_sent = session.frames_sent();

        session.close().await.map_err(|e| {
            WorkerFailure::new(connection, WorkerPhase::Close, e).with_frames_sent(frames_sent)
        })?;

        let report = ConnectionReport {
            connection,
            records: self.plan.records,
            frames_sent,
            elapsed,
        };
        info!(
            connection,
            frames = report.frames_sent,
            elapsed_ms = report.elapsed.as_millis() as u64,
            frames_per_sec = %format!("{:.2}", report.frames_per_second()),
            "Connection finished"
        );
        Ok(report)
    }

    async fn send_records(
        &self,
        session: &mut dyn FrameSession,
        corpus: &mut CorpusGenerator,
        shutdown: &CancellationToken,
    ) -> Result<(), (WorkerPhase, GeneratorError)> {
        for record in 1..=self.plan.records {
            if shutdown.is_cancelled() {
                return Err((WorkerPhase::Send, GeneratorError::Cancelled));
            }

            let exchange = self
                .synthesizer
                .execute(corpus)
                .map_err(|e| (WorkerPhase::Synthesize, e))?;
            let (domain, record_type, rcode) = (
                Arc::clone(&exchange.query.domain),
                exchange.query.record_type,
                exchange.rcode,
            );
            let (question, answer) = exchange.into_wire();
            let pair = self.envelopes.build(corpus, question, answer);

            if !self.plan.skip_queries {
                self.send_envelope(session, &pair.query, shutdown).await?;
            }
            if !self.plan.skip_replies {
                self.send_envelope(session, &pair.response, shutdown).await?;
            }

            trace!(
                record,
                domain = %domain,
                record_type = %record_type,
                rcode = %rcode,
                "Record sent"
            );
        }
        Ok(())
    }

    async fn send_envelope(
        &self,
        session: &mut dyn FrameSession,
        envelope: &Envelope,
        shutdown: &CancellationToken,
    ) -> Result<(), (WorkerPhase, GeneratorError)> {
        // A write that has started always runs to completion.
        if shutdown.is_cancelled() {
            return Err((WorkerPhase::Send, GeneratorError::Cancelled));
        }
        let payload = self
            .encoder
            .encode(envelope)
            .map_err(|e| (WorkerPhase::Encode, e))?;

        session
            .send_frame(&payload)
            .await
            .map_err(|e| (WorkerPhase::Send, e))
    }
}

async fn close_quietly(session: &mut dyn FrameSession, connection: usize) {
    if let Err(e) = session.close().await {
        warn!(connection, error = %e, "Failed to close frame stream after error");
    }
}
