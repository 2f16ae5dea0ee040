use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeneratorError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("Transmit error: {0}")]
    Transmit(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Run cancelled")]
    Cancelled,
}

impl GeneratorError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, GeneratorError::Cancelled)
    }
}

/// Stage of a connection worker's lifecycle, carried on failures so the
/// operator can tell a refused dial from a broken pipe mid-run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkerPhase {
    Connect,
    Handshake,
    Synthesize,
    Encode,
    Send,
    Close,
}

impl WorkerPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkerPhase::Connect => "connect",
            WorkerPhase::Handshake => "handshake",
            WorkerPhase::Synthesize => "synthesize",
            WorkerPhase::Encode => "encode",
            WorkerPhase::Send => "send",
            WorkerPhase::Close => "close",
        }
    }
}

impl fmt::Display for WorkerPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("connection #{connection} failed during {phase}: {source}")]
pub struct WorkerFailure {
    pub connection: usize,
    pub phase: WorkerPhase,
    pub frames_sent: u64,
    #[source]
    pub source: GeneratorError,
}

impl WorkerFailure {
    pub fn new(connection: usize, phase: WorkerPhase, source: GeneratorError) -> Self {
        Self {
            connection,
            phase,
            frames_sent: 0,
            source,
        }
    }

    pub fn with_frames_sent(mut self, frames_sent: u64) -> Self {
        self.frames_sent = frames_sent;
        self
    }
}
