use async_trait::async_trait;
use dnstap_gen_domain::GeneratorError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unconnected,
    Handshaking,
    Ready,
    Closed,
}

/// One framed stream to the collector, owned by a single worker.
#[async_trait]
pub trait FrameSession: Send {
    /// Negotiates the content type. Data frames may only follow a
    /// successful handshake.
    async fn handshake(&mut self) -> Result<(), GeneratorError>;

    async fn send_frame(&mut self, payload: &[u8]) -> Result<(), GeneratorError>;

    async fn close(&mut self) -> Result<(), GeneratorError>;

    fn state(&self) -> SessionState;

    fn frames_sent(&self) -> u64;
}

#[async_trait]
pub trait SessionConnector: Send + Sync {
    /// Dials the collector. The returned session has not handshaken yet.
    async fn connect(&self) -> Result<Box<dyn FrameSession>, GeneratorError>;

    fn describe(&self) -> String;
}
