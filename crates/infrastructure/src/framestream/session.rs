use super::codec::{encode_data_frame, read_control_frame, ControlFrame, FrameError};
use async_trait::async_trait;
use dnstap_gen_application::ports::{FrameSession, SessionState};
use dnstap_gen_domain::GeneratorError;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tracing::{debug, trace, warn};

pub const DEFAULT_HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(5);

/// Bidirectional Frame Streams writer over any reliable byte stream.
///
/// `Unconnected → Handshaking → Ready → Closed`. Every failure moves the
/// session to `Closed` and drops the stream, so a failed session never
/// touches the socket again.
pub struct FrameStreamSession<S> {
    stream: Option<S>,
    peer: String,
    content_type: Arc<str>,
    handshake_timeout: Duration,
    state: SessionState,
    frames_sent: u64,
}

impl<S> FrameStreamSession<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    pub fn new(
        stream: S,
        peer: impl Into<String>,
        content_type: Arc<str>,
        handshake_timeout: Duration,
    ) -> Self {
        Self {
            stream: Some(stream),
            peer: peer.into(),
            content_type,
            handshake_timeout,
            state: SessionState::Unconnected,
            frames_sent: 0,
        }
    }

    fn abort(&mut self) {
        self.stream = None;
        self.state = SessionState::Closed;
    }

    async fn negotiate(stream: &mut S, content_type: &str) -> Result<(), FrameError> {
        let ready = ControlFrame::Ready {
            content_types: vec![content_type.to_string()],
        };
        stream.write_all(&ready.encode()).await?;
        stream.flush().await?;

        let accept = read_control_frame(stream).await?;
        if !matches!(accept, ControlFrame::Accept { .. }) {
            return Err(FrameError::Malformed("expected ACCEPT"));
        }
        if !accept.accepts(content_type) {
            return Err(FrameError::Malformed(
                "ACCEPT does not list the offered content type",
            ));
        }

        let start = ControlFrame::Start {
            content_type: Some(content_type.to_string()),
        };
        stream.write_all(&start.encode()).await?;
        stream.flush().await?;
        Ok(())
    }

    async fn await_finish(stream: &mut S) -> Result<(), FrameError> {
        match read_control_frame(stream).await? {
            ControlFrame::Finish => Ok(()),
            _ => Err(FrameError::Malformed("expected FINISH")),
        }
    }
}

#[async_trait]
impl<S> FrameSession for FrameStreamSession<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    async fn handshake(&mut self) -> Result<(), GeneratorError> {
        if self.state != SessionState::Unconnected {
            return Err(GeneratorError::Connection(format!(
                "Handshake requested in state {:?}",
                self.state
            )));
        }
        let Some(stream) = self.stream.as_mut() else {
            self.abort();
            return Err(GeneratorError::Connection("Stream already released".into()));
        };

        self.state = SessionState::Handshaking;
        let outcome = tokio::time::timeout(
            self.handshake_timeout,
            Self::negotiate(stream, &self.content_type),
        )
        .await;

        match outcome {
            Ok(Ok(())) => {
                self.state = SessionState::Ready;
                debug!(
                    peer = %self.peer,
                    content_type = %self.content_type,
                    "Frame stream handshake complete"
                );
                Ok(())
            }
            Ok(Err(e)) => {
                self.abort();
                Err(GeneratorError::Connection(format!(
                    "Handshake with {} failed: {}",
                    self.peer, e
                )))
            }
            Err(_) => {
                self.abort();
                Err(GeneratorError::Connection(format!(
                    "Timeout waiting for ACCEPT from {} after {:?}",
                    self.peer, self.handshake_timeout
                )))
            }
        }
    }

    async fn send_frame(&mut self, payload: &[u8]) -> Result<(), GeneratorError> {
        let stream = match (self.state, self.stream.as_mut()) {
            (SessionState::Ready, Some(stream)) => stream,
            (state, _) => {
                return Err(GeneratorError::Transmit(format!(
                    "Cannot send on frame stream in state {:?}",
                    state
                )))
            }
        };

        let frame = encode_data_frame(payload);
        let written = async {
            stream.write_all(&frame).await?;
            stream.flush().await
        }
        .await;

        if let Err(e) = written {
            self.abort();
            return Err(GeneratorError::Transmit(format!(
                "Failed to write frame to {}: {}",
                self.peer, e
            )));
        }

        self.frames_sent += 1;
        trace!(peer = %self.peer, len = payload.len(), frames = self.frames_sent, "Frame sent");
        Ok(())
    }

    async fn close(&mut self) -> Result<(), GeneratorError> {
        let was_ready = self.state == SessionState::Ready;
        self.state = SessionState::Closed;
        let Some(mut stream) = self.stream.take() else {
            return Ok(());
        };

        if was_ready {
            let stop = ControlFrame::Stop.encode();
            let stopped = async {
                stream.write_all(&stop).await?;
                stream.flush().await
            }
            .await;
            if let Err(e) = stopped {
                return Err(GeneratorError::Transmit(format!(
                    "Failed to send STOP to {}: {}",
                    self.peer, e
                )));
            }

            match tokio::time::timeout(self.handshake_timeout, Self::await_finish(&mut stream))
                .await
            {
                Ok(Ok(())) => debug!(peer = %self.peer, "Collector acknowledged STOP"),
                Ok(Err(e)) => warn!(peer = %self.peer, error = %e, "No FINISH from collector"),
                Err(_) => warn!(peer = %self.peer, "Timed out waiting for FINISH"),
            }
        }

        if let Err(e) = stream.shutdown().await {
            debug!(peer = %self.peer, error = %e, "Stream shutdown failed");
        }
        Ok(())
    }

    fn state(&self) -> SessionState {
        self.state
    }

    fn frames_sent(&self) -> u64 {
        self.frames_sent
    }
}
