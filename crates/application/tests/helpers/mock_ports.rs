#![allow(dead_code)]

use async_trait::async_trait;
use dnstap_gen_application::ports::{
    DnsMessageEncoder, EnvelopeEncoder, FrameSession, SessionConnector, SessionState,
};
use dnstap_gen_domain::{DnsQuery, Envelope, GeneratorError, ResponseCode};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Encodes `Q|<name>|<type>` and `A|<name>|<type>|<value>|<rcode>`.
pub struct MockDnsEncoder {
    fail: bool,
}

impl MockDnsEncoder {
    pub fn new() -> Self {
        Self { fail: false }
    }

    pub fn failing() -> Self {
        Self { fail: true }
    }
}

impl DnsMessageEncoder for MockDnsEncoder {
    fn encode_question(&self, _id: u16, query: &DnsQuery) -> Result<Vec<u8>, GeneratorError> {
        if self.fail {
            return Err(GeneratorError::Encoding("mock question failure".to_string()));
        }
        Ok(format!("Q|{}|{}", query.domain, query.record_type).into_bytes())
    }

    fn encode_answer(
        &self,
        _id: u16,
        query: &DnsQuery,
        value: &str,
        rcode: ResponseCode,
    ) -> Result<Vec<u8>, GeneratorError> {
        if self.fail {
            return Err(GeneratorError::Encoding("mock answer failure".to_string()));
        }
        Ok(format!("A|{}|{}|{}|{}", query.domain, query.record_type, value, rcode).into_bytes())
    }
}

/// Frame payload is `<KIND>#<payload>`.
pub struct MockEnvelopeEncoder;

impl EnvelopeEncoder for MockEnvelopeEncoder {
    fn encode(&self, envelope: &Envelope) -> Result<Vec<u8>, GeneratorError> {
        let mut out = format!("{}#", envelope.kind).into_bytes();
        out.extend_from_slice(&envelope.payload);
        Ok(out)
    }
}

pub fn frame_kind(frame: &[u8]) -> String {
    let text = String::from_utf8_lossy(frame);
    text.split('#').next().unwrap_or_default().to_string()
}

#[derive(Debug, Clone, Default)]
pub struct SessionBehavior {
    pub fail_handshake: bool,
    /// Fail the send that would be frame number `n + 1`.
    pub fail_after_frames: Option<u64>,
    pub frame_delay: Option<Duration>,
}

pub type FrameLog = Arc<Mutex<Vec<Vec<u8>>>>;

pub struct MockSession {
    state: SessionState,
    frames: FrameLog,
    sent: u64,
    closed_gracefully: Arc<Mutex<bool>>,
    behavior: SessionBehavior,
}

#[async_trait]
impl FrameSession for MockSession {
    async fn handshake(&mut self) -> Result<(), GeneratorError> {
        self.state = SessionState::Handshaking;
        if self.behavior.fail_handshake {
            self.state = SessionState::Closed;
            return Err(GeneratorError::Connection(
                "timed out waiting for ACCEPT".to_string(),
            ));
        }
        self.state = SessionState::Ready;
        Ok(())
    }

    async fn send_frame(&mut self, payload: &[u8]) -> Result<(), GeneratorError> {
        if self.state != SessionState::Ready {
            return Err(GeneratorError::Transmit("session not ready".to_string()));
        }
        if let Some(delay) = self.behavior.frame_delay {
            tokio::time::sleep(delay).await;
        }
        if self.behavior.fail_after_frames == Some(self.sent) {
            self.state = SessionState::Closed;
            return Err(GeneratorError::Transmit("broken pipe".to_string()));
        }
        self.frames.lock().unwrap().push(payload.to_vec());
        self.sent += 1;
        Ok(())
    }

    async fn close(&mut self) -> Result<(), GeneratorError> {
        if self.state == SessionState::Ready {
            *self.closed_gracefully.lock().unwrap() = true;
        }
        self.state = SessionState::Closed;
        Ok(())
    }

    fn state(&self) -> SessionState {
        self.state
    }

    fn frames_sent(&self) -> u64 {
        self.sent
    }
}

pub struct OpenedSession {
    pub frames: FrameLog,
    pub closed_gracefully: Arc<Mutex<bool>>,
}

pub struct MockConnector {
    behavior: SessionBehavior,
    /// 1-based connect call that fails with a refused connection.
    fail_connect_call: Option<usize>,
    /// 1-based connect call whose session gets `failing_behavior`.
    failing_session_call: Option<(usize, SessionBehavior)>,
    calls: AtomicUsize,
    opened: Mutex<Vec<OpenedSession>>,
}

impl MockConnector {
    pub fn new() -> Self {
        Self::with_behavior(SessionBehavior::default())
    }

    pub fn with_behavior(behavior: SessionBehavior) -> Self {
        Self {
            behavior,
            fail_connect_call: None,
            failing_session_call: None,
            calls: AtomicUsize::new(0),
            opened: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_connect_on_call(mut self, call: usize) -> Self {
        self.fail_connect_call = Some(call);
        self
    }

    pub fn failing_session_on_call(mut self, call: usize, behavior: SessionBehavior) -> Self {
        self.failing_session_call = Some((call, behavior));
        self
    }

    pub fn connect_calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn all_frames(&self) -> Vec<Vec<Vec<u8>>> {
        self.opened
            .lock()
            .unwrap()
            .iter()
            .map(|s| s.frames.lock().unwrap().clone())
            .collect()
    }

    pub fn graceful_closes(&self) -> usize {
        self.opened
            .lock()
            .unwrap()
            .iter()
            .filter(|s| *s.closed_gracefully.lock().unwrap())
            .count()
    }
}

#[async_trait]
impl SessionConnector for MockConnector {
    async fn connect(&self) -> Result<Box<dyn FrameSession>, GeneratorError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_connect_call == Some(call) {
            return Err(GeneratorError::Connection(
                "connection refused".to_string(),
            ));
        }

        let behavior = match &self.failing_session_call {
            Some((failing_call, behavior)) if *failing_call == call => behavior.clone(),
            _ => self.behavior.clone(),
        };

        let frames: FrameLog = Arc::new(Mutex::new(Vec::new()));
        let closed_gracefully = Arc::new(Mutex::new(false));
        self.opened.lock().unwrap().push(OpenedSession {
            frames: Arc::clone(&frames),
            closed_gracefully: Arc::clone(&closed_gracefully),
        });

        Ok(Box::new(MockSession {
            state: SessionState::Unconnected,
            frames,
            sent: 0,
            closed_gracefully,
            behavior,
        }))
    }

    fn describe(&self) -> String {
        "mock://collector".to_string()
    }
}
