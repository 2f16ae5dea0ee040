use super::session::{FrameStreamSession, DEFAULT_HANDSHAKE_TIMEOUT};
use crate::dnstap::CONTENT_TYPE;
use async_trait::async_trait;
use dnstap_gen_application::ports::{FrameSession, SessionConnector};
use dnstap_gen_domain::{CollectorTarget, GeneratorError};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpStream;
use tracing::debug;

pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy)]
pub struct ConnectTimeouts {
    pub connect: Duration,
    pub handshake: Duration,
}

impl Default for ConnectTimeouts {
    fn default() -> Self {
        Self {
            connect: DEFAULT_CONNECT_TIMEOUT,
            handshake: DEFAULT_HANDSHAKE_TIMEOUT,
        }
    }
}

/// Dials a collector over TCP with `TCP_NODELAY` set.
pub struct TcpConnector {
    host: Arc<str>,
    port: u16,
    content_type: Arc<str>,
    timeouts: ConnectTimeouts,
}

impl TcpConnector {
    pub fn new(host: impl Into<Arc<str>>, port: u16, timeouts: ConnectTimeouts) -> Self {
        Self {
            host: host.into(),
            port,
            content_type: Arc::from(CONTENT_TYPE),
            timeouts,
        }
    }

    fn address(&self) -> String {
        if self.host.contains(':') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }

    async fn connect_stream(&self) -> Result<TcpStream, GeneratorError> {
        let address = self.address();

        let stream = tokio::time::timeout(
            self.timeouts.connect,
            TcpStream::connect((self.host.as_ref(), self.port)),
        )
        .await
        .map_err(|_| {
            GeneratorError::Connection(format!("Timeout connecting to collector {}", address))
        })?
        .map_err(|e| {
            GeneratorError::Connection(format!(
                "Connection refused by collector {}: {}",
                address, e
            ))
        })?;

        stream.set_nodelay(true).map_err(|e| {
            GeneratorError::Connection(format!(
                "Failed to set TCP_NODELAY on {}: {}",
                address, e
            ))
        })?;

        Ok(stream)
    }
}

#[async_trait]
impl SessionConnector for TcpConnector {
    async fn connect(&self) -> Result<Box<dyn FrameSession>, GeneratorError> {
        let stream = self.connect_stream().await?;
        debug!(collector = %self.address(), "TCP connection established");

        Ok(Box::new(FrameStreamSession::new(
            stream,
            self.address(),
            self.content_type.clone(),
            self.timeouts.handshake,
        )))
    }

    fn describe(&self) -> String {
        format!("tcp://{}", self.address())
    }
}

/// Dials a collector listening on a Unix domain socket.
#[cfg(unix)]
pub struct UnixConnector {
    path: Arc<str>,
    content_type: Arc<str>,
    timeouts: ConnectTimeouts,
}

#[cfg(unix)]
impl UnixConnector {
    pub fn new(path: impl Into<Arc<str>>, timeouts: ConnectTimeouts) -> Self {
        Self {
            path: path.into(),
            content_type: Arc::from(CONTENT_TYPE),
            timeouts,
        }
    }
}

#[cfg(unix)]
#[async_trait]
impl SessionConnector for UnixConnector {
    async fn connect(&self) -> Result<Box<dyn FrameSession>, GeneratorError> {
        let stream = tokio::time::timeout(
            self.timeouts.connect,
            tokio::net::UnixStream::connect(self.path.as_ref()),
        )
        .await
        .map_err(|_| {
            GeneratorError::Connection(format!("Timeout connecting to socket {}", self.path))
        })?
        .map_err(|e| {
            GeneratorError::Connection(format!("Cannot connect to socket {}: {}", self.path, e))
        })?;
        debug!(collector = %self.path, "Unix socket connection established");

        Ok(Box::new(FrameStreamSession::new(
            stream,
            self.path.to_string(),
            self.content_type.clone(),
            self.timeouts.handshake,
        )))
    }

    fn describe(&self) -> String {
        format!("unix://{}", self.path)
    }
}

/// Picks the connector matching the target's transport.
pub fn connector_for(
    target: &CollectorTarget,
    timeouts: ConnectTimeouts,
) -> Result<Arc<dyn SessionConnector>, GeneratorError> {
    match target {
        CollectorTarget::Tcp { host, port } => {
            Ok(Arc::new(TcpConnector::new(host.clone(), *port, timeouts)))
        }
        #[cfg(unix)]
        CollectorTarget::Unix { path } => Ok(Arc::new(UnixConnector::new(path.clone(), timeouts))),
        #[cfg(not(unix))]
        CollectorTarget::Unix { path } => Err(GeneratorError::Configuration(format!(
            "Unix socket transport is not available on this platform: {}",
            path
        ))),
    }
}
