use bytes::Bytes;
use dnstap_gen_infrastructure::dnstap::CONTENT_TYPE;
use dnstap_gen_infrastructure::framestream::codec::{read_control_frame, read_frame};
use dnstap_gen_infrastructure::framestream::{ControlFrame, Frame};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

#[derive(Debug, Clone, Copy)]
pub enum CollectorBehavior {
    /// Normal fstrm receiver.
    Accept,
    /// Reads READY and never answers.
    Silent,
    /// Answers ACCEPT for a different content type.
    AcceptOther(&'static str),
}

type Sessions = Arc<Mutex<Vec<Vec<Bytes>>>>;

/// In-process bidirectional Frame Streams receiver. Each accepted
/// connection records its data frames in arrival order.
pub struct MockCollector {
    addr: SocketAddr,
    sessions: Sessions,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockCollector {
    pub async fn start(behavior: CollectorBehavior) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let sessions: Sessions = Arc::new(Mutex::new(Vec::new()));
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        let accepted = sessions.clone();
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    result = listener.accept() => {
                        if let Ok((stream, _)) = result {
                            tokio::spawn(serve(stream, behavior, accepted.clone()));
                        }
                    }
                }
            }
        });

        Self {
            addr,
            sessions,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Data frames per completed session, in completion order.
    pub fn sessions(&self) -> Vec<Vec<Bytes>> {
        self.sessions.lock().unwrap().clone()
    }

    pub fn total_frames(&self) -> usize {
        self.sessions().iter().map(Vec::len).sum()
    }
}

impl Drop for MockCollector {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

pub async fn serve<S>(mut stream: S, behavior: CollectorBehavior, sessions: Sessions)
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let Ok(ControlFrame::Ready { .. }) = read_control_frame(&mut stream).await else {
        return;
    };

    let content_type = match behavior {
        CollectorBehavior::Accept => CONTENT_TYPE,
        CollectorBehavior::AcceptOther(other) => other,
        CollectorBehavior::Silent => {
            let _ = read_frame(&mut stream).await;
            return;
        }
    };
    let accept = ControlFrame::Accept {
        content_types: vec![content_type.to_string()],
    };
    if stream.write_all(&accept.encode()).await.is_err() {
        return;
    }

    let Ok(ControlFrame::Start { .. }) = read_control_frame(&mut stream).await else {
        return;
    };

    let mut frames = Vec::new();
    loop {
        match read_frame(&mut stream).await {
            Ok(Frame::Data(payload)) => frames.push(payload),
            Ok(Frame::Control(ControlFrame::Stop)) => {
                sessions.lock().unwrap().push(frames);
                let _ = stream.write_all(&ControlFrame::Finish.encode()).await;
                return;
            }
            _ => {
                sessions.lock().unwrap().push(frames);
                return;
            }
        }
    }
}
