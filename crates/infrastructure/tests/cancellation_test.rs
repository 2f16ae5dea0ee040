use async_trait::async_trait;
use bytes::Bytes;
use dnstap_gen_application::ports::{FrameSession, SessionConnector};
use dnstap_gen_application::services::EnvelopeBuilder;
use dnstap_gen_application::use_cases::{
    RunConnectionUseCase, SendPlan, SynthesizeExchangeUseCase,
};
use dnstap_gen_domain::{GeneratorError, QueryTemplate, WorkerPhase};
use dnstap_gen_infrastructure::dns::HickoryDnsEncoder;
use dnstap_gen_infrastructure::dnstap::{DnstapEncoder, CONTENT_TYPE};
use dnstap_gen_infrastructure::framestream::codec::{read_control_frame, read_frame};
use dnstap_gen_infrastructure::framestream::{ControlFrame, Frame, FrameStreamSession};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{duplex, AsyncWriteExt, DuplexStream};
use tokio_util::sync::CancellationToken;

/// Hands out one end of an in-memory pipe small enough that a single
/// dnstap frame cannot fit in its buffer.
struct DuplexConnector {
    stream: Mutex<Option<DuplexStream>>,
}

#[async_trait]
impl SessionConnector for DuplexConnector {
    async fn connect(&self) -> Result<Box<dyn FrameSession>, GeneratorError> {
        let stream = self
            .stream
            .lock()
            .unwrap()
            .take()
            .ok_or_else(|| GeneratorError::Connection("pipe already taken".to_string()))?;
        Ok(Box::new(FrameStreamSession::new(
            stream,
            "duplex",
            Arc::from(CONTENT_TYPE),
            Duration::from_secs(2),
        )))
    }

    fn describe(&self) -> String {
        "duplex".to_string()
    }
}

/// Completes the handshake, stops reading for `stall`, then drains until
/// STOP. Any framing error means a frame was cut short.
async fn stalling_collector(
    mut stream: DuplexStream,
    stall: Duration,
) -> Result<Vec<Bytes>, String> {
    let Ok(ControlFrame::Ready { .. }) = read_control_frame(&mut stream).await else {
        return Err("expected READY".to_string());
    };
    let accept = ControlFrame::Accept {
        content_types: vec![CONTENT_TYPE.to_string()],
    };
    stream
        .write_all(&accept.encode())
        .await
        .map_err(|e| e.to_string())?;
    let Ok(ControlFrame::Start { .. }) = read_control_frame(&mut stream).await else {
        return Err("expected START".to_string());
    };

    tokio::time::sleep(stall).await;

    let mut frames = Vec::new();
    loop {
        match read_frame(&mut stream).await {
            Ok(Frame::Data(payload)) => frames.push(payload),
            Ok(Frame::Control(ControlFrame::Stop)) => {
                stream
                    .write_all(&ControlFrame::Finish.encode())
                    .await
                    .map_err(|e| e.to_string())?;
                return Ok(frames);
            }
            Ok(Frame::Control(other)) => {
                return Err(format!("unexpected {} frame", other.name()));
            }
            Err(e) => {
                return Err(format!("stream broken after {} frames: {}", frames.len(), e));
            }
        }
    }
}

#[tokio::test]
async fn test_cancel_during_blocked_write_leaves_only_whole_frames() {
    let (client, server) = duplex(64);
    let collector = tokio::spawn(stalling_collector(server, Duration::from_millis(300)));

    let connector = Arc::new(DuplexConnector {
        stream: Mutex::new(Some(client)),
    });
    let synthesizer = Arc::new(SynthesizeExchangeUseCase::new(
        Arc::new(HickoryDnsEncoder),
        QueryTemplate::random(10, 20),
    ));
    let worker = RunConnectionUseCase::new(
        connector,
        synthesizer,
        EnvelopeBuilder::new("dnstap-generator", "-"),
        Arc::new(DnstapEncoder),
        SendPlan {
            records: 1000,
            skip_queries: false,
            skip_replies: false,
        },
    );

    let token = CancellationToken::new();
    let canceller = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        canceller.cancel();
    });

    let failure = worker.execute(1, 21, token).await.unwrap_err();
    assert!(failure.source.is_cancelled());
    assert_eq!(failure.phase, WorkerPhase::Send);

    let frames = collector.await.unwrap().unwrap();
    assert!(!frames.is_empty());
    assert_eq!(frames.len() as u64, failure.frames_sent);
    for frame in &frames {
        assert!(DnstapEncoder::decode(frame).is_ok());
    }
}
