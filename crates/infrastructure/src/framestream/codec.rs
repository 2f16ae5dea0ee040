//! Frame Streams (fstrm) wire format.
//!
//! A data frame is a big-endian u32 length followed by the payload. A
//! control frame starts with a zero length (the escape), then the control
//! frame length, the control type and a list of fields. The only field
//! type is the content type: `0x01`, u32 length, bytes.

use bytes::{Buf, BufMut, Bytes, BytesMut};
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt};

pub const CONTROL_ACCEPT: u32 = 0x01;
pub const CONTROL_START: u32 = 0x02;
pub const CONTROL_STOP: u32 = 0x03;
pub const CONTROL_READY: u32 = 0x04;
pub const CONTROL_FINISH: u32 = 0x05;

pub const FIELD_CONTENT_TYPE: u32 = 0x01;

/// Upper bound on an incoming control frame, as in libfstrm.
pub const MAX_CONTROL_FRAME_LEN: usize = 512;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlFrame {
    Accept { content_types: Vec<String> },
    Start { content_type: Option<String> },
    Stop,
    Ready { content_types: Vec<String> },
    Finish,
}

impl ControlFrame {
    pub fn control_type(&self) -> u32 {
        match self {
            ControlFrame::Accept { .. } => CONTROL_ACCEPT,
            ControlFrame::Start { .. } => CONTROL_START,
            ControlFrame::Stop => CONTROL_STOP,
            ControlFrame::Ready { .. } => CONTROL_READY,
            ControlFrame::Finish => CONTROL_FINISH,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ControlFrame::Accept { .. } => "ACCEPT",
            ControlFrame::Start { .. } => "START",
            ControlFrame::Stop => "STOP",
            ControlFrame::Ready { .. } => "READY",
            ControlFrame::Finish => "FINISH",
        }
    }

    pub fn content_types(&self) -> &[String] {
        match self {
            ControlFrame::Accept { content_types } | ControlFrame::Ready { content_types } => {
                content_types
            }
            ControlFrame::Start { content_type } => content_type.as_slice(),
            ControlFrame::Stop | ControlFrame::Finish => &[],
        }
    }

    pub fn accepts(&self, content_type: &str) -> bool {
        self.content_types().iter().any(|ct| ct == content_type)
    }

    /// Escape, length and body, ready to write.
    pub fn encode(&self) -> Bytes {
        let fields = self.content_types();
        let body_len = 4 + fields.iter().map(|ct| 8 + ct.len()).sum::<usize>();

        let mut buf = BytesMut::with_capacity(8 + body_len);
        buf.put_u32(0);
        buf.put_u32(body_len as u32);
        buf.put_u32(self.control_type());
        for ct in fields {
            buf.put_u32(FIELD_CONTENT_TYPE);
            buf.put_u32(ct.len() as u32);
            buf.put_slice(ct.as_bytes());
        }
        buf.freeze()
    }

    /// Parses a control frame body (everything after the length word).
    pub fn decode(mut body: &[u8]) -> Result<Self, FrameError> {
        if body.len() < 4 {
            return Err(FrameError::Malformed("control frame shorter than its type"));
        }
        let control_type = body.get_u32();

        let mut content_types = Vec::new();
        while body.has_remaining() {
            if body.remaining() < 8 {
                return Err(FrameError::Malformed("truncated control field header"));
            }
            let field_type = body.get_u32();
            let field_len = body.get_u32() as usize;
            if body.remaining() < field_len {
                return Err(FrameError::Malformed("truncated control field"));
            }
            if field_type == FIELD_CONTENT_TYPE {
                let value = String::from_utf8_lossy(&body[..field_len]).into_owned();
                content_types.push(value);
            }
            body.advance(field_len);
        }

        match control_type {
            CONTROL_ACCEPT => Ok(ControlFrame::Accept { content_types }),
            CONTROL_START => {
                if content_types.len() > 1 {
                    return Err(FrameError::Malformed("START with several content types"));
                }
                Ok(ControlFrame::Start {
                    content_type: content_types.into_iter().next(),
                })
            }
            CONTROL_STOP => Ok(ControlFrame::Stop),
            CONTROL_READY => Ok(ControlFrame::Ready { content_types }),
            CONTROL_FINISH => Ok(ControlFrame::Finish),
            other => Err(FrameError::UnknownControl(other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    Data(Bytes),
    Control(ControlFrame),
}

#[derive(Debug, Error)]
pub enum FrameError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed control frame: {0}")]
    Malformed(&'static str),

    #[error("unknown control frame type {0:#x}")]
    UnknownControl(u32),

    #[error("control frame too large: {0} bytes")]
    TooLarge(usize),
}

/// Length-prefixed data frame header plus payload.
pub fn encode_data_frame(payload: &[u8]) -> Bytes {
    let mut buf = BytesMut::with_capacity(4 + payload.len());
    buf.put_u32(payload.len() as u32);
    buf.put_slice(payload);
    buf.freeze()
}

/// Reads the next frame of either kind.
pub async fn read_frame<R>(reader: &mut R) -> Result<Frame, FrameError>
where
    R: AsyncRead + Unpin,
{
    let len = reader.read_u32().await? as usize;
    if len > 0 {
        let mut payload = vec![0u8; len];
        reader.read_exact(&mut payload).await?;
        return Ok(Frame::Data(Bytes::from(payload)));
    }

    let control_len = reader.read_u32().await? as usize;
    if control_len > MAX_CONTROL_FRAME_LEN {
        return Err(FrameError::TooLarge(control_len));
    }
    let mut body = vec![0u8; control_len];
    reader.read_exact(&mut body).await?;
    Ok(Frame::Control(ControlFrame::decode(&body)?))
}

/// Reads the next frame and requires it to be a control frame.
pub async fn read_control_frame<R>(reader: &mut R) -> Result<ControlFrame, FrameError>
where
    R: AsyncRead + Unpin,
{
    match read_frame(reader).await? {
        Frame::Control(control) => Ok(control),
        Frame::Data(_) => Err(FrameError::Malformed("expected a control frame, got data")),
    }
}
