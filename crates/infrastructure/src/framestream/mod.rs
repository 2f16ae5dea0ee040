pub mod codec;
pub mod connector;
pub mod session;

pub use codec::{ControlFrame, Frame, FrameError};
#[cfg(unix)]
pub use connector::UnixConnector;
pub use connector::{connector_for, ConnectTimeouts, TcpConnector};
pub use session::FrameStreamSession;
