pub mod encoder;
pub mod schema;

pub use encoder::{DnstapEncoder, CONTENT_TYPE};
