pub mod wire;

pub use wire::{HickoryDnsEncoder, MessageBuilder, RecordTypeMapper};
