#![allow(dead_code)]
pub mod collector;

pub use collector::{CollectorBehavior, MockCollector};
