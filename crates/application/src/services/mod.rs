mod corpus_generator;
mod envelope_builder;

pub use corpus_generator::{CorpusGenerator, ALPHANUMERIC};
pub use envelope_builder::EnvelopeBuilder;
