pub mod synthesize_exchange;

pub use synthesize_exchange::SynthesizeExchangeUseCase;
