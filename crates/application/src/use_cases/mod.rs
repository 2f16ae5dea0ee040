pub mod dns;
pub mod load;

pub use dns::SynthesizeExchangeUseCase;
pub use load::{RunConnectionUseCase, RunLoadUseCase, SendPlan};
