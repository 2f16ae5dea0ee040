pub mod run_connection;
pub mod run_load;

pub use run_connection::{RunConnectionUseCase, SendPlan};
pub use run_load::RunLoadUseCase;
