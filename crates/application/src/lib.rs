//! dnstap generator application layer: ports, generation services and the
//! per-connection / whole-run use cases.
pub mod ports;
pub mod services;
pub mod use_cases;
