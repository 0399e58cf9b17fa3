//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `waba-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `ApiClient`: HTTP calls against the messaging API
//!   - `Logger`: Operational log events
//!   - `TemplateValidator`: Template content checks
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{ApiClient, Logger, TemplateValidator};

#[cfg(test)]
pub use output::MockApiClient;
