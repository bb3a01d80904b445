//! Application Layer - Use cases and application services

pub mod errors;
pub mod poller;
pub mod use_cases;

pub use errors::ScanError;
pub use poller::{PollConfig, ScanPoller};
pub use use_cases::SubmitScanUseCase;
