//! Shared helpers for the page-object crates: appliance versions, the
//! bounded retry loop used by every UI wait, and console configuration.

pub mod config;
pub mod version;
pub mod wait;

pub use config::{ConsoleConfig, UserCredential, WaitSettings};
pub use version::{ApplianceVersion, VersionPicker};
pub use wait::{wait_for, wait_for_with_retry, WaitOptions, WaitOutcome};
