//! Simulated console and fixtures for the page object tests (hidden from docs)
#![doc(hidden)]

pub mod console;
pub mod dom;
pub mod helpers;
pub mod provider;

pub use console::{
    ConsoleStats, MockConsole, MockUser, PoolRecord, Screen, DELETED_MESSAGE,
    LOGIN_FAILED_MESSAGE, REMOVE_CONFIRMATION,
};
pub use dom::{Action, Dom, Node};
pub use helpers::{init_test_logging, test_config, TestBed, PROVIDER_KEY};
pub use provider::MockProvider;
