//! Test helpers module
//!
//! Utilities shared by the integration suites: a mock EVENTR API server,
//! fixture builders and a test context wired to both.

#![allow(dead_code)]

pub mod api_mock;
pub mod test_context;
pub mod test_data;

pub use api_mock::*;
pub use test_context::*;
pub use test_data::*;
