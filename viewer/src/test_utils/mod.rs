//! Test utilities
//!
//! A scripted mock of the remote feed API and test fixtures.
//!
//! Manual mocks instead of mockall: the port takes `&str` and returns owned
//! JSON, and a hand-written mock can also hold a call in flight, which the
//! loading-guard tests need.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
