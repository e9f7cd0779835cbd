//! Testing utilities and mock implementations
//!
//! Provides a canned-response provider so dispatcher and server tests run
//! without network access.

pub mod mocks;

pub use mocks::*;
