//! Testing utilities and mock implementations
//!
//! This module provides a mock tool backend for exercising the dispatcher and
//! the stdio server without a running EagleForge tools API.

pub mod mocks;

pub use mocks::*;
