//! Test helpers shared across crates.
//!
//! Provides recording fake validators, temporary module trees and captured
//! log output.

pub mod logs;
pub mod tree;
pub mod validator;
