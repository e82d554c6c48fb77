//! # Application Layer
//!
//! The service contract the CLI is written against.

pub mod interfaces;

pub use interfaces::*;
