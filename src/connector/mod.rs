//! # Connector Layer
//!
//! External integrations implementing application interfaces:
//! - HTTP client for the LangChain service (reqwest)
//! - Decoding of streamed response bodies
//! - Client configuration

pub mod adapter;

pub use adapter::*;
