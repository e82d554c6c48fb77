//! # Domain Layer
//!
//! Request payloads, response shapes and the error taxonomy of the
//! LangChain service API. Independent of the HTTP stack.

mod error;
pub mod models;

pub use error::*;
pub use models::*;
