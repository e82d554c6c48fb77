mod langchain_api;

pub use langchain_api::*;
