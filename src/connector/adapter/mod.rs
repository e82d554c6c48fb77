mod chunk_decoder;
mod client_config;
mod langchain_client;

pub use chunk_decoder::*;
pub use client_config::*;
pub use langchain_client::*;
