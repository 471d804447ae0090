//! Bytez inference API client.
//!
//! Implements the `Transport` trait for chat models served through the
//! Bytez model API. Streaming models answer with raw text bytes; the rest
//! answer with a JSON envelope `{ "error": ..., "output": ... }`.

mod api;
mod client;
mod config;

pub use client::BytezClient;
pub use config::BytezConfig;
