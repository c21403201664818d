// printlink-api: Async Rust client for the printer's local HTTP API

pub mod client;
pub mod error;
pub mod models;
pub mod transport;

pub use client::PrinterClient;
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
