// shoely-api: Async Rust client for the shoe inventory REST service

pub mod client;
pub mod error;
pub mod models;
pub mod transport;

pub use client::ShoeClient;
pub use error::Error;
pub use models::{Shoe, ShoeId, ShoeWrite};
pub use transport::{TlsMode, TransportConfig};
