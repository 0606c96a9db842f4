//! Wire contract between the console and the ambient CRT media server.

pub mod client;
pub mod config;
pub mod error;
pub mod platform;
pub mod protocol;

pub use client::{HttpMediaServer, MediaServer};
pub use error::{ClientError, ClientResult};
