//! Infrastructure implementations.
//!
//! Contains port trait implementations for external dependencies.

pub mod clock;
pub mod config;
pub mod error;
pub mod favorites;
mod http_client;
pub mod ports;
pub mod spotify;
pub mod ticketmaster;
pub mod token_cache;
