//! HTTP catalog client

pub mod client;
pub mod configs;
