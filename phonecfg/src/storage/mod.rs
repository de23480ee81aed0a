//! Persisted settings

pub mod settings;
