//! Catalog API
//!
//! Wire models exchanged between the config editor and the config catalog.

pub mod models;
