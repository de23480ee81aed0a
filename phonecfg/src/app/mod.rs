//! Catalog server application

pub mod options;
pub mod run;
