//! phonecfg Library
//!
//! Structured editing of desk-phone provisioning files: the editor state,
//! the catalogs it talks to, and the HTTP catalog server.

pub mod app;
pub mod catalog;
pub mod editor;
pub mod errors;
pub mod filesys;
pub mod http;
pub mod logs;
pub mod provision;
pub mod server;
pub mod session;
pub mod storage;
pub mod utils;
