//! Study topic checklist.
//!
//! A [`models::Sheet`] holds topics, sub-topics and questions. The server
//! ([`api`], [`store`]) keeps one sheet in memory and swaps it wholesale on
//! every write; the client ([`session`], [`client`]) edits a local copy with
//! the pure functions in [`tree`] and pushes the whole document back after
//! each change.

pub mod api;
pub mod client;
pub mod config;
pub mod models;
pub mod render;
pub mod session;
pub mod store;
pub mod tree;
