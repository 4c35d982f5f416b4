//! # Stockroom Shared Library
//!
//! This crate contains the types and utilities shared between the Stockroom
//! API server and the admin client tooling.
//!
//! ## Module Organization
//!
//! - `models`: Database models and their CRUD operations
//! - `db`: Connection pool and migration runner
//! - `storage`: Public file store for uploaded images

pub mod db;
pub mod models;
pub mod storage;

/// Current version of the Stockroom shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
