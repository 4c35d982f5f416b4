//! # Stockroom API Server Library
//!
//! This library provides the core functionality for the Stockroom API
//! server: category and product CRUD with image upload, backed by
//! PostgreSQL and a public file store.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `routes`: API route handlers
//! - `upload`: Multipart image extraction and validation

pub mod app;
pub mod config;
pub mod error;
pub mod routes;
pub mod upload;
