/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `categories`: Category CRUD endpoints
/// - `products`: Product CRUD endpoints

pub mod categories;
pub mod health;
pub mod products;
