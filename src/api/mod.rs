//! API Module
//!
//! HTTP handlers and routing for the account cache REST API.
//!
//! # Endpoints
//! - `PUT /accounts` - Store or update an account
//! - `GET /accounts/:id` - Retrieve an account by id
//! - `GET /accounts/top` - Richest cached accounts
//! - `GET /stats` - Get cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
