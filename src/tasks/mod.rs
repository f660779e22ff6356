//! Background Tasks Module
//!
//! Contains background tasks that run alongside the HTTP server.

mod reporter;

pub use reporter::spawn_stats_reporter;
