/// Middleware modules for the admin API server
///
/// This module contains custom middleware for:
/// - Cross-origin response headers

pub mod cors;
