//! Cloudflare API gateway.
//!
//! This module exports API endpoints to interface the Cloudflare API using
//! Global API Key authentication.
//! Learn more: https://developers.cloudflare.com/api

/// The stable base URL for all Version 4 HTTPS endpoints to Cloudflare.
pub const API_BASE: &str = "https://api.cloudflare.com/client/v4/";

pub mod endpoints;
pub mod models;
pub mod requests;
