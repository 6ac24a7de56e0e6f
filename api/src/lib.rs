//! # OtpRelay API
//!
//! HTTP layer for the OtpRelay backend. Exposes the issuance endpoint,
//! a health check, and the middleware stack around them.

pub mod dto;
pub mod middleware;
pub mod routes;
