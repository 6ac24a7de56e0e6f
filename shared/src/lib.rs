//! Shared utilities and common types for the OtpRelay server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types with environment loaders
//! - API response structures
//! - Email validation and masking utilities

pub mod config;
pub mod types;
pub mod utils;
