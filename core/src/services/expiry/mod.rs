//! Expiry sweep module for retiring outstanding codes
//!
//! The sweeper periodically removes records whose validity window has
//! passed and clears their external projections. Retirement runs on its
//! own task and never blocks new issuances.

mod config;
mod sweeper;

pub use config::SweepConfig;
pub use sweeper::{ExpirySweeper, SweepResult};
