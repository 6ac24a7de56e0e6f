//! Sheet-Store Module
//!
//! This module talks to the external sheet store that mirrors outstanding
//! verification codes. Each identity owns one tab in a shared sheet
//! document; the mirrored code lives in a fixed cell on that tab.
//!
//! - **SheetClient**: low-level HTTP client for cell reads and writes
//! - **SheetSyncAdapter**: implements the core external-store contract
//!   on top of the client (owner check, publish, clear)

pub mod client;
pub mod sync_adapter;

pub use client::SheetClient;
pub use sync_adapter::SheetSyncAdapter;
