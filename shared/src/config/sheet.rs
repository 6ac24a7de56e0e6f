//! External sheet-store configuration module

use serde::{Deserialize, Serialize};

/// Sheet tab names are capped by the store; normalized identity keys must
/// fit under this limit
pub const MAX_TAB_NAME_LENGTH: usize = 100;

/// External sheet-store configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SheetConfig {
    /// Base URL of the sheet-store HTTP API
    pub base_url: String,

    /// Identifier of the sheet document holding the OTP mirror
    pub sheet_id: String,

    /// API token for the sheet store
    pub api_token: String,

    /// Cell holding the mirrored code on each identity tab
    #[serde(default = "default_code_cell")]
    pub code_cell: String,

    /// Cell holding the owning identity on each tab (owner-match check)
    #[serde(default = "default_owner_cell")]
    pub owner_cell: String,

    /// Whether to verify the target tab exists before publishing
    #[serde(default = "default_verify_target")]
    pub verify_target: bool,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            sheet_id: String::new(),
            api_token: String::new(),
            code_cell: default_code_cell(),
            owner_cell: default_owner_cell(),
            verify_target: default_verify_target(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl SheetConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("SHEET_BASE_URL").unwrap_or_default(),
            sheet_id: std::env::var("SHEET_ID").unwrap_or_default(),
            api_token: std::env::var("SHEET_API_TOKEN").unwrap_or_default(),
            code_cell: std::env::var("SHEET_CODE_CELL").unwrap_or_else(|_| default_code_cell()),
            owner_cell: std::env::var("SHEET_OWNER_CELL").unwrap_or_else(|_| default_owner_cell()),
            verify_target: std::env::var("SHEET_VERIFY_TARGET")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_verify_target),
            request_timeout_secs: std::env::var("SHEET_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_request_timeout),
        }
    }
}

fn default_code_cell() -> String {
    "A3".to_string()
}

fn default_owner_cell() -> String {
    "B3".to_string()
}

fn default_verify_target() -> bool {
    true
}

fn default_request_timeout() -> u64 {
    10
}
