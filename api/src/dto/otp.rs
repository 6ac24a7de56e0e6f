use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SendCodeRequest {
    /// Recipient email address. Also determines the tab the code is
    /// mirrored to in the external sheet.
    #[validate(email, length(max = 254))]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendCodeResponse {
    pub message: String,

    /// When the issued code stops being valid
    pub expires_at: DateTime<Utc>,
}
