//! Types for issuance service results

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::errors::SyncFailure;

/// Receipt for a delivered verification code
#[derive(Debug, Clone)]
pub struct IssueReceipt {
    /// Unique identifier of this issuance
    pub issuance_id: Uuid,

    /// Normalized identity key the record is stored under
    pub identity_key: String,

    /// Mail provider message id
    pub message_id: String,

    /// When the code stops being valid
    pub expires_at: DateTime<Utc>,
}

/// Outcome of an issuance request.
///
/// `MirrorFailed` is a partial success: the user received the code and the
/// local record is live, but the external mirror is stale or absent.
#[derive(Debug, Clone)]
pub enum IssueOutcome {
    /// Delivered, recorded and mirrored
    Acknowledged(IssueReceipt),

    /// Delivered and recorded, but the external publish failed
    MirrorFailed {
        receipt: IssueReceipt,
        failure: SyncFailure,
    },
}

impl IssueOutcome {
    /// The receipt, regardless of mirror state
    pub fn receipt(&self) -> &IssueReceipt {
        match self {
            IssueOutcome::Acknowledged(receipt) => receipt,
            IssueOutcome::MirrorFailed { receipt, .. } => receipt,
        }
    }

    /// Whether the external mirror reflects the issued code
    pub fn is_mirrored(&self) -> bool {
        matches!(self, IssueOutcome::Acknowledged(_))
    }
}
