//! Verification code model

use serde::{Deserialize, Serialize};

/// Outstanding verification code for one customer identity
///
/// Stored with the Telegram user id as the record key, so upserting a new
/// code replaces the previous one — exactly one outstanding code per
/// identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationCode {
    pub telegram_id: i64,
    /// 6-digit code as sent to the customer
    pub code: String,
    /// RFC3339 expiry timestamp (5 minutes after issue)
    pub expires_at: String,
    /// Set once the customer echoes the code back in time
    pub verified: bool,
}
