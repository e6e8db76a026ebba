//! Verification code repository
//!
//! Codes are keyed by the Telegram user id, so issuing a new code is an
//! upsert that replaces any outstanding one.

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::VerificationCode;
use crate::utils::time::{is_past, minutes_from_now_rfc3339};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const CODE_TABLE: &str = "verification_code";

/// Codes expire five minutes after issue
const CODE_TTL_MINUTES: i64 = 5;

#[derive(Clone)]
pub struct VerificationRepository {
    base: BaseRepository,
}

impl VerificationRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Issue a code for an identity, replacing any outstanding one
    pub async fn issue(&self, telegram_id: i64, code: String) -> RepoResult<VerificationCode> {
        let record = VerificationCode {
            telegram_id,
            code,
            expires_at: minutes_from_now_rfc3339(CODE_TTL_MINUTES),
            verified: false,
        };

        let stored: Option<VerificationCode> = self
            .base
            .db()
            .upsert((CODE_TABLE, telegram_id.to_string()))
            .content(record)
            .await?;
        stored.ok_or_else(|| RepoError::Database("Failed to store verification code".into()))
    }

    /// Check a submitted code and mark the identity verified on match
    ///
    /// Fails with a validation error on mismatch or expiry, and not-found
    /// when no code was ever issued for the identity.
    pub async fn verify(&self, telegram_id: i64, submitted: &str) -> RepoResult<VerificationCode> {
        let existing: Option<VerificationCode> = self
            .base
            .db()
            .select((CODE_TABLE, telegram_id.to_string()))
            .await?;
        let record = existing
            .ok_or_else(|| RepoError::NotFound(format!("Verification code for {telegram_id}")))?;

        if is_past(&record.expires_at) {
            return Err(RepoError::Validation("code expired".into()));
        }
        if record.code != submitted {
            return Err(RepoError::Validation("code does not match".into()));
        }

        let mut result = self
            .base
            .db()
            .query("UPDATE type::thing($table, $key) SET verified = true RETURN AFTER")
            .bind(("table", CODE_TABLE))
            .bind(("key", telegram_id.to_string()))
            .await?;
        let updated: Vec<VerificationCode> = result.take(0)?;
        updated
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::Database("Failed to mark code verified".into()))
    }
}
