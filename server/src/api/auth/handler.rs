//! Auth-code handlers
//!
//! Login verification for storefront customers: a 6-digit code pushed over
//! Telegram, one outstanding code per identity, 5-minute expiry. The code
//! itself never appears in an API response.

use axum::{Json, extract::State};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::utils::{AppResponse, AppResult};

fn generate_code() -> String {
    rand::thread_rng().gen_range(100_000..=999_999).to_string()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendCodeRequest {
    pub telegram_id: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendCodeResponse {
    pub sent: bool,
}

/// POST /api/auth/send_code — issue and deliver a verification code
///
/// Replaces any outstanding code for the identity. Delivery failure is a
/// hard error here: a code the customer cannot receive is useless.
pub async fn send_code(
    State(state): State<ServerState>,
    Json(request): Json<SendCodeRequest>,
) -> AppResult<Json<AppResponse<SendCodeResponse>>> {
    let code = generate_code();
    state
        .verification
        .issue(request.telegram_id, code.clone())
        .await?;
    state
        .notifier
        .send_verification_code(request.telegram_id, &code)
        .await?;

    tracing::info!(customer = request.telegram_id, "Verification code sent");
    Ok(Json(AppResponse::success(SendCodeResponse { sent: true })))
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyCodeRequest {
    pub telegram_id: i64,
    pub code: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyCodeResponse {
    pub verified: bool,
}

/// POST /api/auth/verify_code — check a submitted code
pub async fn verify_code(
    State(state): State<ServerState>,
    Json(request): Json<VerifyCodeRequest>,
) -> AppResult<Json<AppResponse<VerifyCodeResponse>>> {
    state
        .verification
        .verify(request.telegram_id, &request.code)
        .await?;

    tracing::info!(customer = request.telegram_id, "Identity verified");
    Ok(Json(AppResponse::success(VerifyCodeResponse {
        verified: true,
    })))
}
