//! Contact form handler

use axum::{Json, extract::State};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::ServerState;
use crate::notify::ContactMessage;
use crate::utils::validate::validate_phone;
use crate::utils::{AppError, AppResponse, AppResult};

/// Maximum decoded image size
const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// POST /api/contact body
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(custom(function = validate_phone))]
    pub phone: String,
    #[validate(length(min = 1, max = 1000))]
    pub message: String,
    /// Optional base64-encoded image attachment
    #[serde(default)]
    pub image_base64: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactResponse {
    pub delivered: bool,
}

/// POST /api/contact — validate and relay to the staff channel
pub async fn submit(
    State(state): State<ServerState>,
    Json(request): Json<ContactRequest>,
) -> AppResult<Json<AppResponse<ContactResponse>>> {
    request
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let image = match &request.image_base64 {
        Some(encoded) => {
            let bytes = BASE64
                .decode(encoded.trim())
                .map_err(|_| AppError::validation("image is not valid base64"))?;
            if bytes.len() > MAX_IMAGE_BYTES {
                return Err(AppError::validation("image exceeds 10 MB"));
            }
            Some(bytes)
        }
        None => None,
    };

    let form = ContactMessage {
        name: request.name,
        phone: request.phone,
        message: request.message,
        image,
    };
    state.notifier.relay_contact_form(&form).await?;

    Ok(Json(AppResponse::success(ContactResponse {
        delivered: true,
    })))
}
