//! Device pairing routes.
//!
//! Both pairing modes answer with a QR code PNG encoding
//! `<app base>/camera/<token>/` plus the raw token in the `X-Pairing-Token`
//! header, so a phone can either scan the code or read the header.
//!
//! Direct mode (POST) persists the device immediately. Deferred mode (GET)
//! only parks a pending claim against the caller's session; the device row
//! appears when the phone first heartbeats with the claimed token.

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::IntoResponse,
    Json,
};
use persistence::repositories::{is_unique_violation, DeviceRepository, PairingClaimRepository};
use std::io::Cursor;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;
use crate::middleware::metrics::record_device_paired;
use domain::models::device::PairDeviceRequest;

/// Header carrying the raw pairing token alongside the QR body.
pub const PAIRING_TOKEN_HEADER: &str = "x-pairing-token";

/// How many fresh tokens to try when an insert keeps colliding.
const TOKEN_RETRY_LIMIT: usize = 5;

/// Pair a device directly.
///
/// POST /api/v1/devices/pair
///
/// Creates the device row immediately and returns its QR code. The token is
/// regenerated and the insert retried a bounded number of times if it
/// collides with an existing device.
pub async fn pair_device(
    State(state): State<AppState>,
    user_auth: UserAuth,
    request: Option<Json<PairDeviceRequest>>,
) -> Result<impl IntoResponse, ApiError> {
    let request = request.map(|Json(r)| r).unwrap_or_default();
    request.validate()?;

    let repo = DeviceRepository::new(state.pool.clone());
    let name = request.device_name();

    let mut last_err: Option<sqlx::Error> = None;
    for _ in 0..TOKEN_RETRY_LIMIT {
        let token = state.tokens.generate();
        match repo.create(user_auth.user_id, name, &token).await {
            Ok(device) => {
                tracing::info!(
                    device_id = device.id,
                    owner_id = %user_auth.user_id,
                    "Device paired"
                );
                record_device_paired();
                return qr_response(&state, &device.token);
            }
            Err(e) if is_unique_violation(&e) => {
                tracing::debug!("Pairing token collision, regenerating");
                last_err = Some(e);
            }
            Err(e) => return Err(e.into()),
        }
    }

    Err(last_err
        .map(ApiError::from)
        .unwrap_or_else(|| ApiError::Internal("Token generation exhausted".to_string())))
}

/// Pair a device in deferred mode.
///
/// GET /api/v1/devices/pair
///
/// Stores a pending claim for the caller's session and returns the QR code.
/// A session holds at most one pending claim; issuing another replaces it.
pub async fn pair_device_deferred(
    State(state): State<AppState>,
    user_auth: UserAuth,
) -> Result<impl IntoResponse, ApiError> {
    let token = state.tokens.generate();

    let claims = PairingClaimRepository::new(state.pool.clone());
    claims
        .upsert(&user_auth.session_id, user_auth.user_id, &token)
        .await?;

    tracing::info!(
        owner_id = %user_auth.user_id,
        "Pending pairing claim stored"
    );

    qr_response(&state, &token)
}

/// Render the pairing QR PNG for a token.
fn qr_response(state: &AppState, token: &str) -> Result<(StatusCode, HeaderMap, Vec<u8>), ApiError> {
    let camera_url = format!(
        "{}/camera/{}/",
        state.config.server.app_base_url.trim_end_matches('/'),
        token
    );

    let png = render_qr_png(&camera_url)?;

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("image/png"));
    headers.insert(
        HeaderName::from_static(PAIRING_TOKEN_HEADER),
        HeaderValue::from_str(token)
            .map_err(|e| ApiError::Internal(format!("Invalid token header value: {}", e)))?,
    );

    Ok((StatusCode::OK, headers, png))
}

/// Encode `data` as a QR code and render it to PNG bytes.
fn render_qr_png(data: &str) -> Result<Vec<u8>, ApiError> {
    let code = qrcode::QrCode::new(data.as_bytes())
        .map_err(|e| ApiError::Internal(format!("QR encoding failed: {}", e)))?;

    let image = code.render::<image::Luma<u8>>().build();

    let mut png = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
        .map_err(|e| ApiError::Internal(format!("PNG encoding failed: {}", e)))?;

    Ok(png)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_qr_png_produces_png_magic() {
        let png = render_qr_png("http://localhost:8080/camera/abc123/").unwrap();
        assert!(png.len() > 8);
        assert_eq!(&png[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    }

    #[test]
    fn test_render_qr_png_varies_with_data() {
        let a = render_qr_png("http://localhost:8080/camera/aaaa/").unwrap();
        let b = render_qr_png("http://localhost:8080/camera/bbbb/").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_pairing_token_header_name_is_valid() {
        // from_static panics on invalid names, which would poison every response
        let name = HeaderName::from_static(PAIRING_TOKEN_HEADER);
        assert_eq!(name.as_str(), "x-pairing-token");
    }
}
