//! Typed client for the inference service.

use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use crate::detection::{DetectionType, PredictResponse};

pub const PREDICT_ENDPOINT: &str = "/predict";

/// How many raw body characters to surface when the error body has no
/// structured message.
const RAW_ERROR_SNIPPET_LEN: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Transport(String),
    #[error("{0}")]
    Http(String),
    #[error("unexpected response format: {0}")]
    Decode(String),
}

/// Submit one image to `POST /predict`.
///
/// Single request: no retry and no timeout beyond the platform default.
/// A non-2xx status or transport failure becomes an [`ApiError`] with a
/// best-effort message for the user.
pub async fn predict(
    detection: DetectionType,
    bytes: &[u8],
    mime: &str,
    file_name: &str,
) -> Result<PredictResponse, ApiError> {
    let form = build_form(detection, bytes, mime, file_name)
        .map_err(|e| ApiError::Transport(describe_js(&e)))?;

    let init = web_sys::RequestInit::new();
    init.set_method("POST");
    init.set_body(&JsValue::from(form));

    let window =
        web_sys::window().ok_or_else(|| ApiError::Transport("no window".to_string()))?;
    let response = JsFuture::from(window.fetch_with_str_and_init(PREDICT_ENDPOINT, &init))
        .await
        .map_err(|e| ApiError::Transport(describe_js(&e)))?;
    let response: web_sys::Response = response
        .dyn_into()
        .map_err(|_| ApiError::Transport("fetch returned a non-response".to_string()))?;

    if !response.ok() {
        let body = read_text(&response).await.unwrap_or_default();
        return Err(ApiError::Http(extract_error_message(response.status(), &body)));
    }

    let json = response
        .json()
        .map_err(|e| ApiError::Decode(describe_js(&e)))?;
    let json = JsFuture::from(json)
        .await
        .map_err(|e| ApiError::Decode(describe_js(&e)))?;
    serde_wasm_bindgen::from_value(json).map_err(|e| ApiError::Decode(e.to_string()))
}

fn build_form(
    detection: DetectionType,
    bytes: &[u8],
    mime: &str,
    file_name: &str,
) -> Result<web_sys::FormData, JsValue> {
    let parts = js_sys::Array::new();
    parts.push(&js_sys::Uint8Array::from(bytes).into());
    let options = web_sys::BlobPropertyBag::new();
    options.set_type(mime);
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;

    let form = web_sys::FormData::new()?;
    form.append_with_blob_and_filename("file", &blob, file_name)?;
    form.append_with_str("detection_type", detection.wire_value())?;
    Ok(form)
}

async fn read_text(response: &web_sys::Response) -> Option<String> {
    let promise = response.text().ok()?;
    JsFuture::from(promise).await.ok()?.as_string()
}

/// Best-effort user-facing message for a failed request: a structured
/// `error` (or `message`) field when the body decodes as JSON, otherwise
/// the first [`RAW_ERROR_SNIPPET_LEN`] characters of the raw body.
pub fn extract_error_message(status: u16, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["error", "message"] {
            if let Some(text) = value.get(key).and_then(|v| v.as_str()) {
                if !text.is_empty() {
                    return text.to_string();
                }
            }
        }
    }
    let snippet: String = body.chars().take(RAW_ERROR_SNIPPET_LEN).collect();
    if snippet.trim().is_empty() {
        format!("request failed with status {status}")
    } else {
        snippet
    }
}

fn describe_js(value: &JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{value:?}"))
}
