//! Upload capture: turning a user-selected file into a previewable,
//! submittable image, plus the guard that rate-limits the native file
//! dialog.
//!
//! File picker, click-to-open, and drag-drop all funnel into
//! [`read_file`]; there is exactly one capture path.

use thiserror::Error;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("\"{0}\" is not an image - please choose an image file")]
    InvalidFileType(String),
    #[error("failed to read file: {0}")]
    DecodeFailure(String),
}

/// The page's single shared image selection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadState {
    pub bytes: Option<Vec<u8>>,
    pub mime: String,
    pub file_name: String,
    pub preview_data_url: Option<String>,
    pub has_uploaded: bool,
}

impl UploadState {
    pub fn accept(&mut self, image: SelectedImage) {
        self.bytes = Some(image.bytes);
        self.mime = image.mime;
        self.file_name = image.file_name;
        self.preview_data_url = Some(image.data_url);
        self.has_uploaded = true;
    }

    pub fn clear(&mut self) {
        *self = UploadState::default();
    }
}

/// A decoded image selection, ready to preview and submit.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedImage {
    pub bytes: Vec<u8>,
    pub mime: String,
    pub file_name: String,
    pub data_url: String,
}

pub fn validate_image_type(mime: &str, file_name: &str) -> Result<(), UploadError> {
    if mime.starts_with("image/") {
        Ok(())
    } else {
        Err(UploadError::InvalidFileType(file_name.to_string()))
    }
}

pub const FILE_PROMPT_COOLDOWN_MS: u64 = 1000;

/// Rate-limits the native file chooser: at most one open per rolling
/// one-second window, and never while an image is already uploaded (the
/// UI offers an explicit re-upload action instead).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptGuard {
    last_prompt_ms: u64,
}

impl PromptGuard {
    /// Returns whether the dialog may open now, recording the prompt time
    /// when it does.
    pub fn try_prompt(&mut self, now_ms: u64, has_uploaded: bool) -> bool {
        if self.last_prompt_ms != 0
            && now_ms.saturating_sub(self.last_prompt_ms) < FILE_PROMPT_COOLDOWN_MS
        {
            return false;
        }
        if has_uploaded {
            return false;
        }
        self.last_prompt_ms = now_ms;
        true
    }

    /// Forget the cooldown; used by the explicit re-upload action.
    pub fn reset(&mut self) {
        self.last_prompt_ms = 0;
    }
}

/// Simple base64 encoder (avoiding extra dependencies in WASM).
pub fn base64_encode(bytes: &[u8]) -> String {
    const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

    let mut result = String::with_capacity((bytes.len() + 2) / 3 * 4);

    for chunk in bytes.chunks(3) {
        let b0 = chunk[0] as usize;
        let b1 = chunk.get(1).copied().unwrap_or(0) as usize;
        let b2 = chunk.get(2).copied().unwrap_or(0) as usize;

        result.push(ALPHABET[b0 >> 2] as char);
        result.push(ALPHABET[((b0 & 0x03) << 4) | (b1 >> 4)] as char);

        if chunk.len() > 1 {
            result.push(ALPHABET[((b1 & 0x0f) << 2) | (b2 >> 6)] as char);
        } else {
            result.push('=');
        }

        if chunk.len() > 2 {
            result.push(ALPHABET[b2 & 0x3f] as char);
        } else {
            result.push('=');
        }
    }

    result
}

pub fn to_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, base64_encode(bytes))
}

/// Read a browser `File` into bytes and a preview data URL.
///
/// Non-blocking; the caller's state is only touched on success, so a
/// rejected or failed read leaves the previous selection intact. There is
/// no cancellation: a second selection racing a pending read is
/// last-write-observed-wins.
pub async fn read_file(file: web_sys::File) -> Result<SelectedImage, UploadError> {
    let mime = file.type_();
    let file_name = file.name();
    validate_image_type(&mime, &file_name)?;

    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| UploadError::DecodeFailure(format!("{e:?}")))?;
    let buffer: js_sys::ArrayBuffer = buffer
        .dyn_into()
        .map_err(|_| UploadError::DecodeFailure("unexpected reader result".to_string()))?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    let data_url = to_data_url(&mime, &bytes);

    Ok(SelectedImage {
        bytes,
        mime,
        file_name,
        data_url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_image_types() {
        let err = validate_image_type("application/pdf", "report.pdf").unwrap_err();
        assert_eq!(err, UploadError::InvalidFileType("report.pdf".to_string()));
        assert!(validate_image_type("image/png", "dog.png").is_ok());
        assert!(validate_image_type("image/jpeg", "dog.jpg").is_ok());
    }

    #[test]
    fn rejected_selection_leaves_state_untouched() {
        let mut state = UploadState::default();
        state.accept(SelectedImage {
            bytes: vec![1, 2, 3],
            mime: "image/png".to_string(),
            file_name: "dog.png".to_string(),
            data_url: to_data_url("image/png", &[1, 2, 3]),
        });
        let before = state.clone();

        // The validation gate runs before any mutation, so a bad pick
        // never reaches `accept`.
        assert!(validate_image_type("text/plain", "notes.txt").is_err());
        assert_eq!(state, before);
    }

    #[test]
    fn accept_sets_preview_and_upload_flag() {
        let mut state = UploadState::default();
        assert!(!state.has_uploaded);

        state.accept(SelectedImage {
            bytes: vec![0xff, 0xd8, 0xff],
            mime: "image/jpeg".to_string(),
            file_name: "dog.jpg".to_string(),
            data_url: to_data_url("image/jpeg", &[0xff, 0xd8, 0xff]),
        });

        let preview = state.preview_data_url.as_deref().unwrap();
        assert!(preview.starts_with("data:image/jpeg;base64,"));
        assert!(preview.len() > "data:image/jpeg;base64,".len());
        assert!(state.has_uploaded);

        state.clear();
        assert_eq!(state, UploadState::default());
    }

    #[test]
    fn prompt_is_rate_limited_to_one_per_second() {
        let mut guard = PromptGuard::default();
        assert!(guard.try_prompt(5_000, false));
        assert!(!guard.try_prompt(5_400, false));
        assert!(!guard.try_prompt(5_999, false));
        assert!(guard.try_prompt(6_000, false));
    }

    #[test]
    fn prompt_refused_while_image_uploaded() {
        let mut guard = PromptGuard::default();
        assert!(!guard.try_prompt(5_000, true));
        // The refusal did not start a cooldown window.
        assert!(guard.try_prompt(5_100, false));
    }

    #[test]
    fn reset_clears_the_cooldown() {
        let mut guard = PromptGuard::default();
        assert!(guard.try_prompt(5_000, false));
        assert!(!guard.try_prompt(5_100, false));
        guard.reset();
        assert!(guard.try_prompt(5_200, false));
    }

    #[test]
    fn base64_matches_known_vectors() {
        assert_eq!(base64_encode(b""), "");
        assert_eq!(base64_encode(b"f"), "Zg==");
        assert_eq!(base64_encode(b"fo"), "Zm8=");
        assert_eq!(base64_encode(b"foo"), "Zm9v");
        assert_eq!(base64_encode(b"foobar"), "Zm9vYmFy");
    }
}
