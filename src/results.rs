//! Pure mapping from a `/predict` response to a renderable result model.
//!
//! Everything here is side-effect free: label cleanup, breed-name
//! localization, the ordered image-source fallback chain, and the default
//! literals substituted for missing response fields. The component layer
//! only walks the precomputed candidate list.

use crate::breeds;
use crate::detection::{DetectionType, PredictResponse};

/// Directory the inference service saves uploads under.
pub const UPLOADS_PREFIX: &str = "/static/uploads/";
/// Alternate asset root probed when the uploads path 404s.
pub const STATIC_PREFIX: &str = "/static/";
/// Shown when no other image source loads.
pub const PLACEHOLDER_IMAGE: &str = "/static/img/placeholder-image.jpg";

/// Localized fallback for labels missing from the breed table.
pub const UNKNOWN_BREED: &str = "未知品种";

const DEFAULT_CONFIDENCE_TEXT: &str = "95%";
const DEFAULT_CONFIDENCE_PERCENT: f64 = 95.0;
const DEFAULT_PROCESSING_TIME: &str = "0.5s";
const DEFAULT_IMAGE_ID: &str = "auto-generated";
const DEFAULT_MODEL_VERSION: &str = "ResNet50 v1.5";
const DEFAULT_DEVICE: &str = "GPU";
const DEFAULT_RESOLUTION: &str = "224x224";

/// Strip a leading `n<digits>-` classifier id, if present.
fn strip_classifier_prefix(raw: &str) -> &str {
    if let Some(rest) = raw.strip_prefix('n') {
        if let Some(dash) = rest.find('-') {
            if dash > 0 && rest[..dash].bytes().all(|b| b.is_ascii_digit()) {
                return &rest[dash + 1..];
            }
        }
    }
    raw
}

/// Normalize a raw classifier label into a readable English form:
/// `"n02099712-labrador_retriever"` becomes `"labrador retriever"`.
pub fn clean_label(raw: &str) -> String {
    strip_classifier_prefix(raw.trim()).replace('_', " ")
}

/// Uppercase the first letter of each word.
pub fn title_case(label: &str) -> String {
    label
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Resolve a raw breed label to its display form.
///
/// Mapped labels render as `中文名（English Name）`; unmapped labels fall
/// back to [`UNKNOWN_BREED`] with no English parenthetical.
pub fn breed_display_name(raw: &str) -> String {
    let cleaned = clean_label(raw);
    match breeds::localized_name(&cleaned.to_lowercase()) {
        Some(zh) => format!("{zh}（{}）", title_case(&cleaned)),
        None => UNKNOWN_BREED.to_string(),
    }
}

/// Turn the `image_path` response field into a fetchable URL.
pub fn resolve_image_path(path: &str) -> String {
    if path.starts_with("http") || path.starts_with('/') {
        path.to_string()
    } else if path.contains('/') {
        format!("/{path}")
    } else {
        format!("{UPLOADS_PREFIX}{path}")
    }
}

fn push_unique(candidates: &mut Vec<String>, src: String) {
    if !src.is_empty() && !candidates.contains(&src) {
        candidates.push(src);
    }
}

/// Ordered image sources for the result card. The renderer starts at the
/// front and advances one step per load failure; the placeholder at the
/// end always terminates the chain.
pub fn image_candidates(
    resp: &PredictResponse,
    preview_src: Option<&str>,
    cached_upload: Option<&str>,
) -> Vec<String> {
    let mut candidates = Vec::new();
    if let Some(path) = resp.image_path.as_deref() {
        push_unique(&mut candidates, resolve_image_path(path));
        if !path.starts_with("http") && !path.contains('/') {
            push_unique(&mut candidates, format!("{STATIC_PREFIX}{path}"));
        }
    }
    if let Some(src) = preview_src {
        push_unique(&mut candidates, src.to_string());
    }
    if let Some(src) = cached_upload {
        push_unique(&mut candidates, src.to_string());
    }
    push_unique(&mut candidates, PLACEHOLDER_IMAGE.to_string());
    candidates
}

pub fn format_confidence(percentage: Option<f64>) -> String {
    match percentage {
        Some(p) => format!("{:.2}%", p * 100.0),
        None => DEFAULT_CONFIDENCE_TEXT.to_string(),
    }
}

fn confidence_percent(percentage: Option<f64>) -> f64 {
    match percentage {
        Some(p) => (p * 100.0).clamp(0.0, 100.0),
        None => DEFAULT_CONFIDENCE_PERCENT,
    }
}

/// Everything the result card needs, with defaults already substituted.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultDisplay {
    pub detection: DetectionType,
    pub headline: String,
    /// Raw advisory text for non-breed detections.
    pub summary: Option<String>,
    pub confidence_text: String,
    pub confidence_percent: f64,
    pub processing_time: String,
    pub image_id: String,
    pub model_version: String,
    pub device: String,
    pub resolution: String,
    pub candidates: Vec<String>,
}

impl ResultDisplay {
    pub fn from_response(
        detection: DetectionType,
        resp: &PredictResponse,
        preview_src: Option<&str>,
        cached_upload: Option<&str>,
    ) -> Self {
        let (headline, summary) = match detection {
            DetectionType::Breed => {
                (breed_display_name(resp.label().unwrap_or_default()), None)
            }
            other => {
                let text = resp
                    .label()
                    .filter(|t| !t.is_empty())
                    .unwrap_or("Analysis complete.")
                    .to_string();
                (other.label().to_string(), Some(text))
            }
        };

        let system_info = resp.system_info.clone().unwrap_or_default();

        ResultDisplay {
            detection,
            headline,
            summary,
            confidence_text: format_confidence(resp.percentage),
            confidence_percent: confidence_percent(resp.percentage),
            processing_time: resp
                .processing_time
                .clone()
                .unwrap_or_else(|| DEFAULT_PROCESSING_TIME.to_string()),
            image_id: resp
                .image_id
                .clone()
                .unwrap_or_else(|| DEFAULT_IMAGE_ID.to_string()),
            model_version: system_info
                .model_version
                .unwrap_or_else(|| DEFAULT_MODEL_VERSION.to_string()),
            device: system_info.device.unwrap_or_else(|| DEFAULT_DEVICE.to_string()),
            resolution: system_info
                .resolution
                .unwrap_or_else(|| DEFAULT_RESOLUTION.to_string()),
            candidates: image_candidates(resp, preview_src, cached_upload),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cleans_classifier_prefix_and_underscores() {
        assert_eq!(
            clean_label("n02099712-labrador_retriever"),
            "labrador retriever"
        );
        assert_eq!(clean_label("golden_retriever"), "golden retriever");
        // A dash without a numeric id is part of the name, not a prefix.
        assert_eq!(clean_label("n-something"), "n-something");
        assert_eq!(clean_label("nabc-thing"), "nabc-thing");
    }

    #[test]
    fn title_cases_each_word() {
        assert_eq!(title_case("labrador retriever"), "Labrador Retriever");
        assert_eq!(title_case("pug"), "Pug");
    }

    #[test]
    fn mapped_breed_renders_localized_with_parenthetical() {
        let name = breed_display_name("n02099712-labrador_retriever");
        assert!(name.contains("拉布拉多寻回犬"));
        assert!(name.contains("Labrador Retriever"));
    }

    #[test]
    fn unmapped_breed_falls_back_without_parenthetical() {
        assert_eq!(breed_display_name("unknown_species_42"), UNKNOWN_BREED);
        // In the table? No: "miniature poodle" is not an entry, so the
        // fallback applies even though "poodle" alone would map.
        assert_eq!(breed_display_name("n02099267-miniature_poodle"), UNKNOWN_BREED);
        assert_eq!(breed_display_name(""), UNKNOWN_BREED);
    }

    #[test]
    fn resolves_image_paths() {
        assert_eq!(
            resolve_image_path("http://cdn.example/x.jpg"),
            "http://cdn.example/x.jpg"
        );
        assert_eq!(resolve_image_path("/static/uploads/a.jpg"), "/static/uploads/a.jpg");
        assert_eq!(resolve_image_path("uploads/a.jpg"), "/uploads/a.jpg");
        assert_eq!(resolve_image_path("a.jpg"), "/static/uploads/a.jpg");
    }

    #[test]
    fn candidate_chain_orders_path_preview_cache_placeholder() {
        let resp = PredictResponse {
            image_path: Some("breed_1a2b_dog.jpg".to_string()),
            ..Default::default()
        };
        let candidates =
            image_candidates(&resp, Some("data:image/png;base64,p"), Some("data:image/png;base64,c"));
        assert_eq!(
            candidates,
            vec![
                "/static/uploads/breed_1a2b_dog.jpg".to_string(),
                "/static/breed_1a2b_dog.jpg".to_string(),
                "data:image/png;base64,p".to_string(),
                "data:image/png;base64,c".to_string(),
                PLACEHOLDER_IMAGE.to_string(),
            ]
        );
    }

    #[test]
    fn cached_image_precedes_placeholder_when_path_is_unreachable() {
        // The renderer advances through this list on load failure, so an
        // unreachable image_path ends on the cached upload, not the
        // placeholder.
        let resp = PredictResponse {
            image_path: Some("missing.jpg".to_string()),
            ..Default::default()
        };
        let cached = "data:image/jpeg;base64,abc";
        let candidates = image_candidates(&resp, None, Some(cached));
        let cached_pos = candidates.iter().position(|c| c == cached).unwrap();
        let placeholder_pos = candidates
            .iter()
            .position(|c| c == PLACEHOLDER_IMAGE)
            .unwrap();
        assert!(cached_pos < placeholder_pos);
    }

    #[test]
    fn candidates_never_empty_and_deduped() {
        let candidates = image_candidates(&PredictResponse::default(), None, None);
        assert_eq!(candidates, vec![PLACEHOLDER_IMAGE.to_string()]);

        let resp = PredictResponse {
            image_path: Some(PLACEHOLDER_IMAGE.to_string()),
            ..Default::default()
        };
        let candidates = image_candidates(&resp, Some(PLACEHOLDER_IMAGE), None);
        assert_eq!(candidates.len(), 1);
    }

    #[test]
    fn confidence_formats_to_two_decimals_with_default() {
        assert_eq!(format_confidence(Some(0.87)), "87.00%");
        assert_eq!(format_confidence(Some(1.0)), "100.00%");
        assert_eq!(format_confidence(None), "95%");
    }

    #[test]
    fn breed_display_from_response() {
        let resp = PredictResponse {
            result: Some("n02099267-miniature_poodle".to_string()),
            percentage: Some(0.87),
            ..Default::default()
        };
        let display =
            ResultDisplay::from_response(DetectionType::Breed, &resp, None, None);
        assert_eq!(display.confidence_text, "87.00%");
        assert_eq!(display.headline, UNKNOWN_BREED);
        assert!(display.summary.is_none());
        assert_eq!(display.processing_time, "0.5s");
        assert_eq!(display.model_version, "ResNet50 v1.5");
        assert_eq!(display.device, "GPU");
        assert_eq!(display.resolution, "224x224");
    }

    #[test]
    fn advisory_display_carries_raw_text() {
        let resp = PredictResponse {
            result: Some("Mild tartar detected. Oral health score: 85/100.".to_string()),
            ..Default::default()
        };
        let display = ResultDisplay::from_response(DetectionType::Oral, &resp, None, None);
        assert_eq!(
            display.summary.as_deref(),
            Some("Mild tartar detected. Oral health score: 85/100.")
        );
    }
}
