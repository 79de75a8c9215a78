//! Detection types and the wire format of the `/predict` endpoint.

use serde::Deserialize;

/// Which classifier/workflow a submitted image targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionType {
    Breed,
    Oral,
    Skin,
    Eye,
    Excrement,
    Vomit,
    Ear,
}

impl DetectionType {
    pub const ALL: [DetectionType; 7] = [
        DetectionType::Breed,
        DetectionType::Oral,
        DetectionType::Skin,
        DetectionType::Eye,
        DetectionType::Excrement,
        DetectionType::Vomit,
        DetectionType::Ear,
    ];

    /// Value sent in the `detection_type` form field.
    pub fn wire_value(self) -> &'static str {
        match self {
            DetectionType::Breed => "breed",
            DetectionType::Oral => "oral",
            DetectionType::Skin => "skin",
            DetectionType::Eye => "eye",
            DetectionType::Excrement => "excrement",
            DetectionType::Vomit => "vomit",
            DetectionType::Ear => "ear",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DetectionType::Breed => "Breed ID",
            DetectionType::Oral => "Oral Health",
            DetectionType::Skin => "Skin",
            DetectionType::Eye => "Eyes",
            DetectionType::Excrement => "Stool",
            DetectionType::Vomit => "Vomit",
            DetectionType::Ear => "Ears",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            DetectionType::Breed => "Identify your dog's breed from a photo.",
            DetectionType::Oral => "Check teeth and gums for tartar and inflammation.",
            DetectionType::Skin => "Screen the coat and skin for visible conditions.",
            DetectionType::Eye => "Look for signs of conjunctivitis and discharge.",
            DetectionType::Excrement => "Assess stool color and shape for digestive issues.",
            DetectionType::Vomit => "Check vomit for abnormal contents.",
            DetectionType::Ear => "Inspect the ear canal for mites and buildup.",
        }
    }
}

/// Model metadata attached to a prediction, when the service provides it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SystemInfo {
    pub model_version: Option<String>,
    pub device: Option<String>,
    pub resolution: Option<String>,
}

/// Loosely-structured response body of `POST /predict`.
///
/// Every field is optional at the decode layer; the renderer substitutes
/// documented defaults rather than failing on a missing field.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PredictResponse {
    pub status: Option<String>,
    pub detection_type: Option<String>,
    pub result: Option<String>,
    /// Legacy field name still emitted by older service builds.
    pub breed: Option<String>,
    pub message: Option<String>,
    pub error: Option<String>,
    pub image_path: Option<String>,
    pub image_id: Option<String>,
    pub percentage: Option<f64>,
    pub processing_time: Option<String>,
    pub system_info: Option<SystemInfo>,
}

impl PredictResponse {
    /// The classifier label, whichever field name the service used.
    pub fn label(&self) -> Option<&str> {
        self.result.as_deref().or(self.breed.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_success_body() {
        let body = r#"{
            "status": "success",
            "detection_type": "breed",
            "result": "n02099267-miniature_poodle",
            "percentage": 0.87,
            "image_path": "breed_1a2b3c4d_dog.jpg"
        }"#;
        let resp: PredictResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.label(), Some("n02099267-miniature_poodle"));
        assert_eq!(resp.percentage, Some(0.87));
        assert_eq!(resp.image_path.as_deref(), Some("breed_1a2b3c4d_dog.jpg"));
        assert!(resp.system_info.is_none());
    }

    #[test]
    fn parses_error_body() {
        let body = r#"{
            "status": "error",
            "detection_type": "breed",
            "result": null,
            "image_path": null,
            "message": "处理失败：文件名为空"
        }"#;
        let resp: PredictResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.status.as_deref(), Some("error"));
        assert_eq!(resp.detection_type.as_deref(), Some("breed"));
        assert_eq!(resp.message.as_deref(), Some("处理失败：文件名为空"));
        assert!(resp.error.is_none());
        assert!(resp.label().is_none());
    }

    #[test]
    fn parses_system_info() {
        let body = r#"{
            "result": "n02110958-pug",
            "processing_time": "0.42s",
            "image_id": "breed_9f1c",
            "system_info": {"model_version": "ConvNeXt-T", "device": "cuda", "resolution": "224x224"}
        }"#;
        let resp: PredictResponse = serde_json::from_str(body).unwrap();
        let info = resp.system_info.unwrap();
        assert_eq!(info.model_version.as_deref(), Some("ConvNeXt-T"));
        assert_eq!(info.device.as_deref(), Some("cuda"));
        assert_eq!(info.resolution.as_deref(), Some("224x224"));
    }

    #[test]
    fn legacy_breed_field_is_recognized() {
        let resp: PredictResponse =
            serde_json::from_str(r#"{"breed": "golden_retriever"}"#).unwrap();
        assert_eq!(resp.label(), Some("golden_retriever"));
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let resp: PredictResponse =
            serde_json::from_str(r#"{"result": "ok", "extra": [1, 2, 3]}"#).unwrap();
        assert_eq!(resp.label(), Some("ok"));
    }
}
