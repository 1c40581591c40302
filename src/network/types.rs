//! Wire types for the `images:annotate` REST endpoint.
//!
//! The service drops fields holding default values (zero coordinates, empty
//! lists), so every response field carries `#[serde(default)]`.

use serde::{Deserialize, Serialize};

use crate::common::{ColorEntry, Palette, Vertex};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Feature {
    ImageProperties,
    CropHints,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchAnnotateImagesRequest {
    pub requests: Vec<AnnotateImageRequest>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnnotateImageRequest {
    pub image: RequestImage,
    pub features: Vec<FeatureRequest>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RequestImage {
    /// Base64 of the encoded image bytes.
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FeatureRequest {
    #[serde(rename = "type")]
    pub kind: Feature,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchAnnotateImagesResponse {
    #[serde(default)]
    pub responses: Vec<AnnotateImageResponse>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotateImageResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_properties_annotation: Option<ImageProperties>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crop_hints_annotation: Option<CropHintsAnnotation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Status>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageProperties {
    #[serde(default)]
    pub dominant_colors: DominantColorsAnnotation,
}

impl ImageProperties {
    /// Dominant colors in the order the service reported them.
    pub fn palette(&self) -> Palette {
        self.dominant_colors
            .colors
            .iter()
            .map(|info| ColorEntry::new(info.color.to_rgb(), info.pixel_fraction as f64))
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DominantColorsAnnotation {
    #[serde(default)]
    pub colors: Vec<ColorInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorInfo {
    #[serde(default)]
    pub color: Color,
    #[serde(default)]
    pub score: f32,
    #[serde(default)]
    pub pixel_fraction: f32,
}

/// Channels are floats in [0, 255].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Color {
    #[serde(default)]
    pub red: f32,
    #[serde(default)]
    pub green: f32,
    #[serde(default)]
    pub blue: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alpha: Option<f32>,
}

impl Color {
    /// Truncates each channel, saturating outside [0, 255].
    pub fn to_rgb(&self) -> [u8; 3] {
        let channel = |value: f32| value.clamp(0.0, 255.0) as u8;
        [channel(self.red), channel(self.green), channel(self.blue)]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CropHintsAnnotation {
    #[serde(default)]
    pub crop_hints: Vec<CropHint>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CropHint {
    #[serde(default)]
    pub bounding_poly: BoundingPoly,
    #[serde(default)]
    pub confidence: f32,
    #[serde(default)]
    pub importance_fraction: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingPoly {
    #[serde(default)]
    pub vertices: Vec<Vertex>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Status {
    #[serde(default)]
    pub code: i32,
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_image_properties_response() {
        let body = r#"{
            "responses": [{
                "imagePropertiesAnnotation": {
                    "dominantColors": {
                        "colors": [
                            {"color": {"red": 250.7, "green": 12, "blue": 0}, "score": 0.6, "pixelFraction": 0.4},
                            {"color": {"green": 128}, "score": 0.2, "pixelFraction": 0.1}
                        ]
                    }
                }
            }]
        }"#;

        let batch: BatchAnnotateImagesResponse = serde_json::from_str(body).unwrap();
        let properties = batch.responses[0]
            .image_properties_annotation
            .as_ref()
            .unwrap();
        let palette = properties.palette();

        assert_eq!(palette.len(), 2);
        assert_eq!(palette.entries()[0].color, [250, 12, 0]);
        assert_eq!(palette.entries()[1].color, [0, 128, 0]);
        assert!((palette.entries()[1].weight - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_parse_crop_hints_with_omitted_zero_coordinates() {
        let body = r#"{
            "cropHintsAnnotation": {
                "cropHints": [{
                    "boundingPoly": {"vertices": [{}, {"x": 639}, {"x": 639, "y": 479}, {"y": 479}]},
                    "confidence": 0.8,
                    "importanceFraction": 1.0
                }]
            }
        }"#;

        let response: AnnotateImageResponse = serde_json::from_str(body).unwrap();
        let hints = response.crop_hints_annotation.unwrap();
        let vertices = &hints.crop_hints[0].bounding_poly.vertices;
        assert_eq!(vertices[0], Vertex::new(0, 0));
        assert_eq!(vertices[3], Vertex::new(0, 479));
    }

    #[test]
    fn test_request_serializes_feature_names() {
        let request = BatchAnnotateImagesRequest {
            requests: vec![AnnotateImageRequest {
                image: RequestImage {
                    content: "AAAA".to_string(),
                },
                features: vec![
                    FeatureRequest {
                        kind: Feature::ImageProperties,
                    },
                    FeatureRequest {
                        kind: Feature::CropHints,
                    },
                ],
            }],
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["requests"][0]["features"][0]["type"], "IMAGE_PROPERTIES");
        assert_eq!(json["requests"][0]["features"][1]["type"], "CROP_HINTS");
        assert_eq!(json["requests"][0]["image"]["content"], "AAAA");
    }

    #[test]
    fn test_color_channels_saturate() {
        let color = Color {
            red: 300.0,
            green: -4.0,
            blue: 17.9,
            alpha: None,
        };
        assert_eq!(color.to_rgb(), [255, 0, 17]);
    }
}
