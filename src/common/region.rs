use serde::{Deserialize, Serialize};

/// Corner of a crop-hint polygon in source image pixels.
///
/// The annotation service omits zero-valued coordinates, so both fields default to 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vertex {
    #[serde(default)]
    pub x: i32,
    #[serde(default)]
    pub y: i32,
}

impl Vertex {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// Region forwarded to the host's detection overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedObject {
    pub label: String,
    pub confidence: f32,
    pub bbox: BoundingBox,
    pub display_color: [u8; 3],
}

impl DetectedObject {
    pub const SELECTED_AREA: &'static str = "selected area";

    pub fn selected_area(bbox: BoundingBox, display_color: [u8; 3]) -> Self {
        Self {
            label: Self::SELECTED_AREA.to_string(),
            confidence: 1.0,
            bbox,
            display_color,
        }
    }
}
