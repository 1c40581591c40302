use crate::common::{BoundingBox, Vertex};
use crate::error::AppError;

/// Turn crop-hint corners into an axis-aligned box.
///
/// Corners must arrive clockwise from the top-left: top-left, top-right,
/// bottom-right and, optionally, bottom-left. The box is taken from the first
/// three; anything that doesn't describe a non-empty rectangle in that order is
/// rejected instead of yielding a negative or empty box.
pub fn extract_bounding_box(corners: &[Vertex]) -> Result<BoundingBox, AppError> {
    if corners.len() < 3 || corners.len() > 4 {
        return Err(AppError::MalformedRegion(format!(
            "expected 3 or 4 corners, got {}",
            corners.len()
        )));
    }

    let (top_left, top_right, bottom_right) = (corners[0], corners[1], corners[2]);
    let (width, height) = match (
        top_right.x.checked_sub(top_left.x),
        bottom_right.y.checked_sub(top_left.y),
    ) {
        (Some(width), Some(height)) if width > 0 && height > 0 => (width, height),
        (width, height) => {
            return Err(AppError::MalformedRegion(format!(
                "corners {:?} give a {:?}x{:?} box",
                corners, width, height
            )))
        }
    };

    let clockwise = top_right.y == top_left.y
        && bottom_right.x == top_right.x
        && corners
            .get(3)
            .map_or(true, |bottom_left| {
                bottom_left.x == top_left.x && bottom_left.y == bottom_right.y
            });
    if !clockwise {
        return Err(AppError::MalformedRegion(format!(
            "corners {:?} are not an axis-aligned clockwise rectangle",
            corners
        )));
    }

    Ok(BoundingBox {
        x: top_left.x,
        y: top_left.y,
        width,
        height,
    })
}
