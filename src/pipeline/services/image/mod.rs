pub mod color_strip;
pub mod encoding;
pub mod region;

pub use color_strip::{
    render, ColorStripRenderer, RemainderPolicy, DEFAULT_STRIP_HEIGHT, DEFAULT_STRIP_WIDTH,
};
pub use encoding::{ImageEncoder, DEFAULT_JPEG_QUALITY};
pub use region::extract_bounding_box;
