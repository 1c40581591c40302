pub mod annotate_step;
pub mod crop_region_step;
pub mod data_dict_step;
pub mod encode_step;
pub mod render_strip_step;

pub use annotate_step::AnnotateStep;
pub use crop_region_step::CropRegionStep;
pub use data_dict_step::{DataDictStep, CROP_HINTS_KEY, IMAGE_PROPERTIES_KEY};
pub use encode_step::EncodeImageStep;
pub use render_strip_step::RenderStripStep;
