pub mod color;
pub mod frame;
pub mod region;

pub use color::{ColorEntry, Palette};
pub use frame::{ChannelOrder, Frame};
pub use region::{BoundingBox, DetectedObject, Vertex};
