pub mod annotator;
pub mod client;
pub mod credentials;
pub mod lazy_client;
pub mod types;

pub use annotator::ImageAnnotator;
pub use client::{ServiceSettings, VisionClient};
pub use credentials::{ServiceAccountCredentials, TokenProvider, CREDENTIALS_ENV};
pub use lazy_client::LazyAnnotator;
pub use types::{AnnotateImageResponse, Feature};
