//! Input handling: file type detection and text extraction

pub mod extractor;
pub mod file_detector;
pub mod manager;

pub use extractor::{extract, Document, EmbeddedImage, ExtractedContent, ImageKind};
pub use file_detector::DocumentFormat;
pub use manager::InputManager;
