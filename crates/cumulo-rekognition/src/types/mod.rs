//! Typed text-detection results.

mod word_detection;

pub use word_detection::{BoundingBox, WordDetection};
