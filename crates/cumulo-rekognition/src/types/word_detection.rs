//! Word-level detection structures.
//!
//! These are the typed counterparts of the provider's response shape,
//! decoded once at the boundary instead of threading dynamic response
//! maps through the caller.

use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box of a detected word, in coordinates
/// relative to the image dimensions (all values in `0.0..=1.0`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Left edge, as a ratio of image width.
    pub left: f32,
    /// Top edge, as a ratio of image height.
    pub top: f32,
    /// Box width, as a ratio of image width.
    pub width: f32,
    /// Box height, as a ratio of image height.
    pub height: f32,
}

impl BoundingBox {
    /// Creates a new bounding box.
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

/// One word detected in an image, with its location and the provider's
/// confidence score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordDetection {
    /// The detected text.
    pub text: String,
    /// Where the word was found.
    pub bounding_box: BoundingBox,
    /// Provider confidence, in percent (`0.0..=100.0`).
    pub confidence: f32,
}

impl WordDetection {
    /// Creates a new word detection.
    pub fn new(text: impl Into<String>, bounding_box: BoundingBox, confidence: f32) -> Self {
        Self {
            text: text.into(),
            bounding_box,
            confidence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_detection_construction() {
        let bbox = BoundingBox::new(0.1, 0.2, 0.3, 0.05);
        let word = WordDetection::new("invoice", bbox, 99.2);

        assert_eq!(word.text, "invoice");
        assert_eq!(word.bounding_box.left, 0.1);
        assert_eq!(word.confidence, 99.2);
    }
}
