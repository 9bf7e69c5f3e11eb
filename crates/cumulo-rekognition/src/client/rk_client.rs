//! High-level Rekognition client implementation.

use std::sync::Arc;

use aws_sdk_rekognition::Client;
use aws_sdk_rekognition::error::DisplayErrorContext;
use aws_sdk_rekognition::types::{Image, S3Object, TextDetection, TextTypes};
use cumulo_batch::{Dispatcher, Outcome};
use tracing::{debug, error, info, instrument};

use crate::types::{BoundingBox, WordDetection};
use crate::{
    Error, RekognitionConfig, Result, TRACING_TARGET_CLIENT, TRACING_TARGET_DETECTION,
};

/// High-level Rekognition text-detection client.
///
/// The underlying SDK client is built once from an immutable
/// [`RekognitionConfig`] and shared across all concurrent detection
/// calls; cloning the client is cheap.
#[derive(Clone)]
pub struct RekognitionClient {
    inner: Client,
    config: Arc<RekognitionConfig>,
}

impl RekognitionClient {
    /// Creates a new Rekognition client with the provided configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration validation fails.
    #[instrument(skip(config), target = TRACING_TARGET_CLIENT, fields(bucket = %config.bucket()))]
    pub async fn new(config: RekognitionConfig) -> Result<Self> {
        info!(target: TRACING_TARGET_CLIENT, "Initializing Rekognition client");

        config.validate().map_err(|e| {
            error!(target: TRACING_TARGET_CLIENT, error = %e, "Configuration validation failed");
            e
        })?;

        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(profile) = config.profile() {
            loader = loader.profile_name(profile);
        }
        if let Some(region) = config.region() {
            loader = loader.region(aws_config::Region::new(region.to_string()));
        }

        let sdk_config = loader.load().await;
        let inner = Client::new(&sdk_config);

        info!(
            target: TRACING_TARGET_CLIENT,
            bucket = %config.bucket(),
            region = config.region(),
            "Rekognition client initialized successfully"
        );

        Ok(Self {
            inner,
            config: Arc::new(config),
        })
    }

    /// Runs text detection on one stored object and returns its
    /// word-level detections.
    ///
    /// Non-word detections (lines) are dropped; an image with no text
    /// yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns an operation error if the detection request fails, or an
    /// invalid-response error if the provider response is missing
    /// required fields.
    #[instrument(skip(self), target = TRACING_TARGET_DETECTION, fields(bucket = %self.config.bucket(), key = %key))]
    pub async fn detect_text(&self, key: &str) -> Result<Vec<WordDetection>> {
        debug!(
            target: TRACING_TARGET_DETECTION,
            bucket = %self.config.bucket(),
            key = %key,
            "Running text detection"
        );

        let s3_object = S3Object::builder()
            .bucket(self.config.bucket())
            .name(key)
            .build();
        let image = Image::builder().s3_object(s3_object).build();

        let start = std::time::Instant::now();
        let response = self
            .inner
            .detect_text()
            .image(image)
            .send()
            .await
            .map_err(|e| {
                error!(
                    target: TRACING_TARGET_DETECTION,
                    key = %key,
                    error = %e,
                    "Text detection request failed"
                );
                Error::operation("detect_text", DisplayErrorContext(&e).to_string())
            })?;

        let mut words = Vec::new();
        for detection in response.text_detections() {
            if !matches!(detection.r#type(), Some(TextTypes::Word)) {
                continue;
            }
            words.push(decode_word(detection)?);
        }

        debug!(
            target: TRACING_TARGET_DETECTION,
            key = %key,
            words = words.len(),
            elapsed = ?start.elapsed(),
            "Text detection completed"
        );

        Ok(words)
    }

    /// Runs text detection over a batch of stored-object keys through
    /// the dispatcher.
    ///
    /// The outer result is index-aligned with `keys`. The provider has
    /// no expected per-item failure here, so any request error aborts
    /// the batch.
    ///
    /// # Errors
    ///
    /// Propagates the first failed detection call.
    #[instrument(skip(self, keys, dispatcher), target = TRACING_TARGET_DETECTION, fields(bucket = %self.config.bucket(), items = keys.len()))]
    pub async fn detect_text_batch(
        &self,
        keys: Vec<String>,
        dispatcher: &Dispatcher,
    ) -> Result<Vec<Vec<WordDetection>>> {
        let outcomes = dispatcher
            .run(keys, |key| async move {
                let words = self.detect_text(&key).await?;
                Ok(Outcome::Success(words))
            })
            .await?;

        let detections: Vec<Vec<WordDetection>> = outcomes
            .into_iter()
            .map(|outcome| outcome.into_success().unwrap_or_default())
            .collect();

        info!(
            target: TRACING_TARGET_DETECTION,
            images = detections.len(),
            words = detections.iter().map(Vec::len).sum::<usize>(),
            "Detection batch finished"
        );

        Ok(detections)
    }
}

impl std::fmt::Debug for RekognitionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RekognitionClient")
            .field("bucket", &self.config.bucket())
            .field("region", &self.config.region())
            .finish()
    }
}

/// Decodes one provider detection into a typed word, failing on any
/// missing field rather than papering over an unexpected shape.
fn decode_word(detection: &TextDetection) -> Result<WordDetection> {
    let text = detection
        .detected_text()
        .ok_or_else(|| Error::invalid_response("text detection without detected text"))?;

    let bbox = detection
        .geometry()
        .and_then(|geometry| geometry.bounding_box())
        .ok_or_else(|| Error::invalid_response("text detection without bounding box"))?;

    let (Some(left), Some(top), Some(width), Some(height)) =
        (bbox.left(), bbox.top(), bbox.width(), bbox.height())
    else {
        return Err(Error::invalid_response(
            "bounding box with missing coordinates",
        ));
    };

    let confidence = detection
        .confidence()
        .ok_or_else(|| Error::invalid_response("text detection without confidence"))?;

    Ok(WordDetection::new(
        text,
        BoundingBox::new(left, top, width, height),
        confidence,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_word_complete_detection() {
        let detection = TextDetection::builder()
            .detected_text("total")
            .r#type(TextTypes::Word)
            .confidence(98.5)
            .geometry(
                aws_sdk_rekognition::types::Geometry::builder()
                    .bounding_box(
                        aws_sdk_rekognition::types::BoundingBox::builder()
                            .left(0.1)
                            .top(0.2)
                            .width(0.3)
                            .height(0.05)
                            .build(),
                    )
                    .build(),
            )
            .build();

        let word = decode_word(&detection).unwrap();
        assert_eq!(word.text, "total");
        assert_eq!(word.bounding_box, BoundingBox::new(0.1, 0.2, 0.3, 0.05));
        assert_eq!(word.confidence, 98.5);
    }

    #[test]
    fn test_decode_word_missing_geometry_is_invalid() {
        let detection = TextDetection::builder()
            .detected_text("total")
            .r#type(TextTypes::Word)
            .confidence(98.5)
            .build();

        let err = decode_word(&detection).unwrap_err();
        assert_eq!(err.category(), "invalid_response");
    }

    #[test]
    fn test_decode_word_missing_coordinates_is_invalid() {
        let detection = TextDetection::builder()
            .detected_text("total")
            .confidence(98.5)
            .geometry(
                aws_sdk_rekognition::types::Geometry::builder()
                    .bounding_box(
                        aws_sdk_rekognition::types::BoundingBox::builder()
                            .left(0.1)
                            .build(),
                    )
                    .build(),
            )
            .build();

        let err = decode_word(&detection).unwrap_err();
        assert_eq!(err.category(), "invalid_response");
    }
}
