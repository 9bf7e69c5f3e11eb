//! Rekognition client construction and detection calls.

mod rk_client;
mod rk_config;

pub use rk_client::RekognitionClient;
pub use rk_config::RekognitionConfig;
