//! Bedrock client construction, invoke configuration, and wire types.

mod br_client;
mod br_config;
mod invoke;

pub use br_client::BedrockClient;
pub use br_config::BedrockConfig;
pub use invoke::{Completion, InvokeConfig, TokenEstimate};
