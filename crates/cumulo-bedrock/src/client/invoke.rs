//! Invoke configuration, wire shapes, and completion results.

use serde::{Deserialize, Serialize};

/// Number of prompt/completion characters counted as one token by the
/// estimate. A crude heuristic, not a tokenizer; kept for parity with
/// existing reporting.
const CHARS_PER_TOKEN: usize = 6;

/// Sampling and routing parameters for one invocation.
///
/// All fields have documented defaults:
///
/// | Field          | Default                     |
/// |----------------|-----------------------------|
/// | `model_id`     | `anthropic.claude-v2:1`     |
/// | `max_tokens`   | `4000`                      |
/// | `temperature`  | `0.0`                       |
/// | `top_p`        | `0.9`                       |
/// | `accept`       | `application/json`          |
/// | `content_type` | `application/json`          |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvokeConfig {
    /// Identifier of the model to invoke.
    pub model_id: String,
    /// Maximum number of tokens the model may generate.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
    /// Nucleus sampling cutoff.
    pub top_p: f32,
    /// Accept header for the response body.
    pub accept: String,
    /// Content type of the request body.
    pub content_type: String,
}

impl InvokeConfig {
    /// Creates an invoke configuration with the documented defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the model identifier.
    pub fn with_model_id(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = model_id.into();
        self
    }

    /// Sets the maximum number of generated tokens.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Sets the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Sets the nucleus sampling cutoff.
    pub fn with_top_p(mut self, top_p: f32) -> Self {
        self.top_p = top_p;
        self
    }
}

impl Default for InvokeConfig {
    fn default() -> Self {
        Self {
            model_id: "anthropic.claude-v2:1".to_string(),
            max_tokens: 4000,
            temperature: 0.0,
            top_p: 0.9,
            accept: "application/json".to_string(),
            content_type: "application/json".to_string(),
        }
    }
}

/// Request body for the invoke call.
#[derive(Debug, Serialize)]
pub(crate) struct InvokeRequestBody<'a> {
    pub prompt: &'a str,
    pub max_tokens_to_sample: u32,
    pub temperature: f32,
    pub top_p: f32,
}

/// Response body of the invoke call.
#[derive(Debug, Deserialize)]
pub(crate) struct InvokeResponseBody {
    pub completion: String,
    #[serde(default)]
    pub stop_reason: Option<String>,
}

/// Approximate token counts for one invocation.
///
/// Computed as `floor(chars / 6)` on the prompt and the completion
/// respectively. This is character arithmetic, not tokenization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenEstimate {
    /// Approximate token count of the prompt.
    pub input: usize,
    /// Approximate token count of the generated text.
    pub output: usize,
}

impl TokenEstimate {
    /// Estimates token counts for a prompt and its completion.
    pub fn approximate(prompt: &str, completion: &str) -> Self {
        Self {
            input: prompt.chars().count() / CHARS_PER_TOKEN,
            output: completion.chars().count() / CHARS_PER_TOKEN,
        }
    }
}

/// Result of one invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Completion {
    /// Text generated by the model.
    pub text: String,
    /// Why generation stopped, when the provider reports it.
    pub stop_reason: Option<String>,
    /// Approximate input/output token counts.
    pub usage: TokenEstimate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invoke_config_defaults() {
        let config = InvokeConfig::new();
        assert_eq!(config.model_id, "anthropic.claude-v2:1");
        assert_eq!(config.max_tokens, 4000);
        assert_eq!(config.temperature, 0.0);
        assert_eq!(config.top_p, 0.9);
        assert_eq!(config.accept, "application/json");
        assert_eq!(config.content_type, "application/json");
    }

    #[test]
    fn test_invoke_config_overrides() {
        let config = InvokeConfig::new()
            .with_model_id("anthropic.claude-3-haiku-20240307-v1:0")
            .with_max_tokens(512)
            .with_temperature(0.7)
            .with_top_p(0.5);

        assert_eq!(config.model_id, "anthropic.claude-3-haiku-20240307-v1:0");
        assert_eq!(config.max_tokens, 512);
        assert_eq!(config.temperature, 0.7);
        assert_eq!(config.top_p, 0.5);
        // Untouched fields keep their defaults
        assert_eq!(config.accept, "application/json");
    }

    #[test]
    fn test_request_body_shape() {
        let body = InvokeRequestBody {
            prompt: "Human: hi\n\nAssistant:",
            max_tokens_to_sample: 100,
            temperature: 0.0,
            top_p: 0.9,
        };

        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["prompt"], "Human: hi\n\nAssistant:");
        assert_eq!(value["max_tokens_to_sample"], 100);
        assert_eq!(value["temperature"], 0.0);
        assert_eq!(value["top_p"], 0.9);
    }

    #[test]
    fn test_response_body_decoding() {
        let decoded: InvokeResponseBody =
            serde_json::from_str(r#"{"completion": " Hello!", "stop_reason": "stop_sequence"}"#)
                .unwrap();
        assert_eq!(decoded.completion, " Hello!");
        assert_eq!(decoded.stop_reason.as_deref(), Some("stop_sequence"));

        // stop_reason is optional
        let decoded: InvokeResponseBody =
            serde_json::from_str(r#"{"completion": "ok"}"#).unwrap();
        assert!(decoded.stop_reason.is_none());

        // completion is not
        let result: Result<InvokeResponseBody, _> = serde_json::from_str(r#"{"other": 1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_token_estimate_is_floor_of_sixth() {
        let estimate = TokenEstimate::approximate("abcdef", "abcdefabcde");
        assert_eq!(estimate.input, 1); // 6 chars
        assert_eq!(estimate.output, 1); // 11 chars, floor(11/6)

        let estimate = TokenEstimate::approximate("", "x".repeat(600).as_str());
        assert_eq!(estimate.input, 0);
        assert_eq!(estimate.output, 100);
    }

    #[test]
    fn test_token_estimate_counts_chars_not_bytes() {
        // Twelve non-ASCII characters, more bytes than characters.
        let prompt = "éééééééééééé";
        let estimate = TokenEstimate::approximate(&prompt[..], "");
        assert_eq!(estimate.input, prompt.chars().count() / 6);
    }
}
