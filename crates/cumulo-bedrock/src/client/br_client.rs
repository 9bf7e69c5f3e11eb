//! High-level Bedrock runtime client implementation.

use std::sync::Arc;

use aws_sdk_bedrockruntime::Client;
use aws_sdk_bedrockruntime::error::DisplayErrorContext;
use aws_sdk_bedrockruntime::primitives::Blob;
use cumulo_batch::{Dispatcher, Outcome};
use tracing::{debug, error, info, instrument};

use super::invoke::{InvokeRequestBody, InvokeResponseBody};
use crate::client::{BedrockConfig, Completion, InvokeConfig, TokenEstimate};
use crate::{Error, Result, TRACING_TARGET_CLIENT, TRACING_TARGET_INVOKE};

/// High-level Bedrock runtime client for text generation.
///
/// The underlying SDK client is built once from an immutable
/// [`BedrockConfig`] and shared across all concurrent invocations;
/// cloning the client is cheap.
#[derive(Clone)]
pub struct BedrockClient {
    inner: Client,
    config: Arc<BedrockConfig>,
}

impl BedrockClient {
    /// Creates a new Bedrock client with the provided configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration validation fails.
    #[instrument(skip(config), target = TRACING_TARGET_CLIENT, fields(region = %config.region()))]
    pub async fn new(config: BedrockConfig) -> Result<Self> {
        info!(target: TRACING_TARGET_CLIENT, "Initializing Bedrock client");

        config.validate().map_err(|e| {
            error!(target: TRACING_TARGET_CLIENT, error = %e, "Configuration validation failed");
            e
        })?;

        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(config.region().to_string()));
        if let Some(profile) = config.profile() {
            loader = loader.profile_name(profile);
        }

        let sdk_config = loader.load().await;
        let inner = Client::new(&sdk_config);

        info!(
            target: TRACING_TARGET_CLIENT,
            region = %config.region(),
            "Bedrock client initialized successfully"
        );

        Ok(Self {
            inner,
            config: Arc::new(config),
        })
    }

    /// Invokes the model once with the given prompt.
    ///
    /// The returned usage is the `floor(chars / 6)` estimate over the
    /// prompt and the completion; it is approximate by construction.
    ///
    /// # Errors
    ///
    /// Returns an operation error if the invocation fails, or an
    /// invalid-response error if the response body does not decode into
    /// the expected shape.
    #[instrument(skip(self, prompt, invoke_config), target = TRACING_TARGET_INVOKE, fields(model_id = %invoke_config.model_id, prompt_chars = prompt.chars().count()))]
    pub async fn invoke(&self, prompt: &str, invoke_config: &InvokeConfig) -> Result<Completion> {
        debug!(
            target: TRACING_TARGET_INVOKE,
            model_id = %invoke_config.model_id,
            "Invoking model"
        );

        let body = serde_json::to_vec(&InvokeRequestBody {
            prompt,
            max_tokens_to_sample: invoke_config.max_tokens,
            temperature: invoke_config.temperature,
            top_p: invoke_config.top_p,
        })?;

        let start = std::time::Instant::now();
        let response = self
            .inner
            .invoke_model()
            .model_id(&invoke_config.model_id)
            .content_type(&invoke_config.content_type)
            .accept(&invoke_config.accept)
            .body(Blob::new(body))
            .send()
            .await
            .map_err(|e| {
                error!(
                    target: TRACING_TARGET_INVOKE,
                    model_id = %invoke_config.model_id,
                    error = %e,
                    "Model invocation failed"
                );
                Error::operation("invoke_model", DisplayErrorContext(&e).to_string())
            })?;

        let decoded: InvokeResponseBody = serde_json::from_slice(response.body().as_ref())
            .map_err(|e| Error::invalid_response(format!("invoke response body: {e}")))?;

        let usage = TokenEstimate::approximate(prompt, &decoded.completion);

        debug!(
            target: TRACING_TARGET_INVOKE,
            model_id = %invoke_config.model_id,
            tokens_in = usage.input,
            tokens_out = usage.output,
            elapsed = ?start.elapsed(),
            "Model invocation completed"
        );

        Ok(Completion {
            text: decoded.completion,
            stop_reason: decoded.stop_reason,
            usage,
        })
    }

    /// Invokes the model over a batch of prompts through the
    /// dispatcher.
    ///
    /// Completions are index-aligned with `prompts`. The provider has
    /// no expected per-item failure here, so any request error aborts
    /// the batch.
    ///
    /// # Errors
    ///
    /// Propagates the first failed invocation.
    #[instrument(skip(self, prompts, invoke_config, dispatcher), target = TRACING_TARGET_INVOKE, fields(model_id = %invoke_config.model_id, items = prompts.len()))]
    pub async fn invoke_batch(
        &self,
        prompts: Vec<String>,
        invoke_config: &InvokeConfig,
        dispatcher: &Dispatcher,
    ) -> Result<Vec<Completion>> {
        let outcomes = dispatcher
            .run(prompts, |prompt| async move {
                let completion = self.invoke(&prompt, invoke_config).await?;
                Ok::<_, Error>(Outcome::Success(completion))
            })
            .await?;

        let completions: Vec<Completion> = outcomes
            .into_iter()
            .filter_map(Outcome::into_success)
            .collect();

        info!(
            target: TRACING_TARGET_INVOKE,
            model_id = %invoke_config.model_id,
            completions = completions.len(),
            tokens_in = completions.iter().map(|c| c.usage.input).sum::<usize>(),
            tokens_out = completions.iter().map(|c| c.usage.output).sum::<usize>(),
            "Invocation batch finished"
        );

        Ok(completions)
    }
}

impl std::fmt::Debug for BedrockClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BedrockClient")
            .field("region", &self.config.region())
            .field("profile", &self.config.profile())
            .finish()
    }
}
