use async_trait::async_trait;

use crate::errors::GatewayError;

/// Opaque text-completion service.
///
/// Implementations own retries, timeouts and connection pooling. A failure
/// returned here is final as far as the engine is concerned.
#[async_trait]
pub trait InferenceGateway: Send + Sync {
    /// Complete `prompt` and return the generated text
    async fn complete(&self, prompt: &str) -> Result<String, GatewayError>;

    /// Model identifier recorded in traces
    fn model_id(&self) -> String;
}
