use anyhow::Result;

use qaforge::{ GatewayError, LlmClient };

use crate::cli::ui;

/// Credential check against the inference provider
pub async fn execute(client: &LlmClient) -> Result<bool> {
    match client.check_auth().await {
        Ok(()) => {
            ui::print_success("Inference auth check passed");
            Ok(true)
        }
        Err(GatewayError::Auth { message, .. }) => {
            ui::print_error(&format!("Auth failed: invalid/revoked key or wrong project ({})", message));
            Ok(false)
        }
        Err(e) => {
            ui::print_error(&format!("Health check failed: {}", e));
            Ok(false)
        }
    }
}
