use std::time::Duration;

use async_trait::async_trait;
use log::{ debug, info, warn };
use serde::{ Deserialize, Serialize };

use crate::errors::{ GatewayError, RecoverableError };
use crate::implementations::config::{ ApiConfig, ConfigError, Provider, QaConfig, RetryConfig };
use crate::traits::inference_gateway::InferenceGateway;

const SERVICE: &str = "LLM API";
const SYSTEM_PROMPT: &str = "You are a meticulous QA engineer who writes precise, verifiable test cases.";

/// OpenAI API request and response types
#[derive(Debug, Serialize, Deserialize, Clone)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: usize,
}

#[derive(Debug, Deserialize)]
struct ChatResponseChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatResponseChoice>,
}

/// Anthropic messages API response
#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

/// Inference gateway backed by an HTTP chat-completion endpoint.
///
/// Credential rejections surface immediately as `GatewayError::Auth`.
/// Timeouts, rate limits and server errors are retried with exponential
/// backoff and surface as `GatewayError::Transient` once retries run out.
#[derive(Clone)]
pub struct LlmClient {
    http_client: reqwest::Client,
    provider: Provider,
    api_key: String,
    endpoint: String,
    model: String,
    organization_id: Option<String>,
    temperature: f32,
    max_tokens: usize,
    retry: RetryConfig,
}

impl LlmClient {
    /// Build a client for `api`, taking generation settings from `config`
    pub fn new(config: &QaConfig, api: &ApiConfig) -> Result<Self, ConfigError> {
        let api_key = QaConfig::get_api_key(api)?;
        let timeout = Duration::from_secs(config.request_timeout_secs.unwrap_or(60));
        let http_client = reqwest::Client
            ::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ConfigError::InvalidValue {
                field: "request_timeout_secs".to_string(),
                reason: format!("failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            http_client,
            provider: api.provider,
            api_key,
            endpoint: api.api_endpoint
                .clone()
                .unwrap_or_else(|| api.provider.default_endpoint().to_string()),
            model: api.model.clone().unwrap_or_else(|| api.provider.default_model().to_string()),
            organization_id: api.organization_id.clone(),
            temperature: config.temperature.unwrap_or(0.2),
            max_tokens: config.max_tokens.unwrap_or(2048),
            retry: config.retry.clone(),
        })
    }

    /// Client for the main inference endpoint
    pub fn from_config(config: &QaConfig) -> Result<Self, ConfigError> {
        Self::new(config, &config.llm_api)
    }

    /// Client for the evaluation judge, falling back to the main endpoint
    pub fn judge_from_config(config: &QaConfig) -> Result<Self, ConfigError> {
        Self::new(config, config.judge_api.as_ref().unwrap_or(&config.llm_api))
    }

    /// Cheap authenticated call that proves the key is accepted
    pub async fn check_auth(&self) -> Result<(), GatewayError> {
        let url = match self.provider {
            Provider::OpenAi => models_url(&self.endpoint),
            Provider::Anthropic => "https://api.anthropic.com/v1/models".to_string(),
        };
        info!("Checking credentials against {}", url);

        let response = self
            .authorize(self.http_client.get(&url))
            .send().await
            .map_err(classify_transport_error)?;

        let status = response.status().as_u16();
        if (200..300).contains(&status) {
            info!("Credential check passed");
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(classify_status(status, &body))
    }

    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.provider {
            Provider::OpenAi => {
                let builder = builder.header("Authorization", format!("Bearer {}", self.api_key));
                match &self.organization_id {
                    Some(org) => builder.header("OpenAI-Organization", org),
                    None => builder,
                }
            }
            Provider::Anthropic =>
                builder
                    .header("x-api-key", &self.api_key)
                    .header("anthropic-version", "2023-06-01"),
        }
    }

    async fn send_once(&self, prompt: &str) -> Result<String, GatewayError> {
        let body = match self.provider {
            Provider::OpenAi =>
                serde_json::to_value(ChatRequest {
                    model: &self.model,
                    messages: vec![
                        ChatMessage {
                            role: "system".to_string(),
                            content: SYSTEM_PROMPT.to_string(),
                        },
                        ChatMessage {
                            role: "user".to_string(),
                            content: prompt.to_string(),
                        }
                    ],
                    temperature: self.temperature,
                    max_tokens: self.max_tokens,
                }).map_err(|e| GatewayError::failed(SERVICE, e.to_string()))?,
            Provider::Anthropic =>
                serde_json::json!({
                    "model": self.model,
                    "max_tokens": self.max_tokens,
                    "temperature": self.temperature,
                    "system": SYSTEM_PROMPT,
                    "messages": [{ "role": "user", "content": prompt }]
                }),
        };

        let response = self
            .authorize(self.http_client.post(&self.endpoint))
            .header("Content-Type", "application/json")
            .json(&body)
            .send().await
            .map_err(classify_transport_error)?;

        let status = response.status().as_u16();
        let text = response.text().await.map_err(classify_transport_error)?;
        if !(200..300).contains(&status) {
            warn!("API error: HTTP {} - {}", status, truncate(&text, 200));
            return Err(classify_status(status, &text));
        }

        debug!("Response length: {} characters", text.len());
        match self.provider {
            Provider::OpenAi => parse_chat_content(&text),
            Provider::Anthropic => parse_messages_content(&text),
        }
    }
}

#[async_trait]
impl InferenceGateway for LlmClient {
    async fn complete(&self, prompt: &str) -> Result<String, GatewayError> {
        debug!("Calling {} ({}) with prompt: {}", SERVICE, self.model, truncate(prompt, 100));
        debug!("Prompt length: {} characters", prompt.len());

        let mut attempt = 0;
        let mut backoff = Duration::from_millis(self.retry.initial_backoff_ms);
        loop {
            match self.send_once(prompt).await {
                Ok(content) => {
                    info!("API call completed successfully");
                    return Ok(content);
                }
                Err(e) if e.is_recoverable() && attempt < self.retry.max_retries => {
                    attempt += 1;
                    warn!(
                        "{} (attempt {}/{}), retrying in {:?}",
                        e,
                        attempt,
                        self.retry.max_retries + 1,
                        backoff
                    );
                    tokio::time::sleep(backoff).await;
                    backoff *= 2;
                }
                Err(e) => {
                    warn!("Giving up on {} call: {}", SERVICE, e);
                    return Err(e);
                }
            }
        }
    }

    fn model_id(&self) -> String {
        self.model.clone()
    }
}

fn classify_transport_error(e: reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        warn!("Request timed out");
        GatewayError::transient(SERVICE, format!("request timed out: {}", e))
    } else if e.is_connect() {
        warn!("Connection error - check network connectivity");
        GatewayError::transient(SERVICE, format!("connection failed: {}", e))
    } else {
        GatewayError::failed(SERVICE, e.to_string())
    }
}

fn classify_status(status: u16, body: &str) -> GatewayError {
    let message = format!("HTTP {}: {}", status, truncate(body, 200));
    match status {
        401 | 403 => GatewayError::auth(SERVICE, message),
        408 | 429 | 500..=599 => GatewayError::transient(SERVICE, message),
        _ => GatewayError::failed(SERVICE, message),
    }
}

fn parse_chat_content(body: &str) -> Result<String, GatewayError> {
    let response: ChatResponse = serde_json
        ::from_str(body)
        .map_err(|e| GatewayError::failed(SERVICE, format!("invalid JSON response: {}", e)))?;

    response.choices
        .into_iter()
        .next()
        .map(|c| c.message.content)
        .ok_or_else(|| GatewayError::failed(SERVICE, "empty choices array"))
}

fn parse_messages_content(body: &str) -> Result<String, GatewayError> {
    let response: MessagesResponse = serde_json
        ::from_str(body)
        .map_err(|e| GatewayError::failed(SERVICE, format!("invalid JSON response: {}", e)))?;

    let text: String = response.content
        .into_iter()
        .filter_map(|block| block.text)
        .collect::<Vec<_>>()
        .join("");
    if text.is_empty() {
        return Err(GatewayError::failed(SERVICE, "no text content in response"));
    }
    Ok(text)
}

/// `https://host/v1/chat/completions` -> `https://host/v1/models`
fn models_url(endpoint: &str) -> String {
    match endpoint.find("/chat/completions") {
        Some(idx) => format!("{}/models", &endpoint[..idx]),
        None => format!("{}/models", endpoint.trim_end_matches('/')),
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
