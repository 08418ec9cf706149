use serde::{ Deserialize, Deserializer, Serialize };
use std::collections::HashMap;
use std::fs;
use std::path::{ Path, PathBuf };
use thiserror::Error;

use crate::config::{ EngineOptions, ReferenceContext };
use crate::errors::QaError;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("Missing required API key: {0}")]
    MissingApiKey(String),

    #[error("Template not found: {0}")]
    MissingTemplate(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

impl From<ConfigError> for QaError {
    fn from(err: ConfigError) -> Self {
        QaError::Config(err.to_string())
    }
}

/// Wire format spoken by the inference endpoint
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    OpenAi,
    Anthropic,
}

impl Provider {
    pub fn env_var(&self) -> &'static str {
        match self {
            Provider::OpenAi => "OPENAI_API_KEY",
            Provider::Anthropic => "ANTHROPIC_API_KEY",
        }
    }

    pub fn default_endpoint(&self) -> &'static str {
        match self {
            Provider::OpenAi => "https://api.openai.com/v1/chat/completions",
            Provider::Anthropic => "https://api.anthropic.com/v1/messages",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            Provider::OpenAi => "gpt-4o",
            Provider::Anthropic => "claude-3-5-sonnet-latest",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ApiConfig {
    /// Wire format; also decides which environment variable supplies the key
    pub provider: Provider,

    /// API key for the LLM service
    pub api_key: Option<String>,

    /// API endpoint for the LLM service
    pub api_endpoint: Option<String>,

    /// Model to use
    pub model: Option<String>,

    /// API organization ID (if applicable)
    pub organization_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RetryConfig {
    /// Retries after the first attempt for transient failures
    pub max_retries: u32,

    /// Backoff before the first retry; doubles each time
    pub initial_backoff_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_backoff_ms: 500,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct QaConfig {
    /// Inference endpoint used for routing, drafting and review
    pub llm_api: ApiConfig,

    /// Separate endpoint for the evaluation judge; falls back to `llm_api`
    #[serde(default)]
    pub judge_api: Option<ApiConfig>,

    /// Prompt templates keyed by task, rendered with `{{placeholder}}` substitution.
    /// Entries given in the file override the built-in template of the same name.
    #[serde(default = "default_prompt_templates", deserialize_with = "merge_prompt_templates")]
    pub prompt_templates: HashMap<String, String>,

    /// Maximum tokens for API calls
    pub max_tokens: Option<usize>,

    /// Temperature for generation (0.0-1.0)
    pub temperature: Option<f32>,

    /// Per-request timeout
    pub request_timeout_secs: Option<u64>,

    #[serde(default)]
    pub retry: RetryConfig,

    /// YAML corpus for the lexical retrieval index; built-in rules when unset
    pub corpus_path: Option<PathBuf>,

    #[serde(default)]
    pub engine: EngineOptions,
}

impl QaConfig {
    /// Load configuration from a YAML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config: QaConfig = serde_yaml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let threshold = self.engine.threshold;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(ConfigError::InvalidValue {
                field: "engine.threshold".to_string(),
                reason: format!("{} is outside [0, 1]", threshold),
            });
        }
        if self.engine.batch_concurrency == 0 {
            return Err(ConfigError::InvalidValue {
                field: "engine.batch_concurrency".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if let ReferenceContext::Fixed(text) = &self.engine.reference_context {
            if text.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "engine.reference_context".to_string(),
                    reason: "fixed reference text is empty".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Get the API key, checking the provider's environment variable if not in config
    pub fn get_api_key(api: &ApiConfig) -> Result<String, ConfigError> {
        use log::debug;

        if let Some(api_key) = &api.api_key {
            debug!("Using API key from config");
            return Ok(clean_key(api_key));
        }

        let env_var = api.provider.env_var();
        match std::env::var(env_var) {
            Ok(key) if !clean_key(&key).is_empty() => {
                debug!("Using API key from {}", env_var);
                Ok(clean_key(&key))
            }
            _ => Err(ConfigError::MissingApiKey(format!("set {} or llm_api.api_key", env_var))),
        }
    }

    /// Get the template for a specific task
    pub fn get_template(&self, template_name: &str) -> Result<&str, ConfigError> {
        self.prompt_templates
            .get(template_name)
            .map(String::as_str)
            .ok_or_else(|| ConfigError::MissingTemplate(template_name.to_string()))
    }

    pub fn engine_options(&self) -> EngineOptions {
        self.engine.clone()
    }
}

/// Keys pasted into .env files often carry quotes or stray whitespace
fn clean_key(raw: &str) -> String {
    raw.trim().trim_matches('"').trim_matches('\'').trim().to_string()
}

/// Substitute `{{key}}` placeholders in `template`
pub fn render_template(template: &str, params: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (key, value) in params {
        let placeholder = format!("{{{{{}}}}}", key);
        result = result.replace(&placeholder, value);
    }
    result
}

pub const ROUTER_TEMPLATE: &str = "router";
pub const DRAFTER_TEMPLATE: &str = "drafter";
pub const ARCHITECT_TEMPLATE: &str = "architect";
pub const ARCHITECT_REVISION_TEMPLATE: &str = "architect_revision";
pub const AUDITOR_TEMPLATE: &str = "auditor";
pub const JUDGE_TEMPLATE: &str = "judge";

fn merge_prompt_templates<'de, D>(deserializer: D) -> Result<HashMap<String, String>, D::Error>
    where D: Deserializer<'de>
{
    let overrides = HashMap::<String, String>::deserialize(deserializer)?;
    let mut prompt_templates = default_prompt_templates();
    prompt_templates.extend(overrides);
    Ok(prompt_templates)
}

fn default_prompt_templates() -> HashMap<String, String> {
    let mut prompt_templates = HashMap::new();
    prompt_templates.insert(
        ROUTER_TEMPLATE.to_string(),
        r#"
Analyze the following user query and categorize it into exactly one of these categories:
{{categories}}

Query: {{query}}

Return ONLY the category name in lowercase.
"#.to_string()
    );
    prompt_templates.insert(
        DRAFTER_TEMPLATE.to_string(),
        r#"
You are a QA Specialist. Using the rule from {{source}}: '{{context}}',
write a detailed test case for: {{query}}

Stay strictly within what the rule states. Do not invent requirements it does not contain.
"#.to_string()
    );
    prompt_templates.insert(
        ARCHITECT_TEMPLATE.to_string(),
        r#"
Create a detailed QA test plan for this requirement: {{requirement}}
Focus on edge cases.
"#.to_string()
    );
    prompt_templates.insert(
        ARCHITECT_REVISION_TEMPLATE.to_string(),
        r#"
Revise the following QA test plan based on this auditor feedback.

Requirement: {{requirement}}

Original plan:
{{previous}}

Auditor feedback:
{{feedback}}

Return only the improved test plan.
"#.to_string()
    );
    prompt_templates.insert(
        AUDITOR_TEMPLATE.to_string(),
        r#"
Act as a Senior QA Auditor. Review this test plan for the requirement "{{requirement}}":
{{plan}}

Identify any missing security or performance edge cases.
If the plan is perfect, say 'APPROVED'.
If not, provide 'FEEDBACK' on what to improve.
"#.to_string()
    );
    prompt_templates.insert(
        JUDGE_TEMPLATE.to_string(),
        r#"
You are an evaluation judge scoring the {{metric}} of an AI-generated QA artifact.

Rubric: {{rubric}}

Input query:
{{query}}

Retrieval context:
{{context}}

Generated output:
{{output}}

Respond with a single JSON object and nothing else:
{"score": <number between 0 and 1>, "reason": "<one sentence>"}
"#.to_string()
    );
    prompt_templates
}

/// Default configuration
impl Default for QaConfig {
    fn default() -> Self {
        QaConfig {
            llm_api: ApiConfig {
                provider: Provider::OpenAi,
                api_key: None,
                api_endpoint: Some(Provider::OpenAi.default_endpoint().to_string()),
                model: Some(Provider::OpenAi.default_model().to_string()),
                organization_id: None,
            },
            judge_api: None,
            prompt_templates: default_prompt_templates(),
            max_tokens: Some(2048),
            temperature: Some(0.2),
            request_timeout_secs: Some(60),
            retry: RetryConfig::default(),
            corpus_path: None,
            engine: EngineOptions::default(),
        }
    }
}
