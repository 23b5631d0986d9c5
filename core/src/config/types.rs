//! Resolved LLM configuration
//!
//! Credentials and endpoints travel in this explicit object, passed at
//! construction time. Nothing in core reads or mutates process-wide
//! environment state.

use serde::{Deserialize, Serialize};

/// Supported LLM protocols
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Protocol {
    /// OpenAI-compatible API (includes OpenAI, many proxies, local models)
    #[serde(rename = "openai_compat")]
    OpenAICompat,
    /// Azure OpenAI API
    #[serde(rename = "azure_openai")]
    AzureOpenAI,
}

impl Protocol {
    /// Get the protocol name as a string
    pub fn as_str(&self) -> &str {
        match self {
            Protocol::OpenAICompat => "openai_compat",
            Protocol::AzureOpenAI => "azure_openai",
        }
    }

    /// Get the default endpoint for this protocol
    pub fn default_endpoint(&self) -> Option<&'static str> {
        match self {
            Protocol::OpenAICompat => Some("https://api.openai.com/v1"),
            Protocol::AzureOpenAI => None, // Requires a resource-specific endpoint
        }
    }
}

/// Model parameters for LLM requests
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelParams {
    /// Maximum tokens to generate
    pub max_tokens: Option<u32>,
    /// Temperature for sampling (0.0 to 2.0)
    pub temperature: Option<f32>,
    /// Top-p sampling parameter
    pub top_p: Option<f32>,
    /// Stop sequences
    pub stop_sequences: Option<Vec<String>>,
}

/// A fully resolved LLM configuration ready for use by core
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedLlmConfig {
    /// The protocol to use
    pub protocol: Protocol,
    /// Endpoint URL for the API
    pub endpoint: String,
    /// API key for authentication
    pub api_key: String,
    /// API version (required for Azure OpenAI)
    #[serde(default)]
    pub api_version: Option<String>,
    /// Model name, or deployment name on Azure
    pub model: String,
    /// Model parameters
    #[serde(default)]
    pub params: ModelParams,
}

impl ResolvedLlmConfig {
    /// Create a new resolved LLM config
    pub fn new(protocol: Protocol, endpoint: String, api_key: String, model: String) -> Self {
        Self {
            protocol,
            endpoint,
            api_key,
            api_version: None,
            model,
            params: ModelParams::default(),
        }
    }

    /// Set the API version
    pub fn with_api_version(mut self, api_version: String) -> Self {
        self.api_version = Some(api_version);
        self
    }

    /// Set model parameters
    pub fn with_params(mut self, params: ModelParams) -> Self {
        self.params = params;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.api_key.is_empty() {
            return Err("API key cannot be empty".to_string());
        }

        if self.model.is_empty() {
            return Err("Model name cannot be empty".to_string());
        }

        if self.endpoint.is_empty() {
            return Err("Endpoint cannot be empty".to_string());
        }

        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            return Err("Endpoint must start with http:// or https://".to_string());
        }

        if self.protocol == Protocol::AzureOpenAI
            && self.api_version.as_deref().unwrap_or("").is_empty()
        {
            return Err("Azure OpenAI requires an API version".to_string());
        }

        if let Some(temp) = self.params.temperature {
            if !(0.0..=2.0).contains(&temp) {
                return Err("Temperature must be between 0.0 and 2.0".to_string());
            }
        }

        if let Some(top_p) = self.params.top_p {
            if !(0.0..=1.0).contains(&top_p) {
                return Err("Top-p must be between 0.0 and 1.0".to_string());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config(protocol: Protocol) -> ResolvedLlmConfig {
        ResolvedLlmConfig::new(
            protocol,
            "https://example.openai.azure.com".to_string(),
            "test-key".to_string(),
            "gpt-4o".to_string(),
        )
    }

    #[test]
    fn azure_validation_requires_api_version() {
        let config = base_config(Protocol::AzureOpenAI);
        assert!(config.validate().is_err());

        let config = config.with_api_version("2024-10-21".to_string());
        config.validate().unwrap();
    }

    #[test]
    fn openai_validation_does_not_require_api_version() {
        base_config(Protocol::OpenAICompat).validate().unwrap();
    }

    #[test]
    fn validation_rejects_bad_values() {
        let mut config = base_config(Protocol::OpenAICompat);
        config.endpoint = "example.com".to_string();
        assert!(config.validate().is_err());

        let mut config = base_config(Protocol::OpenAICompat);
        config.api_key = String::new();
        assert!(config.validate().is_err());

        let mut config = base_config(Protocol::OpenAICompat);
        config.params.temperature = Some(3.0);
        assert!(config.validate().is_err());
    }
}
