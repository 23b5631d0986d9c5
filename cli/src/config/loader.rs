//! Simple CLI configuration loader for roster
//!
//! Implements single-source priority loading with flag overrides:
//! 1. --config file (highest priority)
//! 2. Current working directory: ./roster.json
//! 3. XDG config: $XDG_CONFIG_HOME/roster/config.json or ~/.config/roster/config.json
//! 4. Environment variables only (no files)
//!
//! Environment access is read-only; the resolved credentials travel in an
//! explicit config object handed to the agent at construction time.

use anyhow::{anyhow, Context, Result};
use roster_core::{ModelParams, Protocol, ResolvedLlmConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// API version used for Azure OpenAI when none is configured
const DEFAULT_AZURE_API_VERSION: &str = "2024-10-21";

/// Model/deployment used when none is configured
const DEFAULT_MODEL: &str = "gpt-4o";

/// Raw configuration file format (simple single-file schema)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawConfig {
    /// Protocol to use
    pub protocol: String,
    /// API key (can be "env:VAR_NAME" for environment variable)
    pub api_key: String,
    /// Endpoint URL (optional, uses protocol default if not specified)
    pub endpoint: Option<String>,
    /// API version (Azure OpenAI)
    #[serde(default)]
    pub api_version: Option<String>,
    /// Model name, or deployment name on Azure
    pub model: String,
    /// Model parameters (optional)
    #[serde(default)]
    pub params: ModelParams,
}

/// CLI configuration loader
pub struct ConfigLoader {
    /// Override config file path
    config_override: Option<PathBuf>,
    /// Flag overrides
    protocol_override: Option<String>,
    api_key_override: Option<String>,
    endpoint_override: Option<String>,
    api_version_override: Option<String>,
    model_override: Option<String>,
}

impl ConfigLoader {
    /// Create a new loader
    pub fn new() -> Self {
        Self {
            config_override: None,
            protocol_override: None,
            api_key_override: None,
            endpoint_override: None,
            api_version_override: None,
            model_override: None,
        }
    }

    /// Set config file override
    pub fn with_config_override(mut self, path: PathBuf) -> Self {
        self.config_override = Some(path);
        self
    }

    /// Set protocol override
    pub fn with_protocol_override(mut self, protocol: String) -> Self {
        self.protocol_override = Some(protocol);
        self
    }

    /// Set API key override
    pub fn with_api_key_override(mut self, api_key: String) -> Self {
        self.api_key_override = Some(api_key);
        self
    }

    /// Set endpoint override
    pub fn with_endpoint_override(mut self, endpoint: String) -> Self {
        self.endpoint_override = Some(endpoint);
        self
    }

    /// Set API version override
    pub fn with_api_version_override(mut self, api_version: String) -> Self {
        self.api_version_override = Some(api_version);
        self
    }

    /// Set model override
    pub fn with_model_override(mut self, model: String) -> Self {
        self.model_override = Some(model);
        self
    }

    /// Load and resolve configuration
    pub async fn load(&self) -> Result<ResolvedLlmConfig> {
        // Step 1: Find and load base configuration
        let mut config = if let Some(override_path) = &self.config_override {
            self.load_file(override_path).await.with_context(|| {
                format!(
                    "Failed to load config from override path: {}",
                    override_path.display()
                )
            })?
        } else {
            self.search_and_load().await?
        };

        // Step 2: Apply flag overrides
        self.apply_overrides(&mut config);

        // Step 3: Resolve to final LLM config
        self.resolve_config(config)
    }

    fn apply_overrides(&self, config: &mut RawConfig) {
        if let Some(protocol) = &self.protocol_override {
            config.protocol = protocol.clone();
        }
        if let Some(api_key) = &self.api_key_override {
            config.api_key = api_key.clone();
        }
        if let Some(endpoint) = &self.endpoint_override {
            config.endpoint = Some(endpoint.clone());
        }
        if let Some(api_version) = &self.api_version_override {
            config.api_version = Some(api_version.clone());
        }
        if let Some(model) = &self.model_override {
            config.model = model.clone();
        }
    }

    /// Search for config in priority order
    async fn search_and_load(&self) -> Result<RawConfig> {
        // 1. Current working directory
        if let Some(config) = self.try_load_cwd().await? {
            return Ok(config);
        }

        // 2. XDG config directory
        if let Some(config) = self.try_load_xdg().await? {
            return Ok(config);
        }

        // 3. Environment variables only
        self.try_load_env_only()
    }

    /// Try loading from current working directory
    async fn try_load_cwd(&self) -> Result<Option<RawConfig>> {
        let roster_json = std::env::current_dir()?.join("roster.json");
        if roster_json.exists() {
            return Ok(Some(self.load_file(&roster_json).await?));
        }

        Ok(None)
    }

    /// Try loading from XDG config directory
    async fn try_load_xdg(&self) -> Result<Option<RawConfig>> {
        if let Some(config_dir) = self.xdg_config_dir() {
            let config_path = config_dir.join("roster").join("config.json");
            if config_path.exists() {
                return Ok(Some(self.load_file(&config_path).await?));
            }
        }
        Ok(None)
    }

    /// Build a config from environment variables only
    fn try_load_env_only(&self) -> Result<RawConfig> {
        let azure_key = std::env::var("AZURE_OPENAI_API_KEY").ok();
        let openai_key = std::env::var("OPENAI_API_KEY").ok();

        let available_keys: Vec<_> = [
            azure_key.as_ref().map(|_| "azure_openai"),
            openai_key.as_ref().map(|_| "openai"),
        ]
        .into_iter()
        .flatten()
        .collect();

        let env_protocol = std::env::var("ROSTER_PROTOCOL").ok();
        let protocol_preference = self.protocol_override.as_ref().or(env_protocol.as_ref());

        if available_keys.is_empty() {
            // A key given on the command line is enough to proceed
            if let Some(api_key) = &self.api_key_override {
                let protocol = protocol_preference.cloned().unwrap_or_else(|| "openai".to_string());
                return Ok(RawConfig {
                    protocol,
                    api_key: api_key.clone(),
                    endpoint: None,
                    api_version: None,
                    model: DEFAULT_MODEL.to_string(),
                    params: ModelParams::default(),
                });
            }

            return Err(anyhow!(
                "No configuration found. Please create a roster.json file or set \
                 environment variables like AZURE_OPENAI_API_KEY or OPENAI_API_KEY"
            ));
        }

        let protocol = if let Some(preferred) = protocol_preference {
            match preferred.as_str() {
                "azure_openai" if azure_key.is_some() => "azure_openai",
                "openai" if openai_key.is_some() => "openai",
                _ => {
                    return Err(anyhow!(
                        "Protocol '{}' specified but no corresponding API key found. \
                         Available keys: {}",
                        preferred,
                        available_keys.join(", ")
                    ))
                }
            }
        } else {
            match available_keys.len() {
                1 => available_keys[0],
                _ => {
                    return Err(anyhow!(
                        "Multiple API keys detected: {}. Please specify which protocol to \
                         use with ROSTER_PROTOCOL or --protocol",
                        available_keys.join(", ")
                    ))
                }
            }
        };

        let config = match protocol {
            "azure_openai" => RawConfig {
                protocol: protocol.to_string(),
                api_key: azure_key.unwrap(),
                endpoint: std::env::var("AZURE_OPENAI_ENDPOINT").ok(),
                api_version: std::env::var("AZURE_OPENAI_API_VERSION").ok(),
                model: std::env::var("AZURE_OPENAI_DEPLOYMENT")
                    .unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
                params: ModelParams::default(),
            },
            "openai" => RawConfig {
                protocol: protocol.to_string(),
                api_key: openai_key.unwrap(),
                endpoint: std::env::var("OPENAI_BASE_URL").ok(),
                api_version: None,
                model: std::env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
                params: ModelParams::default(),
            },
            _ => unreachable!(),
        };

        Ok(config)
    }

    /// Load a single config file
    async fn load_file(&self, path: &Path) -> Result<RawConfig> {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Get XDG config directory
    fn xdg_config_dir(&self) -> Option<PathBuf> {
        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            Some(PathBuf::from(xdg_config))
        } else if let Ok(home) = std::env::var("HOME") {
            Some(PathBuf::from(home).join(".config"))
        } else {
            None
        }
    }

    /// Resolve raw config to ResolvedLlmConfig
    fn resolve_config(&self, config: RawConfig) -> Result<ResolvedLlmConfig> {
        let protocol = match config.protocol.as_str() {
            "openai" | "openai_compat" => Protocol::OpenAICompat,
            "azure" | "azure_openai" => Protocol::AzureOpenAI,
            other => return Err(anyhow!("Unknown protocol: {}", other)),
        };

        // Resolve API key (handle env: prefix)
        let api_key = if let Some(var_name) = config.api_key.strip_prefix("env:") {
            std::env::var(var_name)
                .with_context(|| format!("Environment variable not found: {}", var_name))?
        } else {
            config.api_key
        };

        let endpoint = match config.endpoint {
            Some(endpoint) => endpoint,
            None => protocol
                .default_endpoint()
                .ok_or_else(|| {
                    anyhow!(
                        "Protocol '{}' requires an explicit endpoint",
                        protocol.as_str()
                    )
                })?
                .to_string(),
        };

        let api_version = match protocol {
            Protocol::AzureOpenAI => Some(
                config
                    .api_version
                    .unwrap_or_else(|| DEFAULT_AZURE_API_VERSION.to_string()),
            ),
            Protocol::OpenAICompat => config.api_version,
        };

        let mut resolved =
            ResolvedLlmConfig::new(protocol, endpoint, api_key, config.model).with_params(config.params);
        resolved.api_version = api_version;

        resolved
            .validate()
            .map_err(|e| anyhow!("Configuration validation failed: {}", e))?;

        Ok(resolved)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(protocol: &str) -> RawConfig {
        RawConfig {
            protocol: protocol.to_string(),
            api_key: "test-key".to_string(),
            endpoint: Some("https://example.openai.azure.com".to_string()),
            api_version: None,
            model: "gpt-4o".to_string(),
            params: ModelParams::default(),
        }
    }

    #[test]
    fn azure_gets_a_default_api_version() {
        let resolved = ConfigLoader::new().resolve_config(raw("azure_openai")).unwrap();

        assert_eq!(resolved.protocol, Protocol::AzureOpenAI);
        assert_eq!(resolved.api_version.as_deref(), Some(DEFAULT_AZURE_API_VERSION));
    }

    #[test]
    fn openai_endpoint_defaults_when_absent() {
        let mut config = raw("openai");
        config.endpoint = None;

        let resolved = ConfigLoader::new().resolve_config(config).unwrap();
        assert_eq!(resolved.endpoint, "https://api.openai.com/v1");
    }

    #[test]
    fn azure_requires_an_explicit_endpoint() {
        let mut config = raw("azure_openai");
        config.endpoint = None;

        assert!(ConfigLoader::new().resolve_config(config).is_err());
    }

    #[test]
    fn unknown_protocol_is_rejected() {
        let error = ConfigLoader::new().resolve_config(raw("gemini")).unwrap_err();
        assert!(error.to_string().contains("Unknown protocol"));
    }

    #[test]
    fn env_prefixed_api_key_is_indirected() {
        std::env::set_var("ROSTER_TEST_LOADER_KEY", "indirect-key");

        let mut config = raw("openai");
        config.api_key = "env:ROSTER_TEST_LOADER_KEY".to_string();

        let resolved = ConfigLoader::new().resolve_config(config).unwrap();
        assert_eq!(resolved.api_key, "indirect-key");

        let mut config = raw("openai");
        config.api_key = "env:ROSTER_TEST_LOADER_MISSING".to_string();
        assert!(ConfigLoader::new().resolve_config(config).is_err());
    }

    #[test]
    fn flag_overrides_win_over_file_values() {
        let loader = ConfigLoader::new()
            .with_api_key_override("flag-key".to_string())
            .with_model_override("gpt-4o-mini".to_string())
            .with_api_version_override("2024-06-01".to_string());

        let mut config = raw("azure_openai");
        loader.apply_overrides(&mut config);

        assert_eq!(config.api_key, "flag-key");
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.api_version.as_deref(), Some("2024-06-01"));
    }

    #[tokio::test]
    async fn loads_and_resolves_a_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roster.json");
        tokio::fs::write(
            &path,
            r#"{
                "protocol": "azure_openai",
                "api_key": "file-key",
                "endpoint": "https://example.openai.azure.com",
                "api_version": "2024-10-21",
                "model": "gpt-4o"
            }"#,
        )
        .await
        .unwrap();

        let loader = ConfigLoader::new().with_config_override(path);
        let resolved = loader.load().await.unwrap();

        assert_eq!(resolved.protocol, Protocol::AzureOpenAI);
        assert_eq!(resolved.api_key, "file-key");
        assert_eq!(resolved.model, "gpt-4o");
    }
}
