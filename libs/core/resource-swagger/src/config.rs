use core_config::{ConfigError, FromEnv, env_or_default};
use std::env;

/// Settings for the generated documentation endpoints
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SwaggerConfig {
    /// Served as `/{document_name}.json`
    pub document_name: String,
    pub swagger_version: String,
    pub api_version: Option<String>,
    /// Prefix shared by the documented API and the docs endpoints
    pub url_prefix: String,
    /// Absolute URL of the API root; derived from the request when unset
    pub base_url: Option<String>,
}

impl SwaggerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn document_name(mut self, document_name: impl Into<String>) -> Self {
        self.document_name = document_name.into();
        self
    }

    pub fn api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = Some(api_version.into());
        self
    }

    pub fn swagger_version(mut self, swagger_version: impl Into<String>) -> Self {
        self.swagger_version = swagger_version.into();
        self
    }

    pub fn url_prefix(mut self, url_prefix: &str) -> Self {
        self.url_prefix = normalize_prefix(url_prefix);
        self
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into().trim_end_matches('/').to_string());
        self
    }
}

impl FromEnv for SwaggerConfig {
    /// Reads from environment variables with defaults:
    /// - SWAGGER_DOCUMENT_NAME: defaults to "api-docs"
    /// - SWAGGER_VERSION: defaults to "1.1"
    /// - API_VERSION: optional
    /// - SWAGGER_URL_PREFIX: defaults to "" (served at the root)
    /// - SWAGGER_BASE_URL: optional
    fn from_env() -> Result<Self, ConfigError> {
        let document_name = env_or_default("SWAGGER_DOCUMENT_NAME", "api-docs");
        if document_name.is_empty() || document_name.contains('/') {
            return Err(ConfigError::ParseError {
                key: "SWAGGER_DOCUMENT_NAME".to_string(),
                details: format!("not a valid document name: {document_name:?}"),
            });
        }

        Ok(Self {
            document_name,
            swagger_version: env_or_default("SWAGGER_VERSION", "1.1"),
            api_version: env::var("API_VERSION").ok().filter(|v| !v.is_empty()),
            url_prefix: normalize_prefix(&env_or_default("SWAGGER_URL_PREFIX", "")),
            base_url: env::var("SWAGGER_BASE_URL")
                .ok()
                .filter(|v| !v.is_empty())
                .map(|v| v.trim_end_matches('/').to_string()),
        })
    }
}

impl Default for SwaggerConfig {
    fn default() -> Self {
        Self {
            document_name: "api-docs".to_string(),
            swagger_version: "1.1".to_string(),
            api_version: None,
            url_prefix: String::new(),
            base_url: None,
        }
    }
}

/// "" or "/x/y": leading slash, no trailing slash
fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VARS: [&str; 5] = [
        "SWAGGER_DOCUMENT_NAME",
        "SWAGGER_VERSION",
        "API_VERSION",
        "SWAGGER_URL_PREFIX",
        "SWAGGER_BASE_URL",
    ];

    #[test]
    fn test_swagger_config_from_env_with_defaults() {
        temp_env::with_vars_unset(VARS, || {
            let config = SwaggerConfig::from_env().unwrap();
            assert_eq!(config, SwaggerConfig::default());
        });
    }

    #[test]
    fn test_swagger_config_from_env_with_custom_values() {
        temp_env::with_vars(
            [
                ("SWAGGER_DOCUMENT_NAME", Some("docs")),
                ("SWAGGER_VERSION", Some("1.2")),
                ("API_VERSION", Some("0.3")),
                ("SWAGGER_URL_PREFIX", Some("api/")),
                ("SWAGGER_BASE_URL", Some("https://example.com/")),
            ],
            || {
                let config = SwaggerConfig::from_env().unwrap();
                assert_eq!(config.document_name, "docs");
                assert_eq!(config.swagger_version, "1.2");
                assert_eq!(config.api_version.as_deref(), Some("0.3"));
                assert_eq!(config.url_prefix, "/api");
                assert_eq!(config.base_url.as_deref(), Some("https://example.com"));
            },
        );
    }

    #[test]
    fn test_swagger_config_rejects_slash_in_document_name() {
        temp_env::with_var("SWAGGER_DOCUMENT_NAME", Some("api/docs"), || {
            let err = SwaggerConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("SWAGGER_DOCUMENT_NAME"));
        });
    }

    #[test]
    fn test_normalize_prefix() {
        assert_eq!(normalize_prefix(""), "");
        assert_eq!(normalize_prefix("/"), "");
        assert_eq!(normalize_prefix("api"), "/api");
        assert_eq!(normalize_prefix("/api/v1/"), "/api/v1");
    }
}
