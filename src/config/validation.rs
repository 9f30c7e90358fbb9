use super::models::Config;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid API base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Unsupported API base URL scheme '{scheme}', expected 'http' or 'https'")]
    UnsupportedScheme { scheme: String },

    #[error("Poll interval must be positive: poll_interval_secs = {value}")]
    InvalidPollInterval { value: u64 },

    #[error("Timeout must be positive: {field} = {value}")]
    InvalidTimeout { field: String, value: u64 },
}

/// Validate the entire configuration
pub fn validate(config: &Config) -> Result<(), ValidationError> {
    validate_base_url(config)?;
    validate_intervals(config)?;
    Ok(())
}

fn validate_base_url(config: &Config) -> Result<(), ValidationError> {
    let url = reqwest::Url::parse(&config.api.base_url).map_err(|e| {
        ValidationError::InvalidBaseUrl {
            url: config.api.base_url.clone(),
            reason: e.to_string(),
        }
    })?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(ValidationError::UnsupportedScheme {
            scheme: scheme.to_string(),
        }),
    }
}

fn validate_intervals(config: &Config) -> Result<(), ValidationError> {
    if config.watch.poll_interval_secs == 0 {
        return Err(ValidationError::InvalidPollInterval { value: 0 });
    }

    for (field, value) in [
        ("connect_timeout_secs", config.api.connect_timeout_secs),
        ("submit_timeout_secs", config.api.submit_timeout_secs),
        ("status_timeout_secs", config.api.status_timeout_secs),
    ] {
        if value == 0 {
            return Err(ValidationError::InvalidTimeout {
                field: field.to_string(),
                value,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        let mut config = Config::default();
        config.api.base_url = "ftp://example.com".to_string();

        assert!(matches!(
            validate(&config),
            Err(ValidationError::UnsupportedScheme { .. })
        ));
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let mut config = Config::default();
        config.api.status_timeout_secs = 0;

        assert!(matches!(
            validate(&config),
            Err(ValidationError::InvalidTimeout { .. })
        ));
    }
}
