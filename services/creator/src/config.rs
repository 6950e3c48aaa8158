use curriculum_core::research::ResearchConfig;
use std::path::PathBuf;
use std::time::Duration;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub output_dir: PathBuf,
    pub log_level: Level,
    pub research: ResearchConfig,
    pub openai_api_key: Option<String>,
    pub anthropic_api_key: Option<String>,
    pub tavily_api_key: Option<String>,
    pub github_token: Option<String>,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        let output_dir = std::env::var("CURRICULUM_OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./output"));

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let defaults = ResearchConfig::default();
        let cache_enabled = match std::env::var("DEEP_RESEARCH_CACHE_ENABLED") {
            Ok(value) => parse_bool("DEEP_RESEARCH_CACHE_ENABLED", &value)?,
            Err(_) => defaults.cache_enabled,
        };
        let research_timeout = match std::env::var("DEEP_RESEARCH_TIMEOUT_SECS") {
            Ok(value) => Duration::from_secs(parse_number("DEEP_RESEARCH_TIMEOUT_SECS", &value)?),
            Err(_) => defaults.research_timeout,
        };
        let max_retries = match std::env::var("DEEP_RESEARCH_MAX_RETRIES") {
            Ok(value) => parse_number("DEEP_RESEARCH_MAX_RETRIES", &value)?,
            Err(_) => defaults.max_retries,
        };
        let docker_compose_path = std::env::var("DEEP_RESEARCH_DOCKER_COMPOSE")
            .ok()
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            output_dir,
            log_level,
            research: ResearchConfig {
                cache_enabled,
                research_timeout,
                max_retries,
                docker_compose_path,
            },
            openai_api_key: non_empty_var("OPENAI_API_KEY"),
            anthropic_api_key: non_empty_var("ANTHROPIC_API_KEY"),
            tavily_api_key: non_empty_var("TAVILY_API_KEY"),
            github_token: non_empty_var("GITHUB_TOKEN"),
        })
    }

    /// Deep research needs at least one LLM provider.
    pub fn deep_research_available(&self) -> bool {
        self.openai_api_key.is_some() || self.anthropic_api_key.is_some()
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn parse_bool(name: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue(
            name.to_string(),
            format!("'{}' is not a boolean", value),
        )),
    }
}

fn parse_number<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse::<T>().map_err(|_| {
        ConfigError::InvalidValue(
            name.to_string(),
            format!("'{}' is not a valid non-negative integer", value),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    fn clear_env_vars() {
        unsafe {
            env::remove_var("CURRICULUM_OUTPUT_DIR");
            env::remove_var("RUST_LOG");
            env::remove_var("DEEP_RESEARCH_CACHE_ENABLED");
            env::remove_var("DEEP_RESEARCH_TIMEOUT_SECS");
            env::remove_var("DEEP_RESEARCH_MAX_RETRIES");
            env::remove_var("DEEP_RESEARCH_DOCKER_COMPOSE");
            env::remove_var("OPENAI_API_KEY");
            env::remove_var("ANTHROPIC_API_KEY");
            env::remove_var("TAVILY_API_KEY");
            env::remove_var("GITHUB_TOKEN");
        }
    }

    #[test]
    fn test_config_error_display() {
        let invalid_value =
            ConfigError::InvalidValue("TEST_VAR".to_string(), "bad_value".to_string());
        assert_eq!(
            format!("{}", invalid_value),
            "Invalid value for environment variable TEST_VAR: bad_value"
        );
    }

    #[test]
    #[serial]
    fn test_config_from_env_defaults() {
        clear_env_vars();

        let config = Config::from_env().expect("Config should load successfully");

        assert_eq!(config.output_dir, PathBuf::from("./output"));
        assert_eq!(config.log_level, Level::INFO);
        assert_eq!(config.research, ResearchConfig::default());
        assert!(!config.deep_research_available());
    }

    #[test]
    #[serial]
    fn test_config_from_env_custom_values() {
        clear_env_vars();
        unsafe {
            env::set_var("CURRICULUM_OUTPUT_DIR", "/tmp/courses");
            env::set_var("RUST_LOG", "debug");
            env::set_var("DEEP_RESEARCH_CACHE_ENABLED", "false");
            env::set_var("DEEP_RESEARCH_TIMEOUT_SECS", "600");
            env::set_var("DEEP_RESEARCH_MAX_RETRIES", "5");
            env::set_var("DEEP_RESEARCH_DOCKER_COMPOSE", "/srv/research/docker-compose.yml");
            env::set_var("ANTHROPIC_API_KEY", "test-anthropic-key");
        }

        let config = Config::from_env().expect("Config should load successfully");

        assert_eq!(config.output_dir, PathBuf::from("/tmp/courses"));
        assert_eq!(config.log_level, Level::DEBUG);
        assert!(!config.research.cache_enabled);
        assert_eq!(config.research.research_timeout, Duration::from_secs(600));
        assert_eq!(config.research.max_retries, 5);
        assert_eq!(
            config.research.docker_compose_path,
            Some(PathBuf::from("/srv/research/docker-compose.yml"))
        );
        assert_eq!(
            config.anthropic_api_key,
            Some("test-anthropic-key".to_string())
        );
        assert!(config.deep_research_available());
    }

    #[test]
    #[serial]
    fn test_blank_api_key_does_not_enable_research() {
        clear_env_vars();
        unsafe {
            env::set_var("OPENAI_API_KEY", "  ");
            env::set_var("TAVILY_API_KEY", "tavily");
        }

        let config = Config::from_env().expect("Config should load successfully");

        assert_eq!(config.openai_api_key, None);
        assert_eq!(config.tavily_api_key, Some("tavily".to_string()));
        assert!(!config.deep_research_available());
    }

    #[test]
    #[serial]
    fn test_config_invalid_log_level() {
        clear_env_vars();
        unsafe {
            env::set_var("RUST_LOG", "not-a-level");
        }

        let err = Config::from_env().unwrap_err();
        match err {
            ConfigError::InvalidValue(var, _) => assert_eq!(var, "RUST_LOG"),
        }
    }

    #[test]
    #[serial]
    fn test_config_invalid_cache_flag() {
        clear_env_vars();
        unsafe {
            env::set_var("DEEP_RESEARCH_CACHE_ENABLED", "sometimes");
        }

        let err = Config::from_env().unwrap_err();
        match err {
            ConfigError::InvalidValue(var, _) => assert_eq!(var, "DEEP_RESEARCH_CACHE_ENABLED"),
        }
    }

    #[test]
    #[serial]
    fn test_config_invalid_timeout() {
        clear_env_vars();
        unsafe {
            env::set_var("DEEP_RESEARCH_TIMEOUT_SECS", "-5");
        }

        let err = Config::from_env().unwrap_err();
        match err {
            ConfigError::InvalidValue(var, msg) => {
                assert_eq!(var, "DEEP_RESEARCH_TIMEOUT_SECS");
                assert!(msg.contains("-5"));
            }
        }
    }
}
