use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use validator::Validate;

#[derive(Debug, Clone, Validate)]
pub struct Config {
    #[validate(url)]
    pub api_base_url: String,
    pub data_folder: PathBuf,
    #[validate(length(min = 1))]
    pub question_file: String,
    #[validate(length(min = 1))]
    pub subject_file: String,
    #[validate(length(min = 1))]
    pub class_file: String,
    #[validate(range(min = 1))]
    pub health_timeout_secs: u64,
    #[validate(range(min = 1))]
    pub http_timeout_secs: u64,
}

impl Config {
    pub const DEFAULT_DATA_FOLDER: &'static str = "data";
    pub const DEFAULT_HEALTH_TIMEOUT_SECS: u64 = 3;
    pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

    /// Settings with every optional value at its default.
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            data_folder: PathBuf::from(Self::DEFAULT_DATA_FOLDER),
            question_file: "questions".to_string(),
            subject_file: "subjects".to_string(),
            class_file: "classes".to_string(),
            health_timeout_secs: Self::DEFAULT_HEALTH_TIMEOUT_SECS,
            http_timeout_secs: Self::DEFAULT_HTTP_TIMEOUT_SECS,
        }
    }

    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let mut config = Self::new(get_env("API_BASE_URL")?);
        if let Some(folder) = get_env_opt("DATA_FOLDER") {
            config.data_folder = PathBuf::from(folder);
        }
        if let Some(name) = get_env_opt("QUESTION_FILE") {
            config.question_file = name;
        }
        if let Some(name) = get_env_opt("SUBJECT_FILE") {
            config.subject_file = name;
        }
        if let Some(name) = get_env_opt("CLASS_FILE") {
            config.class_file = name;
        }
        if get_env_opt("HEALTH_TIMEOUT_SECS").is_some() {
            config.health_timeout_secs = get_env_parse("HEALTH_TIMEOUT_SECS")?;
        }
        if get_env_opt("HTTP_TIMEOUT_SECS").is_some() {
            config.http_timeout_secs = get_env_parse("HTTP_TIMEOUT_SECS")?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn health_timeout(&self) -> Duration {
        Duration::from_secs(self.health_timeout_secs)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

fn get_env(name: &str) -> Result<String> {
    env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_env_opt(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn get_env_parse<T>(name: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = get_env(name)?;
    raw.trim()
        .parse()
        .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = Config::new("http://localhost:5000/api/");
        assert_eq!(config.question_file, "questions");
        assert_eq!(config.subject_file, "subjects");
        assert_eq!(config.class_file, "classes");
        assert_eq!(config.health_timeout(), Duration::from_secs(3));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_invalid_base_url_and_empty_names() {
        let mut config = Config::new("not a url");
        config.question_file = String::new();
        let errors = config.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("api_base_url"));
        assert!(fields.contains_key("question_file"));
    }
}
