use std::path::PathBuf;

use crate::error::{Error, Result};

/// Videos must have strictly more views than this to be reported
pub const MIN_VIEWS: u64 = 300_000;

/// Default location of the results file
pub const DEFAULT_OUTPUT: &str = "results.json";

/// Default YouTube Data API v3 root
pub const DEFAULT_API_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

const API_KEY_VAR: &str = "YOUTUBE_API";
const CHANNEL_ID_VAR: &str = "CHANNEL_ID";
const API_BASE_URL_VAR: &str = "YOUTUBE_API_BASE_URL";

/// Load environment variables from a .env file in the current directory
pub fn load_env() {
    // A missing .env is fine, the variables may already be exported
    let _ = dotenvy::dotenv();
}

/// Settings for a single run, built once at startup
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub channel_id: String,
    pub min_views: u64,
    pub output_path: PathBuf,
    pub api_base_url: String,
}

impl Config {
    /// Build the configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let api_key = non_blank(API_KEY_VAR).ok_or(Error::ApiKeyMissing)?;
        let channel_id = non_blank(CHANNEL_ID_VAR).ok_or(Error::ChannelIdMissing)?;
        let api_base_url = non_blank(API_BASE_URL_VAR)
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
            return Err(Error::Config(format!(
                "{} must be an http(s) URL, got {}",
                API_BASE_URL_VAR, api_base_url
            )));
        }

        Ok(Self {
            api_key,
            channel_id,
            min_views: MIN_VIEWS,
            output_path: PathBuf::from(DEFAULT_OUTPUT),
            api_base_url,
        })
    }

    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| {
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn reads_required_values_with_defaults() {
        let config =
            Config::from_lookup(lookup(&[("YOUTUBE_API", "key-1"), ("CHANNEL_ID", "UC123")])).unwrap();

        assert_eq!(config.api_key, "key-1");
        assert_eq!(config.channel_id, "UC123");
        assert_eq!(config.min_views, 300_000);
        assert_eq!(config.output_path, PathBuf::from("results.json"));
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn missing_api_key_fails_fast() {
        let err = Config::from_lookup(lookup(&[("CHANNEL_ID", "UC123")])).unwrap_err();
        assert!(matches!(err, Error::ApiKeyMissing));
    }

    #[test]
    fn blank_channel_id_fails_fast() {
        let err =
            Config::from_lookup(lookup(&[("YOUTUBE_API", "key-1"), ("CHANNEL_ID", "  ")])).unwrap_err();
        assert!(matches!(err, Error::ChannelIdMissing));
    }

    #[test]
    fn base_url_override_drops_trailing_slash() {
        let config = Config::from_lookup(lookup(&[
            ("YOUTUBE_API", "key-1"),
            ("CHANNEL_ID", "UC123"),
            ("YOUTUBE_API_BASE_URL", "http://localhost:8080/youtube/v3/"),
        ]))
        .unwrap();
        assert_eq!(config.api_base_url, "http://localhost:8080/youtube/v3");
    }

    #[test]
    fn base_url_must_be_http() {
        let err = Config::from_lookup(lookup(&[
            ("YOUTUBE_API", "key-1"),
            ("CHANNEL_ID", "UC123"),
            ("YOUTUBE_API_BASE_URL", "localhost:8080"),
        ]))
        .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn output_override_keeps_threshold() {
        let config = Config::from_lookup(lookup(&[("YOUTUBE_API", "k"), ("CHANNEL_ID", "c")]))
            .unwrap()
            .with_output_path("out/popular.json");
        assert_eq!(config.min_views, MIN_VIEWS);
        assert_eq!(config.output_path, PathBuf::from("out/popular.json"));
    }
}
