use std::env;

use url::Url;

use crate::error::ConfigError;
use crate::services::translation::TranslationMode;

const VISION_ENDPOINT: &str = "ROTULADOR_VISION_ENDPOINT";
const TRANSLATE_ENDPOINT: &str = "ROTULADOR_TRANSLATE_ENDPOINT";
const API_TOKEN: &str = "ROTULADOR_API_TOKEN";
const TRANSLATION_MODE: &str = "ROTULADOR_TRANSLATION_MODE";

#[derive(Debug, Clone)]
pub struct Config {
    pub vision_endpoint: Url,
    pub translate_endpoint: Url,
    pub api_token: Option<String>,
    pub translation_mode: TranslationMode,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &'static str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let vision_endpoint = parse_endpoint(VISION_ENDPOINT, get(VISION_ENDPOINT))?;
        let translate_endpoint = parse_endpoint(TRANSLATE_ENDPOINT, get(TRANSLATE_ENDPOINT))?;

        let translation_mode = match get(TRANSLATION_MODE) {
            None => TranslationMode::default(),
            Some(raw) => raw.parse().map_err(|reason| ConfigError::Invalid {
                name: TRANSLATION_MODE,
                reason,
            })?,
        };

        Ok(Self {
            vision_endpoint,
            translate_endpoint,
            api_token: get(API_TOKEN),
            translation_mode,
        })
    }
}

fn parse_endpoint(name: &'static str, value: Option<String>) -> Result<Url, ConfigError> {
    let raw = value.ok_or(ConfigError::Missing(name))?;
    let url = Url::parse(&raw).map_err(|e| ConfigError::Invalid {
        name,
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::Invalid {
            name,
            reason: format!("unsupported scheme {other:?}"),
        }),
    }
}
