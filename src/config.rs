//! Process-wide settings, loaded once at startup.
//!
//! Values come from the environment, after `.env` (if present) has been
//! merged in via `dotenvy`. Empty variables count as unset.

use crate::error::ConfigError;

pub const GEMINI_KEY_VARS: &[&str] = &["GEMINI_API_KEY", "GOOGLE_API_KEY"];
pub const WEATHER_KEY_VARS: &[&str] = &["OPENWEATHER_API_KEY", "WEATHER_API_KEY"];
pub const MODEL_VAR: &str = "GEMINI_MODEL";

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    /// Only needed once the model actually asks for the weather tool.
    pub weather_api_key: Option<String>,
    pub model: String,
}

impl Config {
    /// Load `.env` and read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let gemini_api_key =
            first_set(&lookup, GEMINI_KEY_VARS).ok_or(ConfigError::MissingCredential {
                what: "Gemini API key",
                vars: GEMINI_KEY_VARS,
            })?;

        Ok(Self {
            gemini_api_key,
            weather_api_key: first_set(&lookup, WEATHER_KEY_VARS),
            model: first_set(&lookup, &[MODEL_VAR]).unwrap_or_else(|| DEFAULT_MODEL.into()),
        })
    }
}

fn first_set(lookup: &impl Fn(&str) -> Option<String>, names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|&name| lookup(name))
        .find(|value| !value.trim().is_empty())
}
