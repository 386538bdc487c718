use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use super::handler::WeatherLookup;
use crate::config::WEATHER_KEY_VARS;
use crate::error::{ConfigError, ToolError};

/// Upper bound on a single weather lookup.
pub const WEATHER_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    /// Case-insensitive parse of a unit name as the model might send it.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "celsius" => Some(Self::Celsius),
            "fahrenheit" => Some(Self::Fahrenheit),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Celsius => "celsius",
            Self::Fahrenheit => "fahrenheit",
        }
    }

    /// The `units` query value OpenWeatherMap expects.
    pub fn units_param(&self) -> &'static str {
        match self {
            Self::Celsius => "metric",
            Self::Fahrenheit => "imperial",
        }
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current-weather client for OpenWeatherMap's `/data/2.5/weather` endpoint.
///
/// The API key is optional at construction. A lookup without one fails with
/// a configuration error before anything goes over the wire.
pub struct OpenWeatherClient {
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
    timeout: Duration,
}

impl OpenWeatherClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: "http://api.openweathermap.org".into(),
            timeout: WEATHER_TIMEOUT,
        }
    }

    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn request_error(&self, e: reqwest::Error) -> ToolError {
        if e.is_timeout() {
            ToolError::Timeout(self.timeout)
        } else {
            ToolError::Request(e.to_string())
        }
    }
}

#[async_trait]
impl WeatherLookup for OpenWeatherClient {
    async fn lookup(&self, city: &str, unit: TemperatureUnit) -> Result<Value, ToolError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ConfigError::MissingCredential {
                what: "OpenWeatherMap API key",
                vars: WEATHER_KEY_VARS,
            })?;

        debug!(city, unit = %unit, "openweather request");

        let resp = self
            .client
            .get(format!("{}/data/2.5/weather", self.base_url))
            .query(&[
                ("q", city),
                ("appid", api_key),
                ("units", unit.units_param()),
            ])
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| self.request_error(e))?;

        let status = resp.status();
        let text = resp.text().await.map_err(|e| self.request_error(e))?;

        if !status.is_success() {
            return Err(ToolError::ApiError {
                status: status.as_u16(),
                body: text,
            });
        }

        serde_json::from_str(&text).map_err(|e| ToolError::Parse(e.to_string()))
    }
}
