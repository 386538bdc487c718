use async_trait::async_trait;
use serde_json::Value;

use super::weather::TemperatureUnit;
use crate::error::ToolError;

/// Executes the weather tool. Implemented by [`super::OpenWeatherClient`]
/// and by test doubles.
#[async_trait]
pub trait WeatherLookup: Send + Sync {
    async fn lookup(&self, city: &str, unit: TemperatureUnit) -> Result<Value, ToolError>;
}

#[async_trait]
impl WeatherLookup for Box<dyn WeatherLookup> {
    async fn lookup(&self, city: &str, unit: TemperatureUnit) -> Result<Value, ToolError> {
        (**self).lookup(city, unit).await
    }
}
