pub mod config;
pub mod error;
pub mod inference;
pub mod tools;
pub mod turns;
pub mod types;

#[cfg(test)]
mod test_server;

use std::fmt;

use tracing::{info, warn};

pub use config::Config;
pub use error::{AgentError, ConfigError, InferenceError, ToolError};
pub use inference::{GeminiProvider, InferenceProvider};
pub use tools::{
    weather_declaration, OpenWeatherClient, TemperatureUnit, ToolCatalog, ToolDeclaration,
    WeatherLookup, WEATHER_TOOL,
};
pub use types::{
    ArgValue, Candidate, Content, FunctionCall, FunctionResponse, InferenceRequest,
    InferenceResponse, Part, Role, Usage,
};

pub const SYSTEM_INSTRUCTION: &str =
    "You are a helpful weather assistant. Use the provided tools to get accurate weather information.";

/// Agent configuration.
pub struct AgentConfig {
    pub model: String,
    pub system: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            model: config::DEFAULT_MODEL.into(),
            system: SYSTEM_INSTRUCTION.into(),
        }
    }
}

/// The tool call picked out of a model response, with arguments validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    pub name: String,
    pub city: String,
    pub unit: TemperatureUnit,
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The model replied without calling the tool.
    Direct(String),
    /// The model called the tool and answered from its result.
    Final(String),
}

impl Outcome {
    pub fn text(&self) -> &str {
        match self {
            Outcome::Direct(text) | Outcome::Final(text) => text,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Direct(text) => write!(f, "Model answered directly:\n{text}"),
            Outcome::Final(text) => write!(f, "Final Answer:\n{text}"),
        }
    }
}

/// Result of an agent invocation.
#[derive(Debug)]
pub struct AgentResult {
    pub outcome: Outcome,
    pub tool_call: Option<ToolInvocation>,
    pub usage: Usage,
}

/// Pick the weather call to act on from a model turn.
///
/// Calls to tools outside `catalog`, or without a `city`, are skipped. Only
/// the first qualifying call is returned; any later calls are logged and
/// dropped. A missing or unrecognised `unit` resolves to `fallback_unit`.
pub fn select_tool_call(
    parts: &[Part],
    catalog: &ToolCatalog,
    fallback_unit: TemperatureUnit,
) -> Option<ToolInvocation> {
    let mut chosen: Option<ToolInvocation> = None;

    for part in parts {
        let call = match part {
            Part::FunctionCall(call) => call,
            Part::Text { .. } | Part::FunctionResponse(_) | Part::Opaque(_) => continue,
        };

        if chosen.is_some() {
            warn!(tool = %call.name, "ignoring additional tool call in the same turn");
            continue;
        }

        if !catalog.contains(&call.name) {
            warn!(tool = %call.name, "skipping call to undeclared tool");
            continue;
        }

        let Some(city) = call.arg("city").as_text() else {
            warn!(tool = %call.name, "skipping tool call without a city");
            continue;
        };

        let unit = match call.arg("unit") {
            ArgValue::String(name) => TemperatureUnit::from_name(&name).unwrap_or_else(|| {
                warn!(unit = %name, fallback = %fallback_unit, "unrecognised unit");
                fallback_unit
            }),
            ArgValue::Number(_) | ArgValue::Absent => fallback_unit,
        };

        chosen = Some(ToolInvocation {
            name: call.name.clone(),
            city,
            unit,
        });
    }

    chosen
}

/// The agent. One question in, at most two model round trips, one answer out.
pub struct Agent {
    provider: Box<dyn InferenceProvider>,
    weather: Box<dyn WeatherLookup>,
    catalog: ToolCatalog,
    config: AgentConfig,
}

impl Agent {
    pub fn new(
        provider: impl InferenceProvider + 'static,
        weather: impl WeatherLookup + 'static,
        config: AgentConfig,
    ) -> Self {
        Self {
            provider: Box::new(provider),
            weather: Box::new(weather),
            catalog: ToolCatalog::weather(),
            config,
        }
    }

    /// Gemini plus OpenWeatherMap, wired from loaded configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            GeminiProvider::new(&config.gemini_api_key),
            OpenWeatherClient::new(config.weather_api_key.clone()),
            AgentConfig {
                model: config.model.clone(),
                ..AgentConfig::default()
            },
        )
    }

    pub fn catalog(&self) -> &ToolCatalog {
        &self.catalog
    }

    /// Ask about the weather in `city`.
    ///
    /// The first request carries the system instruction and temperature. If
    /// the model asks for `get_current_weather`, the lookup runs and a second
    /// request replays the conversation with the result attached. Lookup and
    /// inference failures end the run.
    pub async fn run(
        &self,
        city: &str,
        unit: TemperatureUnit,
        temperature: f64,
    ) -> Result<AgentResult, AgentError> {
        let prompt = turns::weather_prompt(city);
        let user_turn = turns::initial_turn(&prompt);

        info!(city, unit = %unit, temperature, "sending prompt");
        let first = self
            .provider
            .infer(InferenceRequest {
                model: self.config.model.clone(),
                contents: vec![user_turn.clone()],
                tools: vec![self.catalog.clone()],
                system: Some(self.config.system.clone()),
                temperature: Some(temperature),
            })
            .await?;

        let mut usage = first.usage.clone();
        let parts = first.first_parts().to_vec();

        let Some(invocation) = select_tool_call(&parts, &self.catalog, unit) else {
            info!(
                parts = parts.len(),
                input_tokens = usage.input_tokens,
                output_tokens = usage.output_tokens,
                "model answered without a tool call"
            );
            return Ok(AgentResult {
                outcome: Outcome::Direct(first.text()),
                tool_call: None,
                usage,
            });
        };

        info!(
            tool = %invocation.name,
            city = %invocation.city,
            unit = %invocation.unit,
            "executing tool call"
        );
        let result = self.weather.lookup(&invocation.city, invocation.unit).await?;

        let contents = turns::follow_up(
            user_turn,
            Content::model(parts),
            &invocation.name,
            result,
        );

        info!("sending tool result");
        let second = self
            .provider
            .infer(InferenceRequest {
                model: self.config.model.clone(),
                contents,
                tools: vec![self.catalog.clone()],
                system: None,
                temperature: None,
            })
            .await?;
        usage.accumulate(&second.usage);

        info!(
            input_tokens = usage.input_tokens,
            output_tokens = usage.output_tokens,
            "agent finished"
        );
        Ok(AgentResult {
            outcome: Outcome::Final(second.text()),
            tool_call: Some(invocation),
            usage,
        })
    }
}
