//! Weather agent CLI.
//!
//! Usage:
//!   GEMINI_API_KEY=... OPENWEATHER_API_KEY=... weather-agent London
//!   weather-agent "New York" --unit fahrenheit --temperature 0.5
//!
//! Credentials may also live in a `.env` file in the working directory.

use clap::Parser;
use weather_agent::{Agent, AgentError, Config, Outcome, TemperatureUnit};

#[derive(Parser)]
#[command(
    name = "weather-agent",
    about = "CLI weather agent using Gemini tool use and OpenWeatherMap"
)]
struct Cli {
    /// City name, e.g. London
    city: String,

    /// Temperature unit
    #[arg(long, value_enum, default_value_t = TemperatureUnit::Celsius)]
    unit: TemperatureUnit,

    /// Model temperature (creativity)
    #[arg(long, default_value_t = 0.2)]
    temperature: f64,

    /// Gemini model id (overrides GEMINI_MODEL)
    #[arg(long)]
    model: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(outcome) => println!("{outcome}"),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}

async fn run(cli: Cli) -> Result<Outcome, AgentError> {
    let mut config = Config::from_env()?;
    if let Some(model) = cli.model {
        config.model = model;
    }

    let agent = Agent::from_config(&config);
    let result = agent.run(&cli.city, cli.unit, cli.temperature).await?;
    Ok(result.outcome)
}
