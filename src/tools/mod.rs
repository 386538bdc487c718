pub mod declaration;
pub mod handler;
pub mod weather;

pub use declaration::{
    weather_declaration, ParameterSchema, SchemaType, ToolCatalog, ToolDeclaration, WEATHER_TOOL,
};
pub use handler::WeatherLookup;
pub use weather::{OpenWeatherClient, TemperatureUnit, WEATHER_TIMEOUT};
