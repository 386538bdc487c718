use std::collections::BTreeMap;

use serde_json::{json, Map, Value};

pub const WEATHER_TOOL: &str = "get_current_weather";

/// JSON-schema type names in the form the Gemini API expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaType {
    String,
    Number,
    Integer,
    Boolean,
    Object,
}

impl SchemaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaType::String => "STRING",
            SchemaType::Number => "NUMBER",
            SchemaType::Integer => "INTEGER",
            SchemaType::Boolean => "BOOLEAN",
            SchemaType::Object => "OBJECT",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSchema {
    pub kind: SchemaType,
    pub description: Option<String>,
    pub allowed: Option<Vec<String>>,
}

impl ParameterSchema {
    pub fn new(kind: SchemaType) -> Self {
        Self {
            kind,
            description: None,
            allowed: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_allowed<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed = Some(values.into_iter().map(Into::into).collect());
        self
    }

    fn to_json(&self) -> Value {
        let mut schema = json!({ "type": self.kind.as_str() });
        if let Some(ref description) = self.description {
            schema["description"] = Value::String(description.clone());
        }
        if let Some(ref allowed) = self.allowed {
            schema["enum"] = json!(allowed);
        }
        schema
    }
}

/// A function the model may call: name, description, and parameter schema.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolDeclaration {
    pub name: String,
    pub description: String,
    pub parameters: BTreeMap<String, ParameterSchema>,
    pub required: Vec<String>,
}

impl ToolDeclaration {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: BTreeMap::new(),
            required: Vec::new(),
        }
    }

    pub fn param(mut self, name: impl Into<String>, schema: ParameterSchema) -> Self {
        self.parameters.insert(name.into(), schema);
        self
    }

    pub fn required_param(mut self, name: impl Into<String>, schema: ParameterSchema) -> Self {
        let name = name.into();
        self.required.push(name.clone());
        self.parameters.insert(name, schema);
        self
    }

    /// The function declaration object sent to the model.
    pub fn to_json(&self) -> Value {
        let properties: Map<String, Value> = self
            .parameters
            .iter()
            .map(|(name, schema)| (name.clone(), schema.to_json()))
            .collect();

        json!({
            "name": self.name,
            "description": self.description,
            "parameters": {
                "type": SchemaType::Object.as_str(),
                "properties": properties,
                "required": self.required,
            }
        })
    }
}

/// The weather lookup tool.
pub fn weather_declaration() -> ToolDeclaration {
    ToolDeclaration::new(WEATHER_TOOL, "Get the current weather in a given location")
        .required_param(
            "city",
            ParameterSchema::new(SchemaType::String)
                .with_description("The city name, e.g., London"),
        )
        .param(
            "unit",
            ParameterSchema::new(SchemaType::String).with_allowed(["celsius", "fahrenheit"]),
        )
}

/// The set of declarations exposed to one request.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolCatalog {
    declarations: Vec<ToolDeclaration>,
}

impl ToolCatalog {
    pub fn new(declarations: Vec<ToolDeclaration>) -> Self {
        Self { declarations }
    }

    pub fn weather() -> Self {
        Self::new(vec![weather_declaration()])
    }

    pub fn declarations(&self) -> &[ToolDeclaration] {
        &self.declarations
    }

    pub fn names(&self) -> Vec<&str> {
        self.declarations.iter().map(|d| d.name.as_str()).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.declarations.iter().any(|d| d.name == name)
    }

    pub fn to_json(&self) -> Value {
        json!({
            "functionDeclarations": self
                .declarations
                .iter()
                .map(ToolDeclaration::to_json)
                .collect::<Vec<_>>(),
        })
    }
}
