use serde_json::{Map, Value};

use crate::tools::ToolCatalog;

/// Who authored a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Model,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Model => "model",
        }
    }
}

/// One turn of the conversation.
#[derive(Debug, Clone, PartialEq)]
pub struct Content {
    pub role: Role,
    pub parts: Vec<Part>,
}

impl Content {
    pub fn user(parts: Vec<Part>) -> Self {
        Self {
            role: Role::User,
            parts,
        }
    }

    pub fn model(parts: Vec<Part>) -> Self {
        Self {
            role: Role::Model,
            parts,
        }
    }
}

/// An atomic unit of turn content.
#[derive(Debug, Clone, PartialEq)]
pub enum Part {
    Text {
        text: String,
        thought_signature: Option<String>,
    },
    FunctionCall(FunctionCall),
    FunctionResponse(FunctionResponse),
    /// A part this crate does not interpret (thought summaries, code
    /// execution, malformed calls). Kept raw so it can be sent back as-is.
    Opaque(Value),
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Part::Text {
            text: text.into(),
            thought_signature: None,
        }
    }
}

/// A tool invocation requested by the model.
///
/// `args` is kept exactly as the service sent it so the call can be echoed
/// back untouched. Use [`FunctionCall::arg`] to read a typed value.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub name: String,
    pub args: Map<String, Value>,
    /// Opaque token the service attaches to calls from thinking models.
    pub thought_signature: Option<String>,
}

impl FunctionCall {
    pub fn new(name: impl Into<String>, args: Map<String, Value>) -> Self {
        Self {
            name: name.into(),
            args,
            thought_signature: None,
        }
    }

    pub fn arg(&self, key: &str) -> ArgValue {
        self.args.get(key).map(ArgValue::from).unwrap_or(ArgValue::Absent)
    }
}

/// The result of a tool invocation, sent back to the model.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionResponse {
    pub name: String,
    pub response: Value,
}

/// A loosely typed argument from model output. Anything that is not a
/// string or a number counts as absent.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    String(String),
    Number(f64),
    Absent,
}

impl ArgValue {
    pub fn is_absent(&self) -> bool {
        matches!(self, ArgValue::Absent)
    }

    /// String form of a present value. Numbers are formatted without a
    /// trailing `.0` when integral.
    pub fn as_text(&self) -> Option<String> {
        match self {
            ArgValue::String(s) => Some(s.clone()),
            ArgValue::Number(n) if n.fract() == 0.0 && n.is_finite() => {
                Some(format!("{}", *n as i64))
            }
            ArgValue::Number(n) => Some(n.to_string()),
            ArgValue::Absent => None,
        }
    }
}

impl From<&Value> for ArgValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::String(s) => ArgValue::String(s.clone()),
            Value::Number(n) => n.as_f64().map(ArgValue::Number).unwrap_or(ArgValue::Absent),
            _ => ArgValue::Absent,
        }
    }
}

/// Fully-formed request. The provider just sends it.
#[derive(Debug, Clone)]
pub struct InferenceRequest {
    pub model: String,
    pub contents: Vec<Content>,
    pub tools: Vec<ToolCatalog>,
    pub system: Option<String>,
    pub temperature: Option<f64>,
}

/// What came back from the LLM.
#[derive(Debug, Clone, Default)]
pub struct InferenceResponse {
    pub candidates: Vec<Candidate>,
    pub usage: Usage,
}

impl InferenceResponse {
    /// Parts of the first candidate, or nothing if the model produced none.
    pub fn first_parts(&self) -> &[Part] {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|c| c.parts.as_slice())
            .unwrap_or(&[])
    }

    /// Concatenated text parts of the first candidate.
    pub fn text(&self) -> String {
        self.first_parts()
            .iter()
            .filter_map(|p| match p {
                Part::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Candidate {
    pub content: Option<Content>,
    pub finish_reason: Option<String>,
}

/// Token usage for a single inference call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl Usage {
    pub fn accumulate(&mut self, other: &Usage) {
        self.input_tokens += other.input_tokens;
        self.output_tokens += other.output_tokens;
    }
}
