use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use super::InferenceProvider;
use crate::error::InferenceError;
use crate::types::{
    Candidate, Content, FunctionCall, FunctionResponse, InferenceRequest, InferenceResponse, Part,
    Role, Usage,
};

/// Gemini client via the `generateContent` REST endpoint.
pub struct GeminiProvider {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GeminiProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: "https://generativelanguage.googleapis.com".into(),
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

    /// Request body for `generateContent`. Optional fields are left out
    /// entirely rather than sent as null.
    fn build_body(request: &InferenceRequest) -> Value {
        let mut body = json!({
            "contents": request.contents.iter().map(encode_content).collect::<Vec<_>>(),
        });

        if !request.tools.is_empty() {
            body["tools"] = Value::Array(request.tools.iter().map(|t| t.to_json()).collect());
        }

        if let Some(ref system) = request.system {
            body["systemInstruction"] = json!({ "parts": [{ "text": system }] });
        }

        if let Some(temperature) = request.temperature {
            body["generationConfig"] = json!({ "temperature": temperature });
        }

        body
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct UsageMetadata {
    prompt_token_count: u32,
    candidates_token_count: u32,
}

fn encode_content(content: &Content) -> Value {
    json!({
        "role": content.role.as_str(),
        "parts": content.parts.iter().map(encode_part).collect::<Vec<_>>(),
    })
}

fn encode_part(part: &Part) -> Value {
    match part {
        Part::Text {
            text,
            thought_signature,
        } => {
            let mut value = json!({ "text": text });
            if let Some(ref signature) = thought_signature {
                value["thoughtSignature"] = Value::String(signature.clone());
            }
            value
        }
        Part::FunctionCall(call) => {
            let mut value = json!({
                "functionCall": {
                    "name": call.name,
                    "args": Value::Object(call.args.clone()),
                }
            });
            if let Some(ref signature) = call.thought_signature {
                value["thoughtSignature"] = Value::String(signature.clone());
            }
            value
        }
        Part::FunctionResponse(resp) => json!({
            "functionResponse": {
                "name": resp.name,
                "response": { "result": resp.response },
            }
        }),
        Part::Opaque(raw) => raw.clone(),
    }
}

fn decode_part(part: &Value) -> Part {
    let signature = || part["thoughtSignature"].as_str().map(String::from);

    if let Some(call) = part.get("functionCall") {
        if let Some(name) = call["name"].as_str() {
            return Part::FunctionCall(FunctionCall {
                name: name.to_string(),
                args: call["args"].as_object().cloned().unwrap_or_default(),
                thought_signature: signature(),
            });
        }
    } else if let Some(resp) = part.get("functionResponse") {
        if let Some(name) = resp["name"].as_str() {
            let response = &resp["response"];
            return Part::FunctionResponse(FunctionResponse {
                name: name.to_string(),
                response: response.get("result").unwrap_or(response).clone(),
            });
        }
    } else if let Some(text) = part["text"].as_str() {
        if part["thought"].as_bool() != Some(true) {
            return Part::Text {
                text: text.to_string(),
                thought_signature: signature(),
            };
        }
    }

    debug!(?part, "keeping uninterpreted part");
    Part::Opaque(part.clone())
}

fn decode_content(content: &Value) -> Content {
    let role = match content["role"].as_str() {
        Some("user") => Role::User,
        _ => Role::Model,
    };
    let parts = content["parts"]
        .as_array()
        .map(|parts| parts.iter().map(decode_part).collect())
        .unwrap_or_default();
    Content { role, parts }
}

fn decode_response(parsed: &Value) -> InferenceResponse {
    let candidates = parsed["candidates"]
        .as_array()
        .map(|list| {
            list.iter()
                .map(|c| Candidate {
                    content: c.get("content").map(decode_content),
                    finish_reason: c["finishReason"].as_str().map(String::from),
                })
                .collect()
        })
        .unwrap_or_default();

    let metadata: UsageMetadata = parsed
        .get("usageMetadata")
        .and_then(|m| serde_json::from_value(m.clone()).ok())
        .unwrap_or_default();

    InferenceResponse {
        candidates,
        usage: Usage {
            input_tokens: metadata.prompt_token_count,
            output_tokens: metadata.candidates_token_count,
        },
    }
}

#[async_trait]
impl InferenceProvider for GeminiProvider {
    async fn infer(&self, request: InferenceRequest) -> Result<InferenceResponse, InferenceError> {
        let body = Self::build_body(&request);

        debug!(
            model = %request.model,
            contents = request.contents.len(),
            tools = request.tools.len(),
            "gemini inference request"
        );

        let resp = self
            .client
            .post(format!(
                "{}/v1beta/models/{}:generateContent",
                self.base_url, request.model
            ))
            .header("x-goog-api-key", &self.api_key)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| InferenceError::Request(e.to_string()))?;

        let status = resp.status().as_u16();
        let text = resp
            .text()
            .await
            .map_err(|e| InferenceError::Request(e.to_string()))?;

        if status != 200 {
            return Err(InferenceError::ApiError { status, body: text });
        }

        let parsed: Value =
            serde_json::from_str(&text).map_err(|e| InferenceError::Parse(e.to_string()))?;

        let response = decode_response(&parsed);
        if response.candidates.is_empty() {
            debug!(feedback = %parsed["promptFeedback"], "gemini returned no candidates");
        }
        Ok(response)
    }
}
