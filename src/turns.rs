//! Conversation turns for the two round trips.
//!
//! The follow-up must replay the model's first turn exactly as received: the
//! service matches the function response against that prior call.

use serde_json::Value;

use crate::types::{Content, FunctionResponse, Part};

pub fn weather_prompt(city: &str) -> String {
    format!("What is the weather like in {city}?")
}

/// First turn: the user's question as a single text part.
pub fn initial_turn(prompt: &str) -> Content {
    Content::user(vec![Part::text(prompt)])
}

/// Second-round conversation: the original user turn, the model turn as it
/// came back, and a user turn carrying the tool result.
pub fn follow_up(
    user_turn: Content,
    model_turn: Content,
    tool_name: &str,
    result: Value,
) -> Vec<Content> {
    vec![
        user_turn,
        model_turn,
        Content::user(vec![Part::FunctionResponse(FunctionResponse {
            name: tool_name.to_string(),
            response: result,
        })]),
    ]
}
