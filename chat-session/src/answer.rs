//! Rendering of the gateway's decoded response into assistant text.

use serde_json::Value;

/// The three response shapes the chat view knows how to present.
#[derive(Debug, Clone, PartialEq)]
pub enum AnswerShape {
    /// `{"answers": [...]}` with at least one entry.
    AnswerList(Vec<String>),
    /// `{"output": "..."}` with a non-empty string.
    SingleOutput(String),
    /// Anything else that decoded as JSON.
    Unrecognized(Value),
}

impl AnswerShape {
    pub fn decode(value: Value) -> Self {
        if let Some(answers) = value.get("answers").and_then(Value::as_array) {
            if !answers.is_empty() {
                return AnswerShape::AnswerList(answers.iter().map(entry_text).collect());
            }
        }

        match value.get("output").and_then(Value::as_str) {
            Some(output) if !output.is_empty() => AnswerShape::SingleOutput(output.to_string()),
            _ => AnswerShape::Unrecognized(value),
        }
    }

    /// A single answer renders verbatim; several are numbered from 1 and
    /// separated by a blank line.
    pub fn render(&self) -> String {
        match self {
            AnswerShape::AnswerList(answers) if answers.len() == 1 => answers[0].clone(),
            AnswerShape::AnswerList(answers) => answers
                .iter()
                .enumerate()
                .map(|(i, answer)| format!("{}. {}", i + 1, answer))
                .collect::<Vec<_>>()
                .join("\n\n"),
            AnswerShape::SingleOutput(output) => output.clone(),
            AnswerShape::Unrecognized(raw) => raw.to_string(),
        }
    }
}

pub fn format_answer(value: Value) -> String {
    AnswerShape::decode(value).render()
}

fn entry_text(entry: &Value) -> String {
    match entry {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
