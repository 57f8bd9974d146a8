use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    User,
    Assistant,
}

/// One entry of the conversation log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub origin: Origin,
    pub content: String,
    /// Marks the provisional assistant entry of an outstanding request.
    pub is_placeholder: bool,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            origin: Origin::User,
            content: content.into(),
            is_placeholder: false,
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            origin: Origin::Assistant,
            content: content.into(),
            is_placeholder: false,
        }
    }

    pub fn placeholder() -> Self {
        Self {
            origin: Origin::Assistant,
            content: String::new(),
            is_placeholder: true,
        }
    }
}
