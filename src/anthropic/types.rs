use serde::{Deserialize, Serialize};

use crate::transcript::{Role, Turn};

/// Message in an Anthropic conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Who said it
    pub role: MessageRole,
    /// Message text
    pub content: String,
}

/// Message role. The system prompt travels in its own request field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// The student
    User,
    /// The tutor
    Assistant,
}

impl Message {
    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

impl From<&Turn> for Message {
    fn from(turn: &Turn) -> Self {
        let role = match turn.role {
            Role::User => MessageRole::User,
            Role::Assistant => MessageRole::Assistant,
        };
        Self {
            role,
            content: turn.content.clone(),
        }
    }
}

/// What the tutor wants completed: a system prompt plus ordered messages.
///
/// Model and token cap are added by the client from its configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// System prompt
    pub system: String,
    /// History followed by the question being asked now
    pub messages: Vec<Message>,
}

impl CompletionRequest {
    /// Create a new completion request
    pub fn new(system: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            system: system.into(),
            messages,
        }
    }

    /// The final message, i.e. the question being asked now.
    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }
}

/// Body of `POST /v1/messages`
#[derive(Debug, Clone, Serialize)]
pub struct MessagesRequest {
    /// Model identifier
    pub model: String,
    /// Cap on generated tokens
    pub max_tokens: u32,
    /// System prompt
    pub system: String,
    /// Conversation messages, oldest first
    pub messages: Vec<Message>,
}

/// Successful response from `POST /v1/messages`
#[derive(Debug, Clone, Deserialize)]
pub struct MessagesResponse {
    /// Message id
    #[serde(default)]
    pub id: Option<String>,
    /// Model that answered
    #[serde(default)]
    pub model: Option<String>,
    /// Content blocks; the first text block is the answer
    pub content: Vec<ContentBlock>,
    /// Why generation stopped
    #[serde(default)]
    pub stop_reason: Option<String>,
    /// Token counts
    #[serde(default)]
    pub usage: Option<Usage>,
}

/// One block of response content
#[derive(Debug, Clone, Deserialize)]
pub struct ContentBlock {
    /// Block type, e.g. `text`
    #[serde(rename = "type")]
    pub block_type: String,
    /// Text of a `text` block
    #[serde(default)]
    pub text: Option<String>,
}

/// Token usage information
#[derive(Debug, Clone, Deserialize)]
pub struct Usage {
    /// Prompt tokens
    pub input_tokens: Option<u32>,
    /// Generated tokens
    pub output_tokens: Option<u32>,
}

impl MessagesResponse {
    /// Text of the first content block, if it carries any.
    pub fn first_text(&self) -> Option<&str> {
        self.content.first().and_then(|block| block.text.as_deref())
    }
}
