//! Transcript store for a single tutoring conversation.
//!
//! Holds the ordered, append-only log of turns and the escalation state
//! (last detail level and current depth) that "more detail" and "simpler"
//! requests build on. Clearing the transcript resets both together.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{TranscriptError, TranscriptResult};

/// Speaker of a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The student asking questions.
    User,
    /// The tutor's replies, including error diagnostics.
    Assistant,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

/// One role-tagged message in the conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    /// Who produced the turn.
    pub role: Role,
    /// Message text.
    pub content: String,
    /// When the turn was recorded.
    pub created_at: DateTime<Utc>,
}

impl Turn {
    fn new(role: Role, content: String) -> Self {
        Self {
            role,
            content,
            created_at: Utc::now(),
        }
    }
}

/// How a request should rewrite the question before it is sent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailLevel {
    /// Ask the question as typed.
    #[default]
    Normal,
    /// Re-ask the last question with more depth.
    Detailed,
    /// Re-ask the last question more simply.
    Simpler,
}

impl DetailLevel {
    /// Whether this level re-targets the last question instead of asking a new one.
    pub fn is_escalation(self) -> bool {
        !matches!(self, DetailLevel::Normal)
    }
}

impl std::fmt::Display for DetailLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DetailLevel::Normal => write!(f, "normal"),
            DetailLevel::Detailed => write!(f, "detailed"),
            DetailLevel::Simpler => write!(f, "simpler"),
        }
    }
}

/// Cumulative escalation state remembered between requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Escalation {
    /// Level of the most recent issued request.
    pub last_level: DetailLevel,
    /// Position on the depth ladder. Unbounded; rewrite lookups clamp it.
    pub depth: u32,
}

impl Escalation {
    /// State after issuing a request at `level`.
    pub fn advance(self, level: DetailLevel) -> Self {
        let depth = match level {
            DetailLevel::Normal => 0,
            DetailLevel::Detailed => self.depth.saturating_add(1),
            DetailLevel::Simpler => self.depth.saturating_sub(1),
        };
        Self {
            last_level: level,
            depth,
        }
    }
}

/// Ordered log of turns for one conversation.
#[derive(Debug, Clone)]
pub struct Transcript {
    session_id: String,
    turns: Vec<Turn>,
    escalation: Escalation,
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}

impl Transcript {
    /// Create an empty transcript with a fresh session id.
    pub fn new() -> Self {
        Self {
            session_id: Uuid::new_v4().to_string(),
            turns: Vec::new(),
            escalation: Escalation::default(),
        }
    }

    /// Append one turn at the end.
    pub fn append(&mut self, role: Role, content: impl Into<String>) -> TranscriptResult<()> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(TranscriptError::EmptyContent);
        }
        self.turns.push(Turn::new(role, content));
        Ok(())
    }

    /// Append a user question and the reply it received.
    ///
    /// Both contents are checked before either turn is written, so a
    /// rejected exchange leaves the transcript untouched.
    pub fn record_exchange(
        &mut self,
        question: impl Into<String>,
        answer: impl Into<String>,
    ) -> TranscriptResult<()> {
        let question = question.into();
        let answer = answer.into();
        if question.trim().is_empty() || answer.trim().is_empty() {
            return Err(TranscriptError::EmptyContent);
        }
        self.turns.push(Turn::new(Role::User, question));
        self.turns.push(Turn::new(Role::Assistant, answer));
        Ok(())
    }

    /// Owned snapshot of every turn in order.
    pub fn all(&self) -> Vec<Turn> {
        self.turns.clone()
    }

    /// Iterate over the turns without copying.
    pub fn iter(&self) -> std::slice::Iter<'_, Turn> {
        self.turns.iter()
    }

    /// Drop every turn, reset escalation and start a new session id.
    pub fn clear(&mut self) {
        self.turns.clear();
        self.escalation = Escalation::default();
        self.session_id = Uuid::new_v4().to_string();
    }

    /// Content of the most recent user turn, if any.
    pub fn last_user_question(&self) -> Option<&str> {
        self.turns
            .iter()
            .rev()
            .find(|t| t.role == Role::User)
            .map(|t| t.content.as_str())
    }

    /// Number of turns.
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Whether the transcript holds no turns.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Identifier of the current conversation.
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Current escalation state.
    pub fn escalation(&self) -> Escalation {
        self.escalation
    }

    /// Turns as pretty-printed JSON, for export.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.turns)
    }

    /// Record that a request at `level` was issued.
    pub fn note_level(&mut self, level: DetailLevel) -> Escalation {
        self.escalation = self.escalation.advance(level);
        self.escalation
    }
}
