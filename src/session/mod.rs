//! Conversation-and-escalation manager.
//!
//! [`TutorSession`] owns one conversation's [`Transcript`], rewrites each
//! request according to its [`DetailLevel`], sends one completion request
//! and folds the exchange back into the transcript. Every failure is turned
//! into displayable text, so callers only ever get a `String` back.


use tracing::{debug, info, warn};

use crate::anthropic::{AnthropicClient, CompletionBackend, CompletionRequest, Message};
use crate::config::TutorConfig;
use crate::error::CompletionError;
use crate::prompts::{self, DepthTier, TUTOR_SYSTEM_PROMPT};
use crate::transcript::{DetailLevel, Escalation, Transcript};

/// One tutoring conversation bound to a completion backend.
pub struct TutorSession<B = AnthropicClient> {
    backend: B,
    transcript: Transcript,
    system_prompt: String,
    exam_ready: bool,
}

impl<B: CompletionBackend> TutorSession<B> {
    /// Create a session with an empty transcript.
    pub fn new(backend: B, config: &TutorConfig) -> Self {
        Self {
            backend,
            transcript: Transcript::new(),
            system_prompt: TUTOR_SYSTEM_PROMPT.to_string(),
            exam_ready: config.exam_ready_prefix,
        }
    }

    /// Replace the system prompt sent with every request.
    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = system_prompt.into();
        self
    }

    /// Ask a question, or re-ask the last one at a different detail level.
    ///
    /// For [`DetailLevel::Detailed`] and [`DetailLevel::Simpler`] the
    /// `question` argument is ignored and the most recent user question is
    /// re-targeted instead. Returns an empty string without touching the
    /// transcript when there is nothing to ask. Otherwise returns the
    /// answer, or a diagnostic if the call failed; either way the original
    /// question and the returned text are appended to the transcript.
    pub async fn ask(&mut self, question: &str, level: DetailLevel) -> String {
        let Some(original) = self.resolve_question(question, level) else {
            return String::new();
        };

        let escalation = self.transcript.escalation().advance(level);
        let outbound = prompts::rewrite(level, &original, escalation.depth, self.exam_ready);
        let request = self.build_request(outbound);

        debug!(
            session_id = %self.transcript.session_id(),
            detail_level = %level,
            depth = escalation.depth,
            history = self.transcript.len(),
            "Sending tutor request"
        );

        let answer = match self.backend.complete(request).await {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => CompletionError::InvalidResponse {
                message: "response contained no text content".to_string(),
            }
            .to_diagnostic(),
            Err(e) => {
                warn!(
                    session_id = %self.transcript.session_id(),
                    error = %e,
                    "Completion failed, recording diagnostic"
                );
                e.to_diagnostic()
            }
        };

        self.transcript.note_level(level);
        if let Err(e) = self.transcript.record_exchange(original, answer.clone()) {
            warn!(error = %e, "Exchange not recorded");
        }

        info!(
            session_id = %self.transcript.session_id(),
            detail_level = %level,
            depth = escalation.depth,
            turns = self.transcript.len(),
            "Tutor exchange recorded"
        );

        answer
    }

    /// Pick the question text to send, or `None` when the request is a no-op.
    fn resolve_question(&self, question: &str, level: DetailLevel) -> Option<String> {
        if level.is_escalation() {
            let last = self.transcript.last_user_question();
            if last.is_none() {
                debug!(detail_level = %level, "No previous question to escalate");
            }
            return last.map(str::to_string);
        }

        let trimmed = question.trim();
        if trimmed.is_empty() {
            debug!("Ignoring empty question");
            return None;
        }
        Some(trimmed.to_string())
    }

    /// History in order, followed by the rewritten question.
    fn build_request(&self, outbound: String) -> CompletionRequest {
        let mut messages: Vec<Message> = self.transcript.iter().map(Message::from).collect();
        messages.push(Message::user(outbound));
        CompletionRequest::new(self.system_prompt.clone(), messages)
    }

    /// Read-only view of the conversation.
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Start fresh: drop all turns and escalation state.
    pub fn clear(&mut self) {
        info!(
            session_id = %self.transcript.session_id(),
            turns = self.transcript.len(),
            "Clearing transcript"
        );
        self.transcript.clear();
    }

    /// The question "more detail" / "simpler" would re-ask.
    pub fn pending_question(&self) -> Option<&str> {
        self.transcript.last_user_question()
    }

    /// Current escalation state.
    pub fn escalation(&self) -> Escalation {
        self.transcript.escalation()
    }

    /// Depth tier of the most recent answer.
    pub fn current_tier(&self) -> &'static DepthTier {
        prompts::depth_tier(self.transcript.escalation().depth)
    }
}
