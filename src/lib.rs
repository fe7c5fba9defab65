//! # CellYeah Tutor
//!
//! A conversational biology tutor that forwards student questions to the
//! Anthropic Messages API and keeps the conversation in a linear transcript.
//!
//! ## Features
//!
//! - **Transcript store**: ordered user/assistant turns with "start fresh"
//! - **Escalation**: re-ask the last question with more depth or more simply
//! - **Depth ladder**: Foundation → Systems & Clinical → Advanced Integration → Cutting Edge
//! - **Error-tolerant answers**: failed calls are recorded as diagnostic replies
//! - **Terminal REPL**: topic catalogue, example questions and history view
//!
//! ## Architecture
//!
//! ```text
//! REPL → TutorSession → Anthropic Messages API (HTTP)
//!             ↓
//!        Transcript (in memory)
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use cellyeah_tutor::{Config, TutorSession};
//! use cellyeah_tutor::anthropic::AnthropicClient;
//! use cellyeah_tutor::transcript::DetailLevel;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let client = AnthropicClient::new(&config.anthropic, config.request.clone())?;
//!     let mut session = TutorSession::new(client, &config.tutor);
//!     println!("{}", session.ask("What is mitosis?", DetailLevel::Normal).await);
//!     println!("{}", session.ask("", DetailLevel::Detailed).await);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

/// Anthropic Messages API client and wire types.
pub mod anthropic;
/// Configuration management for the tutor.
pub mod config;
/// Error types and result aliases for the application.
pub mod error;
/// System prompt, depth ladder and question rewrite table.
pub mod prompts;
/// Interactive terminal front-end.
pub mod repl;
/// Conversation-and-escalation manager.
pub mod session;
/// Study topics and example questions.
pub mod topics;
/// Transcript store and escalation state.
pub mod transcript;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use session::TutorSession;
