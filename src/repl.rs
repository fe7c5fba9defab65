//! Terminal front-end for a tutor session.
//!
//! Parses one line of input into a [`ReplCommand`], dispatches it against a
//! [`TutorSession`] and returns what should be printed.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

use crate::anthropic::CompletionBackend;
use crate::error::AppResult;
use crate::session::TutorSession;
use crate::topics::Topic;
use crate::transcript::{DetailLevel, Role, Transcript};

/// Help text printed by `/help`.
pub const HELP_TEXT: &str = "\
Commands:
  <question>       ask CellYeah a question
  /more            explain the last question in more detail
  /simpler         explain the last question more simply
  /history         show the conversation so far
  /export          print the conversation as JSON
  /clear           start fresh
  /topic [name]    list topics, or switch to one
  /example         show an example question for the current topic
  /help            show this help
  /quit            leave

Learning tips:
  - Start with the basics
  - Take it step by step
  - Ask about medical applications
  - Request real-life examples
  - Ask \"What if\" questions
  - Connect topics to health & disease
  - Ask for clarification anytime!";

/// One parsed line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// A new question.
    Ask(String),
    /// Re-ask the last question with more depth.
    More,
    /// Re-ask the last question more simply.
    Simpler,
    /// Show the conversation so far.
    History,
    /// Print the transcript as JSON.
    Export,
    /// Drop the conversation and start fresh.
    Clear,
    /// `/topic` with an optional selection.
    Topic(Option<String>),
    /// Show the current topic's example question.
    Example,
    /// Show commands and learning tips.
    Help,
    /// Leave the loop.
    Quit,
    /// Blank line.
    Empty,
    /// Unrecognised slash command.
    Unknown(String),
}

impl ReplCommand {
    /// Parse a raw input line.
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return ReplCommand::Empty;
        }
        if !line.starts_with('/') {
            return ReplCommand::Ask(line.to_string());
        }

        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };

        match name.to_lowercase().as_str() {
            "/more" | "/detail" | "/deeper" => ReplCommand::More,
            "/simpler" | "/confused" => ReplCommand::Simpler,
            "/history" => ReplCommand::History,
            "/export" => ReplCommand::Export,
            "/clear" | "/fresh" => ReplCommand::Clear,
            "/topic" | "/topics" => {
                ReplCommand::Topic((!rest.is_empty()).then(|| rest.to_string()))
            }
            "/example" => ReplCommand::Example,
            "/help" | "/?" => ReplCommand::Help,
            "/quit" | "/exit" => ReplCommand::Quit,
            other => ReplCommand::Unknown(other.to_string()),
        }
    }
}

/// Result of handling one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplOutput {
    /// Text to print, possibly empty.
    pub message: String,
    /// Whether the loop should stop.
    pub exit: bool,
}

impl ReplOutput {
    fn show(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            exit: false,
        }
    }

    fn quiet() -> Self {
        Self::show(String::new())
    }
}

/// Interactive loop state.
pub struct Repl<B> {
    session: TutorSession<B>,
    topic: Topic,
}

impl<B: CompletionBackend> Repl<B> {
    /// Create a REPL over a session.
    pub fn new(session: TutorSession<B>, topic: Topic) -> Self {
        Self { session, topic }
    }

    /// The underlying session.
    pub fn session(&self) -> &TutorSession<B> {
        &self.session
    }

    /// Currently selected topic.
    pub fn topic(&self) -> Topic {
        self.topic
    }

    /// Greeting shown when the loop starts.
    pub fn banner(&self) -> String {
        format!(
            "CellYeah! Your friendly biology & medical science tutor.\n\
             Current topic: {}\nType /help for commands.",
            self.topic
        )
    }

    /// Handle one command.
    pub async fn handle(&mut self, command: ReplCommand) -> ReplOutput {
        debug!(?command, "Handling command");
        match command {
            ReplCommand::Ask(question) => {
                let answer = self.session.ask(&question, DetailLevel::Normal).await;
                ReplOutput::show(format_answer(&answer))
            }
            ReplCommand::More => self.escalate(DetailLevel::Detailed).await,
            ReplCommand::Simpler => self.escalate(DetailLevel::Simpler).await,
            ReplCommand::History => ReplOutput::show(render_transcript(self.session.transcript())),
            ReplCommand::Export => match self.session.transcript().to_json() {
                Ok(json) => ReplOutput::show(json),
                Err(e) => ReplOutput::show(format!("Export failed: {}", e)),
            },
            ReplCommand::Clear => {
                self.session.clear();
                ReplOutput::show("Starting fresh.")
            }
            ReplCommand::Topic(None) => ReplOutput::show(render_topics(self.topic)),
            ReplCommand::Topic(Some(selection)) => match selection.parse::<Topic>() {
                Ok(topic) => {
                    self.topic = topic;
                    ReplOutput::show(format!("Current topic: {}", topic))
                }
                Err(e) => ReplOutput::show(e),
            },
            ReplCommand::Example => ReplOutput::show(format!(
                "Try this example:\n  {}",
                self.topic.example_question()
            )),
            ReplCommand::Help => ReplOutput::show(HELP_TEXT),
            ReplCommand::Quit => ReplOutput {
                message: "Understanding Biology, One Cell at a Time!".to_string(),
                exit: true,
            },
            ReplCommand::Empty => ReplOutput::quiet(),
            ReplCommand::Unknown(name) => {
                ReplOutput::show(format!("Unknown command {}. Type /help.", name))
            }
        }
    }

    async fn escalate(&mut self, level: DetailLevel) -> ReplOutput {
        let answer = self.session.ask("", level).await;
        if answer.is_empty() {
            return ReplOutput::show("Ask a question first.");
        }
        let tier = self.session.current_tier();
        let heading = match self.session.escalation().last_level {
            DetailLevel::Simpler => format!("(simpler, level {}: {})", tier.level, tier.label),
            _ => format!("(level {}: {})", tier.level, tier.label),
        };
        ReplOutput::show(format!("{}\n{}", heading, format_answer(&answer)))
    }

    /// Read commands line by line until `/quit` or end of input.
    pub async fn run<R, W>(&mut self, input: R, mut output: W) -> AppResult<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = input.lines();
        output
            .write_all(format!("{}\n\n> ", self.banner()).as_bytes())
            .await?;
        output.flush().await?;

        while let Some(line) = lines.next_line().await? {
            let reply = self.handle(ReplCommand::parse(&line)).await;
            if !reply.message.is_empty() {
                output.write_all(reply.message.as_bytes()).await?;
                output.write_all(b"\n").await?;
            }
            if reply.exit {
                break;
            }
            output.write_all(b"\n> ").await?;
            output.flush().await?;
        }

        output.flush().await?;
        Ok(())
    }
}

fn format_answer(answer: &str) -> String {
    if answer.is_empty() {
        return String::new();
    }
    format!("CellYeah:\n{}", answer)
}

/// Render the whole conversation for display.
pub fn render_transcript(transcript: &Transcript) -> String {
    if transcript.is_empty() {
        return "No conversation yet.".to_string();
    }
    transcript
        .iter()
        .map(|turn| {
            let speaker = match turn.role {
                Role::User => "You",
                Role::Assistant => "CellYeah",
            };
            format!(
                "[{}] {}:\n{}",
                turn.created_at.format("%H:%M:%S"),
                speaker,
                turn.content
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn render_topics(current: Topic) -> String {
    Topic::ALL
        .iter()
        .enumerate()
        .map(|(i, topic)| {
            let marker = if *topic == current { "*" } else { " " };
            format!("{} {:>2}. {} ({})", marker, i + 1, topic, topic.slug())
        })
        .collect::<Vec<_>>()
        .join("\n")
}
