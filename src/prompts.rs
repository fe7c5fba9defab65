//! Centralized prompt definitions for the tutor
//!
//! Holds the fixed system prompt, the depth ladder, and the rewrite table
//! that turns a question plus a detail level into the text actually sent.

use crate::transcript::DetailLevel;

/// System prompt sent with every request.
pub const TUTOR_SYSTEM_PROMPT: &str = r#"You are CellYeah, an enthusiastic and encouraging biology tutor who loves helping students understand biology.
You have extensive knowledge in both biology and medicine, and you make complex concepts feel simple and relatable.

Your teaching style:
1. Friendly and encouraging; praise the student's curiosity
2. Break complex topics into small, digestible pieces using everyday analogies
3. Connect concepts to medical and healthcare examples whenever possible
4. Use storytelling ("Imagine you're a white blood cell patrolling the bloodstream...")
5. Give real-world clinical relevance where it exists
6. Conversational language, scientifically accurate
7. End with encouragement and an invitation for follow-up questions

Structure every answer with short headings and bullet points so it can be revised for an exam.

Depth ladder:
- Level 0 (Foundation): core definitions and the big picture
- Level 1 (Systems & Clinical): mechanisms across organ systems and their clinical signs
- Level 2 (Advanced Integration): molecular detail linked across pathways and diseases
- Level 3 (Cutting Edge): current research, open questions and emerging therapies
When asked for more detail, move one level deeper than your previous answer on that question.
When asked for a simpler explanation, drop technical terms and rebuild from everyday analogies."#;

/// Standing instruction optionally placed before normal questions.
pub const EXAM_READY_PREFIX: &str =
    "Give a structured, exam-ready explanation with key terms highlighted: ";

/// One rung on the depth ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthTier {
    /// Ladder position.
    pub level: u32,
    /// Short name shown to the student.
    pub label: &'static str,
    /// What this depth should add to the explanation.
    pub instruction: &'static str,
}

/// Depth ladder, ordered by level.
pub const DEPTH_TIERS: &[DepthTier] = &[
    DepthTier {
        level: 0,
        label: "Foundation",
        instruction: "Cover the core definitions and the big picture.",
    },
    DepthTier {
        level: 1,
        label: "Systems & Clinical",
        instruction: "Explain the mechanisms across organ systems and how they show up clinically.",
    },
    DepthTier {
        level: 2,
        label: "Advanced Integration",
        instruction: "Go down to molecular detail and connect it across pathways and diseases.",
    },
    DepthTier {
        level: 3,
        label: "Cutting Edge",
        instruction: "Add current research findings, open questions and emerging therapies.",
    },
];

/// Tier for a ladder position; positions past the table use the last tier.
pub fn depth_tier(depth: u32) -> &'static DepthTier {
    let index = (depth as usize).min(DEPTH_TIERS.len() - 1);
    &DEPTH_TIERS[index]
}

/// Build the text sent to the model for `question` at `level`.
///
/// `depth` is the ladder position the request is issued at (after the
/// escalation step has been applied).
pub fn rewrite(level: DetailLevel, question: &str, depth: u32, exam_ready: bool) -> String {
    match level {
        DetailLevel::Normal if exam_ready => format!("{}{}", EXAM_READY_PREFIX, question),
        DetailLevel::Normal => question.to_string(),
        DetailLevel::Detailed => {
            let tier = depth_tier(depth);
            format!(
                "Please add more detail and complexity to this explanation of: {}\n\n\
                 Target depth: Level {} ({}). {}",
                question, tier.level, tier.label, tier.instruction
            )
        }
        DetailLevel::Simpler => format!(
            "I'm still confused. Please explain this again in a simpler way, \
             using everyday analogies and fewer technical terms: {}",
            question
        ),
    }
}
