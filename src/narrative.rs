//! Seam to the external narrative collaborator.
//!
//! At game over the fortune report and the final score can be handed to a
//! text-completion service that writes a short reading. The engine only
//! builds the request and defines the [`NarrativeService`] trait; transport
//! belongs to the implementor.
//!
//! A failing or never-answering service has no effect on the engine: the
//! report is complete without prose.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::NarrativeError;
use crate::fortune::FortuneReport;

/// Cards above this value fall in the expansion band, the rest in the trial band.
pub const EXPANSION_BOUNDARY: u32 = 128;

const SYSTEM_PROMPT: &str = "You are a data-driven analyst of the flow of luck.
Read every card as a signal describing the state of luck.
The value is intensity, the tier is depth, and the suit is direction.

Boundary 128:
- Above 128: expansion band (luck becomes visible or grows stronger)
- 128 or below: trial band (adjustment and maintenance, never negative)
Do not use the words \"danger\" or \"decline\"; say \"trial\" or \"tuning\" instead.

Tiers:
Tier 1 (everyday): 🌿 growth 💤 stagnation 🌱 beginning 🔮 change 🌧️ decline
Tier 2 (symbolic): ❤️ love 💰 wealth 🌕 completion ☀️ happiness 🔥 will
Tier 3 (destiny): 💖 love 💎 wealth 🌞 happiness 🪞 insight 🔱 decision

Analysis:
1) Main flow: high values (above 128) with high tiers (2 or 3)
2) Supporting flow: middle values or the trial band (128 or below, tiers 1 or 2)
3) Tuning signals: opposing forces or energy swings

[Output rules]
- Form: today's fortune, one or two paragraphs
- Tone: clear, objective, report-like
- No emotional exaggeration or prophecy
- Ground the reading in values, tiers, and suits
- Explain how the flows relate to each other

Write today's fortune from the input below.";

const OUTPUT_FORMAT: &str = "[Output format]
Title: one-line summary (at most 20 characters, analytical)

Key points (3 lines):
- Main flow (above 128, higher tiers):
- Trial band (128 or below, supporting tiers):
- Tuning signal (contrast or energy swing):

Interpretation (2 to 3 paragraphs)

Evidence (3 to 5 bullets, card values and tiers only)

Advice (3 items, practical)

[Extra rules]
- If a tier 3 card is present, mention it in the first paragraph.
- Quote the 128 boundary explicitly.";

/// Speaker of a prompt message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// One chat message of the completion request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LlmMessage {
    pub role: Role,
    pub content: String,
}

#[derive(Serialize)]
struct RequestBody<'a> {
    messages: &'a [LlmMessage],
}

/// Response body of a summary endpoint.
#[derive(Debug, Default, Deserialize)]
struct ResponseBody {
    summary: Option<String>,
    error: Option<String>,
}

/// Prompt for one end-of-game reading.
#[derive(Clone, Debug, PartialEq)]
pub struct NarrativeRequest {
    report: FortuneReport,
    score: u64,
    logs: Vec<String>,
}

impl NarrativeRequest {
    #[must_use]
    pub fn new(report: &FortuneReport, score: u64) -> Self {
        Self {
            report: report.clone(),
            score,
            logs: Vec::new(),
        }
    }

    /// Attach recent game messages, oldest first.
    #[must_use]
    pub fn with_logs(mut self, logs: impl IntoIterator<Item = String>) -> Self {
        self.logs = logs.into_iter().collect();
        self
    }

    #[must_use]
    pub fn report(&self) -> &FortuneReport {
        &self.report
    }

    #[must_use]
    pub fn score(&self) -> u64 {
        self.score
    }

    #[must_use]
    pub fn system_prompt(&self) -> &'static str {
        SYSTEM_PROMPT
    }

    /// The data-bearing user message.
    #[must_use]
    pub fn user_prompt(&self) -> String {
        let report = &self.report;
        let counts = report.tier_counts;
        let delta = report.volatility_score;
        let energy = if delta >= 0 {
            format!("+{delta}")
        } else {
            delta.to_string()
        };

        format!(
            "Date/time: {}\n\nFinal score: {}\n\nCards:\n{}\n\nRecent log:\n{}\n\n\
             Tier distribution: destiny {}, symbolic {}, everyday {}\n\n\
             Energy delta: {}\n\n{}",
            report.timestamp.format("%Y-%m-%d %H:%M"),
            self.score,
            self.format_top_cards(),
            self.format_logs(),
            counts.tier3,
            counts.tier2,
            counts.tier1,
            energy,
            OUTPUT_FORMAT,
        )
    }

    /// System then user message.
    #[must_use]
    pub fn messages(&self) -> Vec<LlmMessage> {
        vec![
            LlmMessage {
                role: Role::System,
                content: SYSTEM_PROMPT.to_string(),
            },
            LlmMessage {
                role: Role::User,
                content: self.user_prompt(),
            },
        ]
    }

    /// `{"messages": [...]}` request body.
    pub fn to_json(&self) -> Result<String, NarrativeError> {
        let messages = self.messages();
        Ok(serde_json::to_string(&RequestBody {
            messages: &messages,
        })?)
    }

    fn format_top_cards(&self) -> String {
        self.report
            .top_cards
            .iter()
            .map(|card| {
                let band = if card.value > EXPANSION_BOUNDARY {
                    "expansion"
                } else {
                    "trial"
                };
                format!(
                    "- {} {} | {} | tier {} | {}",
                    card.suit_emoji(),
                    card.suit_label(),
                    card.value,
                    card.tier.number(),
                    band,
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Newest first, stamped one minute apart back from the report time.
    fn format_logs(&self) -> String {
        if self.logs.is_empty() {
            return "- none | No recent messages.".to_string();
        }

        self.logs
            .iter()
            .rev()
            .zip(0i64..)
            .map(|(message, minutes)| {
                let stamp = self.report.timestamp - Duration::minutes(minutes);
                format!("- {} | {}", stamp.format("%Y-%m-%d %H:%M"), message)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// External text-completion collaborator.
///
/// Implementations own transport and timeouts.
pub trait NarrativeService {
    /// Produce a reading for `request`.
    fn summarize(&self, request: &NarrativeRequest) -> Result<String, NarrativeError>;
}

/// Extract the summary from a `{"summary": .., "error": ..}` response body.
///
/// A non-blank summary wins; otherwise a reported error; otherwise
/// [`NarrativeError::EmptySummary`].
pub fn parse_summary_response(body: &str) -> Result<String, NarrativeError> {
    let response: ResponseBody = serde_json::from_str(body)?;

    if let Some(summary) = response.summary.as_deref().map(str::trim) {
        if !summary.is_empty() {
            return Ok(summary.to_string());
        }
    }
    match response.error {
        Some(error) => Err(NarrativeError::Service(error)),
        None => Err(NarrativeError::EmptySummary),
    }
}
