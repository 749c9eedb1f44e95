//! Contracts for the two generative-AI flows.
//!
//! The hosted model is an external collaborator: this module defines what the
//! core expects from it, validates its responses and decides how failures are
//! recovered. Neither flow is retried.

pub mod alarm;
pub mod suggest;

pub use alarm::{request_alarm, AlarmGenerator, AlarmRequest, TaskAlarm};
pub use suggest::{
    parse_suggestion_response, suggest_or_empty, RequestTicket, SuggestionRequest,
    SuggestionResponse, SuggestionTracker, TaskSuggester,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AiError {
    #[error("AI request failed: {0}")]
    Request(String),

    #[error("Failed to parse AI response: {0}")]
    InvalidResponse(String),

    #[error("No audio was generated for the alarm")]
    MissingAudio,
}

/// Strip markdown code fences a model may wrap around JSON
pub(crate) fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let inner = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}
