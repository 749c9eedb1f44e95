use super::{strip_code_fences, AiError};
use log::warn;
use serde::{Deserialize, Serialize};

/// Request body: `{ "taskDescription": ... }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionRequest {
    pub task_description: String,
}

/// Response body: `{ "suggestedTasks": [...] }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionResponse {
    pub suggested_tasks: Vec<String>,
}

/// Proposes tasks similar to a description
pub trait TaskSuggester {
    fn suggest_similar_tasks(&self, request: &SuggestionRequest) -> Result<SuggestionResponse, AiError>;
}

/// Validate a raw model reply against the response schema
pub fn parse_suggestion_response(raw: &str) -> Result<Vec<String>, AiError> {
    let response: SuggestionResponse = serde_json::from_str(strip_code_fences(raw))
        .map_err(|e| AiError::InvalidResponse(e.to_string()))?;
    Ok(clean(response.suggested_tasks))
}

fn clean(suggestions: Vec<String>) -> Vec<String> {
    suggestions
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Ask for suggestions, failing open to an empty list
pub fn suggest_or_empty<T: TaskSuggester + ?Sized>(suggester: &T, description: &str) -> Vec<String> {
    let request = SuggestionRequest {
        task_description: description.to_string(),
    };
    match suggester.suggest_similar_tasks(&request) {
        Ok(response) => clean(response.suggested_tasks),
        Err(e) => {
            warn!("Task suggestions unavailable: {}", e);
            Vec::new()
        }
    }
}

/// Identifies one suggestion request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestTicket(u64);

/// Holds the suggestions for the newest request only
///
/// Every request takes a ticket from `begin`. A response is accepted only
/// if its ticket is still the newest issued, so a slow reply to a superseded
/// request can never overwrite fresher suggestions.
#[derive(Debug, Default)]
pub struct SuggestionTracker {
    issued: u64,
    accepted: Option<RequestTicket>,
    suggestions: Vec<String>,
}

impl SuggestionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request, superseding any in flight
    pub fn begin(&mut self) -> RequestTicket {
        self.issued += 1;
        self.suggestions.clear();
        self.accepted = None;
        RequestTicket(self.issued)
    }

    /// Store `suggestions` if `ticket` is the newest; returns whether it was kept
    pub fn accept(&mut self, ticket: RequestTicket, suggestions: Vec<String>) -> bool {
        if ticket.0 != self.issued {
            return false;
        }
        self.suggestions = suggestions;
        self.accepted = Some(ticket);
        true
    }

    /// Run a request through `suggester` and record the result under a fresh ticket
    pub fn request<T: TaskSuggester + ?Sized>(&mut self, suggester: &T, description: &str) -> &[String] {
        let ticket = self.begin();
        let suggestions = suggest_or_empty(suggester, description);
        self.accept(ticket, suggestions);
        &self.suggestions
    }

    /// Suggestions of the newest request, empty while it is pending
    pub fn current(&self) -> &[String] {
        &self.suggestions
    }

    pub fn is_pending(&self) -> bool {
        self.issued > 0 && self.accepted.is_none()
    }

    /// Drop suggestions, e.g. once one was added as a task
    pub fn dismiss(&mut self) {
        self.suggestions.clear();
    }
}
