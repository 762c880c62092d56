//! Chat channel contracts and session logic.
//!
//! The agent conversation rides a WebSocket, but everything that matters is
//! synchronous and testable here: the outgoing/incoming frame types and the
//! [`ChatExchange`] state machine that decides what the next outgoing frame
//! is. While the agent is waiting on a confirmation or a missing entity, the
//! next user message answers that pending request instead of opening a new
//! chat turn.
//!
//! Incoming frames never touch the triple store directly. A response that
//! carries or implies a new ontology surfaces as a [`ChatEvent`] the caller
//! feeds back into its session.

#[cfg(feature = "chat")]
pub mod live;

use serde::{Deserialize, Serialize};

use crate::client::OntologyDiff;
use crate::error::ChatError;
use crate::selection::Selection;
use crate::triple::Triple;

// ── Wire frames ─────────────────────────────────────────────────────────

/// Frame sent to the agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum ChatRequest {
    /// A fresh conversational turn, optionally carrying the triples the
    /// user flagged for the change request.
    Chat {
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        selected_triples: Option<Vec<Triple>>,
    },
    /// Reply to a pending confirmation or entity request.
    Confirm { pending_id: String, reply: String },
}

/// Frame received from the agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChatResponse {
    /// Plain answer, possibly highlighting triples.
    Answer {
        message: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        selected_triples: Option<Vec<Triple>>,
    },
    /// The agent changed the ontology.
    ChangeApplied {
        message: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        version_id: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        diff: Option<OntologyDiff>,
        /// Fresh Turtle snapshot; absent means the caller refetches.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        new_ontology: Option<String>,
    },
    /// The agent wants an explicit go-ahead before applying a change.
    ConfirmationNeeded {
        message: String,
        pending_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        warnings: Option<Vec<String>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        risk: Option<String>,
    },
    /// The agent could not resolve terms and asks the user to pick.
    EntityNeeded {
        message: String,
        pending_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        missing_terms: Option<Vec<String>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        candidates: Option<Vec<String>>,
    },
    Error { message: String },
}

/// Encode an outgoing frame as WebSocket text.
pub fn encode_request(request: &ChatRequest) -> Result<String, ChatError> {
    serde_json::to_string(request).map_err(|err| ChatError::Encode {
        message: err.to_string(),
    })
}

/// Decode an incoming WebSocket text frame.
pub fn decode_response(raw: &str) -> Result<ChatResponse, ChatError> {
    serde_json::from_str(raw).map_err(|err| ChatError::Decode {
        message: err.to_string(),
    })
}

// ── Session effects ─────────────────────────────────────────────────────

/// What the caller must do to its triple store after an incoming frame.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatEvent {
    /// Parse this Turtle snapshot and swap it in.
    ReplaceOntology(String),
    /// The ontology changed server-side without a snapshot; refetch latest.
    RefreshOntology,
}

// ── ChatExchange ────────────────────────────────────────────────────────

/// Tracks the pending-request state of one agent conversation.
#[derive(Debug, Default)]
pub struct ChatExchange {
    pending_id: Option<String>,
}

impl ChatExchange {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of the request the agent is waiting on, if any.
    pub fn pending_id(&self) -> Option<&str> {
        self.pending_id.as_deref()
    }

    /// Build the next outgoing frame for `text`.
    ///
    /// A pending agent request turns the message into its reply and clears
    /// the pending state. Otherwise this opens a chat turn that carries and
    /// drains the current selection; replies never consume the selection.
    pub fn compose(&mut self, text: impl Into<String>, selection: &mut Selection) -> ChatRequest {
        match self.pending_id.take() {
            Some(pending_id) => ChatRequest::Confirm {
                pending_id,
                reply: text.into(),
            },
            None => {
                let staged = selection.take();
                ChatRequest::Chat {
                    text: text.into(),
                    selected_triples: (!staged.is_empty()).then_some(staged),
                }
            }
        }
    }

    /// Record an incoming frame, returning the store effect it demands.
    pub fn receive(&mut self, response: &ChatResponse) -> Option<ChatEvent> {
        match response {
            ChatResponse::ConfirmationNeeded { pending_id, .. }
            | ChatResponse::EntityNeeded { pending_id, .. } => {
                self.pending_id = Some(pending_id.clone());
                None
            }
            ChatResponse::ChangeApplied { new_ontology, .. } => Some(match new_ontology {
                Some(content) => ChatEvent::ReplaceOntology(content.clone()),
                None => ChatEvent::RefreshOntology,
            }),
            ChatResponse::Answer { .. } | ChatResponse::Error { .. } => None,
        }
    }
}
