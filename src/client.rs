//! HTTP client for the ontology backend.
//!
//! Two small REST surfaces are consumed: the ontology service (latest
//! document, full listing, prompt-driven updates) and the version history
//! (listing plus per-version detail with a structured add/remove diff).
//! Everything is blocking; the explorer pipeline never waits on the network,
//! the CLI drives these calls before handing data to a session.

use chrono::{DateTime, TimeZone, Utc};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::term::{ObjectValue, RdfTerm, TermKind};
use crate::triple::Triple;

// ---------------------------------------------------------------------------
// Client error
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ClientError {
    #[error("request to {url} failed: {message}")]
    #[diagnostic(
        code(ontoscope::client::request),
        help(
            "The ontology backend did not answer. Check that the server is \
             running and that `backend_url` in your config points at it."
        )
    )]
    Request { url: String, message: String },

    #[error("backend returned HTTP {status} for {url}")]
    #[diagnostic(
        code(ontoscope::client::status),
        help(
            "The backend rejected the request. A 404 usually means the version \
             id does not exist; a 5xx means the server itself failed."
        )
    )]
    Status { url: String, status: u16 },

    #[error("could not decode backend response: {message}")]
    #[diagnostic(
        code(ontoscope::client::decode),
        help(
            "The response body did not match the expected JSON shape. \
             The backend and explorer versions may be out of step."
        )
    )]
    Decode { message: String },
}

pub type ClientResult<T> = Result<T, ClientError>;

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// One stored ontology document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OntologyVersion {
    /// Turtle text of the ontology.
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_id: Option<String>,
}

/// Summary row in the version history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub version_id: String,
    /// Seconds since the UNIX epoch.
    pub created_at: i64,
    pub plan_summary: String,
    pub actor: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_version_id: Option<String>,
}

impl HistoryEntry {
    /// Creation time as UTC, when the timestamp is representable.
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.created_at, 0).single()
    }
}

/// One side of a diffed statement. The backend tags every position with a
/// kind string, so even subjects arrive as terms here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiffTerm {
    pub kind: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datatype: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
}

/// A statement added or removed between two versions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiffTriple {
    pub s: DiffTerm,
    pub p: DiffTerm,
    pub o: DiffTerm,
}

impl DiffTriple {
    /// View the diffed statement as an explorer triple, so display code can
    /// reuse the normalizer instead of reading `DiffTerm` fields directly.
    pub fn as_triple(&self) -> Triple {
        let object = if self.o.kind == "literal" {
            ObjectValue::Term(RdfTerm {
                kind: TermKind::Literal,
                value: self.o.value.clone(),
                datatype: self.o.datatype.clone(),
                lang: self.o.lang.clone(),
            })
        } else {
            ObjectValue::plain(self.o.value.clone())
        };
        Triple::new(self.s.value.clone(), self.p.value.clone(), object)
    }
}

/// Structured change set between a version and its parent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OntologyDiff {
    #[serde(default)]
    pub added: Vec<DiffTriple>,
    #[serde(default)]
    pub removed: Vec<DiffTriple>,
}

/// Full record for one history version.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryDetail {
    #[serde(flatten)]
    pub entry: HistoryEntry,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instruction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diff: Option<OntologyDiff>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_ontology: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_ontology: Option<String>,
}

// ---------------------------------------------------------------------------
// OntologyClient
// ---------------------------------------------------------------------------

/// Blocking HTTP client for the ontology and history services.
pub struct OntologyClient {
    base_url: String,
    http: ureq::Agent,
}

impl OntologyClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            http: ureq::Agent::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let url = format!("{}{path}", self.base_url);
        let resp = self.http.get(&url).call().map_err(|err| match err {
            ureq::Error::Status(status, _) => ClientError::Status {
                url: url.clone(),
                status,
            },
            other => ClientError::Request {
                url: url.clone(),
                message: other.to_string(),
            },
        })?;
        resp.into_json().map_err(|err| ClientError::Decode {
            message: err.to_string(),
        })
    }

    fn post_json<B: Serialize, T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let url = format!("{}{path}", self.base_url);
        let resp = self
            .http
            .post(&url)
            .send_json(body)
            .map_err(|err| match err {
                ureq::Error::Status(status, _) => ClientError::Status {
                    url: url.clone(),
                    status,
                },
                other => ClientError::Request {
                    url: url.clone(),
                    message: other.to_string(),
                },
            })?;
        resp.into_json().map_err(|err| ClientError::Decode {
            message: err.to_string(),
        })
    }

    // -- ontology service --

    /// Fetch the latest stored ontology.
    pub fn latest(&self) -> ClientResult<OntologyVersion> {
        self.get_json("/api/ontologies/latest")
    }

    /// Fetch every stored ontology version.
    pub fn all(&self) -> ClientResult<Vec<OntologyVersion>> {
        self.get_json("/api/ontologies")
    }

    /// Submit a change prompt, returning the resulting version.
    pub fn update(&self, prompt: &str) -> ClientResult<OntologyVersion> {
        #[derive(Serialize)]
        struct Req<'a> {
            prompt: &'a str,
        }
        self.post_json("/api/ontologies", &Req { prompt })
    }

    // -- history service --

    /// List all history entries.
    pub fn history(&self) -> ClientResult<Vec<HistoryEntry>> {
        self.get_json("/api/history")
    }

    /// Fetch one version's full record.
    pub fn history_entry(&self, version_id: &str) -> ClientResult<HistoryDetail> {
        self.get_json(&format!("/api/history/{version_id}"))
    }
}
