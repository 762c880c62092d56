//! # ontoscope
//!
//! An RDF ontology explorer: load a Turtle document, slice it with
//! per-column filters, project the survivors into a three-tier graph, and
//! talk to the editing agent that maintains the ontology.
//!
//! ## Architecture
//!
//! - **Data model** (`term`, `triple`, `store`): subjects and predicates as
//!   plain strings, objects either plain or structured literals
//! - **Pipeline** (`filter`, `graph`, `selection`, `session`): substring
//!   search and exact column filters, subject/predicate/object projection
//!   with one-hop zoom, and a change-request staging area
//! - **Formats** (`turtle`): Turtle parsing via `oxttl`
//! - **Backend** (`client`, `chat`): versioned ontology REST API plus a
//!   WebSocket agent conversation (live transport behind the `chat` feature)
//!
//! ## Library usage
//!
//! ```no_run
//! use ontoscope::filter::Column;
//! use ontoscope::session::ExplorerSession;
//!
//! let mut session = ExplorerSession::new();
//! session.load_turtle("<urn:sun> <urn:is-a> <urn:star> .")?;
//! session.set_column_filter(Column::Predicate, vec!["urn:is-a".into()]);
//! println!("{} nodes", session.graph().node_count());
//! # Ok::<(), ontoscope::error::OntoError>(())
//! ```

pub mod chat;
pub mod client;
pub mod config;
pub mod error;
pub mod filter;
pub mod graph;
pub mod selection;
pub mod session;
pub mod store;
pub mod term;
pub mod triple;
pub mod turtle;
