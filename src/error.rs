//! Rich diagnostic error types for the ontoscope explorer.
//!
//! Each subsystem defines its own error type with miette `#[diagnostic]` derives,
//! providing error codes, help text, and source chains so users know exactly what
//! went wrong and how to fix it. The pipeline stages themselves (filtering,
//! projection, selection) are total functions and never fail; errors only arise
//! at the edges where the explorer touches files, networks, and configuration.

use miette::Diagnostic;
use thiserror::Error;

/// Top-level error type for the ontoscope explorer.
///
/// Each variant wraps a subsystem-specific error, preserving the full diagnostic
/// chain (error codes, help text, source spans) through to the user.
#[derive(Debug, Error, Diagnostic)]
pub enum OntoError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Client(#[from] crate::client::ClientError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Chat(#[from] ChatError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),
}

// ---------------------------------------------------------------------------
// Load errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    #[diagnostic(
        code(ontoscope::load::io),
        help(
            "The ontology file could not be read. Check that the path exists \
             and that you have permission to read it."
        )
    )]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Turtle syntax error: {message}")]
    #[diagnostic(
        code(ontoscope::load::turtle_syntax),
        help(
            "The ontology text is not valid Turtle. The store keeps its previous \
             contents when a load fails, so fix the document and load it again."
        )
    )]
    TurtleSyntax { message: String },
}

// ---------------------------------------------------------------------------
// Chat errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ChatError {
    #[error("could not encode outgoing chat frame: {message}")]
    #[diagnostic(
        code(ontoscope::chat::encode),
        help("This is a bug in the explorer; the outgoing frame types should always serialize.")
    )]
    Encode { message: String },

    #[error("unrecognized chat frame: {message}")]
    #[diagnostic(
        code(ontoscope::chat::decode),
        help(
            "The agent sent a frame this explorer does not understand. \
             The backend and explorer versions may be out of step."
        )
    )]
    Decode { message: String },

    #[error("chat connection error: {message}")]
    #[diagnostic(
        code(ontoscope::chat::connection),
        help(
            "The WebSocket connection to the agent failed. Check that the \
             backend is running and `chat_url` in your config is correct."
        )
    )]
    Connection { message: String },
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    #[diagnostic(
        code(ontoscope::config::io),
        help("Check that the config file exists and is readable, or omit --config to use defaults.")
    )]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {message}")]
    #[diagnostic(
        code(ontoscope::config::parse),
        help("The config file is not valid TOML for ExplorerConfig. Check the field names and types.")
    )]
    Parse { path: String, message: String },
}

/// Convenience alias for functions returning ontoscope results.
pub type OntoResult<T> = std::result::Result<T, OntoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_error_converts_to_onto_error() {
        let err = LoadError::TurtleSyntax {
            message: "unexpected token at line 3".into(),
        };
        let onto: OntoError = err.into();
        assert!(matches!(onto, OntoError::Load(LoadError::TurtleSyntax { .. })));
    }

    #[test]
    fn client_error_converts_to_onto_error() {
        let err = crate::client::ClientError::Status {
            url: "http://localhost:8000/api/history/v9".into(),
            status: 404,
        };
        let onto: OntoError = err.into();
        assert!(matches!(onto, OntoError::Client(_)));
    }

    #[test]
    fn error_display_messages_are_descriptive() {
        let err = LoadError::TurtleSyntax {
            message: "unexpected token at line 3".into(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("Turtle syntax error"));
        assert!(msg.contains("unexpected token"));
    }
}
