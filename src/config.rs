//! Explorer configuration, read from TOML.
//!
//! Every field has a default tuned for a locally running backend, so a
//! missing config file is not an error. An explicitly passed path that
//! cannot be read is.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::filter::DEFAULT_CANDIDATE_CAP;
use crate::session::SessionConfig;

/// Where the explorer looks when no `--config` path is given.
pub const DEFAULT_CONFIG_FILE: &str = "ontoscope.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplorerConfig {
    /// Base URL of the ontology backend.
    #[serde(default = "default_backend_url")]
    pub backend_url: String,
    /// WebSocket endpoint of the chat agent.
    #[serde(default = "default_chat_url")]
    pub chat_url: String,
    /// Cap on distinct values offered per filter column.
    #[serde(default = "default_candidate_cap")]
    pub candidate_cap: usize,
    /// Collapse repeated edges between the same pair of graph nodes.
    #[serde(default)]
    pub dedupe_edges: bool,
    /// Print full URIs instead of short labels in table output.
    #[serde(default)]
    pub show_full_uris: bool,
}

fn default_backend_url() -> String {
    "http://localhost:8000".into()
}
fn default_chat_url() -> String {
    "ws://localhost:8000/ws/chat".into()
}
fn default_candidate_cap() -> usize {
    DEFAULT_CANDIDATE_CAP
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            chat_url: default_chat_url(),
            candidate_cap: default_candidate_cap(),
            dedupe_edges: false,
            show_full_uris: false,
        }
    }
}

impl ExplorerConfig {
    /// Load from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Resolve the effective config.
    ///
    /// An explicit path must load. Without one, [`DEFAULT_CONFIG_FILE`] is
    /// used when present, and built-in defaults otherwise.
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load(p),
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.exists() {
                    Self::load(fallback)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// The pipeline options this config implies.
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            candidate_cap: self.candidate_cap,
            dedupe_edges: self.dedupe_edges,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_a_local_backend() {
        let cfg = ExplorerConfig::default();
        assert_eq!(cfg.backend_url, "http://localhost:8000");
        assert_eq!(cfg.chat_url, "ws://localhost:8000/ws/chat");
        assert_eq!(cfg.candidate_cap, DEFAULT_CANDIDATE_CAP);
        assert!(!cfg.dedupe_edges);
        assert!(!cfg.show_full_uris);
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("explorer.toml");
        std::fs::write(&path, "backend_url = \"http://kg.internal:9000\"\n").unwrap();

        let cfg = ExplorerConfig::load(&path).unwrap();
        assert_eq!(cfg.backend_url, "http://kg.internal:9000");
        assert_eq!(cfg.candidate_cap, DEFAULT_CANDIDATE_CAP);
    }

    #[test]
    fn full_toml_roundtrip() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("explorer.toml");

        let cfg = ExplorerConfig {
            backend_url: "http://kg.internal:9000".into(),
            chat_url: "ws://kg.internal:9000/ws/chat".into(),
            candidate_cap: 10,
            dedupe_edges: true,
            show_full_uris: true,
        };
        std::fs::write(&path, toml::to_string_pretty(&cfg).unwrap()).unwrap();

        let loaded = ExplorerConfig::load(&path).unwrap();
        assert_eq!(loaded.candidate_cap, 10);
        assert!(loaded.dedupe_edges);
        assert!(loaded.show_full_uris);
    }

    #[test]
    fn bad_toml_is_a_parse_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("explorer.toml");
        std::fs::write(&path, "candidate_cap = \"many\"\n").unwrap();

        let err = ExplorerConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn explicit_missing_path_is_an_error_but_no_path_is_not() {
        let tmp = tempfile::TempDir::new().unwrap();
        let missing = tmp.path().join("nope.toml");

        assert!(matches!(
            ExplorerConfig::resolve(Some(&missing)),
            Err(ConfigError::Io { .. })
        ));
        // resolve(None) only consults the cwd fallback, which tests must not
        // rely on; defaults are exercised above.
    }

    #[test]
    fn session_config_carries_the_pipeline_knobs() {
        let cfg = ExplorerConfig {
            candidate_cap: 7,
            dedupe_edges: true,
            ..Default::default()
        };
        let session = cfg.session_config();
        assert_eq!(session.candidate_cap, 7);
        assert!(session.dedupe_edges);
    }
}
