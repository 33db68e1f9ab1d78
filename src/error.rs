//! Error type shared by the loader, the registry and the battle engine.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by monster-duel.
///
/// Recoverable in-battle conditions (a sealed skill, a failed opponent
/// transform) are not errors: they resolve to a log line inside `apply`.
#[derive(Debug, Error)]
pub enum DuelError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed definition in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Skill '{skill}' is missing required field '{field}'")]
    MissingField { skill: String, field: &'static str },

    #[error("Skill tree '{name}' has no children")]
    EmptySkillTree { name: String },

    #[error("No such monster: {name}")]
    UnknownMonster { name: String },

    #[error("Monster '{name}' is defined more than once")]
    DuplicateMonster { name: String },
}

pub type Result<T> = std::result::Result<T, DuelError>;
