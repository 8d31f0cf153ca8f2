use gridwright_session::{BoardError, ConfigError};
use std::path::PathBuf;

/// Errors that can occur while loading or running a demo scene.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    /// Failed to parse a scene file.
    #[error("parse error in {file}: {detail}")]
    Parse { file: PathBuf, detail: String },

    /// The session configuration could not be loaded or is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Two objects in the scene share a name.
    #[error("object '{name}' is defined more than once")]
    DuplicateObject { name: String },

    /// A step refers to an object the scene does not define.
    #[error("object '{name}' not found (referenced by step {step})")]
    ObjectNotFound { name: String, step: usize },

    /// An object marked as placed overlaps blocked ground.
    #[error("object '{name}' cannot be placed: {source}")]
    Blocked {
        name: String,
        #[source]
        source: BoardError,
    },

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
