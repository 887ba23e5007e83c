//! 包管理器错误类型

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PackageError {
    #[error("pip is not available (`{python} -m pip` could not be run)")]
    ToolUnavailable { python: String },

    #[error("failed to start `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` failed (exit={code:?})")]
    CommandFailed { command: String, code: Option<i32> },

    #[error("could not parse pip output: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("malformed config file: {0}")]
    Config(#[from] toml::de::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
