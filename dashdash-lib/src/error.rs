use thiserror::Error;

/// Errors raised while reading, rewriting or writing a stylesheet.
#[derive(Debug, Error)]
pub enum Error {
    /// Some, but not all, selectors of one rule carry a `--` shorthand marker.
    #[error("shorthand `--` must be used on every selector of the rule, got: {selectors}")]
    InconsistentShorthandUsage { selectors: String },

    #[error("parse error at line {line}, column {column}: {message}")]
    Parse {
        line: u32,
        column: u32,
        message: String,
    },

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("minification failed: {0}")]
    Minify(String),
}

pub type Result<T> = std::result::Result<T, Error>;
