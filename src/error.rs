use miette::Diagnostic;
use thiserror::Error;

/// Main error type for emojidata operations
#[derive(Error, Diagnostic, Debug)]
pub enum EmojiError {
    #[error("IO error: {0}")]
    #[diagnostic(code(emojidata::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(emojidata::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(emojidata::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Validation error: {message}")]
    #[diagnostic(code(emojidata::validate))]
    Validation {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Build error: {message}")]
    #[diagnostic(code(emojidata::build))]
    Build {
        message: String,
        #[help]
        help: Option<String>,
    },
}

pub type Result<T> = std::result::Result<T, EmojiError>;
