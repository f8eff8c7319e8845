use thiserror::Error;

#[derive(Error, Debug)]
pub enum SafeTitleError {
    /// The view did not contain the expected title element.
    #[error("failed to locate note title, got: {found}")]
    TitleNotFound { found: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, SafeTitleError>;
