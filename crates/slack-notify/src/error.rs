use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    /// A required environment variable is unset or empty.
    #[error("{0} is required")]
    MissingVar(&'static str),

    #[error("{name} has unsupported value '{value}'")]
    InvalidVar { name: &'static str, value: String },

    #[error("Encoding webhook payload: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Sending webhook: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Error on message: {0}")]
    Status(String),
}

impl NotifyError {
    /// Process exit status for this failure class.
    pub fn exit_code(&self) -> i32 {
        match self {
            NotifyError::MissingVar(_) | NotifyError::InvalidVar { .. } => 1,
            NotifyError::Encode(_) | NotifyError::Transport(_) | NotifyError::Status(_) => 2,
        }
    }

    pub fn is_config(&self) -> bool {
        matches!(self, NotifyError::MissingVar(_) | NotifyError::InvalidVar { .. })
    }
}
