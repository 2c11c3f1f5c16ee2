use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    #[error("io_error - {0}")]
    Io(String),
    #[error("decode_error - {0}")]
    Decode(String),
    #[error("encode_error - {0}")]
    Encode(String),
    #[error("duplicate_task - task already exists: {0}")]
    DuplicateTask(String),
    #[error("task_not_found - task not found: {0}")]
    TaskNotFound(String),
    #[error("invalid_priority - invalid priority {0}, must be low, medium, or high")]
    InvalidPriority(String),
    #[error("invalid_input - {0}")]
    InvalidInput(String),
}

impl AppError {
    pub fn io<M: Into<String>>(message: M) -> Self {
        Self::Io(message.into())
    }

    pub fn decode<M: Into<String>>(message: M) -> Self {
        Self::Decode(message.into())
    }

    pub fn encode<M: Into<String>>(message: M) -> Self {
        Self::Encode(message.into())
    }

    pub fn invalid_input<M: Into<String>>(message: M) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Io(_) => "io_error",
            Self::Decode(_) => "decode_error",
            Self::Encode(_) => "encode_error",
            Self::DuplicateTask(_) => "duplicate_task",
            Self::TaskNotFound(_) => "task_not_found",
            Self::InvalidPriority(_) => "invalid_priority",
            Self::InvalidInput(_) => "invalid_input",
        }
    }

    /// The payload carried by the error: a message, or the offending
    /// description, id or priority value.
    pub fn message(&self) -> &str {
        match self {
            Self::Io(message)
            | Self::Decode(message)
            | Self::Encode(message)
            | Self::DuplicateTask(message)
            | Self::TaskNotFound(message)
            | Self::InvalidPriority(message)
            | Self::InvalidInput(message) => message,
        }
    }
}
