use thiserror::Error;

/// Shown when a non-2xx response carries no usable `detail`, or a 2xx body
/// does not match the expected shape.
pub const SERVER_ERROR_FALLBACK: &str = "Server error";

/// Shown when no response could be obtained at all.
pub const UNEXPECTED_ERROR_FALLBACK: &str = "Unexpected error. Please try again.";

/// Local, pre-submission failure. Never reaches the network.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a text or topic.")]
    EmptyText,
    #[error("Please enter a URL.")]
    EmptyUrl,
    #[error("Please enter a valid URL.")]
    InvalidUrl,
    #[error("Please select an image.")]
    MissingImage,
    #[error("Please select an image file.")]
    NotAnImage,
    #[error("Please complete all guided form fields.")]
    IncompleteGuided,
}

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Non-2xx response, or a 2xx body that failed the schema check.
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// No response obtainable (offline, DNS, connection refused, timeout).
    #[error("transport error: {0}")]
    Transport(String),
}

impl GenerateError {
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        GenerateError::Server { status, message: message.into() }
    }

    pub fn transport(err: reqwest::Error) -> Self {
        GenerateError::Transport(err.to_string())
    }

    /// Text surfaced in the Error view.
    pub fn user_message(&self) -> String {
        match self {
            GenerateError::Validation(v) => v.to_string(),
            GenerateError::Server { message, .. } => message.clone(),
            GenerateError::Transport(_) => UNEXPECTED_ERROR_FALLBACK.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("cannot read image {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("image path has no file name: {0}")]
    NoFileName(String),
}
