//! Error types for photo compositing.

/// Errors that can occur while building or running a composite request.
#[derive(Debug, thiserror::Error)]
pub enum CompixError {
    /// API credential missing or empty at provider construction.
    #[error("configuration error: {0}")]
    Config(String),

    /// Submission rejected before any network call was made.
    #[error("invalid submission: {0}")]
    Validation(String),

    /// API returned a non-success response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Network or HTTP error.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to decode base64 image data.
    #[error("failed to decode: {0}")]
    Decode(String),

    /// I/O error (e.g., saving the result image).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Transport or model failure during generation, with the underlying
    /// message preserved for the user.
    #[error("Failed to generate image: {0}")]
    Generation(String),

    /// The model responded but produced no image part.
    #[error(
        "The AI model did not return an image. It may have refused the request. \
         Try adjusting your prompt or using different images."
    )]
    NoImage,

    /// Anything that escaped the categories above.
    #[error("An unknown error occurred while generating the image.")]
    Unknown,
}

impl CompixError {
    /// Collapses internal errors into the caller-visible failures the
    /// generation boundary promises: configuration, validation, and no-image
    /// errors pass through, transport/model errors get the generation prefix
    /// with the original message, and everything else becomes `Unknown`.
    pub(crate) fn into_user_facing(self) -> Self {
        match self {
            e @ (Self::Config(_)
            | Self::Validation(_)
            | Self::NoImage
            | Self::Generation(_)
            | Self::Unknown) => e,
            e @ (Self::Api { .. } | Self::Network(_) | Self::Json(_) | Self::Decode(_)) => {
                Self::Generation(e.to_string())
            }
            Self::Io(_) => Self::Unknown,
        }
    }
}

/// Result type alias for compositing operations.
pub type Result<T> = std::result::Result<T, CompixError>;
