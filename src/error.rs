use thiserror::Error;

// Main Application Error Type

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication Error: {0}")]
    Authentication(#[from] AuthError),
    #[error("Encoding Error: {0}")]
    Encoding(String),
    #[error("Service Error: {0}")]
    Service(#[from] ServiceError),
    #[error("Degenerate input: {0}")]
    DegenerateInput(String),
    #[error("Malformed region: {0}")]
    MalformedRegion(String),
    #[error("Invalid parameter: {name} = {value}")]
    InvalidParameter { name: String, value: String },
    #[error("Configuration Error: {0}")]
    Config(#[from] ::config::ConfigError),
    #[error("Image I/O Error: {0}")]
    ImageIo(#[from] image::ImageError),
    #[error("I/O Error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    pub fn invalid_parameter(name: impl Into<String>, value: impl ToString) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            value: value.to_string(),
        }
    }

    /// True when the failure comes from the task's inputs rather than the remote side.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            AppError::DegenerateInput(_)
                | AppError::MalformedRegion(_)
                | AppError::InvalidParameter { .. }
                | AppError::Encoding(_)
        )
    }
}

// Credential Error Type
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("No credentials configured: set the task parameter or GOOGLE_APPLICATION_CREDENTIALS")]
    MissingCredentials,
    #[error("Failed to read credentials file {1}: {0}")]
    ReadError(std::io::Error, String),
    #[error("Failed to parse credentials file: {0}")]
    ParseError(#[from] serde_json::Error),
    #[error("Unsupported credentials type: {0}")]
    UnsupportedType(String),
    #[error("Failed to sign token assertion: {0}")]
    SigningError(#[from] jsonwebtoken::errors::Error),
    #[error("Token exchange rejected: {0}")]
    TokenRejected(String),
}

// Remote Annotation Error Type
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Request failed: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("Service returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },
    #[error("Annotation failed with code {code}: {message}")]
    AnnotationFailed { code: i32, message: String },
    #[error("Service returned no response for the image")]
    EmptyResponse,
}
