/// Shared error type used across all lighthouse-assistant crates.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("IO: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP: {0}")]
    Http(String),

    #[error("timeout: {0}")]
    Timeout(String),

    #[error("provider {provider}: {message}")]
    Provider { provider: String, message: String },

    #[error("auth: {0}")]
    Auth(String),

    #[error("config: {0}")]
    Config(String),

    /// The input handed to report validation was empty or not JSON.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Valid JSON, but not a usable Lighthouse report.
    #[error("invalid report: {0}")]
    InvalidReport(String),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// True for failures raised while contacting or decoding the response
    /// of the text-completion service.
    pub fn is_external_service(&self) -> bool {
        matches!(
            self,
            Error::Http(_)
                | Error::Timeout(_)
                | Error::Provider { .. }
                | Error::Auth(_)
                | Error::Json(_)
        )
    }

    /// True for report upload rejections (`InvalidInput` / `InvalidReport`).
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::InvalidInput(_) | Error::InvalidReport(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
