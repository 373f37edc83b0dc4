use thiserror::Error;

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Upstream request to {url} failed: {message}")]
    Network { url: String, message: String },

    #[error("Could not find flashData in HTML")]
    Extraction,

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, RelayError>;

impl RelayError {
    pub(crate) fn network(url: impl Into<String>, err: reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            format!("timed out ({})", error_chain(&err))
        } else {
            error_chain(&err)
        };
        RelayError::Network {
            url: url.into(),
            message,
        }
    }

    /// Convert error to HTTP status code
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            RelayError::Network { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            RelayError::Extraction => StatusCode::INTERNAL_SERVER_ERROR,
            RelayError::Parse(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RelayError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RelayError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Render an error followed by every `source()` below it, `: `-joined.
/// reqwest's own `Display` stops at the outermost layer, which hides the
/// actual cause (refused connection, DNS failure, ...).
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

impl axum::response::IntoResponse for RelayError {
    fn into_response(self) -> axum::response::Response {
        use axum::http::header;

        let status = self.status_code();
        (
            status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.to_string(),
        )
            .into_response()
    }
}
