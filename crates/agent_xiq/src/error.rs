use thiserror::Error;

#[derive(Error, Debug)]
pub enum XiqError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("XIQ API returned HTTP {code}: {body}")]
    Status { code: u16, body: String },

    #[error("Invalid JSON from XIQ API: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Not logged in")]
    NotLoggedIn,

    #[error("Login response carried no access token")]
    MissingToken,
}

impl XiqError {
    /// HTTP status code for the login section; 0 when no response arrived.
    pub fn status_code(&self) -> u16 {
        match self {
            XiqError::Status { code, .. } => *code,
            XiqError::Http(e) => e.status().map(|s| s.as_u16()).unwrap_or(0),
            _ => 0,
        }
    }

    /// Whether the server answered at all.
    pub fn got_response(&self) -> bool {
        self.status_code() != 0 || matches!(self, XiqError::Json(_) | XiqError::MissingToken)
    }
}
