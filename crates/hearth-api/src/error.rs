use hearth_types::api::ErrorBody;
use hearth_types::invocation::ApiResponse;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("DATABASE_URL not configured")]
    NotConfigured,

    /// A required input is missing. Rejected before any storage access.
    #[error("{0}")]
    Validation(&'static str),

    #[error("Unknown action")]
    UnknownAction,

    /// Anything that failed while talking to storage or decoding input.
    /// The message is passed to the caller as is.
    #[error("{0}")]
    Execution(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> u16 {
        match self {
            ApiError::NotConfigured | ApiError::Execution(_) => 500,
            ApiError::Validation(_) | ApiError::UnknownAction => 400,
        }
    }

    pub fn into_response(self) -> ApiResponse {
        ApiResponse::json(self.status(), &ErrorBody::new(self.to_string()))
    }
}
