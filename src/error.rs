//! Error types.
//!
//! [`Error`] covers infrastructure failures (binding, seed loading) and is
//! returned from startup and [`Server::serve`](crate::Server::serve).
//! [`ApiError`] is what request handlers fail with; it renders as a JSON
//! `{"detail": "..."}` response.

use std::path::PathBuf;

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::response::{IntoResponse, Response};
use crate::status::Status;

/// Infrastructure errors: binding a socket, loading `.env`, reading or
/// validating the seed.
#[derive(Debug, Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to load .env: {0}")]
    EnvFile(#[from] dotenvy::Error),

    #[error("failed to read seed file {path}: {source}")]
    SeedRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse seed file {path}: {source}")]
    SeedParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid seed for activity `{activity}`: {reason}")]
    InvalidSeed { activity: String, reason: String },
}

/// Request-level failures surfaced to the client.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("Missing required query parameter `{0}`")]
    MissingQuery(&'static str),

    /// The router was built without the state a handler needs.
    #[error("Internal Server Error")]
    MissingState(&'static str),
}

impl ApiError {
    pub fn status(&self) -> Status {
        match self {
            Self::Catalog(CatalogError::ActivityNotFound(_)) => Status::NotFound,
            Self::Catalog(_) => Status::BadRequest,
            Self::MissingQuery(_) => Status::UnprocessableContent,
            Self::MissingState(_) => Status::InternalServerError,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::MissingState(ty) = &self {
            tracing::error!(state = *ty, "handler state not attached to router");
        }
        Response::detail(self.status(), self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_errors_map_to_client_statuses() {
        let not_found = ApiError::from(CatalogError::ActivityNotFound("Chess Club".into()));
        assert_eq!(not_found.status(), Status::NotFound);

        let full = ApiError::from(CatalogError::ActivityFull("Chess Club".into()));
        assert_eq!(full.status(), Status::BadRequest);
        assert_eq!(full.to_string(), "Activity is full");
    }

    #[test]
    fn missing_query_is_unprocessable() {
        let res = ApiError::MissingQuery("email").into_response();
        assert_eq!(res.status_code().as_u16(), 422);
        let body: serde_json::Value = serde_json::from_slice(res.body()).unwrap();
        assert_eq!(body["detail"], "Missing required query parameter `email`");
    }
}
