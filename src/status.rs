//! HTTP status codes as a typed enum.
//!
//! Only the codes this service answers with are listed. Use [`Status`] with
//! `Response::status()`, `Response::builder().status()`, `Response::detail()`
//! or as a bare handler return value.
//!
//! ```rust
//! use signup::{Response, Status};
//!
//! Response::status(Status::NoContent);
//! Response::detail(Status::NotFound, "Activity not found");
//!
//! async fn gone(_req: signup::Request) -> Status {
//!     Status::NotFound
//! }
//! ```

use http::StatusCode;

/// The HTTP status codes produced by the sign-up API.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Status {
    // ── 2xx Success ───────────────────────────────────────────────────────────
    Ok,                   // 200
    NoContent,            // 204

    // ── 4xx Client errors ─────────────────────────────────────────────────────
    BadRequest,           // 400
    NotFound,             // 404
    MethodNotAllowed,     // 405
    UnprocessableContent, // 422

    // ── 5xx Server errors ─────────────────────────────────────────────────────
    InternalServerError,  // 500
    ServiceUnavailable,   // 503
}

impl Status {
    /// The canonical reason phrase, used as the `detail` of generic errors.
    pub fn reason(self) -> &'static str {
        StatusCode::from(self).canonical_reason().unwrap_or("")
    }
}

impl From<Status> for StatusCode {
    fn from(s: Status) -> StatusCode {
        match s {
            Status::Ok                   => StatusCode::OK,
            Status::NoContent            => StatusCode::NO_CONTENT,
            Status::BadRequest           => StatusCode::BAD_REQUEST,
            Status::NotFound             => StatusCode::NOT_FOUND,
            Status::MethodNotAllowed     => StatusCode::METHOD_NOT_ALLOWED,
            Status::UnprocessableContent => StatusCode::UNPROCESSABLE_ENTITY,
            Status::InternalServerError  => StatusCode::INTERNAL_SERVER_ERROR,
            Status::ServiceUnavailable   => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl From<Status> for u16 {
    fn from(s: Status) -> u16 {
        StatusCode::from(s).as_u16()
    }
}
