//! # signup
//!
//! A small HTTP API for extracurricular activity sign-ups: list the
//! activities, sign up for one by email, or unregister.
//!
//! The HTTP layer is deliberately thin. hyper parses the wire, one `matchit`
//! tree per method routes the path, and handlers are plain
//! `async fn(Request) -> impl IntoResponse`. The only shared state is the
//! [`Catalog`], attached to the router at startup and reached from handlers
//! via [`Request::state`].
//!
//! ## Endpoints
//!
//! - `GET /` — welcome message
//! - `GET /activities` — every activity with its roster
//! - `POST /activities/{name}/signup?email=` — join an activity
//! - `DELETE /activities/{name}/signup?email=` — leave an activity
//! - `GET /healthz`, `GET /readyz` — probes
//! - `GET /static/{*path}` — front-end files, when a directory is configured
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use signup::{Server, routes, seed};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), signup::Error> {
//!     let catalog = seed::load(None).await?;
//!     let app = routes::router(catalog, None);
//!     Server::bind(([127, 0, 0, 1], 8000).into()).serve(app).await
//! }
//! ```

mod error;
mod handler;
mod method;
mod request;
mod response;
mod router;
mod server;
mod status;

pub mod catalog;
pub mod config;
pub mod health;
pub mod routes;
pub mod seed;
pub mod static_files;

pub use catalog::{Activity, Catalog, CatalogError};
pub use config::Config;
pub use error::{ApiError, Error};
pub use handler::Handler;
pub use method::Method;
pub use request::Request;
pub use response::{ContentType, IntoResponse, Json, Response, ResponseBuilder};
pub use router::Router;
pub use server::Server;
pub use status::Status;
