//! The sign-up API: route table and handlers.
//!
//! | Method | Path | Handler |
//! |---|---|---|
//! | `GET` | `/` | [`root`] |
//! | `GET` | `/activities` | [`list_activities`] |
//! | `POST` | `/activities/{activity_name}/signup?email=` | [`signup`] |
//! | `DELETE` | `/activities/{activity_name}/signup?email=` | [`unregister`] |
//! | `GET` | `/healthz`, `/readyz` | [`health`](crate::health) |
//! | `GET` | `/static/{*path}` | [`static_files::serve`] (when configured) |

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;

use crate::catalog::{Activity, Catalog};
use crate::error::ApiError;
use crate::response::Json;
use crate::static_files::{self, StaticDir};
use crate::{Method, Request, Router, health};

/// Body of every successful non-listing response.
#[derive(Debug, Serialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    fn new(message: impl Into<String>) -> Json<Self> {
        Json(Self { message: message.into() })
    }
}

/// Builds the full application router around `catalog`.
///
/// `static_dir`, when set, is served under `/static/`.
pub fn router(catalog: Catalog, static_dir: Option<PathBuf>) -> Router {
    let router = Router::new()
        .on(Method::Get,    "/",                                  root)
        .on(Method::Get,    "/activities",                        list_activities)
        .on(Method::Post,   "/activities/{activity_name}/signup", signup)
        .on(Method::Delete, "/activities/{activity_name}/signup", unregister)
        .on(Method::Get,    "/healthz",                           health::liveness)
        .on(Method::Get,    "/readyz",                            health::readiness)
        .with_state(catalog);

    match static_dir {
        Some(dir) => router
            .on(Method::Get, "/static/{*path}", static_files::serve)
            .with_state(StaticDir(dir)),
        None => router,
    }
}

/// `GET /`
pub async fn root(_req: Request) -> Json<Message> {
    Message::new("Welcome to the Mergington High School Activities API")
}

/// `GET /activities`
pub async fn list_activities(req: Request) -> Result<Json<BTreeMap<String, Activity>>, ApiError> {
    let catalog = catalog(&req)?;
    Ok(Json(catalog.list().await))
}

/// `POST /activities/{activity_name}/signup?email=`
pub async fn signup(req: Request) -> Result<Json<Message>, ApiError> {
    let catalog = catalog(&req)?;
    let (activity, email) = target(&req)?;
    catalog.signup(activity, &email).await?;
    Ok(Message::new(format!("Signed up {email} for {activity}")))
}

/// `DELETE /activities/{activity_name}/signup?email=`
pub async fn unregister(req: Request) -> Result<Json<Message>, ApiError> {
    let catalog = catalog(&req)?;
    let (activity, email) = target(&req)?;
    catalog.unregister(activity, &email).await?;
    Ok(Message::new(format!("Unregistered {email} from {activity}")))
}

fn catalog(req: &Request) -> Result<&Catalog, ApiError> {
    req.state::<Catalog>().ok_or(ApiError::MissingState("Catalog"))
}

/// The activity name from the path and the non-empty `email` query value.
fn target(req: &Request) -> Result<(&str, String), ApiError> {
    // The route always binds `activity_name`; an empty name simply matches nothing.
    let activity = req.param("activity_name").unwrap_or_default();
    let email = req
        .query("email")
        .filter(|e| !e.is_empty())
        .ok_or(ApiError::MissingQuery("email"))?;
    Ok((activity, email))
}
