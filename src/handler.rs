//! Route handlers and how the router stores them.
//!
//! The API's endpoints (`routes::signup`, `health::readiness`,
//! `static_files::serve`, ...) have different concrete future and return
//! types. The router keeps them all in the same per-method trees by erasing
//! each one into an [`Endpoint`] that yields a plain [`Response`]:
//!
//! ```text
//! async fn signup(req: Request) -> Result<Json<Message>, ApiError>
//!        ↓ Router::on(Method::Post, "/activities/{activity_name}/signup", signup)
//! SharedEndpoint = Arc<FnEndpoint(signup)>
//!        ↓ per request
//! signup(req).await.into_response()
//! ```

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::request::Request;
use crate::response::{IntoResponse, Response};

/// The future an erased endpoint returns; boxed so tokio can move it between
/// worker threads.
pub(crate) type ResponseFuture = Pin<Box<dyn Future<Output = Response> + Send + 'static>>;

/// A handler with its return type already converted to [`Response`].
#[doc(hidden)]
pub trait Endpoint: Send + Sync + 'static {
    fn call(&self, req: Request) -> ResponseFuture;
}

/// One registered route target, shared by every connection task.
#[doc(hidden)]
pub type SharedEndpoint = Arc<dyn Endpoint>;

/// Anything the router accepts as a route target:
/// `async fn(Request) -> impl IntoResponse`, named or as a closure.
///
/// Sealed; only the blanket impl below provides it.
pub trait Handler: sealed::Sealed + Send + Sync + 'static {
    #[doc(hidden)]
    fn into_endpoint(self) -> SharedEndpoint;
}

mod sealed {
    pub trait Sealed {}

    impl<F, Fut> Sealed for F
    where
        F: Fn(crate::Request) -> Fut,
        Fut: std::future::Future,
    {
    }
}

impl<F, Fut, R> Handler for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn into_endpoint(self) -> SharedEndpoint {
        Arc::new(FnEndpoint(self))
    }
}

struct FnEndpoint<F>(F);

impl<F, Fut, R> Endpoint for FnEndpoint<F>
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn call(&self, req: Request) -> ResponseFuture {
        let pending = (self.0)(req);
        Box::pin(async move { pending.await.into_response() })
    }
}
