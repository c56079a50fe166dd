//! Health-check handlers.
//!
//! | Probe | Path | Question |
//! |---|---|---|
//! | **Liveness** | `/healthz` | Is the process answering HTTP? |
//! | **Readiness** | `/readyz` | Is the catalog attached and able to serve? |

use tracing::warn;

use crate::catalog::Catalog;
use crate::{Request, Response, Status};

/// Always `200 OK` with body `"ok"`.
pub async fn liveness(_req: Request) -> Response {
    Response::text("ok")
}

/// `200 OK` with body `"ready"` once a [`Catalog`] is attached to the router,
/// `503` otherwise.
pub async fn readiness(req: Request) -> Response {
    let Some(catalog) = req.state::<Catalog>() else {
        warn!("readiness probe: no catalog attached");
        return Response::status(Status::ServiceUnavailable);
    };
    if catalog.is_empty().await {
        warn!("readiness probe: catalog has no activities");
        return Response::status(Status::ServiceUnavailable);
    }
    Response::text("ready")
}
