//! HTTP server and graceful shutdown.
//!
//! On SIGTERM or Ctrl-C the server stops accepting, tells every open
//! connection to finish its current request and close, waits for them up to
//! the drain timeout, then returns from [`Server::serve`]. The catalog goes
//! away with the router once that happens.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use hyper::service::service_fn;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as ConnBuilder;
use hyper_util::server::graceful::GracefulShutdown;
use tokio::net::TcpListener;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use crate::error::Error;
use crate::router::Router;

/// How long in-flight requests get to finish after the shutdown signal.
pub const DEFAULT_DRAIN_TIMEOUT: Duration = Duration::from_secs(30);

/// The HTTP server.
#[derive(Debug)]
pub struct Server {
    addr: SocketAddr,
    drain_timeout: Duration,
}

impl Server {
    /// Configures the server to bind to `addr` when [`serve`](Server::serve)
    /// is called.
    ///
    /// ```rust,no_run
    /// use signup::Server;
    /// let server = Server::bind(([0, 0, 0, 0], 8000).into());
    /// ```
    pub fn bind(addr: SocketAddr) -> Self {
        Self { addr, drain_timeout: DEFAULT_DRAIN_TIMEOUT }
    }

    /// Upper bound on the drain after shutdown. Connections still busy when it
    /// runs out are aborted.
    pub fn drain_timeout(mut self, timeout: Duration) -> Self {
        self.drain_timeout = timeout;
        self
    }

    /// Serves `router` until SIGTERM or Ctrl-C, then drains.
    pub async fn serve(self, router: Router) -> Result<(), Error> {
        self.serve_with_shutdown(router, shutdown_signal()).await
    }

    /// Serves `router` until `shutdown` resolves, then drains.
    ///
    /// Draining closes idle keep-alive connections at once, lets connections
    /// with a request in flight answer it and close, and returns when all are
    /// gone or the drain timeout has passed.
    pub async fn serve_with_shutdown(
        self,
        router: Router,
        shutdown: impl Future<Output = ()>,
    ) -> Result<(), Error> {
        let listener = TcpListener::bind(self.addr).await?;
        let local = listener.local_addr()?;
        info!(addr = %local, "signup listening");

        let router = Arc::new(router);
        let builder = ConnBuilder::new(TokioExecutor::new());
        let graceful = GracefulShutdown::new();
        let mut tasks = JoinSet::new();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                // Shutdown is polled first so queued connections are not
                // accepted once the signal has fired.
                biased;

                () = &mut shutdown => {
                    info!(open = tasks.len(), "shutdown signal received, draining connections");
                    break;
                }

                res = listener.accept() => {
                    let (stream, peer) = match res {
                        Ok(v) => v,
                        Err(e) => {
                            error!("accept error: {e}");
                            continue;
                        }
                    };

                    let router = Arc::clone(&router);
                    let svc = service_fn(move |req| {
                        let router = Arc::clone(&router);
                        async move {
                            Ok::<_, std::convert::Infallible>(router.handle(req).await)
                        }
                    });

                    // HTTP/1.1 or HTTP/2, whichever the client speaks.
                    let conn = builder.serve_connection(TokioIo::new(stream), svc).into_owned();
                    let conn = graceful.watch(conn);

                    tasks.spawn(async move {
                        if let Err(e) = conn.await {
                            debug!(%peer, "connection error: {e}");
                        }
                    });
                }

                // Reap finished tasks so the set stays small on long runs.
                Some(_) = tasks.join_next(), if !tasks.is_empty() => {}
            }
        }

        drop(listener);

        if tokio::time::timeout(self.drain_timeout, graceful.shutdown()).await.is_err() {
            warn!(
                timeout_ms = self.drain_timeout.as_millis() as u64,
                aborted = tasks.len(),
                "drain timed out, aborting remaining connections"
            );
            tasks.abort_all();
        }
        while tasks.join_next().await.is_some() {}

        info!("signup stopped");
        Ok(())
    }
}

/// Resolves on the first SIGTERM or SIGINT (Ctrl-C). Only Ctrl-C exists on
/// non-Unix platforms.
///
/// A handler that cannot be installed is logged and that arm never fires.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("failed to install Ctrl-C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let sigterm = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => { stream.recv().await; }
            Err(e) => {
                error!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let sigterm = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c  => {}
        () = sigterm => {}
    }
}
