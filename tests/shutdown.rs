//! Shutdown behaviour over real sockets.

use std::net::SocketAddr;
use std::time::Duration;

use signup::{Method, Request, Router, Server, routes, seed};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

fn free_addr() -> SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap()
}

fn spawn_server(server: Server, router: Router) -> (oneshot::Sender<()>, JoinHandle<Result<(), signup::Error>>) {
    let (tx, rx) = oneshot::channel::<()>();
    let handle = tokio::spawn(server.serve_with_shutdown(router, async {
        let _ = rx.await;
    }));
    (tx, handle)
}

async fn connect(addr: SocketAddr) -> TcpStream {
    for _ in 0..50 {
        if let Ok(stream) = TcpStream::connect(addr).await {
            return stream;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("server never started listening on {addr}");
}

#[tokio::test]
async fn idle_keep_alive_connection_does_not_block_shutdown() {
    let addr = free_addr();
    let catalog = seed::load(None).await.unwrap();
    let (stop, server) = spawn_server(Server::bind(addr), routes::router(catalog, None));

    let mut stream = connect(addr).await;
    stream
        .write_all(b"GET /healthz HTTP/1.1\r\nhost: localhost\r\n\r\n")
        .await
        .unwrap();

    let mut response = Vec::new();
    let mut buf = [0u8; 1024];
    while !response.ends_with(b"ok") {
        let n = stream.read(&mut buf).await.unwrap();
        assert_ne!(n, 0, "connection closed before the response arrived");
        response.extend_from_slice(&buf[..n]);
    }
    assert!(response.starts_with(b"HTTP/1.1 200"));

    // The socket stays open and idle while the server is told to stop.
    stop.send(()).unwrap();
    let joined = tokio::time::timeout(Duration::from_secs(5), server)
        .await
        .expect("server kept running with an idle connection open");
    joined.unwrap().unwrap();

    // The server closed its side of the idle connection.
    let n = stream.read(&mut buf).await.unwrap_or(0);
    assert_eq!(n, 0);
}

#[tokio::test]
async fn busy_connection_is_cut_off_after_the_drain_timeout() {
    async fn stall(_: Request) -> &'static str {
        tokio::time::sleep(Duration::from_secs(60)).await;
        "late"
    }

    let addr = free_addr();
    let router = Router::new().on(Method::Get, "/stall", stall);
    let server = Server::bind(addr).drain_timeout(Duration::from_millis(100));
    let (stop, server) = spawn_server(server, router);

    let mut stream = connect(addr).await;
    stream
        .write_all(b"GET /stall HTTP/1.1\r\nhost: localhost\r\n\r\n")
        .await
        .unwrap();
    // Let the request reach the handler before stopping.
    tokio::time::sleep(Duration::from_millis(100)).await;

    stop.send(()).unwrap();
    let joined = tokio::time::timeout(Duration::from_secs(5), server)
        .await
        .expect("drain timeout was not enforced");
    joined.unwrap().unwrap();
}
