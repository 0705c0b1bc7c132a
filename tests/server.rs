//! The server over a real loopback socket.

use std::net::SocketAddr;

use quire::{PostStore, Server, routes};
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::oneshot;

async fn roundtrip(addr: SocketAddr, request: &str) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(request.as_bytes()).await.unwrap();
    let mut response = String::new();
    stream.read_to_string(&mut response).await.unwrap();
    response
}

#[tokio::test]
async fn serves_requests_and_shuts_down_gracefully() {
    let dir = TempDir::new().unwrap();
    let store = PostStore::open(dir.path().join("blog_posts.json"));
    let data_file = store.path().to_owned();

    let server = Server::bind("127.0.0.1:0".parse().unwrap()).await.unwrap();
    let addr = server.local_addr().unwrap();

    let (stop, stopped) = oneshot::channel::<()>();
    let handle = tokio::spawn(server.serve_with_shutdown(routes::router(), store, async {
        let _ = stopped.await;
    }));

    let form = "author=Ada&title=Over+the+wire&content=Hi";
    let response = roundtrip(
        addr,
        &format!(
            "POST /add HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\
             Content-Type: application/x-www-form-urlencoded\r\nContent-Length: {}\r\n\r\n{form}",
            form.len()
        ),
    )
    .await;
    assert!(response.starts_with("HTTP/1.1 302"), "{response}");
    assert!(response.to_ascii_lowercase().contains("location: /\r\n"), "{response}");

    let response = roundtrip(addr, "GET / HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n").await;
    assert!(response.starts_with("HTTP/1.1 200"), "{response}");
    assert!(response.contains("Over the wire"), "{response}");

    let response = roundtrip(addr, "GET /update/42 HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n").await;
    assert!(response.starts_with("HTTP/1.1 404"), "{response}");

    stop.send(()).unwrap();
    handle.await.unwrap().unwrap();

    let saved = std::fs::read_to_string(data_file).unwrap();
    assert!(saved.contains("\"title\": \"Over the wire\""));
}

#[tokio::test]
async fn bind_reports_address_in_use() {
    let first = Server::bind("127.0.0.1:0".parse().unwrap()).await.unwrap();
    let addr = first.local_addr().unwrap();

    let err = Server::bind(addr).await.err().unwrap();
    assert!(matches!(err, quire::Error::Bind { .. }), "{err}");
}
