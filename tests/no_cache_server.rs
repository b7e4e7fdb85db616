//! End-to-end tests over a real socket.

mod common;

use common::{send, test_config, with_server, RawResponse};
use nocache_server::{Server, ServerError};
use std::time::Duration;
use tokio::net::TcpStream;

fn assert_no_cache(resp: &RawResponse) {
    assert_eq!(
        resp.header("cache-control"),
        Some("no-store, no-cache, must-revalidate, max-age=0"),
        "status {}",
        resp.status
    );
    assert_eq!(resp.header("pragma"), Some("no-cache"));
    assert_eq!(resp.header("expires"), Some("0"));
    assert_eq!(resp.header_count("cache-control"), 1);
    assert_eq!(resp.header_count("pragma"), 1);
    assert_eq!(resp.header_count("expires"), 1);
}

fn site() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<h1>hi</h1>").unwrap();
    std::fs::write(dir.path().join("style.css"), "body { color: red }").unwrap();
    std::fs::create_dir(dir.path().join("assets")).unwrap();
    std::fs::write(dir.path().join("assets/logo.svg"), "<svg/>").unwrap();
    dir
}

#[tokio::test]
async fn test_get_index_html() {
    let dir = site();
    let resp = with_server(test_config(dir.path()), |addr| async move {
        send(addr, "GET", "/index.html").await
    })
    .await;

    assert_eq!(resp.status, 200);
    assert_eq!(resp.body, b"<h1>hi</h1>");
    assert_eq!(resp.header("content-type"), Some("text/html; charset=utf-8"));
    assert_eq!(resp.header("content-length"), Some("11"));
    assert_no_cache(&resp);
}

#[tokio::test]
async fn test_missing_file_keeps_headers() {
    let dir = site();
    let resp = with_server(test_config(dir.path()), |addr| async move {
        send(addr, "GET", "/does-not-exist.txt").await
    })
    .await;

    assert_eq!(resp.status, 404);
    assert_no_cache(&resp);
}

#[tokio::test]
async fn test_every_response_kind_has_headers() {
    let dir = site();
    let responses = with_server(test_config(dir.path()), |addr| async move {
        vec![
            send(addr, "GET", "/").await,
            send(addr, "GET", "/style.css").await,
            send(addr, "GET", "/assets").await,
            send(addr, "GET", "/assets/").await,
            send(addr, "HEAD", "/index.html").await,
            send(addr, "POST", "/index.html").await,
            send(addr, "DELETE", "/style.css").await,
        ]
    })
    .await;

    let statuses: Vec<u16> = responses.iter().map(|r| r.status).collect();
    assert_eq!(statuses, vec![200, 200, 301, 200, 200, 501, 501]);
    for resp in &responses {
        assert_no_cache(resp);
    }
}

#[tokio::test]
async fn test_directory_index_and_listing() {
    let dir = site();
    let (root, listing, redirect) = with_server(test_config(dir.path()), |addr| async move {
        (
            send(addr, "GET", "/").await,
            send(addr, "GET", "/assets/").await,
            send(addr, "GET", "/assets?x=1").await,
        )
    })
    .await;

    assert_eq!(root.body, b"<h1>hi</h1>");

    let html = String::from_utf8(listing.body).unwrap();
    assert!(html.contains("Directory listing for /assets/"));
    assert!(html.contains("<a href=\"logo.svg\">logo.svg</a>"));

    assert_eq!(redirect.status, 301);
    assert_eq!(redirect.header("location"), Some("/assets/?x=1"));
}

#[tokio::test]
async fn test_head_has_no_body() {
    let dir = site();
    let resp = with_server(test_config(dir.path()), |addr| async move {
        send(addr, "HEAD", "/style.css").await
    })
    .await;

    assert_eq!(resp.status, 200);
    assert_eq!(resp.header("content-length"), Some("19"));
    assert!(resp.body.is_empty());
    assert_no_cache(&resp);
}

#[tokio::test]
async fn test_traversal_stays_in_root() {
    let outer = tempfile::tempdir().unwrap();
    std::fs::write(outer.path().join("secret.txt"), "secret").unwrap();
    std::fs::create_dir(outer.path().join("public")).unwrap();

    let resp = with_server(test_config(&outer.path().join("public")), |addr| async move {
        send(addr, "GET", "/../secret.txt").await
    })
    .await;

    assert_eq!(resp.status, 404);
    assert_ne!(resp.body, b"secret");
    assert_no_cache(&resp);
}

#[tokio::test]
async fn test_redirect_stays_on_host() {
    let dir = site();
    let (up, encoded) = with_server(test_config(dir.path()), |addr| async move {
        (
            send(addr, "GET", "//evil.example/..").await,
            send(addr, "GET", "//evil.example/%2e%2e/assets").await,
        )
    })
    .await;

    assert_eq!(up.status, 301);
    assert_eq!(up.header("location"), Some("/evil.example/../"));
    assert_eq!(encoded.status, 301);
    assert_eq!(encoded.header("location"), Some("/evil.example/%2e%2e/assets/"));
    for resp in [&up, &encoded] {
        assert!(!resp.header("location").unwrap().starts_with("//"));
        assert_no_cache(resp);
    }
}

#[tokio::test]
async fn test_shutdown_stops_accepting() {
    let dir = site();
    let server = Server::bind(test_config(dir.path())).unwrap();
    let addr = server.local_addr().unwrap();
    let (tx, rx) = tokio::sync::oneshot::channel::<()>();

    let client = async move {
        let resp = send(addr, "GET", "/style.css").await;
        let _ = tx.send(());
        resp
    };
    let shutdown = async {
        let _ = rx.await;
    };
    let ((), resp) = tokio::time::timeout(
        Duration::from_secs(5),
        async { tokio::join!(server.run_until(shutdown), client) },
    )
    .await
    .expect("accept loop did not return after shutdown");

    assert_eq!(resp.status, 200);
    assert!(TcpStream::connect(addr).await.is_err());
}

#[tokio::test]
async fn test_second_instance_fails_to_bind() {
    let dir = site();
    let first = Server::bind(test_config(dir.path())).unwrap();
    let addr = first.local_addr().unwrap();

    let mut config = test_config(dir.path());
    config.server.port = addr.port();
    match Server::bind(config) {
        Err(ServerError::Bind { addr: failed, source }) => {
            assert_eq!(failed, addr);
            assert_eq!(source.kind(), std::io::ErrorKind::AddrInUse);
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("second bind succeeded"),
    }
}

#[tokio::test]
async fn test_missing_root_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let result = Server::bind(test_config(&dir.path().join("absent")));
    assert!(matches!(result, Err(ServerError::Root { .. })));
}
