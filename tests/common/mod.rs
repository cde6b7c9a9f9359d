//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use budget_gateway::config::GatewayConfig;
use budget_gateway::http::GatewayServer;
use budget_gateway::upstream::UpstreamClient;

/// Start a minimal programmable mock upstream on an ephemeral port.
///
/// The handler receives the request path and body and returns a status
/// code plus JSON body. One connection per request (Connection: close).
#[allow(dead_code)]
pub async fn start_mock_upstream<F>(handler: F) -> SocketAddr
where
    F: Fn(&str, &str) -> (u16, String) + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handler = Arc::new(handler);

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            let handler = handler.clone();
            tokio::spawn(async move {
                let mut buf = Vec::new();
                let mut chunk = [0u8; 4096];

                // Read until the end of the header block
                let header_end = loop {
                    let n = match socket.read(&mut chunk).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => n,
                    };
                    buf.extend_from_slice(&chunk[..n]);
                    if let Some(pos) = find_subsequence(&buf, b"\r\n\r\n") {
                        break pos + 4;
                    }
                    if buf.len() > 64 * 1024 {
                        return;
                    }
                };

                let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
                let path = head.split_whitespace().nth(1).unwrap_or("/").to_string();
                let content_length = head
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        if name.trim().eq_ignore_ascii_case("content-length") {
                            value.trim().parse::<usize>().ok()
                        } else {
                            None
                        }
                    })
                    .unwrap_or(0);

                // Read the body
                while buf.len() < header_end + content_length {
                    let n = match socket.read(&mut chunk).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => n,
                    };
                    buf.extend_from_slice(&chunk[..n]);
                }
                let body = String::from_utf8_lossy(&buf[header_end..header_end + content_length])
                    .to_string();

                let (status, response_body) = handler(&path, &body);
                let status_text = match status {
                    200 => "200 OK",
                    400 => "400 Bad Request",
                    404 => "404 Not Found",
                    500 => "500 Internal Server Error",
                    _ => "200 OK",
                };
                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status_text,
                    response_body.len(),
                    response_body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    addr
}

/// Start the gateway on an ephemeral port, pointed at the given mock
/// upstream. Returns the bound address and the upload directory guard
/// (the directory is deleted when the guard drops).
#[allow(dead_code)]
pub async fn start_gateway(upstream_addr: SocketAddr) -> (SocketAddr, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let mut config = GatewayConfig::default();
    config.uploads.dir = dir.path().to_path_buf();

    let upstream = UpstreamClient::with_base_url(
        config.upstream.clone(),
        format!("http://{}", upstream_addr),
    )
    .unwrap();

    let server = GatewayServer::with_upstream(config, upstream).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = server.run(listener).await;
    });

    (addr, dir)
}

fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}
