//! Shared utilities for the integration tests.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;

use edgeserve::{EdgeServer, ServeConfig};

/// Request as seen by a mock origin.
#[allow(dead_code)]
pub struct ReceivedRequest {
    pub request_line: String,
    pub headers: Vec<String>,
    pub body: Vec<u8>,
}

#[allow(dead_code)]
impl ReceivedRequest {
    /// Case-insensitive single-header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        let prefix = format!("{}:", name.to_lowercase());
        self.headers
            .iter()
            .find(|line| line.to_lowercase().starts_with(&prefix))
            .map(|line| line[prefix.len()..].trim())
    }

    pub fn method(&self) -> &str {
        self.request_line.split(' ').next().unwrap_or("")
    }
}

/// Start a mock origin that builds a raw HTTP response per request.
#[allow(dead_code)]
pub async fn start_origin<F>(addr: SocketAddr, respond: F)
where
    F: Fn(ReceivedRequest) -> String + Send + Sync + 'static,
{
    let listener = TcpListener::bind(addr).await.unwrap();
    let respond = Arc::new(respond);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((socket, _)) => {
                    let respond = respond.clone();
                    tokio::spawn(async move {
                        let (read_half, mut write_half) = socket.into_split();
                        let mut reader = BufReader::new(read_half);

                        let mut request_line = String::new();
                        if reader.read_line(&mut request_line).await.is_err() {
                            return;
                        }
                        let mut headers = Vec::new();
                        loop {
                            let mut line = String::new();
                            match reader.read_line(&mut line).await {
                                Ok(0) => break,
                                Ok(_) if line.trim().is_empty() => break,
                                Ok(_) => headers.push(line.trim_end().to_string()),
                                Err(_) => return,
                            }
                        }

                        let content_length = headers
                            .iter()
                            .find(|line| line.to_lowercase().starts_with("content-length:"))
                            .and_then(|line| line["content-length:".len()..].trim().parse().ok())
                            .unwrap_or(0usize);
                        let mut body = vec![0u8; content_length];
                        if content_length > 0 && reader.read_exact(&mut body).await.is_err() {
                            return;
                        }

                        let request = ReceivedRequest {
                            request_line: request_line.trim_end().to_string(),
                            headers,
                            body,
                        };
                        let response = respond(request);
                        let _ = write_half.write_all(response.as_bytes()).await;
                        let _ = write_half.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });
}

/// Start a mock origin that returns a fixed 200 body.
#[allow(dead_code)]
pub async fn start_fixed_origin(addr: SocketAddr, body: &'static str) {
    start_origin(addr, move |_| {
        format!(
            "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            body.len(),
            body
        )
    })
    .await;
}

/// Build and spawn an edge server on `addr` with the given config.
#[allow(dead_code)]
pub async fn start_edge(addr: SocketAddr, mut config: ServeConfig) {
    config.listener.bind_address = addr.to_string();
    let listener = TcpListener::bind(addr).await.unwrap();
    let server = EdgeServer::new(&config).unwrap();

    tokio::spawn(async move {
        let _ = server.run(listener).await;
    });

    tokio::time::sleep(Duration::from_millis(100)).await;
}

/// Non-pooled client that does not follow redirects.
#[allow(dead_code)]
pub fn test_client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

/// Fresh directory under the system temp dir, unique per call.
#[allow(dead_code)]
pub fn unique_temp_dir(tag: &str) -> PathBuf {
    let ts = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("edgeserve-{tag}-{}-{ts}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}
