//! Helpers for tests that talk HTTP.
#![allow(clippy::expect_used)]

use reqwest::Client;
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{TcpListener, TcpStream},
    task::JoinHandle,
};

/// A client which never goes through a proxy.
pub fn test_client() -> Client {
    Client::builder()
        .no_proxy()
        .build()
        .expect("building test client")
}

/// Serve a single HTTP response on a local port.
///
/// Returns the base URL and a handle resolving to the raw request text.
pub async fn serve_once(
    status: u16,
    body: &str,
) -> (String, JoinHandle<String>) {
    let (base, handle) = serve(&[(status, body)]).await;
    let handle = tokio::spawn(async move {
        let mut requests = handle.await.expect("joining test server");
        requests.remove(0)
    });
    (base, handle)
}

/// Serve the given responses in order, one connection each.
///
/// Returns the base URL and a handle resolving to the raw requests.
pub async fn serve(
    responses: &[(u16, &str)],
) -> (String, JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("binding test listener");
    let addr = listener.local_addr().expect("reading local address");
    let responses: Vec<(u16, String)> = responses
        .iter()
        .map(|(status, body)| (*status, body.to_string()))
        .collect();
    let handle = tokio::spawn(async move {
        let mut requests = Vec::with_capacity(responses.len());
        for (status, body) in responses {
            let (mut socket, _) =
                listener.accept().await.expect("accepting test connection");
            requests.push(read_request(&mut socket).await);
            let response = format!(
                "HTTP/1.1 {status} {}\r\n\
                 content-type: application/json\r\n\
                 content-length: {}\r\n\
                 connection: close\r\n\r\n{body}",
                if status == 200 { "OK" } else { "Error" },
                body.len(),
            );
            socket
                .write_all(response.as_bytes())
                .await
                .expect("writing test response");
            let _ = socket.shutdown().await;
        }
        requests
    });
    (format!("http://{addr}/"), handle)
}

async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = socket.read(&mut chunk).await.expect("reading test request");
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&buf[..pos]).to_lowercase();
            let len = head
                .lines()
                .find_map(|l| l.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= pos + 4 + len {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}
