#![allow(dead_code)]

use serde_json::json;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use leaderboard_cutoffs::api::{Fetcher, LeaderboardClient, ReqwestTransport, RetryPolicy};

pub const LEADERBOARD_PATH: &str = "/s2/v2/leaderboard/user";

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub target: String,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone)]
pub struct StubResponse {
    pub status: u16,
    pub body: String,
    pub delay: Duration,
    /// Advertised Content-Length when it differs from the body actually sent.
    pub declared_length: Option<usize>,
}

impl StubResponse {
    pub fn ok(body: String) -> Self {
        Self { status: 200, body, delay: Duration::ZERO, declared_length: None }
    }

    pub fn status(status: u16, body: &str) -> Self {
        Self { status, body: body.to_string(), delay: Duration::ZERO, declared_length: None }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Promise `declared_length` bytes but close after the real body.
    pub fn truncated(mut self, declared_length: usize) -> Self {
        self.declared_length = Some(declared_length);
        self
    }
}

type Handler = dyn Fn(&str) -> StubResponse + Send + Sync;

/// Minimal HTTP/1.1 server answering every request through `handler`.
pub struct StubServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl StubServer {
    pub async fn start<F>(handler: F) -> Self
    where
        F: Fn(&str) -> StubResponse + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let handler: Arc<Handler> = Arc::new(handler);

        let recorded = requests.clone();
        tokio::spawn(async move {
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    break;
                };
                let handler = handler.clone();
                let recorded = recorded.clone();
                tokio::spawn(async move {
                    serve_connection(stream, handler, recorded).await;
                });
            }
        });

        Self {
            base_url: format!("http://{}{}", addr, LEADERBOARD_PATH),
            requests,
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

async fn serve_connection(
    mut stream: TcpStream,
    handler: Arc<Handler>,
    recorded: Arc<Mutex<Vec<RecordedRequest>>>,
) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut chunk).await {
            Ok(0) | Err(_) => return,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }

    let head = String::from_utf8_lossy(&buf).to_string();
    let mut lines = head.lines();
    let target = lines
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or_default()
        .to_string();
    let user_agent = lines.find_map(|line| {
        let (name, value) = line.split_once(':')?;
        name.eq_ignore_ascii_case("user-agent")
            .then(|| value.trim().to_string())
    });

    recorded.lock().unwrap().push(RecordedRequest {
        target: target.clone(),
        user_agent,
    });

    let response = handler(&target);
    if !response.delay.is_zero() {
        tokio::time::sleep(response.delay).await;
    }

    let reply = format!(
        "HTTP/1.1 {} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        response.status,
        response.declared_length.unwrap_or(response.body.len()),
        response.body
    );
    let _ = stream.write_all(reply.as_bytes()).await;
    let _ = stream.shutdown().await;
}

/// `page` query parameter of a request target, if present.
pub fn requested_page(target: &str) -> Option<u64> {
    let (_, query) = target.split_once('?')?;
    query
        .split('&')
        .find_map(|pair| pair.strip_prefix("page="))
        .and_then(|v| v.parse().ok())
}

pub fn page_body(items: &[(u64, f64)], total: u64) -> String {
    let items: Vec<_> = items
        .iter()
        .map(|(rank, total_score)| {
            json!({
                "rank": rank,
                "address": format!("0x{:040x}", rank),
                "score": total_score,
                "multiplier": 1,
                "totalScore": total_score,
            })
        })
        .collect();

    json!({
        "data": {
            "items": items,
            "page": 1,
            "size": 1,
            "total": total,
            "total_pages": total,
        },
        "lastUpdated": 1_718_000_000_000i64,
    })
    .to_string()
}

pub fn fast_retry() -> RetryPolicy {
    RetryPolicy {
        max_attempts: 3,
        backoff_unit: Duration::from_millis(10),
    }
}

pub fn client_for(base_url: &str, timeout: Duration) -> LeaderboardClient {
    let transport = Arc::new(ReqwestTransport::new(timeout, "Mozilla/5.0").unwrap());
    let fetcher = Fetcher::new(transport, fast_retry());
    LeaderboardClient::new(fetcher, base_url).unwrap()
}
