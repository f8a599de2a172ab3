//! Common test utilities for integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use todo_summary::clients::{Notifier, Summarizer};
use todo_summary::store::ItemStore;
use todo_summary::core::models::{NotificationOutcome, TodoItem};
use todo_summary::errors::TodoError;

/// A request captured by [`MockServer`].
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub request_line: String,
    pub body: String,
}

/// Minimal HTTP/1.1 responder answering every request with one canned response.
pub struct MockServer {
    pub url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockServer {
    pub async fn start(status: u16, body: &str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&requests);
        let body = body.to_string();

        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    return;
                };
                let recorded = Arc::clone(&recorded);
                let body = body.clone();
                tokio::spawn(async move {
                    if let Some(request) = read_request(&mut socket).await {
                        recorded.lock().unwrap().push(request);
                    }
                    let response = format!(
                        "HTTP/1.1 {status} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                        reason(status),
                        body.len()
                    );
                    let _ = socket.write_all(response.as_bytes()).await;
                    let _ = socket.shutdown().await;
                });
            }
        });

        Self {
            url: format!("http://{addr}"),
            requests,
        }
    }

    /// Accepts connections and reads requests but never answers them.
    pub async fn start_silent() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&requests);

        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    return;
                };
                let recorded = Arc::clone(&recorded);
                tokio::spawn(async move {
                    if let Some(request) = read_request(&mut socket).await {
                        recorded.lock().unwrap().push(request);
                    }
                    tokio::time::sleep(std::time::Duration::from_secs(60)).await;
                    drop(socket);
                });
            }
        });

        Self {
            url: format!("http://{addr}"),
            requests,
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Status",
    }
}

async fn read_request(socket: &mut tokio::net::TcpStream) -> Option<RecordedRequest> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let content_length = head
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            name.trim()
                .eq_ignore_ascii_case("content-length")
                .then(|| value.trim().parse::<usize>().ok())
                .flatten()
        })
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    Some(RecordedRequest {
        request_line: head.lines().next().unwrap_or_default().to_string(),
        body: String::from_utf8_lossy(&buf[header_end..]).to_string(),
    })
}

/// Base URL of a local port with nothing listening on it.
pub fn unreachable_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

/// Summarizer returning a fixed string and remembering what it was asked.
pub struct FakeSummarizer {
    reply: String,
    pub calls: Mutex<Vec<Vec<String>>>,
}

impl FakeSummarizer {
    pub fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: reply.to_string(),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl Summarizer for FakeSummarizer {
    async fn summarize(
        &self,
        tasks: &[String],
        _system_instruction: Option<&str>,
    ) -> Result<String, TodoError> {
        self.calls.lock().unwrap().push(tasks.to_vec());
        Ok(self.reply.clone())
    }
}

/// How a [`FakeNotifier`] reacts when called.
pub enum NotifierBehavior {
    Succeed,
    Fail,
    Panic,
}

pub struct FakeNotifier {
    behavior: NotifierBehavior,
    pub sent: Mutex<Vec<String>>,
}

impl FakeNotifier {
    pub fn new(behavior: NotifierBehavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            sent: Mutex::new(Vec::new()),
        })
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for FakeNotifier {
    async fn send_summary(&self, summary: &str) -> Result<NotificationOutcome, TodoError> {
        self.sent.lock().unwrap().push(summary.to_string());
        match self.behavior {
            NotifierBehavior::Succeed => Ok(NotificationOutcome::sent(
                "Summary sent to Slack successfully!",
            )),
            NotifierBehavior::Fail => Err(TodoError::Upstream("webhook exploded".to_string())),
            NotifierBehavior::Panic => panic!("notifier blew up"),
        }
    }
}

/// Store whose every operation fails with a storage error.
pub struct BrokenStore;

fn broken() -> TodoError {
    TodoError::Storage("disk unavailable".to_string())
}

#[async_trait]
impl ItemStore for BrokenStore {
    async fn list_all(&self) -> Result<Vec<TodoItem>, TodoError> {
        Err(broken())
    }

    async fn create(&self, _task: &str, _completed: bool) -> Result<TodoItem, TodoError> {
        Err(broken())
    }

    async fn get(&self, _id: u64) -> Result<Option<TodoItem>, TodoError> {
        Err(broken())
    }

    async fn update(&self, _id: u64, _task: &str, _completed: bool) -> Result<TodoItem, TodoError> {
        Err(broken())
    }

    async fn delete(&self, _id: u64) -> Result<(), TodoError> {
        Err(broken())
    }
}
