#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;
use youtubedl::core::{DownloadProgress, ProgressObserver};

#[derive(Clone)]
pub struct Route {
    pub path: String,
    pub status: u16,
    pub body: Vec<u8>,
    /// Value of the `Content-Length` header; `None` omits the header.
    pub content_length: Option<usize>,
}

impl Route {
    pub fn ok(path: &str, body: impl Into<Vec<u8>>) -> Self {
        let body = body.into();
        Self {
            path: path.to_string(),
            status: 200,
            content_length: Some(body.len()),
            body,
        }
    }

    pub fn status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    pub fn content_length(mut self, content_length: Option<usize>) -> Self {
        self.content_length = content_length;
        self
    }
}

/// Minimal HTTP/1.1 server answering each connection once and closing it.
pub struct MockServer {
    addr: SocketAddr,
    routes: Arc<Mutex<Vec<Route>>>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockServer {
    pub async fn start(routes: Vec<Route>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let routes = Arc::new(Mutex::new(routes));

        let shared_routes = routes.clone();
        let seen = requests.clone();
        tokio::spawn(async move {
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    break;
                };
                let routes = shared_routes.clone();
                let seen = seen.clone();

                tokio::spawn(async move {
                    let mut reader = BufReader::new(stream);
                    let mut request_line = String::new();
                    if reader.read_line(&mut request_line).await.is_err() {
                        return;
                    }
                    loop {
                        let mut header = String::new();
                        match reader.read_line(&mut header).await {
                            Ok(0) | Err(_) => break,
                            Ok(_) if header == "\r\n" => break,
                            Ok(_) => {}
                        }
                    }

                    let target = request_line
                        .split_whitespace()
                        .nth(1)
                        .unwrap_or("/")
                        .to_string();
                    seen.lock().unwrap().push(target.clone());

                    let path = target.split('?').next().unwrap_or("/");
                    let route = routes
                        .lock()
                        .unwrap()
                        .iter()
                        .find(|r| r.path == path)
                        .cloned();

                    let mut stream = reader.into_inner();
                    let (status, body, content_length) = match route {
                        Some(r) => (r.status, r.body, r.content_length),
                        None => (404, b"not found".to_vec(), Some(9)),
                    };

                    let mut head = format!("HTTP/1.1 {} Mock\r\nConnection: close\r\n", status);
                    if let Some(len) = content_length {
                        head.push_str(&format!("Content-Length: {}\r\n", len));
                    }
                    head.push_str("\r\n");

                    let _ = stream.write_all(head.as_bytes()).await;
                    for chunk in body.chunks(16 * 1024) {
                        if stream.write_all(chunk).await.is_err() {
                            return;
                        }
                        let _ = stream.flush().await;
                    }
                    let _ = stream.shutdown().await;
                });
            }
        });

        Self {
            addr,
            routes,
            requests,
        }
    }

    pub fn route(&self, route: Route) {
        self.routes.lock().unwrap().push(route);
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

/// Form-encodes a `get_video_info` style body.
pub fn video_info_body(pairs: &[(&str, &str)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Observer that remembers every callback.
#[derive(Default)]
pub struct RecordingObserver {
    pub updates: Vec<(usize, DownloadProgress)>,
    pub finished: Option<DownloadProgress>,
}

impl ProgressObserver for RecordingObserver {
    fn on_progress(&mut self, chunk_len: usize, progress: &DownloadProgress) {
        self.updates.push((chunk_len, *progress));
    }

    fn on_finish(&mut self, progress: &DownloadProgress) {
        self.finished = Some(*progress);
    }
}
