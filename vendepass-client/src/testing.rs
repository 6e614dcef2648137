//! In-process mock server for exchange tests.

use crate::connection::ConnectionConfig;
use serde_json::{Map, Value};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use vendepass_protocol::{Decoder, RequestEnvelope};

/// What the mock does after reading a request.
pub(crate) enum Reply {
    /// Write these bytes in one write, then wait for the client to hang up.
    Send(Vec<u8>),
    /// Never answer.
    Silent,
    /// Close the connection without answering.
    Close,
    /// Abort the connection with a reset.
    Reset,
}

type Responder = dyn Fn(&RequestEnvelope) -> Reply + Send + Sync;

pub(crate) struct MockServer {
    addr: SocketAddr,
    raw: Arc<Mutex<Vec<Vec<u8>>>>,
    handle: JoinHandle<()>,
}

impl MockServer {
    pub(crate) async fn start<F>(respond: F) -> Self
    where
        F: Fn(&RequestEnvelope) -> Reply + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let raw = Arc::new(Mutex::new(Vec::new()));
        let respond: Arc<Responder> = Arc::new(respond);

        let handle = {
            let raw = raw.clone();
            tokio::spawn(async move {
                while let Ok((stream, _)) = listener.accept().await {
                    let raw = raw.clone();
                    let respond = respond.clone();
                    tokio::spawn(async move {
                        serve(stream, raw, respond).await;
                    });
                }
            })
        };

        Self { addr, raw, handle }
    }

    /// Answers every request with the same document.
    pub(crate) async fn fixed(body: &str) -> Self {
        let body = body.as_bytes().to_vec();
        Self::start(move |_| Reply::Send(body.clone())).await
    }

    /// Resets every connection as soon as it is accepted, before reading.
    pub(crate) async fn reset_on_accept() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                reset(stream);
            }
        });

        Self {
            addr,
            raw: Arc::new(Mutex::new(Vec::new())),
            handle,
        }
    }

    /// Returns a loopback address nothing is listening on.
    pub(crate) fn unused_addr() -> SocketAddr {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    }

    pub(crate) fn config(&self) -> ConnectionConfig {
        ConnectionConfig::from_addr(self.addr)
    }

    pub(crate) fn raw_requests(&self) -> Vec<Vec<u8>> {
        self.raw.lock().unwrap().clone()
    }

    pub(crate) fn requests(&self) -> Vec<RequestEnvelope> {
        self.raw_requests()
            .iter()
            .map(|bytes| Decoder::decode_request(bytes).unwrap())
            .collect()
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn serve(mut stream: TcpStream, raw: Arc<Mutex<Vec<Vec<u8>>>>, respond: Arc<Responder>) {
    let mut buf = vec![0u8; 64 * 1024];
    let n = match stream.read(&mut buf).await {
        Ok(n) if n > 0 => n,
        _ => return,
    };
    let bytes = buf[..n].to_vec();
    let request = match Decoder::decode_request(&bytes) {
        Ok(request) => request,
        Err(_) => return,
    };
    raw.lock().unwrap().push(bytes);

    match (*respond)(&request) {
        Reply::Send(body) => {
            if stream.write_all(&body).await.is_err() {
                return;
            }
        }
        Reply::Silent => {}
        Reply::Close => return,
        Reply::Reset => {
            reset(stream);
            return;
        }
    }

    // Hold the connection until the client hangs up.
    while let Ok(n) = stream.read(&mut buf).await {
        if n == 0 {
            break;
        }
    }
}

/// Drops the stream with a zero linger so the peer sees a reset.
fn reset(stream: TcpStream) {
    let _ = stream.set_linger(Some(Duration::ZERO));
    drop(stream);
}

/// Unwraps a JSON object literal into a `Data` mapping.
pub(crate) fn data(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}
