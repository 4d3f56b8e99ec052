//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use tokio::io::AsyncWriteExt;
use tokio::net::TcpListener;

use rotary::observability::logging::LogSink;

/// Start a simple mock backend that returns a fixed response body.
pub async fn start_mock_backend(addr: SocketAddr, response: &'static str) {
    let listener = TcpListener::bind(addr).await.unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    tokio::spawn(async move {
                        let response_str = format!(
                            "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            response.len(),
                            response
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });
}

/// Start a backend that accepts connections and immediately closes them,
/// so every proxied attempt fails. Returns the accept counter.
#[allow(dead_code)]
pub async fn start_closing_backend(addr: SocketAddr) -> Arc<AtomicU32> {
    let listener = TcpListener::bind(addr).await.unwrap();
    let accepts = Arc::new(AtomicU32::new(0));
    let counter = accepts.clone();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((socket, _)) => {
                    counter.fetch_add(1, Ordering::SeqCst);
                    drop(socket);
                }
                Err(_) => break,
            }
        }
    });

    accepts
}

/// A sink whose events go nowhere, for tests that don't inspect them.
#[allow(dead_code)]
pub fn discard_sink() -> LogSink {
    let (_read_half, write_half) = tokio::io::duplex(4096);
    let (sink, _writer) = LogSink::new(64, write_half);
    sink
}
