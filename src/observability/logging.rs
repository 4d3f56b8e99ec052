//! Balancer event logging.
//!
//! # Responsibilities
//! - Accept balancer events without blocking request handling
//! - Serialize events to the output stream from a single writer task
//!
//! # Design Decisions
//! - Bounded channel; a full buffer drops the event rather than blocking
//! - One consumer owns the output stream, so lines never interleave
//! - Shutdown is a distinct broadcast signal, never a close of the data
//!   channel; the queue is drained to empty before the writer exits

use chrono::{DateTime, Utc};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::{broadcast, mpsc};

/// Event severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
        }
    }
}

/// A single balancer event. Immutable once created; ownership transfers
/// to the channel on send.
#[derive(Debug, Clone)]
pub struct LogEvent {
    pub timestamp: DateTime<Utc>,
    pub severity: Severity,
    pub message: String,
}

impl LogEvent {
    fn new(severity: Severity, message: String) -> Self {
        Self {
            timestamp: Utc::now(),
            severity,
            message,
        }
    }

    /// Render the event as one output line.
    fn render(&self) -> String {
        format!(
            "{} : [{}] {}\n",
            self.timestamp.format("%Y-%m-%d"),
            self.severity.as_str(),
            self.message
        )
    }
}

/// Producer handle. Cheap to clone; shared by every request task and the
/// health prober.
#[derive(Debug, Clone)]
pub struct LogSink {
    tx: mpsc::Sender<LogEvent>,
}

impl LogSink {
    /// Create a sink and its paired writer draining into `out`.
    pub fn new<W>(capacity: usize, out: W) -> (Self, LogWriter<W>)
    where
        W: AsyncWrite + Unpin,
    {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, LogWriter { rx, out })
    }

    /// Enqueue an event. Never blocks; the event is dropped when the
    /// buffer is full.
    pub fn emit(&self, severity: Severity, message: impl Into<String>) {
        let event = LogEvent::new(severity, message.into());
        match self.tx.try_send(event) {
            Ok(()) => {}
            Err(mpsc::error::TrySendError::Full(event)) => {
                tracing::warn!(message = %event.message, "event buffer full, dropping event");
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                // Writer already stopped; nothing left to record to.
            }
        }
    }
}

/// Consumer task. Owns the output stream; there is exactly one per sink.
#[derive(Debug)]
pub struct LogWriter<W> {
    rx: mpsc::Receiver<LogEvent>,
    out: W,
}

impl<W: AsyncWrite + Unpin> LogWriter<W> {
    /// Drain events in FIFO order until the shutdown signal fires, then
    /// flush whatever is still queued before returning.
    ///
    /// A closed shutdown channel counts as shutdown.
    pub async fn run(mut self, mut shutdown: broadcast::Receiver<()>) {
        loop {
            tokio::select! {
                event = self.rx.recv() => match event {
                    Some(event) => self.write(event).await,
                    // Every sink handle dropped.
                    None => break,
                },
                _ = shutdown.recv() => {
                    while let Ok(event) = self.rx.try_recv() {
                        self.write(event).await;
                    }
                    break;
                }
            }
        }
        let _ = self.out.flush().await;
    }

    async fn write(&mut self, event: LogEvent) {
        if let Err(e) = self.out.write_all(event.render().as_bytes()).await {
            tracing::warn!(error = %e, "failed to write event");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::Shutdown;
    use tokio::io::AsyncReadExt;

    async fn collect_output(
        read_half: tokio::io::DuplexStream,
        writer_task: tokio::task::JoinHandle<()>,
    ) -> Vec<String> {
        writer_task.await.unwrap();
        let mut buf = String::new();
        let mut read_half = read_half;
        read_half.read_to_string(&mut buf).await.unwrap();
        buf.lines().map(str::to_string).collect()
    }

    #[tokio::test]
    async fn events_are_written_in_emit_order() {
        let (read_half, write_half) = tokio::io::duplex(4096);
        let (sink, writer) = LogSink::new(16, write_half);
        let shutdown = Shutdown::new();

        sink.emit(Severity::Info, "first");
        sink.emit(Severity::Warning, "second");
        sink.emit(Severity::Error, "third");
        drop(sink);

        let task = tokio::spawn(writer.run(shutdown.subscribe()));
        let lines = collect_output(read_half, task).await;

        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("[INFO] first"));
        assert!(lines[1].contains("[WARNING] second"));
        assert!(lines[2].contains("[ERROR] third"));
    }

    #[tokio::test]
    async fn rendered_line_has_the_date_severity_message_shape() {
        let (read_half, write_half) = tokio::io::duplex(4096);
        let (sink, writer) = LogSink::new(4, write_half);
        let shutdown = Shutdown::new();

        sink.emit(Severity::Info, "server up : http://localhost:8080");
        drop(sink);

        let task = tokio::spawn(writer.run(shutdown.subscribe()));
        let lines = collect_output(read_half, task).await;

        // "<YYYY-MM-DD> : [<SEVERITY>] <message>"
        let line = &lines[0];
        let (date, rest) = line.split_once(" : ").unwrap();
        assert_eq!(date.len(), 10);
        assert!(date.chars().all(|c| c.is_ascii_digit() || c == '-'));
        assert_eq!(rest, "[INFO] server up : http://localhost:8080");
    }

    #[tokio::test]
    async fn full_buffer_drops_instead_of_blocking() {
        let (read_half, write_half) = tokio::io::duplex(4096);
        let (sink, writer) = LogSink::new(2, write_half);
        let shutdown = Shutdown::new();

        // Third emit finds the buffer full; it must return immediately.
        sink.emit(Severity::Info, "kept 1");
        sink.emit(Severity::Info, "kept 2");
        sink.emit(Severity::Info, "dropped");
        drop(sink);

        let task = tokio::spawn(writer.run(shutdown.subscribe()));
        let lines = collect_output(read_half, task).await;

        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|l| l.contains("kept")));
    }

    #[tokio::test]
    async fn shutdown_drains_queued_events_before_exit() {
        let (read_half, write_half) = tokio::io::duplex(4096);
        let (sink, writer) = LogSink::new(8, write_half);
        let shutdown = Shutdown::new();
        let shutdown_rx = shutdown.subscribe();

        sink.emit(Severity::Info, "queued before shutdown");
        sink.emit(Severity::Error, "also queued");
        shutdown.trigger();

        // The sink stays alive: the writer must exit on the signal alone,
        // after draining what was already enqueued.
        let task = tokio::spawn(writer.run(shutdown_rx));
        let lines = collect_output(read_half, task).await;

        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("queued before shutdown"));
        assert!(lines[1].contains("also queued"));
        drop(sink);
    }
}
