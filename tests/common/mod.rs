//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Collects everything a `tracing` fmt subscriber writes.
#[derive(Clone, Default)]
pub struct LogCapture {
    buffer: Arc<Mutex<Vec<u8>>>,
}

pub struct LogWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for LogCapture {
    type Writer = LogWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LogWriter {
            buffer: Arc::clone(&self.buffer),
        }
    }
}

impl Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut guard = self
            .buffer
            .lock()
            .unwrap_or_else(|poison| poison.into_inner());
        guard.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl LogCapture {
    /// Everything logged so far.
    pub fn contents(&self) -> String {
        let guard = self
            .buffer
            .lock()
            .unwrap_or_else(|poison| poison.into_inner());
        String::from_utf8_lossy(&guard).into_owned()
    }

    /// Log lines at `level` (e.g. "ERROR", "WARN").
    pub fn lines_at(&self, level: &str) -> Vec<String> {
        self.contents()
            .lines()
            .filter(|line| line.contains(level))
            .map(str::to_owned)
            .collect()
    }
}

/// Runs `f` with a debug-level subscriber writing into a fresh capture.
pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, LogCapture) {
    capture_logs_at(tracing::Level::DEBUG, f)
}

/// Runs `f` with a subscriber that lets through `level` and above.
pub fn capture_logs_at<T>(level: tracing::Level, f: impl FnOnce() -> T) -> (T, LogCapture) {
    let capture = LogCapture::default();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_ansi(false)
        .with_writer(capture.clone())
        .finish();
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, capture)
}

/// Writes `content` to `dir/name`.
pub fn write_export(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

/// Three valid Facebook messages and one that is too short.
pub const FACEBOOK_EXPORT: &str = r#"{
  "participants": [{"name": "Alice"}, {"name": "Bob"}],
  "messages": [
    {"sender_name": "Alice", "timestamp_ms": 1561939380000, "content": "Perfect, see you at eight then", "type": "Generic"},
    {"sender_name": "Bob", "timestamp_ms": 1561939320000, "content": "I can grab chips on the way", "type": "Generic"},
    {"sender_name": "Bob", "timestamp_ms": 1561939260000, "content": "short", "type": "Generic"},
    {"sender_name": "Alice", "timestamp_ms": 1561939200000, "content": "Who is bringing the snacks?", "type": "Generic"}
  ],
  "title": "Weekend plans",
  "thread_type": "RegularGroup"
}"#;

/// One ordinary Discord message and one system message.
pub const DISCORD_EXPORT: &str = r#"{
  "guild": {"id": "1", "name": "Friends"},
  "channel": {"id": "2", "type": "GuildTextChat", "name": "general"},
  "messages": [
    {
      "id": "100",
      "type": "Default",
      "timestamp": "2020-05-01T12:34:56.789+00:00",
      "content": "Movie night on Friday, who is in?",
      "author": {"id": "7", "name": "carol", "nickname": "Carol", "isBot": false}
    },
    {
      "id": "101",
      "type": "System",
      "timestamp": "2020-05-01T12:35:00+00:00",
      "content": "Dave joined the server. Say hi!",
      "author": {"id": "8", "name": "dave"}
    }
  ],
  "messageCount": 2
}"#;
