use crate::loggers::core::LogRecord;
use std::io::Write;
use tokio::sync::mpsc;

/// Destination for serialized log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogSink {
    #[default]
    Stdout,
    Stderr,
    Discard,
}

pub struct LogWorker {
    receiver: mpsc::Receiver<LogRecord>,
    sink: LogSink,
}

impl LogWorker {
    pub fn new(receiver: mpsc::Receiver<LogRecord>, sink: LogSink) -> Self {
        Self { receiver, sink }
    }

    /// Drains the channel until every `Logger` clone is dropped.
    pub async fn run(mut self) {
        while let Some(record) = self.receiver.recv().await {
            let Ok(line) = serde_json::to_string(&record) else {
                continue;
            };
            match self.sink {
                LogSink::Stdout => {
                    let _ = writeln!(std::io::stdout().lock(), "{}", line);
                }
                LogSink::Stderr => {
                    let _ = writeln!(std::io::stderr().lock(), "{}", line);
                }
                LogSink::Discard => {}
            }
        }
    }
}
