use crate::core::error::HcError;
use crate::loggers::core::{LogLevel, LogRecord};
use crate::loggers::worker::{LogSink, LogWorker};
use arc_swap::ArcSwap;
use std::sync::Arc;
use tokio::sync::mpsc;

pub struct LoggerConfig {
    pub level: LogLevel,
    pub component: String,
}

/// Cheap handle used by the `info!`/`error!` family of macros.
#[derive(Clone)]
pub struct Logger {
    pub sender: mpsc::Sender<LogRecord>,
    pub config: Arc<ArcSwap<LoggerConfig>>,
}

impl Logger {
    /// True when a record at `level` passes the configured threshold.
    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.config.load().level
    }

    /// Changes the threshold for every clone of this handle.
    pub fn set_level(&self, level: LogLevel) {
        self.config.rcu(|cfg| LoggerConfig {
            level,
            component: cfg.component.clone(),
        });
    }

    pub fn level(&self) -> LogLevel {
        self.config.load().level
    }
}

pub struct LoggerBuilder {
    component: String,
    level: LogLevel,
    sink: LogSink,
    buffer_size: usize,
}

impl LoggerBuilder {
    pub fn new(component: &str) -> Self {
        Self {
            component: component.to_string(),
            level: LogLevel::Info,
            sink: LogSink::Stdout,
            buffer_size: 1024,
        }
    }

    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    pub fn with_sink(mut self, sink: LogSink) -> Self {
        self.sink = sink;
        self
    }

    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }

    /// Spawns the writer task. Must be called inside a tokio runtime.
    pub fn build(self) -> Result<Logger, HcError> {
        let handle = tokio::runtime::Handle::try_current()
            .map_err(|e| HcError::ConfigError(format!("Logger needs a tokio runtime: {}", e)))?;

        let (tx, rx) = mpsc::channel(self.buffer_size.max(1));
        let config = Arc::new(ArcSwap::from_pointee(LoggerConfig {
            level: self.level,
            component: self.component,
        }));

        let worker = LogWorker::new(rx, self.sink);
        handle.spawn(worker.run());

        Ok(Logger { sender: tx, config })
    }
}
