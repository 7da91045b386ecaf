#![allow(dead_code)]

use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use content_loader::{LoadError, Source};
use tokio::sync::Notify;

/// Source that blocks until released and counts how often it was fetched
#[derive(Clone)]
pub struct GatedSource {
    body: Option<Vec<u8>>,
    gate: Arc<Notify>,
    calls: Arc<AtomicUsize>,
}

impl GatedSource {
    /// Serves `body` once released
    pub fn serving(body: &str) -> Self {
        Self {
            body: Some(body.as_bytes().to_vec()),
            gate: Arc::new(Notify::new()),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Fails with HTTP 503 once released
    pub fn failing() -> Self {
        Self {
            body: None,
            gate: Arc::new(Notify::new()),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn release(&self) {
        self.gate.notify_one();
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Source for GatedSource {
    fn name(&self) -> &str {
        "gated"
    }

    fn location(&self) -> String {
        "gated://content.json".to_string()
    }

    async fn fetch(&self) -> Result<Vec<u8>, LoadError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.gate.notified().await;

        match &self.body {
            Some(body) => Ok(body.clone()),
            None => Err(LoadError::Status {
                url: self.location(),
                status: 503,
            }),
        }
    }
}

/// Collects formatted log output for assertions
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    /// Route this thread's tracing output into the capture
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let writer = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
