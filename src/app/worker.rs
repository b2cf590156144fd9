use crate::app::models::{CacheKey, ScanResult};
use crate::app::scanner::{ScanError, Scanner};
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, TryRecvError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Messages sent from the scan thread, in order: `Started`, any `Progress`, one `Finished`.
#[derive(Debug)]
pub enum ScanEvent {
    Started { total: usize },
    Progress(usize),
    Finished(Result<ScanResult, ScanError>),
}

/// What the receiving side sees when it checks for an event.
#[derive(Debug)]
pub enum Poll {
    Event(ScanEvent),
    Pending,
    Disconnected,
}

/// Owning handle for a scan running on its own thread.
pub struct ScanHandle {
    key: CacheKey,
    events: Receiver<ScanEvent>,
    cancel: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

/// Starts scanning `key.root` with `key.config` on a background thread.
pub fn spawn_scan(key: CacheKey) -> io::Result<ScanHandle> {
    let (tx, rx) = mpsc::channel();
    let cancel = Arc::new(AtomicBool::new(false));

    let root = key.root.clone();
    let config = key.config;
    let flag = Arc::clone(&cancel);

    let thread = thread::Builder::new()
        .name("scan".to_string())
        .spawn(move || {
            log::info!("Background scan of {} started", root.display());

            let progress_tx = tx.clone();
            let mut scanner = Scanner::new(&root, config)
                .with_cancel_flag(flag)
                .with_progress(move |count| {
                    let _ = progress_tx.send(ScanEvent::Progress(count));
                });

            let _ = tx.send(ScanEvent::Started {
                total: scanner.estimate_total(),
            });

            let result = scanner.scan();
            match &result {
                Ok(_) => log::info!(
                    "Background scan of {} finished ({} entries)",
                    root.display(),
                    scanner.processed()
                ),
                Err(err) => log::info!("Background scan of {} stopped: {}", root.display(), err),
            }

            let _ = tx.send(ScanEvent::Finished(result));
        })?;

    Ok(ScanHandle {
        key,
        events: rx,
        cancel,
        thread: Some(thread),
    })
}

impl ScanHandle {
    pub fn key(&self) -> &CacheKey {
        &self.key
    }

    /// Never blocks.
    pub fn try_next(&self) -> Poll {
        match self.events.try_recv() {
            Ok(event) => Poll::Event(event),
            Err(TryRecvError::Empty) => Poll::Pending,
            Err(TryRecvError::Disconnected) => Poll::Disconnected,
        }
    }

    /// Blocks for at most `timeout`.
    pub fn next_timeout(&self, timeout: Duration) -> Poll {
        match self.events.recv_timeout(timeout) {
            Ok(event) => Poll::Event(event),
            Err(RecvTimeoutError::Timeout) => Poll::Pending,
            Err(RecvTimeoutError::Disconnected) => Poll::Disconnected,
        }
    }

    /// Asks the scan thread to stop at its next entry; does not wait.
    pub fn request_stop(&self) {
        self.cancel.store(true, Ordering::SeqCst);
    }

    /// Requests a stop and waits for the thread to exit.
    pub fn stop(mut self) {
        self.request_stop();
        self.join();
    }

    fn join(&mut self) {
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                log::error!("Scan thread for {} panicked", self.key.root.display());
            }
        }
    }
}

impl Drop for ScanHandle {
    fn drop(&mut self) {
        self.request_stop();
        self.join();
    }
}
