use crate::app::cache::ScanCache;
use crate::app::models::{CacheKey, ScanConfig, ScanResult};
use crate::app::scanner::{ScanError, Scanner};
use crate::app::worker::{spawn_scan, Poll, ScanEvent, ScanHandle};
use anyhow::{bail, Context, Result};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    Idle,
    Scanning,
}

/// Outcome of asking the session to scan a folder.
#[derive(Debug)]
pub enum ScanStart {
    /// Served from the cache; no scan thread was started.
    Cached(ScanResult),
    Started,
}

#[derive(Debug)]
pub enum SessionEvent {
    Started { total: usize },
    Progress(usize),
    Completed(ScanResult),
    Failed(ScanError),
}

/// Owns the result cache and the single in-flight scan. Use from one thread only.
#[derive(Default)]
pub struct ScanSession {
    cache: ScanCache,
    active: Option<ScanHandle>,
}

impl ScanSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ScanState {
        if self.active.is_some() {
            ScanState::Scanning
        } else {
            ScanState::Idle
        }
    }

    pub fn cache(&self) -> &ScanCache {
        &self.cache
    }

    pub fn lookup_cache(&self, root: &Path, config: ScanConfig) -> Option<&ScanResult> {
        self.cache.get(&CacheKey::new(root, config))
    }

    pub fn estimate_total(root: &Path, config: ScanConfig) -> usize {
        Scanner::new(root, config).estimate_total()
    }

    /// Returns a cached result right away, otherwise starts a background scan.
    pub fn start_scan(&mut self, root: &Path, config: ScanConfig) -> Result<ScanStart> {
        if let Some(active) = &self.active {
            bail!(
                "A scan of {} is already running",
                active.key().root.display()
            );
        }

        let key = CacheKey::new(root, config);
        if let Some(result) = self.cache.get(&key) {
            log::info!("Cache hit for {}", key.root.display());
            return Ok(ScanStart::Cached(result.clone()));
        }

        log::info!("Cache miss for {}, starting background scan", key.root.display());
        let handle = spawn_scan(key).context("Failed to start scan thread")?;
        self.active = Some(handle);
        Ok(ScanStart::Started)
    }

    /// Collects every event that is already waiting, without blocking.
    pub fn poll(&mut self) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        while let Some(handle) = &self.active {
            let polled = handle.try_next();
            match self.handle_poll(polled) {
                Some(event) => events.push(event),
                None => break,
            }
        }
        events
    }

    /// Waits up to `timeout` for the next event, then drains anything else queued.
    pub fn wait(&mut self, timeout: Duration) -> Vec<SessionEvent> {
        let Some(handle) = &self.active else {
            return Vec::new();
        };

        let polled = handle.next_timeout(timeout);
        let mut events: Vec<SessionEvent> = self.handle_poll(polled).into_iter().collect();
        events.extend(self.poll());
        events
    }

    /// Cancels the running scan, if any, and waits for its thread.
    pub fn stop(&mut self) {
        if let Some(handle) = self.active.take() {
            log::info!("Stopping scan of {}", handle.key().root.display());
            handle.stop();
        }
    }

    fn handle_poll(&mut self, polled: Poll) -> Option<SessionEvent> {
        match polled {
            Poll::Pending => None,
            Poll::Event(ScanEvent::Started { total }) => Some(SessionEvent::Started { total }),
            Poll::Event(ScanEvent::Progress(count)) => Some(SessionEvent::Progress(count)),
            Poll::Event(ScanEvent::Finished(outcome)) => {
                let handle = self.active.take()?;
                let key = handle.key().clone();
                handle.stop();

                match outcome {
                    Ok(result) => {
                        self.cache.insert(key, result.clone());
                        Some(SessionEvent::Completed(result))
                    }
                    Err(err) => Some(SessionEvent::Failed(err)),
                }
            }
            Poll::Disconnected => {
                let handle = self.active.take()?;
                handle.stop();
                Some(SessionEvent::Failed(ScanError::WorkerLost))
            }
        }
    }
}
