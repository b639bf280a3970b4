//! Test helper utilities for site integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::{Mutex, Notify, mpsc};
use uuid::Uuid;

use shared::Locator;
use site::core::SelectionPolicy;
use site::{
    AnalysisFailed, AnalyzeOperation, ImageHandle, ImageStore, InMemoryImageStore, StoredImage, WorkflowController,
};

/// Analyzer whose calls block until the test releases an outcome
#[derive(Clone)]
pub struct GatedAnalyzer {
    outcomes: Arc<Mutex<mpsc::UnboundedReceiver<Result<Locator, AnalysisFailed>>>>,
    calls: Arc<AtomicUsize>,
}

/// Test side of a `GatedAnalyzer`
pub struct Gate {
    tx: mpsc::UnboundedSender<Result<Locator, AnalysisFailed>>,
    calls: Arc<AtomicUsize>,
}

impl Gate {
    pub fn succeed(&self, result: &str) {
        self.tx.send(Ok(Locator::new(result).unwrap())).unwrap();
    }

    pub fn fail(&self) {
        self.tx.send(Err(AnalysisFailed)).unwrap();
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

pub fn gated_analyzer() -> (GatedAnalyzer, Gate) {
    let (tx, rx) = mpsc::unbounded_channel();
    let calls = Arc::new(AtomicUsize::new(0));
    (
        GatedAnalyzer {
            outcomes: Arc::new(Mutex::new(rx)),
            calls: Arc::clone(&calls),
        },
        Gate { tx, calls },
    )
}

#[async_trait]
impl AnalyzeOperation for GatedAnalyzer {
    async fn analyze(&self, _image: &StoredImage) -> Result<Locator, AnalysisFailed> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut outcomes = self.outcomes.lock().await;
        outcomes.recv().await.unwrap_or(Err(AnalysisFailed))
    }

    fn name(&self) -> &'static str {
        "gated"
    }
}

/// Analyzer that panics mid-call
pub struct PanickingAnalyzer;

#[async_trait]
impl AnalyzeOperation for PanickingAnalyzer {
    async fn analyze(&self, _image: &StoredImage) -> Result<Locator, AnalysisFailed> {
        panic!("analyzer blew up");
    }

    fn name(&self) -> &'static str {
        "panicking"
    }
}

pub fn gated_controller(policy: SelectionPolicy) -> (WorkflowController<GatedAnalyzer, InMemoryImageStore>, Gate) {
    let (analyzer, gate) = gated_analyzer();
    (WorkflowController::new(policy, analyzer, InMemoryImageStore::new()), gate)
}

/// Image store whose next insert of one particular image parks until resumed
#[derive(Clone)]
pub struct ParkedStore {
    inner: InMemoryImageStore,
    parked_id: Uuid,
    armed: Arc<AtomicBool>,
    entered: Arc<Notify>,
    resume: Arc<Notify>,
}

impl ParkedStore {
    pub fn new(parked: &ImageHandle) -> Self {
        Self {
            inner: InMemoryImageStore::new(),
            parked_id: parked.content_id(),
            armed: Arc::new(AtomicBool::new(false)),
            entered: Arc::new(Notify::new()),
            resume: Arc::new(Notify::new()),
        }
    }

    /// Park the next insert of the parked image
    pub fn arm(&self) {
        self.armed.store(true, Ordering::SeqCst);
    }

    /// Wait until the armed insert is parked
    pub async fn entered(&self) {
        self.entered.notified().await;
    }

    pub fn resume(&self) {
        self.resume.notify_one();
    }
}

#[async_trait]
impl ImageStore for ParkedStore {
    async fn insert(&self, handle: ImageHandle) -> StoredImage {
        if handle.content_id() == self.parked_id && self.armed.swap(false, Ordering::SeqCst) {
            self.entered.notify_one();
            self.resume.notified().await;
        }
        self.inner.insert(handle).await
    }

    async fn get(&self, locator: &Locator) -> Option<StoredImage> {
        self.inner.get(locator).await
    }

    async fn release(&self, locator: &Locator) -> bool {
        self.inner.release(locator).await
    }

    async fn held_count(&self) -> usize {
        self.inner.held_count().await
    }
}

/// Helper to wait for async conditions with timeout
pub async fn wait_for_condition<F, Fut>(mut condition: F, timeout_ms: u64) -> bool
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = bool>,
{
    let start = std::time::Instant::now();
    let timeout = Duration::from_millis(timeout_ms);

    loop {
        if condition().await {
            return true;
        }

        if start.elapsed() > timeout {
            return false;
        }

        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}
