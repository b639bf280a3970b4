//! Workflow controller
//!
//! Owns one `SubmissionWorkflow` behind a mutex and wires it to the analyzer
//! and the image store. Image store calls that change what is selected run
//! under the mutex; the analyzer call never does, so the pending state is
//! visible to every other request while an analysis runs.

use shared::{Locator, ProcessId};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::core::{DemoView, SelectionPolicy, Settlement, SubmissionWorkflow, SubmitTicket, WorkflowState, render};
use crate::error::AnalysisFailed;
use crate::traits::{AnalyzeOperation, ImageStore};
use crate::types::{ImageHandle, StoredImage};

pub struct WorkflowController<A, S>
where
    A: AnalyzeOperation + 'static,
    S: ImageStore + 'static,
{
    workflow: Arc<Mutex<SubmissionWorkflow>>,
    analyzer: Arc<A>,
    store: Arc<S>,
}

impl<A, S> Clone for WorkflowController<A, S>
where
    A: AnalyzeOperation + 'static,
    S: ImageStore + 'static,
{
    fn clone(&self) -> Self {
        Self {
            workflow: Arc::clone(&self.workflow),
            analyzer: Arc::clone(&self.analyzer),
            store: Arc::clone(&self.store),
        }
    }
}

impl<A, S> WorkflowController<A, S>
where
    A: AnalyzeOperation + 'static,
    S: ImageStore + 'static,
{
    pub fn new(policy: SelectionPolicy, analyzer: A, store: S) -> Self {
        Self {
            workflow: Arc::new(Mutex::new(SubmissionWorkflow::new(policy))),
            analyzer: Arc::new(analyzer),
            store: Arc::new(store),
        }
    }

    pub fn analyzer(&self) -> &A {
        &self.analyzer
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Snapshot of the raw workflow state
    pub async fn state(&self) -> WorkflowState {
        self.workflow.lock().await.state().clone()
    }

    /// Current view-model
    pub async fn view(&self) -> DemoView {
        render(self.workflow.lock().await.state())
    }

    /// File-chosen intent. `None` or an empty handle means the picker was
    /// cancelled and leaves the state untouched.
    pub async fn select_image(&self, handle: Option<ImageHandle>) -> DemoView {
        let Some(handle) = handle.filter(|h| !h.is_empty()) else {
            shared::process_debug!(ProcessId::current(), "No file selected");
            return self.view().await;
        };

        if !handle.is_image() {
            shared::process_warn!(
                ProcessId::current(),
                "⚠️ Selected file has media type {:?}; accepting it anyway",
                handle.content_type
            );
        }

        // Insert, select and release under one lock so a concurrent
        // selection can never release the image that ends up selected
        let mut workflow = self.workflow.lock().await;
        let stored = self.store.insert(handle).await;

        if let Some(previous) = workflow.select_image(stored.locator.clone()) {
            self.store.release(&previous).await;
        }
        let view = render(workflow.state());
        drop(workflow);

        shared::process_info!(ProcessId::current(), "🖼️ Selected image {}", stored.locator);
        view
    }

    /// Submit-clicked intent. Starts the analysis in the background and
    /// returns its handle, or `None` when the precondition rejects it.
    /// Settlement happens even if the caller drops the handle.
    pub async fn start_submit(&self) -> Option<JoinHandle<Settlement>> {
        let (ticket, image) = {
            let mut workflow = self.workflow.lock().await;
            let Some(ticket) = workflow.begin_submit() else {
                shared::process_debug!(ProcessId::current(), "Submit ignored: no image selected or analysis pending");
                return None;
            };
            let image = self.store.get(ticket.image()).await;
            (ticket, image)
        };

        shared::process_info!(
            ProcessId::current(),
            "🔬 Submission #{} started with {} analyzer",
            ticket.seq(),
            self.analyzer.name()
        );

        let controller = self.clone();
        Some(tokio::spawn(async move { controller.run_analysis(ticket, image).await }))
    }

    /// Submit and wait for settlement. `None` when the precondition rejects it.
    pub async fn submit(&self) -> Option<Settlement> {
        let handle = self.start_submit().await?;
        match handle.await {
            Ok(settlement) => Some(settlement),
            Err(e) => {
                shared::process_error!(ProcessId::current(), "Settlement task aborted: {}", e);
                Some(Settlement::Stale)
            }
        }
    }

    /// Look up a held image by id
    pub async fn image(&self, id: Uuid) -> Option<StoredImage> {
        self.store.get(&Locator::for_image(id)).await
    }

    /// Tear the workflow down and release the held image
    pub async fn shutdown(&self) {
        let mut workflow = self.workflow.lock().await;
        if let Some(locator) = workflow.teardown() {
            self.store.release(&locator).await;
        }
        drop(workflow);
        shared::process_info!(ProcessId::current(), "🧹 Workflow torn down");
    }

    async fn run_analysis(&self, ticket: SubmitTicket, image: Option<StoredImage>) -> Settlement {
        let outcome = match image {
            Some(image) => {
                // A panicking analyzer still settles, as a failure
                let analyzer = Arc::clone(&self.analyzer);
                match tokio::spawn(async move { analyzer.analyze(&image).await }).await {
                    Ok(outcome) => outcome,
                    Err(e) => {
                        shared::process_error!(ProcessId::current(), "Analyzer task failed: {}", e);
                        Err(AnalysisFailed)
                    }
                }
            }
            None => {
                shared::process_warn!(ProcessId::current(), "⚠️ Image {} no longer held", ticket.image());
                Err(AnalysisFailed)
            }
        };

        let seq = ticket.seq();
        let settlement = self.workflow.lock().await.settle(ticket, outcome);

        match settlement {
            Settlement::Succeeded => {
                shared::process_info!(ProcessId::current(), "✅ Submission #{} succeeded", seq);
            }
            Settlement::Failed => {
                shared::process_warn!(ProcessId::current(), "❌ Submission #{} failed", seq);
            }
            Settlement::Superseded => {
                shared::process_info!(ProcessId::current(), "Submission #{} outcome dropped: image replaced", seq);
            }
            Settlement::Stale => {
                shared::process_debug!(ProcessId::current(), "Submission #{} settled after teardown", seq);
            }
        }

        settlement
    }
}
