//! Executes editor transitions against a [`SlideStore`].

use std::sync::Arc;

use carousel_core::editor::{Command, Effect, EditorState, Rejection};
use carousel_core::save::SaveStatus;
use carousel_core::types::DbId;
use chrono::Utc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::store::{SlideChanges, SlideStore, StoreError};

/// Result of dispatching one command.
#[derive(Debug)]
pub enum Outcome {
    /// The state changed. Background saves may still be running.
    Applied,
    /// The command was refused; the state is unchanged.
    Rejected(Rejection),
    /// A slide could not be created, so the state is unchanged.
    PersistFailed(StoreError),
}

/// A live editing session over one project.
///
/// Commands are applied one at a time. Creating a slide waits for the
/// store; content saves and deletions are spawned and never block the
/// caller.
pub struct Editor<S> {
    store: Arc<S>,
    state: Arc<Mutex<EditorState>>,
    /// Handles of spawned saves and deletions. Dropping one detaches the
    /// task rather than cancelling it.
    background: Mutex<Vec<JoinHandle<()>>>,
}

impl<S: SlideStore + 'static> Editor<S> {
    /// Load `project_id` from the store and start editing its first slide.
    pub async fn open(store: Arc<S>, project_id: DbId) -> Result<Self, StoreError> {
        let slides = store.fetch_slides(project_id).await?;
        tracing::debug!(project_id, slides = slides.len(), "Opened project");
        Ok(Self {
            store,
            state: Arc::new(Mutex::new(EditorState::new(project_id, slides))),
            background: Mutex::new(Vec::new()),
        })
    }

    pub async fn dispatch(&self, command: Command) -> Outcome {
        let mut state = self.state.lock().await;

        let transition = match state.apply(command, Utc::now()) {
            Ok(transition) => transition,
            Err(rejection) => {
                tracing::debug!(project_id = state.project_id(), %rejection, "Command rejected");
                return Outcome::Rejected(rejection);
            }
        };
        *state = transition.state;

        for effect in transition.effects {
            match effect {
                Effect::CreateSlide(new_slide) => {
                    // Local state only changes once the slide is stored.
                    let created = match self.store.create_slide(&new_slide).await {
                        Ok(slide) => slide,
                        Err(e) => {
                            tracing::warn!(
                                project_id = new_slide.project_id,
                                error = %e,
                                "Failed to create slide"
                            );
                            return Outcome::PersistFailed(e);
                        }
                    };
                    let slide_id = created.id;
                    match state.apply(Command::CommitCreated(created), Utc::now()) {
                        Ok(commit) => *state = commit.state,
                        Err(rejection) => {
                            tracing::warn!(slide_id, %rejection, "Created slide could not be added");
                            return Outcome::Rejected(rejection);
                        }
                    }
                }
                Effect::UpdateSlide {
                    slide_id,
                    content,
                    tone,
                    revision,
                } => {
                    let changes = SlideChanges {
                        content,
                        tone,
                        revision,
                    };
                    self.spawn_save(slide_id, changes).await;
                }
                Effect::DeleteSlide { slide_id } => self.spawn_delete(slide_id).await,
            }
        }

        Outcome::Applied
    }

    /// Advisory: true while any content save is outstanding.
    pub async fn is_saving(&self) -> bool {
        self.state.lock().await.is_saving()
    }

    pub async fn snapshot(&self) -> EditorState {
        self.state.lock().await.clone()
    }

    /// Wait for every background save and deletion to finish.
    pub async fn flush(&self) {
        // Tasks lock the state when they settle, so don't hold our lock
        // while waiting for them.
        let background = std::mem::take(&mut *self.background.lock().await);
        for handle in background {
            if let Err(e) = handle.await {
                tracing::warn!(error = %e, "Background persistence task failed");
            }
        }
    }

    // ---- private helpers ----

    async fn spawn_save(&self, slide_id: DbId, changes: SlideChanges) {
        let store = Arc::clone(&self.store);
        let state = Arc::clone(&self.state);
        let handle = tokio::spawn(async move {
            let revision = changes.revision;
            let result = store.update_slide(slide_id, &changes).await;
            let status = state.lock().await.settle_save(slide_id, revision);

            match (result, status) {
                (Ok(()), SaveStatus::Current) => {
                    tracing::debug!(slide_id, revision, "Saved slide");
                }
                (Ok(()), SaveStatus::Superseded) => {
                    tracing::debug!(slide_id, revision, "Saved slide, newer save pending");
                }
                (Err(StoreError::Stale), _) => {
                    tracing::debug!(slide_id, revision, "Discarded stale save");
                }
                (Err(e), _) => {
                    tracing::warn!(slide_id, revision, error = %e, "Auto-save failed");
                }
            }
        });
        self.track(handle).await;
    }

    async fn spawn_delete(&self, slide_id: DbId) {
        let store = Arc::clone(&self.store);
        let handle = tokio::spawn(async move {
            match store.delete_slide(slide_id).await {
                Ok(()) => tracing::debug!(slide_id, "Deleted slide"),
                Err(e) => tracing::warn!(slide_id, error = %e, "Failed to delete slide"),
            }
        });
        self.track(handle).await;
    }

    async fn track(&self, handle: JoinHandle<()>) {
        let mut background = self.background.lock().await;
        background.retain(|h| !h.is_finished());
        background.push(handle);
    }
}
