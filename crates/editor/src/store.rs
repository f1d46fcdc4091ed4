//! The persistence boundary the editor driver talks to.

use carousel_core::slide::{NewSlide, Slide};
use carousel_core::types::DbId;

/// Errors from a [`SlideStore`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The HTTP request itself failed (network, DNS, TLS, decoding).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API answered with an unexpected non-2xx status.
    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// The target does not exist or is not owned by the caller.
    #[error("Not found")]
    NotFound,

    /// The store already holds a newer save for the slide.
    #[error("A newer save has already been applied")]
    Stale,
}

/// Content written by an auto-save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideChanges {
    pub content: String,
    /// `None` clears the tone.
    pub tone: Option<String>,
    pub revision: i64,
}

/// Remote slide storage for one authenticated owner.
pub trait SlideStore: Send + Sync {
    /// Load a project's slides.
    fn fetch_slides(
        &self,
        project_id: DbId,
    ) -> impl std::future::Future<Output = Result<Vec<Slide>, StoreError>> + Send;

    /// Create a slide and return the stored record.
    fn create_slide(
        &self,
        slide: &NewSlide,
    ) -> impl std::future::Future<Output = Result<Slide, StoreError>> + Send;

    /// Write an auto-save. Returns [`StoreError::Stale`] when a newer
    /// revision is already stored.
    fn update_slide(
        &self,
        slide_id: DbId,
        changes: &SlideChanges,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// Delete a slide. Deleting a slide that is already gone succeeds.
    fn delete_slide(
        &self,
        slide_id: DbId,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;
}
