//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Methods on user-owned data
//! take the caller's `user_id` and treat rows owned by someone else as absent.

pub mod document_repo;
pub mod project_repo;
pub mod session_repo;
pub mod slide_repo;
pub mod template_repo;
pub mod user_repo;

pub use document_repo::DocumentRepo;
pub use project_repo::ProjectRepo;
pub use session_repo::SessionRepo;
pub use slide_repo::SlideRepo;
pub use template_repo::TemplateRepo;
pub use user_repo::UserRepo;
