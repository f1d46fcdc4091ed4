//! Editor driver for carousel projects.
//!
//! [`driver::Editor`] owns an [`carousel_core::editor::EditorState`] and
//! executes the persistence requests its transitions produce against a
//! [`store::SlideStore`]. Slide creation is awaited; content saves and
//! deletions run in the background and only log their failures.

pub mod config;
pub mod driver;
pub mod http;
pub mod store;
