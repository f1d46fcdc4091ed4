pub mod auth;
pub mod document;
pub mod editor;
pub mod project;
pub mod slide;
pub mod template;
