//! Domain logic for the carousel editor.
//!
//! Everything in this crate is synchronous and free of I/O so it can be
//! shared by the HTTP server and the editor driver.

pub mod editor;
pub mod error;
pub mod formatter;
pub mod readability;
pub mod save;
pub mod slide;
pub mod suggestion;
pub mod text;
pub mod types;
