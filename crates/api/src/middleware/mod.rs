//! Request extractors.
//!
//! - [`auth::AuthUser`] -- the authenticated owner taken from a JWT Bearer token.

pub mod auth;
