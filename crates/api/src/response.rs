//! Shared response envelope types for API handlers.
//!
//! Entity endpoints return the entity itself; computed results (formatter,
//! suggestions, readability) are wrapped in a `{ "data": ... }` envelope.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
