mod auth;
mod room;

pub use auth::*;
pub use room::*;

use serde::{Deserialize, Serialize};

/// Body of every failed request.
#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Always `false`
    pub ok: bool,
    /// Human readable reason
    pub error: String,
    /// Correlation id of the server log entry, present on internal failures
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_id: Option<String>,
}
