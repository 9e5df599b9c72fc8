//! Wire types for the Cloudflare API
//!
//! Response envelopes and the records they carry. Timestamps are expected
//! in RFC 3339 form (`2014-01-01T05:20:00.12345Z`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Records
// ============================================================================

/// A Zero Trust user attached to an account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// User identifier
    pub id: Uuid,
    /// Parent (account-level) identifier
    pub uid: Uuid,
    /// Display name
    pub name: String,
    /// Email address
    pub email: String,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last update time
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Envelopes
// ============================================================================

/// Pagination metadata returned with every listing page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultInfo {
    /// Page number of this response
    #[serde(default)]
    pub page: u32,
    /// Page size used by the server
    #[serde(default)]
    pub per_page: u32,
    /// Number of records on this page
    #[serde(default)]
    pub count: u32,
    /// Number of records across all pages
    #[serde(default)]
    pub total_count: u32,
}

/// Response envelope of `GET /accounts/{id}/access/users`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsersPage {
    /// Whether the API reported success
    #[serde(default)]
    pub success: bool,
    /// Users on this page
    #[serde(default)]
    pub result: Vec<User>,
    /// Pagination metadata
    #[serde(default)]
    pub result_info: ResultInfo,
}
