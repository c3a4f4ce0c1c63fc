//! Authenticated administrator identity.

use serde::{Deserialize, Serialize};

use azur_core::{AdminId, Email};

/// The resolved identity of a logged-in administrator.
///
/// Minimal data embedded in the session token and echoed back by
/// `/auth/login` and `/auth/me`. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminIdentity {
    /// Administrator's database ID.
    pub id: AdminId,
    /// Administrator's email address.
    pub email: Email,
    /// Administrator's display name.
    pub name: String,
}
