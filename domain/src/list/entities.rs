//! List entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A shared movie list (Entity)
///
/// Every list carries a share code that other users can redeem to join it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieList {
    pub id: String,
    pub name: String,
    pub share_code: String,
    pub created_at: DateTime<Utc>,
}
