use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::User;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RelationshipStatus {
    Pending,
    Approved,
    Denied,
}

impl RelationshipStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationshipStatus::Pending => "PENDING",
            RelationshipStatus::Approved => "APPROVED",
            RelationshipStatus::Denied => "DENIED",
        }
    }
}

/// A follow edge between two users.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRelationship {
    pub id: i64,
    pub follower: User,
    pub followed: User,
    // list endpoints omit it, the listing itself implies the status
    #[serde(default)]
    pub status: Option<RelationshipStatus>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Answer to a pending follow request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FollowAction {
    Approve,
    Deny,
}
