//! Request context carrying the authenticated caller.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use linguahub_entity::user::UserRef;

/// Context for the current authenticated request.
///
/// Extracted at the API boundary from the upstream identity provider and
/// passed into service methods so that every operation knows *who* is
/// acting. The profile is resolved fresh per request, so room addressing
/// always follows the caller's current learning language.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// The authenticated caller's profile.
    pub user: UserRef,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user: UserRef) -> Self {
        Self {
            user,
            request_time: Utc::now(),
        }
    }

    /// The caller's user ID.
    pub fn user_id(&self) -> Uuid {
        self.user.id
    }
}
