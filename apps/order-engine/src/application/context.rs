//! Request Context
//!
//! The caller identity passed explicitly to every order operation.

use serde::{Deserialize, Serialize};

use crate::domain::shared::UserId;

/// Caller role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular platform user; may only act on their own orders.
    #[default]
    User,
    /// Back-office operator; may act on any order.
    Admin,
}

/// Authenticated caller of an order operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestContext {
    /// Caller's user id.
    pub user_id: UserId,
    /// Caller's role; defaults to `user`.
    #[serde(default)]
    pub role: Role,
}

impl RequestContext {
    /// Context for a regular user.
    #[must_use]
    pub fn user(user_id: impl Into<UserId>) -> Self {
        Self {
            user_id: user_id.into(),
            role: Role::User,
        }
    }

    /// Context for an administrator.
    #[must_use]
    pub fn admin(user_id: impl Into<UserId>) -> Self {
        Self {
            user_id: user_id.into(),
            role: Role::Admin,
        }
    }

    /// Returns true for administrators.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Returns true if the caller may act on resources owned by `owner`.
    #[must_use]
    pub fn can_access(&self, owner: &UserId) -> bool {
        self.is_admin() || &self.user_id == owner
    }
}
