//! Ownership policy for projects.
//!
//! A project may be updated or deleted by its owner and nobody else. There
//! are no roles, delegation, or time-based conditions. Handlers call
//! [`ProjectPolicy::authorize`] before every mutating operation on an
//! existing project.

use crate::error::CoreError;
use crate::types::DbId;

/// Message returned to non-owners. Says nothing about who the owner is.
pub const FORBIDDEN_MESSAGE: &str = "This action is unauthorized.";

/// Mutations gated by the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ability {
    Update,
    Delete,
}

impl Ability {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

/// Anything that carries a single owning user.
pub trait Owned {
    fn owner_id(&self) -> DbId;
}

pub struct ProjectPolicy;

impl ProjectPolicy {
    /// `true` when `caller` may perform `ability` on `resource`.
    pub fn allows(caller: DbId, resource: &impl Owned, ability: Ability) -> bool {
        match ability {
            Ability::Update | Ability::Delete => caller == resource.owner_id(),
        }
    }

    /// Guard form of [`allows`](Self::allows).
    pub fn authorize(caller: DbId, resource: &impl Owned, ability: Ability) -> Result<(), CoreError> {
        if Self::allows(caller, resource, ability) {
            Ok(())
        } else {
            Err(CoreError::Forbidden(FORBIDDEN_MESSAGE.to_string()))
        }
    }
}
