//! Project entity model and DTOs.

use projectdesk_core::policy::Owned;
use projectdesk_core::project::{ProjectStatus, ValidProject};
use projectdesk_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;
use ts_rs::TS;

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize, TS)]
#[ts(export)]
pub struct Project {
    #[ts(type = "number")]
    pub id: DbId,
    #[ts(type = "number")]
    pub owner_id: DbId,
    pub name: String,
    pub description: Option<String>,
    #[sqlx(try_from = "String")]
    pub status: ProjectStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Owned for Project {
    fn owner_id(&self) -> DbId {
        self.owner_id
    }
}

/// DTO for inserting a project. `owner_id` always comes from the caller's
/// identity, never from request input.
#[derive(Debug, Clone)]
pub struct CreateProject {
    pub owner_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub status: ProjectStatus,
}

impl CreateProject {
    pub fn new(owner_id: DbId, input: ValidProject) -> Self {
        Self {
            owner_id,
            name: input.name,
            description: input.description,
            status: input.status,
        }
    }
}

/// DTO for a full replace of a project's editable fields.
///
/// Has no owner field: ownership is fixed at creation.
#[derive(Debug, Clone)]
pub struct UpdateProject {
    pub name: String,
    pub description: Option<String>,
    pub status: ProjectStatus,
}

impl From<ValidProject> for UpdateProject {
    fn from(input: ValidProject) -> Self {
        Self {
            name: input.name,
            description: input.description,
            status: input.status,
        }
    }
}
