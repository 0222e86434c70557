//! Handlers for the `/projects` resource.
//!
//! Every route is scoped to the authenticated caller. Writes follow the same
//! shape: load the target (404), authorize against the ownership policy
//! (403), validate the form (422), write, then redirect to the listing.
//! Update bodies are taken as raw bytes and parsed only after the policy
//! check.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::Json;
use projectdesk_core::error::CoreError;
use projectdesk_core::policy::{Ability, ProjectPolicy};
use projectdesk_core::project::ProjectForm;
use projectdesk_core::types::DbId;
use projectdesk_db::models::project::{CreateProject, Project, UpdateProject};
use projectdesk_db::repositories::ProjectRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::json_body;
use crate::middleware::auth::AuthUser;
use crate::response::{DataResponse, Redirect};
use crate::state::AppState;

/// Where successful writes send the client.
pub const PROJECTS_PATH: &str = "/api/v1/projects";

pub const CREATED_MESSAGE: &str = "Project created successfully.";
pub const UPDATED_MESSAGE: &str = "Project updated successfully.";
pub const DELETED_MESSAGE: &str = "Project deleted successfully.";

/// GET /api/v1/projects
///
/// The caller's projects, newest first.
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Project>>>> {
    let projects = ProjectRepo::list_by_owner(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse { data: projects }))
}

/// POST /api/v1/projects
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    body: Bytes,
) -> AppResult<Redirect> {
    let input = ProjectForm::validate_json(&json_body(&body)?)?;
    let project = ProjectRepo::create(&state.pool, &CreateProject::new(user.user_id, input)).await?;

    tracing::info!(user_id = user.user_id, project_id = project.id, "Project created");
    Ok(Redirect::see_other(PROJECTS_PATH, CREATED_MESSAGE))
}

/// PUT /api/v1/projects/{id}
///
/// Full replace of name, description and status.
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    body: Bytes,
) -> AppResult<Redirect> {
    let project = load_authorized(&state, user, id, Ability::Update).await?;
    let input = ProjectForm::validate_json(&json_body(&body)?)?;

    ProjectRepo::update(&state.pool, project.id, &UpdateProject::from(input))
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(user_id = user.user_id, project_id = id, "Project updated");
    Ok(Redirect::see_other(PROJECTS_PATH, UPDATED_MESSAGE))
}

/// DELETE /api/v1/projects/{id}
///
/// Hard delete; the row is gone afterwards.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Redirect> {
    let project = load_authorized(&state, user, id, Ability::Delete).await?;

    if !ProjectRepo::delete(&state.pool, project.id).await? {
        return Err(not_found(id));
    }

    tracing::info!(user_id = user.user_id, project_id = id, "Project deleted");
    Ok(Redirect::see_other(PROJECTS_PATH, DELETED_MESSAGE))
}

/// Fetch project `id` and check that `user` may perform `ability` on it.
async fn load_authorized(
    state: &AppState,
    user: AuthUser,
    id: DbId,
    ability: Ability,
) -> AppResult<Project> {
    let project = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    if let Err(err) = ProjectPolicy::authorize(user.user_id, &project, ability) {
        tracing::warn!(
            user_id = user.user_id,
            project_id = id,
            ability = ability.as_str(),
            "Project access denied"
        );
        return Err(err.into());
    }

    Ok(project)
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Project",
        id,
    })
}
