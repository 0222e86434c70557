//! State of the projects index page in the browser client.
//!
//! [`ProjectsPage`] holds presentation state only: which modal is open, what
//! the user has typed, a delete awaiting confirmation, and transient toasts.
//! It never touches persistence. The page emits [`PageRequest`]s for the
//! transport to send and consumes [`WriteOutcome`]s built from the responses.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::project::{ProjectForm, ProjectStatus};
use crate::types::DbId;
use crate::validation::FieldErrors;

pub const EMPTY_MESSAGE: &str = "No projects yet. Create one!";
pub const DELETE_CONFIRMATION: &str = "Are you sure you want to delete this project?";

const GENERIC_SAVE_ERROR: &str = "There was an error saving the project.";
const GENERIC_DELETE_ERROR: &str = "There was an error deleting the project.";

/// One project as rendered in the list. Deserializes from the API's project JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectCard {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub status: ProjectStatus,
}

impl ProjectCard {
    fn to_form(&self) -> ProjectForm {
        ProjectForm::new(&self.name, self.description.as_deref(), self.status.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(ProjectCard),
}

/// The create/edit modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormModal {
    pub mode: FormMode,
    pub values: ProjectForm,
    pub errors: FieldErrors,
    pub processing: bool,
}

impl FormModal {
    pub fn title(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "Create Project",
            FormMode::Edit(_) => "Edit Project",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "Create Project",
            FormMode::Edit(_) => "Update Project",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastVariant {
    Default,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub title: String,
    pub description: String,
    pub variant: ToastVariant,
}

impl Toast {
    fn info(title: &str, description: impl Into<String>) -> Self {
        Self {
            title: title.to_string(),
            description: description.into(),
            variant: ToastVariant::Default,
        }
    }

    fn error(title: &str, description: impl Into<String>) -> Self {
        Self {
            title: title.to_string(),
            description: description.into(),
            variant: ToastVariant::Destructive,
        }
    }
}

/// A request the page wants sent to the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageRequest {
    Create(ProjectForm),
    Update { id: DbId, form: ProjectForm },
    Delete { id: DbId },
}

/// What came back from a create, update or delete request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The server redirected back to the listing.
    Redirected,
    /// The server rejected one or more fields.
    Invalid(FieldErrors),
    /// Anything else. Carries the server's `error` text when there was one.
    Failed { message: Option<String> },
}

impl WriteOutcome {
    /// Interpret an API response by status code and JSON body.
    pub fn from_http(status: u16, body: &Value) -> Self {
        if (200..400).contains(&status) {
            return Self::Redirected;
        }

        if status == 422 {
            if let Some(errors) = body
                .get("errors")
                .cloned()
                .and_then(|v| serde_json::from_value::<FieldErrors>(v).ok())
                .filter(|e| !e.is_empty())
            {
                return Self::Invalid(errors);
            }
        }

        Self::Failed {
            message: body.get("error").and_then(Value::as_str).map(str::to_string),
        }
    }
}

#[derive(Deserialize)]
struct Listing {
    data: Vec<ProjectCard>,
}

#[derive(Debug, Clone, Default)]
pub struct ProjectsPage {
    projects: Vec<ProjectCard>,
    modal: Option<FormModal>,
    pending_delete: Option<ProjectCard>,
    deleting: Option<ProjectCard>,
    toasts: VecDeque<Toast>,
}

impl ProjectsPage {
    pub fn new(projects: Vec<ProjectCard>) -> Self {
        Self {
            projects,
            ..Self::default()
        }
    }

    /// Build the page from a `GET /projects` body (`{"data": [...]}`).
    pub fn from_listing(body: &Value) -> Result<Self, serde_json::Error> {
        let listing: Listing = serde_json::from_value(body.clone())?;
        Ok(Self::new(listing.data))
    }

    /// Replace the rendered project set, e.g. after following a redirect.
    pub fn refresh(&mut self, projects: Vec<ProjectCard>) {
        self.projects = projects;
    }

    pub fn projects(&self) -> &[ProjectCard] {
        &self.projects
    }

    /// Text shown instead of the list when there is nothing to render.
    pub fn empty_message(&self) -> Option<&'static str> {
        self.projects.is_empty().then_some(EMPTY_MESSAGE)
    }

    pub fn modal(&self) -> Option<&FormModal> {
        self.modal.as_ref()
    }

    pub fn toasts(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    pub fn pending_delete(&self) -> Option<&ProjectCard> {
        self.pending_delete.as_ref()
    }

    pub fn is_deleting(&self) -> bool {
        self.deleting.is_some()
    }

    // ----- create / edit -----

    pub fn open_create(&mut self) {
        self.modal = Some(FormModal {
            mode: FormMode::Create,
            values: ProjectForm {
                status: Some(ProjectStatus::Active.as_str().to_string()),
                ..ProjectForm::default()
            },
            errors: FieldErrors::new(),
            processing: false,
        });
    }

    /// Open the modal pre-filled with project `id`. Returns `false` if it is not listed.
    pub fn open_edit(&mut self, id: DbId) -> bool {
        let Some(card) = self.find(id).cloned() else {
            return false;
        };
        self.modal = Some(FormModal {
            values: card.to_form(),
            mode: FormMode::Edit(card),
            errors: FieldErrors::new(),
            processing: false,
        });
        true
    }

    pub fn cancel_form(&mut self) {
        self.modal = None;
    }

    /// Mutable access to the entered values while the modal is open.
    pub fn form_mut(&mut self) -> Option<&mut ProjectForm> {
        self.modal.as_mut().map(|m| &mut m.values)
    }

    /// Start submitting the open form. `None` if no modal is open or a
    /// submission is already in flight.
    pub fn submit(&mut self) -> Option<PageRequest> {
        let modal = self.modal.as_mut().filter(|m| !m.processing)?;
        modal.processing = true;
        let form = modal.values.clone();
        Some(match &modal.mode {
            FormMode::Create => PageRequest::Create(form),
            FormMode::Edit(card) => PageRequest::Update { id: card.id, form },
        })
    }

    pub fn finish_submit(&mut self, outcome: WriteOutcome) {
        let Some(modal) = self.modal.as_mut() else {
            return;
        };
        match outcome {
            WriteOutcome::Redirected => {
                let toast = match &modal.mode {
                    FormMode::Create => Toast::info(
                        "Project created",
                        "A new project has been created successfully.",
                    ),
                    FormMode::Edit(card) => Toast::info(
                        "Project updated",
                        format!("The project \"{}\" has been updated.", card.name),
                    ),
                };
                self.modal = None;
                self.toasts.push_back(toast);
            }
            WriteOutcome::Invalid(errors) => {
                modal.errors = errors;
                modal.processing = false;
            }
            WriteOutcome::Failed { message } => {
                modal.processing = false;
                self.toasts.push_back(Toast::error(
                    "Could not save project",
                    message.unwrap_or_else(|| GENERIC_SAVE_ERROR.to_string()),
                ));
            }
        }
    }

    // ----- delete -----

    /// Stage a delete and return the confirmation prompt to show.
    pub fn request_delete(&mut self, id: DbId) -> Option<&'static str> {
        let card = self.find(id).cloned()?;
        self.pending_delete = Some(card);
        Some(DELETE_CONFIRMATION)
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// The user confirmed. Only now is a delete request produced.
    pub fn confirm_delete(&mut self) -> Option<PageRequest> {
        if self.deleting.is_some() {
            return None;
        }
        let card = self.pending_delete.take()?;
        let id = card.id;
        self.deleting = Some(card);
        Some(PageRequest::Delete { id })
    }

    pub fn finish_delete(&mut self, outcome: WriteOutcome) {
        let Some(card) = self.deleting.take() else {
            return;
        };
        let toast = match outcome {
            WriteOutcome::Redirected => {
                self.projects.retain(|p| p.id != card.id);
                Toast::info(
                    "Project deleted",
                    format!("The project \"{}\" has been deleted successfully.", card.name),
                )
            }
            WriteOutcome::Failed {
                message: Some(message),
            } => Toast::error("Error deleting", message),
            WriteOutcome::Failed { message: None } | WriteOutcome::Invalid(_) => {
                Toast::error("Error deleting", GENERIC_DELETE_ERROR)
            }
        };
        self.toasts.push_back(toast);
    }

    /// Drop the oldest toast.
    pub fn dismiss_toast(&mut self) -> Option<Toast> {
        self.toasts.pop_front()
    }

    fn find(&self, id: DbId) -> Option<&ProjectCard> {
        self.projects.iter().find(|p| p.id == id)
    }
}
