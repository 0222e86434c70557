//! Project status values and the create/update form.
//!
//! The same [`ProjectForm`] is submitted for create and update; update is a
//! full replace, so every field is re-validated on each write.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;
use validator::Validate;

use crate::error::CoreError;
use crate::validation::FieldErrors;

/// Maximum length of a project name, in characters.
pub const NAME_MAX_CHARS: usize = 255;

pub const NAME_REQUIRED: &str = "The name field is required.";
pub const NAME_TOO_LONG: &str = "The name field must not be greater than 255 characters.";
pub const STATUS_REQUIRED: &str = "The status field is required.";
pub const STATUS_INVALID: &str = "The selected status is invalid.";
pub const NAME_NOT_STRING: &str = "The name field must be a string.";
pub const DESCRIPTION_NOT_STRING: &str = "The description field must be a string.";

/// Project lifecycle status. Stored and transmitted as lowercase text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum ProjectStatus {
    Active,
    Completed,
    Archived,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 3] = [Self::Active, Self::Completed, Self::Archived];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Archived => "archived",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A status string that is not one of [`ProjectStatus::ALL`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown project status '{0}'")]
pub struct UnknownStatus(pub String);

impl FromStr for ProjectStatus {
    type Err = UnknownStatus;

    /// Exact, case-sensitive match against the lowercase names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

impl TryFrom<String> for ProjectStatus {
    type Error = UnknownStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Raw create/update input as submitted by the client.
///
/// Every field is optional at the type level so that missing or mistyped
/// values surface as field errors instead of a body-parsing failure. Any
/// owner field in the request body is ignored: ownership comes from the
/// authenticated caller only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, TS)]
#[ts(export)]
pub struct ProjectForm {
    #[validate(
        required(message = "The name field is required."),
        length(max = 255, message = "The name field must not be greater than 255 characters.")
    )]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(required(message = "The status field is required."))]
    pub status: Option<String>,
}

/// Input that passed validation and is ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidProject {
    pub name: String,
    pub description: Option<String>,
    pub status: ProjectStatus,
}

impl ProjectForm {
    pub fn new(name: &str, description: Option<&str>, status: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            description: description.map(str::to_string),
            status: Some(status.to_string()),
        }
    }

    /// Validate the form, collecting every field error before failing.
    ///
    /// Strings are trimmed first and blank strings count as absent, so
    /// `"   "` fails `required` and a blank description is stored as NULL.
    pub fn into_valid(self) -> Result<ValidProject, CoreError> {
        let form = self.normalized();

        let mut errors = match form.validate() {
            Ok(()) => FieldErrors::new(),
            Err(e) => FieldErrors::from(e),
        };

        let status = match form.status.as_deref().map(str::parse::<ProjectStatus>) {
            Some(Ok(status)) => Some(status),
            Some(Err(_)) => {
                errors.add("status", STATUS_INVALID);
                None
            }
            None => None,
        };

        match (form.name, status) {
            (Some(name), Some(status)) if errors.is_empty() => Ok(ValidProject {
                name,
                description: form.description,
                status,
            }),
            _ => Err(CoreError::Validation(errors)),
        }
    }

    /// Validate an untyped JSON body.
    ///
    /// A field holding the wrong JSON type is a field error like any other,
    /// so `{"status": 5}` reports under `status` instead of failing to parse.
    /// Missing fields and `null` count as absent. Non-object bodies have no
    /// fields at all.
    pub fn validate_json(body: &Value) -> Result<ValidProject, CoreError> {
        let mut type_errors = FieldErrors::new();
        let form = Self {
            name: string_field(body, "name", NAME_NOT_STRING, &mut type_errors),
            description: string_field(body, "description", DESCRIPTION_NOT_STRING, &mut type_errors),
            status: string_field(body, "status", STATUS_INVALID, &mut type_errors),
        };

        match form.into_valid() {
            Ok(valid) if type_errors.is_empty() => Ok(valid),
            Ok(_) => Err(CoreError::Validation(type_errors)),
            Err(CoreError::Validation(mut errors)) => {
                errors.replace(type_errors);
                Err(CoreError::Validation(errors))
            }
            Err(other) => Err(other),
        }
    }

    fn normalized(self) -> Self {
        Self {
            name: blank_to_none(self.name),
            description: blank_to_none(self.description),
            status: blank_to_none(self.status),
        }
    }
}

fn string_field(
    body: &Value,
    field: &str,
    mismatch: &str,
    errors: &mut FieldErrors,
) -> Option<String> {
    match body.get(field) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            errors.add(field, mismatch);
            None
        }
    }
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
