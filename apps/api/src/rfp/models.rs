use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;

/// The five required form fields that drive both section prompts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RfpInputs {
    pub project_name: String,
    pub scope_text: String,
    pub duration: String,
    pub department: String,
    pub criteria_text: String,
}

impl RfpInputs {
    /// Names of required fields that are empty after trimming, in form order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("project_name", &self.project_name),
            ("scope_text", &self.scope_text),
            ("duration", &self.duration),
            ("department", &self.department),
            ("criteria_text", &self.criteria_text),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    pub fn validate(&self) -> Result<(), AppError> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(format!(
                "Please fill in all required fields: {}",
                missing.join(", ")
            )))
        }
    }
}

/// Generated drafts returned to the client for editing.
#[derive(Debug, Clone, Serialize)]
pub struct RfpDraft {
    pub draft_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub project_name: String,
    pub scope_of_work: String,
    pub criteria: String,
    /// The assembled Markdown document, ready for export as-is.
    pub markdown: String,
}

/// Body of the preview and export endpoints: the (possibly edited) drafts.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportRequest {
    pub project_name: String,
    #[serde(default)]
    pub scope_of_work: String,
    #[serde(default)]
    pub criteria: String,
}

impl ExportRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.project_name.trim().is_empty() {
            return Err(AppError::Validation(
                "project_name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}
