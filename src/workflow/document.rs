use super::template::Template;
use crate::error::{ImportError, ValidationError};
use serde::{Deserialize, Serialize};

pub const API_VERSION: &str = "chaos-mesh.org/v1alpha1";
pub const WORKFLOW_KIND: &str = "Workflow";

/// The declarative `Workflow` document consumed by the control plane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowDocument {
    pub api_version: String,
    pub kind: String,
    #[serde(default)]
    pub metadata: Metadata,
    pub spec: WorkflowSpec,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowSpec {
    pub entry: String,
    #[serde(default)]
    pub templates: Vec<Template>,
}

impl WorkflowDocument {
    pub fn new(metadata: Metadata, entry: impl Into<String>, templates: Vec<Template>) -> Self {
        Self {
            api_version: API_VERSION.to_string(),
            kind: WORKFLOW_KIND.to_string(),
            metadata,
            spec: WorkflowSpec {
                entry: entry.into(),
                templates,
            },
        }
    }

    /// Parses a YAML (or JSON) document.
    pub fn from_yaml(source: &str) -> Result<Self, ImportError> {
        let document: WorkflowDocument =
            serde_yaml::from_str(source).map_err(|e| ImportError::Yaml(e.to_string()))?;
        if document.kind != WORKFLOW_KIND {
            return Err(ImportError::UnexpectedDocumentKind(document.kind));
        }
        Ok(document)
    }

    pub fn template(&self, name: &str) -> Option<&Template> {
        self.spec.templates.iter().find(|t| t.name == name)
    }

    /// Runs the structural checks of [`validate_workflow`](crate::validate::validate_workflow).
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let errors = crate::validate::validate_workflow(self);
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}
