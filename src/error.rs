use thiserror::Error;

/// Errors raised while reading or writing a single workflow template.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TemplateError {
    #[error("Unknown template type: '{0}'")]
    UnknownTemplateType(String),

    #[error("Template '{template}' of type {template_type} must not contain field '{field}'")]
    UnexpectedField {
        template: String,
        template_type: String,
        field: String,
    },

    #[error("Template '{template}' is missing required field '{field}'")]
    MissingField { template: String, field: String },

    #[error("Template '{template}' has an invalid value for '{field}': {message}")]
    InvalidField {
        template: String,
        field: String,
        message: String,
    },
}

/// Errors that can occur when converting between a node's form values and a template.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CodecError {
    #[error("Template type '{template_type}' has no experiment field mapping")]
    UnmappedKind { template_type: String },

    #[error("Node '{name}' has an invalid value for '{field}': {message}")]
    InvalidField {
        name: String,
        field: String,
        message: String,
    },

    #[error("Node '{name}' cannot be converted: {message}")]
    InvalidNodeExperiment { name: String, message: String },
}

/// Errors that can occur while flattening a canvas graph into a workflow document.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExportError {
    #[error("No root node found: every top-level node has an incoming edge")]
    NoRootNode,

    #[error("Multiple root nodes found: {}", .node_ids.join(", "))]
    MultipleRootNodes { node_ids: Vec<String> },

    #[error(
        "Node '{missing_node_id}' not found, which is required by a connection from node '{source_node_id}'"
    )]
    NodeNotFound {
        missing_node_id: String,
        source_node_id: String,
    },

    #[error("Node '{node_id}' has no payload in the store")]
    MissingPayload { node_id: String },

    #[error("Template name '{0}' is reserved for the generated entry")]
    ReservedTemplateName(String),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error("Failed to serialize workflow: {0}")]
    Serialize(String),
}

/// Errors that can occur while rebuilding a canvas graph from a workflow document.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ImportError {
    #[error("Failed to parse workflow YAML: {0}")]
    Yaml(String),

    #[error("Expected a document of kind 'Workflow', found '{0}'")]
    UnexpectedDocumentKind(String),

    #[error("Template '{name}' not found, which is referenced by '{referenced_by}'")]
    TemplateNotFound { name: String, referenced_by: String },

    #[error("Template '{name}' contains itself")]
    CyclicTemplate { name: String },
}

/// A single structural problem found in a workflow document.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("spec.entry: the entry of workflow is required")]
    EntryRequired,

    #[error("spec.entry: can not find a template with name {0}")]
    EntryNotFound(String),

    #[error("spec.templates: templates in workflow could not be empty")]
    NoTemplates,

    #[error("spec.templates: template name must be unique, duplicated names: [{}]", .names.join(" "))]
    DuplicateTemplateNames { names: Vec<String> },

    #[error("spec.templates[{index}].name: '{name}' must be a DNS-1123 subdomain: {message}")]
    InvalidTemplateName {
        index: usize,
        name: String,
        message: String,
    },

    #[error("spec.templates[{index}].deadline: deadline in template with type Suspend could not be empty")]
    SuspendWithoutDeadline { index: usize },

    #[error("spec.templates[{index}].children[{child_index}]: can not find a template with name {name}")]
    ChildNotFound {
        index: usize,
        child_index: usize,
        name: String,
    },

    #[error(
        "spec.templates[{index}]: should not define duration in chaos when using Workflow, use Template#Deadline instead"
    )]
    DurationInChaos { index: usize },
}
