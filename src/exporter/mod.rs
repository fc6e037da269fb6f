use crate::error::ExportError;
use crate::ui::{FlowEdge, FlowNode};
use crate::workflow::{Metadata, Store, Template, WorkflowDocument};
use log::info;

mod flatten;
mod prune;

use flatten::{GraphFlattener, LeveledTemplate};

/// Name of the `Serial` template generated when the top level needs a wrapper.
pub const ENTRY_NAME: &str = "entry";

/// Turns a canvas graph and its store into a workflow document.
pub struct Exporter<'a> {
    nodes: &'a [FlowNode],
    edges: &'a [FlowEdge],
    store: &'a Store,
    metadata: Metadata,
}

pub struct ExporterBuilder<'a> {
    nodes: &'a [FlowNode],
    edges: &'a [FlowEdge],
    store: &'a Store,
    metadata: Metadata,
}

impl<'a> ExporterBuilder<'a> {
    pub fn new(nodes: &'a [FlowNode], edges: &'a [FlowEdge], store: &'a Store) -> Self {
        Self {
            nodes,
            edges,
            store,
            metadata: Metadata::default(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.metadata.name = Some(name.into());
        self
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.metadata.namespace = Some(namespace.into());
        self
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn build(self) -> Exporter<'a> {
        Exporter {
            nodes: self.nodes,
            edges: self.edges,
            store: self.store,
            metadata: self.metadata,
        }
    }
}

impl<'a> Exporter<'a> {
    pub fn builder(nodes: &'a [FlowNode], edges: &'a [FlowEdge], store: &'a Store) -> ExporterBuilder<'a> {
        ExporterBuilder::new(nodes, edges, store)
    }

    /// The unique top-level node without incoming edges.
    pub fn find_root(&self) -> Result<&'a FlowNode, ExportError> {
        GraphFlattener::new(self.nodes, self.edges, self.store).find_root()
    }

    pub fn export(&self) -> Result<WorkflowDocument, ExportError> {
        let leveled = GraphFlattener::new(self.nodes, self.edges, self.store).flatten()?;
        let (entry, templates) = resolve_entry(leveled)?;

        info!(
            "Exported workflow with {} templates, entry '{}'",
            templates.len(),
            entry
        );
        Ok(WorkflowDocument::new(self.metadata.clone(), entry, templates))
    }

    pub fn export_yaml(&self) -> Result<String, ExportError> {
        to_yaml(&self.export()?)
    }
}

/// Flattens `nodes`/`edges` into a workflow document and renders it as YAML.
pub fn flow_to_workflow(nodes: &[FlowNode], edges: &[FlowEdge], store: &Store) -> Result<String, ExportError> {
    Exporter::builder(nodes, edges, store).build().export_yaml()
}

/// Renders a document as YAML, leaving out empty values.
pub fn to_yaml(document: &WorkflowDocument) -> Result<String, ExportError> {
    let value = serde_json::to_value(document).map_err(|e| ExportError::Serialize(e.to_string()))?;
    let pruned = prune::prune(value).unwrap_or_default();
    serde_yaml::to_string(&pruned).map_err(|e| ExportError::Serialize(e.to_string()))
}

/// Picks the entry template, generating a `Serial` wrapper unless the top
/// level is already a single group.
fn resolve_entry(leveled: Vec<LeveledTemplate>) -> Result<(String, Vec<Template>), ExportError> {
    let top_level: Vec<&Template> = leveled
        .iter()
        .filter(|t| t.level == 0)
        .map(|t| &t.template)
        .collect();

    if let [single] = top_level.as_slice() {
        if single.is_group() {
            let entry = single.name.clone();
            return Ok((entry, leveled.into_iter().map(|t| t.template).collect()));
        }
    }

    if leveled.iter().any(|t| t.template.name == ENTRY_NAME) {
        return Err(ExportError::ReservedTemplateName(ENTRY_NAME.to_string()));
    }

    let entry = Template::serial(
        ENTRY_NAME,
        top_level.iter().map(|t| t.name.clone()).collect(),
    );
    let templates = std::iter::once(entry)
        .chain(leveled.into_iter().map(|t| t.template))
        .collect();
    Ok((ENTRY_NAME.to_string(), templates))
}
