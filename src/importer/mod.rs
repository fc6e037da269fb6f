use crate::error::ImportError;
use crate::exporter::ENTRY_NAME;
use crate::ui::{Flow, Position};
use crate::workflow::{Template, TemplateBody, WorkflowDocument};
use log::info;

mod builder;
pub mod layout;

pub use builder::IdStrategy;
pub use layout::{LayoutConfig, Size};

use builder::GraphBuilder;

/// Rebuilds a canvas graph from a workflow document.
#[derive(Debug, Clone, Default)]
pub struct Importer {
    layout: LayoutConfig,
    id_strategy: IdStrategy,
}

#[derive(Debug, Default)]
pub struct ImporterBuilder {
    layout: LayoutConfig,
    id_strategy: IdStrategy,
}

impl ImporterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_id_strategy(mut self, id_strategy: IdStrategy) -> Self {
        self.id_strategy = id_strategy;
        self
    }

    pub fn build(self) -> Importer {
        Importer {
            layout: self.layout,
            id_strategy: self.id_strategy,
        }
    }
}

impl Importer {
    pub fn builder() -> ImporterBuilder {
        ImporterBuilder::new()
    }

    pub fn import(&self, yaml: &str) -> Result<Flow, ImportError> {
        let document = WorkflowDocument::from_yaml(yaml)?;
        self.import_document(&document)
    }

    /// Instantiates the entry template and everything it references.
    ///
    /// A `Serial` entry named `entry` without a deadline is the wrapper the
    /// exporter generates; its children become top-level nodes connected in
    /// order instead of being boxed in a group.
    pub fn import_document(&self, document: &WorkflowDocument) -> Result<Flow, ImportError> {
        let templates = &document.spec.templates;
        let mut builder = GraphBuilder::new(templates, &self.layout, self.id_strategy);
        let entry = builder.lookup(&document.spec.entry, "spec.entry")?;

        match synthetic_entry_children(entry) {
            Some(children) => builder.add_top_level_sequence(children, ENTRY_NAME)?,
            None => {
                builder.instantiate(entry, Position::default(), None)?;
            }
        }

        let flow = builder.finish();
        info!(
            "Imported workflow with {} nodes and {} edges from entry '{}'",
            flow.nodes.len(),
            flow.edges.len(),
            document.spec.entry
        );
        Ok(flow)
    }
}

fn synthetic_entry_children(entry: &Template) -> Option<&[String]> {
    match &entry.body {
        TemplateBody::Serial { children } if entry.name == ENTRY_NAME && entry.deadline.is_none() => {
            Some(children)
        }
        _ => None,
    }
}

/// Parses a workflow YAML document into canvas nodes, edges and their store.
pub fn workflow_to_flow(yaml: &str) -> Result<Flow, ImportError> {
    Importer::default().import(yaml)
}
