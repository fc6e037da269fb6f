//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types from the chaosflow crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use chaosflow::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let yaml = std::fs::read_to_string("path/to/workflow.yaml")?;
//! let document = WorkflowDocument::from_yaml(&yaml)?;
//! if let Err(problems) = document.validate() {
//!     for problem in problems {
//!         eprintln!("{}", problem);
//!     }
//! }
//!
//! let flow = Importer::default().import_document(&document)?;
//! let round_trip = Exporter::builder(&flow.nodes, &flow.edges, &flow.store)
//!     .with_metadata(document.metadata.clone())
//!     .build()
//!     .export_yaml()?;
//! println!("{}", round_trip);
//! # Ok(())
//! # }
//! ```

// Conversion entry points
pub use crate::exporter::{Exporter, flow_to_workflow};
pub use crate::importer::{IdStrategy, Importer, LayoutConfig, workflow_to_flow};
pub use crate::validate::validate_workflow;

// Single node codec
pub use crate::codec::{node_experiment_to_template, template_to_node_experiment};

// Document and canvas types
pub use crate::ui::{Flow, FlowEdge, FlowNode, NodeData, NodeType, Position};
pub use crate::workflow::{
    ExperimentKind, Metadata, NodeExperiment, Store, Template, TemplateBody, TemplateType,
    WorkflowDocument,
};

// Error types
pub use crate::error::{CodecError, ExportError, ImportError, TemplateError, ValidationError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
