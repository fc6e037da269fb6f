//! # Chaosflow - Workflow Graph ⇄ Document Conversion
//!
//! **Chaosflow** converts chaos-engineering workflows between the two shapes they
//! live in: the visual canvas (positioned nodes, group boxes and edges, plus a
//! store holding each node's form values) and the declarative `Workflow` YAML
//! document consumed by the control plane.
//!
//! ## Core Workflow
//!
//! 1.  **Export**: Use `Exporter::builder` with the canvas nodes, edges and store.
//!     The graph is flattened from its root into a de-duplicated template list, an
//!     `entry` is chosen or generated, and empty values are pruned from the YAML.
//! 2.  **Import**: Use `Importer::builder` (or [`importer::workflow_to_flow`]) to
//!     rebuild nodes, edges and a store from a document, with a deterministic
//!     box-packing layout.
//! 3.  **Validate**: Call `WorkflowDocument::validate` before submitting a document.
//!
//! Single nodes are converted with [`codec::node_experiment_to_template`] and
//! [`codec::template_to_node_experiment`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chaosflow::prelude::*;
//! use serde_json::json;
//!
//! fn main() -> Result<()> {
//!     // A single pod-kill step on the canvas.
//!     let nodes = vec![FlowNode {
//!         id: "n1".to_string(),
//!         node_type: NodeType::Flow,
//!         position: Position::default(),
//!         data: NodeData { name: "kill-web".to_string(), ..Default::default() },
//!         parent_node: None,
//!     }];
//!     let mut store = Store::new();
//!     store.insert(
//!         "n1".to_string(),
//!         NodeExperiment::new("kill-web", TemplateType::Chaos(ExperimentKind::PodChaos))
//!             .with_deadline("1m")
//!             .with_param("action", json!("pod-kill"))
//!             .with_param("mode", json!("one")),
//!     );
//!
//!     let yaml = Exporter::builder(&nodes, &[], &store)
//!         .with_name("kill-web-workflow")
//!         .with_namespace("chaos-testing")
//!         .build()
//!         .export_yaml()?;
//!     println!("{}", yaml);
//!
//!     // And back onto a canvas.
//!     let flow = Importer::builder()
//!         .with_id_strategy(IdStrategy::Sequential)
//!         .build()
//!         .import(&yaml)?;
//!     println!("{} nodes, {} edges", flow.nodes.len(), flow.edges.len());
//!
//!     Ok(())
//! }
//! ```

pub mod codec;
pub mod error;
pub mod exporter;
pub mod importer;
pub mod prelude;
pub mod ui;
pub mod validate;
pub mod workflow;
