use crate::codec::node_experiment_to_template;
use crate::error::ExportError;
use crate::ui::graph::{children_of, incomers, outgoing_edges};
use crate::ui::{FlowEdge, FlowNode};
use crate::workflow::{NodeExperiment, Store, Template, TemplateBody};
use ahash::AHashSet;
use itertools::Itertools;
use log::{debug, trace};

/// A template together with its nesting depth in the canvas.
#[derive(Debug, Clone)]
pub(crate) struct LeveledTemplate {
    pub level: usize,
    pub template: Template,
}

/// Walks a canvas graph from its root and emits templates in visitation order.
pub(super) struct GraphFlattener<'a> {
    nodes: &'a [FlowNode],
    edges: &'a [FlowEdge],
    store: &'a Store,
    visited: AHashSet<&'a str>,
}

impl<'a> GraphFlattener<'a> {
    pub(super) fn new(nodes: &'a [FlowNode], edges: &'a [FlowEdge], store: &'a Store) -> Self {
        Self {
            nodes,
            edges,
            store,
            visited: AHashSet::new(),
        }
    }

    /// The only top-level node without incoming edges.
    pub(super) fn find_root(&self) -> Result<&'a FlowNode, ExportError> {
        let roots: Vec<&'a FlowNode> = self
            .nodes
            .iter()
            .filter(|n| n.parent_node.is_none() && incomers(n, self.nodes, self.edges).is_empty())
            .collect();

        match roots.as_slice() {
            [] => Err(ExportError::NoRootNode),
            [root] => Ok(*root),
            many => Err(ExportError::MultipleRootNodes {
                node_ids: many.iter().map(|n| n.id.clone()).collect(),
            }),
        }
    }

    /// Flattens the whole graph. Later templates with an already emitted name are dropped.
    pub(super) fn flatten(mut self) -> Result<Vec<LeveledTemplate>, ExportError> {
        let root = self.find_root()?;
        debug!("Flattening workflow graph from root '{}'", root.id);

        let mut templates = Vec::new();
        self.gen_templates(root, 0, &mut templates)?;

        Ok(templates
            .into_iter()
            .unique_by(|t| t.template.name.clone())
            .collect())
    }

    fn gen_templates(
        &mut self,
        node: &'a FlowNode,
        level: usize,
        out: &mut Vec<LeveledTemplate>,
    ) -> Result<(), ExportError> {
        if !self.visited.insert(node.id.as_str()) {
            trace!("Node '{}' already visited", node.id);
            return Ok(());
        }

        let payload = self.payload(node)?;
        let mut template = node_experiment_to_template(payload)?;

        if template.is_group() {
            let children = self.ordered_children(node);
            let names = children
                .iter()
                .map(|child| self.payload(child).map(|p| p.name.clone()))
                .collect::<Result<Vec<_>, _>>()?;
            if let TemplateBody::Serial { children } | TemplateBody::Parallel { children } =
                &mut template.body
            {
                *children = names;
            }

            debug!("Level {}: group '{}' {:?}", level, template.name, template.children());
            out.push(LeveledTemplate { level, template });
            for child in children {
                self.gen_templates(child, level + 1, out)?;
            }
        } else {
            debug!("Level {}: step '{}' ({})", level, template.name, template.template_type());
            out.push(LeveledTemplate { level, template });
        }

        let edges = self.edges;
        for edge in outgoing_edges(&node.id, edges) {
            let next = self.find_node(&edge.target, &node.id)?;
            self.gen_templates(next, level, out)?;
        }
        Ok(())
    }

    /// Children of a group in execution order: node order, except that a child
    /// reached through a sibling edge follows its predecessor.
    fn ordered_children(&self, parent: &FlowNode) -> Vec<&'a FlowNode> {
        let children = children_of(&parent.id, self.nodes);
        let sibling_ids: AHashSet<&str> = children.iter().map(|c| c.id.as_str()).collect();
        let has_sibling_incomer = |child: &FlowNode| {
            self.edges
                .iter()
                .any(|e| e.target == child.id && sibling_ids.contains(e.source.as_str()))
        };

        let mut ordered = Vec::with_capacity(children.len());
        let mut placed: AHashSet<&str> = AHashSet::new();
        for head in children.iter().copied().filter(|c| !has_sibling_incomer(*c)) {
            let mut current = Some(head);
            while let Some(child) = current {
                if !placed.insert(child.id.as_str()) {
                    break;
                }
                ordered.push(child);
                current = outgoing_edges(&child.id, self.edges)
                    .find_map(|e| children.iter().find(|c| c.id == e.target))
                    .copied();
            }
        }
        // Siblings only reachable through a cycle keep node order.
        for child in children.iter().copied() {
            if placed.insert(child.id.as_str()) {
                ordered.push(child);
            }
        }
        ordered
    }

    fn payload(&self, node: &FlowNode) -> Result<&'a NodeExperiment, ExportError> {
        self.store
            .get(&node.id)
            .or_else(|| self.store.get(&node.data.name))
            .ok_or_else(|| ExportError::MissingPayload {
                node_id: node.id.clone(),
            })
    }

    fn find_node(&self, node_id: &str, source_node_id: &str) -> Result<&'a FlowNode, ExportError> {
        self.nodes
            .iter()
            .find(|n| n.id == node_id)
            .ok_or_else(|| ExportError::NodeNotFound {
                missing_node_id: node_id.to_string(),
                source_node_id: source_node_id.to_string(),
            })
    }
}
