use super::layout::{BoxPacker, Direction, LayoutConfig, Size};
use crate::codec::template_to_node_experiment;
use crate::error::ImportError;
use crate::ui::graph::connect_in_sequence;
use crate::ui::{Flow, FlowEdge, FlowNode, NodeData, NodeType, Position};
use crate::workflow::{Store, Template, TemplateBody};
use ahash::AHashMap;
use log::debug;

/// How node ids are generated for imported nodes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IdStrategy {
    /// Random v4 UUIDs, as the canvas does for new nodes.
    #[default]
    Uuid,
    /// `node-1`, `node-2`, ... in creation order. Reproducible.
    Sequential,
}

struct IdGenerator {
    strategy: IdStrategy,
    issued: usize,
}

impl IdGenerator {
    fn next_id(&mut self) -> String {
        self.issued += 1;
        match self.strategy {
            IdStrategy::Uuid => uuid::Uuid::new_v4().to_string(),
            IdStrategy::Sequential => format!("node-{}", self.issued),
        }
    }
}

/// Instantiates templates as canvas nodes, parents before children.
pub(super) struct GraphBuilder<'a> {
    templates: AHashMap<&'a str, &'a Template>,
    layout: &'a LayoutConfig,
    ids: IdGenerator,
    nodes: Vec<FlowNode>,
    edges: Vec<FlowEdge>,
    store: Store,
    /// Groups currently being expanded, for cycle detection.
    path: Vec<&'a str>,
}

impl<'a> GraphBuilder<'a> {
    pub(super) fn new(templates: &'a [Template], layout: &'a LayoutConfig, strategy: IdStrategy) -> Self {
        Self {
            templates: templates.iter().map(|t| (t.name.as_str(), t)).collect(),
            layout,
            ids: IdGenerator {
                strategy,
                issued: 0,
            },
            nodes: Vec::new(),
            edges: Vec::new(),
            store: Store::new(),
            path: Vec::new(),
        }
    }

    pub(super) fn lookup(&self, name: &str, referenced_by: &str) -> Result<&'a Template, ImportError> {
        self.templates
            .get(name)
            .copied()
            .ok_or_else(|| ImportError::TemplateNotFound {
                name: name.to_string(),
                referenced_by: referenced_by.to_string(),
            })
    }

    /// Lays `names` out left to right at the top level and chains them.
    pub(super) fn add_top_level_sequence(
        &mut self,
        names: &'a [String],
        referenced_by: &str,
    ) -> Result<(), ImportError> {
        let mut x = 0.0;
        let mut ids = Vec::with_capacity(names.len());
        for name in names {
            let template = self.lookup(name, referenced_by)?;
            let (id, size) = self.instantiate(template, Position { x, y: 0.0 }, None)?;
            x += size.width + self.layout.gap;
            ids.push(id);
        }
        self.edges.extend(connect_in_sequence(&ids));
        Ok(())
    }

    /// Creates the node for `template` (and, for groups, all nodes below it).
    /// Returns the new node's id and its size.
    pub(super) fn instantiate(
        &mut self,
        template: &'a Template,
        position: Position,
        parent: Option<&str>,
    ) -> Result<(String, Size), ImportError> {
        let name = template.name.as_str();
        if self.path.contains(&name) {
            return Err(ImportError::CyclicTemplate {
                name: name.to_string(),
            });
        }

        let id = self.ids.next_id();
        self.store.entry(template.name.clone()).or_insert_with(|| {
            let mut node = template_to_node_experiment(template);
            node.id = Some(id.clone());
            node
        });

        let direction = match template.body {
            TemplateBody::Serial { .. } => Direction::Row,
            TemplateBody::Parallel { .. } => Direction::Column,
            _ => {
                debug!("Node '{}' for step '{}'", id, name);
                self.nodes.push(FlowNode {
                    id: id.clone(),
                    node_type: NodeType::Flow,
                    position,
                    data: NodeData {
                        name: template.name.clone(),
                        kind: template.template_type().to_string(),
                        ..Default::default()
                    },
                    parent_node: parent.map(str::to_string),
                });
                return Ok((id, self.layout.leaf_size()));
            }
        };

        let children = template.children();
        let index = self.nodes.len();
        self.nodes.push(FlowNode {
            id: id.clone(),
            node_type: NodeType::Group,
            position,
            data: NodeData {
                name: template.name.clone(),
                kind: template.template_type().to_string(),
                children_num: Some(children.len()),
                ..Default::default()
            },
            parent_node: parent.map(str::to_string),
        });

        self.path.push(name);
        let layout = self.layout;
        let mut packer = BoxPacker::new(layout, direction);
        let mut child_ids = Vec::with_capacity(children.len());
        for child_name in children {
            let child = self.lookup(child_name, name)?;
            let (child_id, child_size) = self.instantiate(child, packer.next_position(), Some(id.as_str()))?;
            packer.place(child_size);
            child_ids.push(child_id);
        }
        self.path.pop();

        if direction == Direction::Row {
            self.edges.extend(connect_in_sequence(&child_ids));
        }

        let size = packer.finish();
        let data = &mut self.nodes[index].data;
        data.width = Some(size.width);
        data.height = Some(size.height);
        debug!(
            "Node '{}' for group '{}' ({} children, {}x{})",
            id,
            name,
            children.len(),
            size.width,
            size.height
        );
        Ok((id, size))
    }

    pub(super) fn finish(self) -> Flow {
        Flow {
            store: self.store,
            nodes: self.nodes,
            edges: self.edges,
        }
    }
}
