use super::kind::TemplateType;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// The store-of-record: node id (or template name) to the node's form values.
pub type Store = BTreeMap<String, NodeExperiment>;

/// The flat form values of one canvas node.
///
/// Kind-specific parameters sit at the top level next to the common fields,
/// exactly as the experiment forms produce them; they are nested under the
/// kind's field name only when the node becomes a [`Template`](super::Template).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeExperiment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub name: String,
    pub template_type: TemplateType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub scheduled: bool,
    #[serde(flatten)]
    pub params: Map<String, Value>,
}

impl NodeExperiment {
    pub fn new(name: impl Into<String>, template_type: TemplateType) -> Self {
        Self {
            id: None,
            kind: None,
            name: name.into(),
            template_type,
            deadline: None,
            scheduled: false,
            params: Map::new(),
        }
    }

    pub fn with_deadline(mut self, deadline: impl Into<String>) -> Self {
        self.deadline = Some(deadline.into());
        self
    }

    pub fn with_param(mut self, key: impl Into<String>, value: Value) -> Self {
        self.params.insert(key.into(), value);
        self
    }
}
