//! Common test utilities for building canvas graphs, stores and documents.
use chaosflow::prelude::*;
use serde_json::json;

/// A top-level step node.
#[allow(dead_code)]
pub fn leaf(id: &str, name: &str) -> FlowNode {
    FlowNode {
        id: id.to_string(),
        node_type: NodeType::Flow,
        position: Position::default(),
        data: NodeData {
            name: name.to_string(),
            ..Default::default()
        },
        parent_node: None,
    }
}

/// A step node inside the group `parent`.
#[allow(dead_code)]
pub fn child(id: &str, name: &str, parent: &str) -> FlowNode {
    FlowNode {
        parent_node: Some(parent.to_string()),
        ..leaf(id, name)
    }
}

/// A `Serial`/`Parallel` box node.
#[allow(dead_code)]
pub fn group(id: &str, name: &str) -> FlowNode {
    FlowNode {
        node_type: NodeType::Group,
        ..leaf(id, name)
    }
}

#[allow(dead_code)]
pub fn edge(source: &str, target: &str) -> FlowEdge {
    FlowEdge::new(source, target)
}

/// Form values of a pod-kill experiment, as the experiment form produces them.
#[allow(dead_code)]
pub fn pod_kill(name: &str) -> NodeExperiment {
    let mut node = NodeExperiment::new(name, TemplateType::Chaos(ExperimentKind::PodChaos))
        .with_deadline("1m")
        .with_param("action", json!("pod-kill"))
        .with_param("mode", json!("one"))
        .with_param(
            "selector",
            json!({ "namespaces": ["default"], "labelSelectors": ["app: web"] }),
        );
    node.kind = Some("PodChaos".to_string());
    node
}

/// Form values of a network delay experiment run every two seconds.
#[allow(dead_code)]
pub fn scheduled_delay(name: &str) -> NodeExperiment {
    let mut node = NodeExperiment::new(name, TemplateType::Chaos(ExperimentKind::NetworkChaos))
        .with_param("action", json!("delay"))
        .with_param("mode", json!("all"))
        .with_param("delay", json!({ "latency": "90ms" }))
        .with_param("schedule", json!("@every 2s"))
        .with_param("historyLimit", json!(2))
        .with_param("concurrencyPolicy", json!("Allow"))
        .with_param("startingDeadlineSeconds", json!(0));
    node.kind = Some("NetworkChaos".to_string());
    node.scheduled = true;
    node
}

#[allow(dead_code)]
pub fn suspend(name: &str, deadline: &str) -> NodeExperiment {
    let mut node = NodeExperiment::new(name, TemplateType::Suspend).with_deadline(deadline);
    node.kind = Some("Suspend".to_string());
    node
}

#[allow(dead_code)]
pub fn group_payload(name: &str, template_type: TemplateType) -> NodeExperiment {
    let mut node = NodeExperiment::new(name, template_type);
    node.kind = Some(template_type.to_string());
    node
}

/// Builds a store keyed by node id.
#[allow(dead_code)]
pub fn store_of(entries: Vec<(&str, NodeExperiment)>) -> Store {
    entries
        .into_iter()
        .map(|(id, node)| (id.to_string(), node))
        .collect()
}

/// Three top-level steps chained `kill -> delay -> pause`.
#[allow(dead_code)]
pub fn create_leaf_chain() -> (Vec<FlowNode>, Vec<FlowEdge>, Store) {
    let nodes = vec![
        leaf("n1", "kill-web"),
        leaf("n2", "delay-db"),
        leaf("n3", "pause"),
    ];
    let edges = vec![edge("n1", "n2"), edge("n2", "n3")];
    let store = store_of(vec![
        ("n1", pod_kill("kill-web")),
        ("n2", scheduled_delay("delay-db")),
        ("n3", suspend("pause", "30s")),
    ]);
    (nodes, edges, store)
}

/// A `Serial` box holding two chained steps and a `Parallel` box with two steps.
#[allow(dead_code)]
pub fn create_nested_flow() -> (Vec<FlowNode>, Vec<FlowEdge>, Store) {
    let nodes = vec![
        group("g1", "main"),
        child("a", "kill-web", "g1"),
        FlowNode {
            parent_node: Some("g1".to_string()),
            ..group("g2", "fan-out")
        },
        child("b", "kill-api", "g2"),
        child("c", "kill-db", "g2"),
    ];
    let edges = vec![edge("a", "g2")];
    let store = store_of(vec![
        ("g1", group_payload("main", TemplateType::Serial)),
        ("a", pod_kill("kill-web")),
        ("g2", group_payload("fan-out", TemplateType::Parallel)),
        ("b", pod_kill("kill-api")),
        ("c", pod_kill("kill-db")),
    ]);
    (nodes, edges, store)
}

#[allow(dead_code)]
pub const PARALLEL_WORKFLOW_YAML: &str = r#"
apiVersion: chaos-mesh.org/v1alpha1
kind: Workflow
metadata:
  name: try-workflow-parallel
  namespace: chaos-mesh
spec:
  entry: the-entry
  templates:
    - name: the-entry
      templateType: Parallel
      deadline: 240s
      children:
        - workflow-stress-chaos
        - workflow-network-chaos
        - workflow-pod-chaos
    - name: workflow-network-chaos
      templateType: NetworkChaos
      deadline: 20s
      networkChaos:
        direction: to
        action: delay
        mode: all
        selector:
          labelSelectors:
            "app": "hello-kubernetes"
        delay:
          latency: "90ms"
    - name: workflow-pod-chaos
      templateType: Schedule
      deadline: 40s
      schedule:
        schedule: "@every 2s"
        type: "PodChaos"
        podChaos:
          action: pod-kill
          mode: one
          selector:
            labelSelectors:
              "app": "hello-kubernetes"
    - name: workflow-stress-chaos
      templateType: StressChaos
      deadline: 20s
      stressChaos:
        mode: one
        selector:
          labelSelectors:
            "app": "hello-kubernetes"
        stressors:
          cpu:
            workers: 1
            load: 20
"#;

#[allow(dead_code)]
pub const SERIAL_WORKFLOW_YAML: &str = r#"
apiVersion: chaos-mesh.org/v1alpha1
kind: Workflow
metadata:
  name: try-workflow-serial
spec:
  entry: the-entry
  templates:
    - name: the-entry
      templateType: Serial
      deadline: 240s
      children:
        - kill-first
        - suspending
        - kill-second
    - name: kill-first
      templateType: PodChaos
      deadline: 20s
      podChaos:
        action: pod-kill
        mode: one
    - name: suspending
      templateType: Suspend
      deadline: 10s
    - name: kill-second
      templateType: PodChaos
      deadline: 20s
      podChaos:
        action: pod-kill
        mode: one
"#;
