//! Tests for converting single nodes to and from templates.
mod common;
use chaosflow::codec::{arr_to_obj_by_sep, obj_to_arr_by_sep};
use chaosflow::prelude::*;
use chaosflow::workflow::{EmbeddedChaos, ScheduleSpec};
use common::*;
use pretty_assertions::assert_eq;
use serde_json::{Map, Value, json};

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected an object, got {}", other),
    }
}

#[test]
fn test_pod_chaos_params_move_under_kind_field() {
    let template = node_experiment_to_template(&pod_kill("kill-web")).unwrap();

    assert_eq!(template.name, "kill-web");
    assert_eq!(template.deadline.as_deref(), Some("1m"));
    assert_eq!(
        template.body,
        TemplateBody::Chaos(EmbeddedChaos {
            kind: ExperimentKind::PodChaos,
            spec: object(json!({
                "action": "pod-kill",
                "mode": "one",
                "selector": { "namespaces": ["default"], "labelSelectors": ["app: web"] }
            })),
        })
    );

    let document = serde_json::to_value(&template).unwrap();
    assert!(document.get("id").is_none());
    assert!(document.get("kind").is_none());
    assert_eq!(document["podChaos"]["action"], json!("pod-kill"));
}

#[test]
fn test_scheduled_node_becomes_schedule_template() {
    let template = node_experiment_to_template(&scheduled_delay("delay-db")).unwrap();

    assert_eq!(
        template.body,
        TemplateBody::Schedule(ScheduleSpec {
            schedule: Some("@every 2s".to_string()),
            history_limit: Some(2),
            concurrency_policy: Some("Allow".to_string()),
            starting_deadline_seconds: Some(0),
            chaos: EmbeddedChaos {
                kind: ExperimentKind::NetworkChaos,
                spec: object(json!({
                    "action": "delay",
                    "mode": "all",
                    "delay": { "latency": "90ms" }
                })),
            },
        })
    );
}

#[test]
fn test_schedule_field_of_wrong_type() {
    let node = scheduled_delay("delay-db").with_param("historyLimit", json!("two"));
    let result = node_experiment_to_template(&node);
    assert!(matches!(
        result,
        Err(CodecError::InvalidField { ref field, .. }) if field == "historyLimit"
    ));
}

#[test]
fn test_suspend_drops_params() {
    let node = suspend("pause", "10s").with_param("leftover", json!(true));
    let template = node_experiment_to_template(&node).unwrap();
    assert_eq!(template, Template::suspend("pause", "10s"));
}

#[test]
fn test_group_comes_back_without_children() {
    let template =
        node_experiment_to_template(&group_payload("main", TemplateType::Parallel)).unwrap();
    assert_eq!(template, Template::parallel("main", vec![]));
}

#[test]
fn test_schedule_type_requires_scheduled_flag() {
    let node = NodeExperiment::new("s", TemplateType::Schedule);
    assert!(matches!(
        node_experiment_to_template(&node),
        Err(CodecError::InvalidNodeExperiment { .. })
    ));
}

#[test]
fn test_template_back_to_node_restores_selectors() {
    let template: Template = serde_json::from_value(json!({
        "name": "kill-web",
        "templateType": "PodChaos",
        "deadline": "1m",
        "podChaos": {
            "action": "pod-kill",
            "selector": { "labelSelectors": { "app": "web" } }
        }
    }))
    .unwrap();

    let node = template_to_node_experiment(&template);
    assert_eq!(node.id, None);
    assert_eq!(node.kind.as_deref(), Some("PodChaos"));
    assert_eq!(node.deadline.as_deref(), Some("1m"));
    assert!(!node.scheduled);
    assert_eq!(
        Value::Object(node.params),
        json!({ "action": "pod-kill", "selector": { "labelSelectors": ["app: web"] } })
    );
}

#[test]
fn test_schedule_back_to_node_fills_defaults() {
    let template: Template = serde_json::from_value(json!({
        "name": "s1",
        "templateType": "Schedule",
        "schedule": {
            "schedule": "@every 5m",
            "type": "TimeChaos",
            "timeChaos": { "timeOffset": "-1h" }
        }
    }))
    .unwrap();

    let node = template_to_node_experiment(&template);
    assert!(node.scheduled);
    assert_eq!(node.template_type, TemplateType::Chaos(ExperimentKind::TimeChaos));
    assert_eq!(
        Value::Object(node.params),
        json!({
            "timeOffset": "-1h",
            "schedule": "@every 5m",
            "historyLimit": 1,
            "concurrencyPolicy": "Forbid",
            "startingDeadlineSeconds": 0
        })
    );
}

#[test]
fn test_node_round_trip_through_template() {
    for node in [
        pod_kill("kill-web"),
        scheduled_delay("delay-db"),
        suspend("pause", "30s"),
    ] {
        let template = node_experiment_to_template(&node).unwrap();
        assert_eq!(template_to_node_experiment(&template), node);
    }
}

#[test]
fn test_selector_helpers() {
    let map = arr_to_obj_by_sep(&["app: web", "tier:db"], ":", true);
    assert_eq!(Value::Object(map.clone()), json!({ "app": "web", "tier": "db" }));
    assert_eq!(obj_to_arr_by_sep(&map, ": "), vec!["app: web", "tier: db"]);
}
