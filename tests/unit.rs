//! Unit tests for kind mapping, validation and graph lookups.
mod common;
use chaosflow::ui::graph::{children_of, incomers};
use chaosflow::workflow::template_type_to_field_name;
use chaosflow::prelude::*;
use common::*;
use std::collections::HashSet;

#[test]
fn test_every_kind_has_a_distinct_field() {
    let fields: HashSet<&str> = ExperimentKind::ALL.iter().map(|k| k.field_name()).collect();
    assert_eq!(ExperimentKind::ALL.len(), 14);
    assert_eq!(fields.len(), 14);

    for kind in ExperimentKind::ALL {
        assert_eq!(ExperimentKind::from_field_name(kind.field_name()), Some(*kind));
        assert_eq!(kind.as_str().parse::<TemplateType>(), Ok(TemplateType::Chaos(*kind)));
    }
}

#[test]
fn test_field_name_examples() {
    assert_eq!(ExperimentKind::PodChaos.field_name(), "podChaos");
    assert_eq!(ExperimentKind::PhysicalMachineChaos.field_name(), "physicalmachineChaos");
    assert_eq!(ExperimentKind::DnsChaos.as_str(), "DNSChaos");
    assert_eq!(ExperimentKind::DnsChaos.field_name(), "dnsChaos");
}

#[test]
fn test_control_types_have_no_field() {
    for template_type in [
        TemplateType::Serial,
        TemplateType::Parallel,
        TemplateType::Suspend,
        TemplateType::Schedule,
    ] {
        assert_eq!(template_type.field_name(), None);
        assert!(matches!(
            template_type_to_field_name(&template_type),
            Err(CodecError::UnmappedKind { .. })
        ));
    }
    assert_eq!(
        template_type_to_field_name(&TemplateType::Chaos(ExperimentKind::IoChaos)),
        Ok("ioChaos")
    );
}

#[test]
fn test_unknown_template_type() {
    assert_eq!(
        "Task".parse::<TemplateType>(),
        Err(TemplateError::UnknownTemplateType("Task".to_string()))
    );
}

#[test]
fn test_incomers_and_children() {
    let (nodes, edges, _) = create_nested_flow();

    let fan_out = &nodes[2];
    let sources: Vec<&str> = incomers(fan_out, &nodes, &edges)
        .iter()
        .map(|n| n.id.as_str())
        .collect();
    assert_eq!(sources, vec!["a"]);

    let children: Vec<&str> = children_of("g2", &nodes).iter().map(|n| n.id.as_str()).collect();
    assert_eq!(children, vec!["b", "c"]);
}

fn document(yaml: &str) -> WorkflowDocument {
    WorkflowDocument::from_yaml(yaml).expect("document should parse")
}

#[test]
fn test_validation_accepts_valid_document() {
    assert_eq!(document(SERIAL_WORKFLOW_YAML).validate(), Ok(()));
}

#[test]
fn test_validation_without_templates() {
    let doc = document(
        r#"
apiVersion: chaos-mesh.org/v1alpha1
kind: Workflow
spec:
  entry: ""
  templates: []
"#,
    );
    assert_eq!(validate_workflow(&doc), vec![ValidationError::NoTemplates]);
}

#[test]
fn test_validation_collects_every_problem() {
    let doc = document(
        r#"
apiVersion: chaos-mesh.org/v1alpha1
kind: Workflow
spec:
  entry: missing
  templates:
    - name: main
      templateType: Serial
      children: [pause, ghost]
    - name: pause
      templateType: Suspend
    - name: pause
      templateType: Suspend
      deadline: 5s
    - name: Kill_Web
      templateType: PodChaos
      podChaos:
        action: pod-kill
        duration: 30s
"#,
    );

    assert_eq!(
        validate_workflow(&doc),
        vec![
            ValidationError::EntryNotFound("missing".to_string()),
            ValidationError::DuplicateTemplateNames {
                names: vec!["pause".to_string()]
            },
            ValidationError::ChildNotFound {
                index: 0,
                child_index: 1,
                name: "ghost".to_string()
            },
            ValidationError::SuspendWithoutDeadline { index: 1 },
            ValidationError::InvalidTemplateName {
                index: 3,
                name: "Kill_Web".to_string(),
                message: "invalid character 'K'".to_string()
            },
            ValidationError::DurationInChaos { index: 3 },
        ]
    );
}

#[test]
fn test_validation_requires_entry() {
    let doc = document(
        r#"
apiVersion: chaos-mesh.org/v1alpha1
kind: Workflow
spec:
  entry: ""
  templates:
    - name: pause
      templateType: Suspend
      deadline: 5s
"#,
    );
    assert_eq!(
        doc.validate(),
        Err(vec![
            ValidationError::EntryRequired,
            ValidationError::EntryNotFound(String::new()),
        ])
    );
}

#[test]
fn test_validation_checks_scheduled_chaos_duration() {
    let doc = document(
        r#"
apiVersion: chaos-mesh.org/v1alpha1
kind: Workflow
spec:
  entry: every-minute
  templates:
    - name: every-minute
      templateType: Schedule
      schedule:
        schedule: "* * * * *"
        type: StressChaos
        stressChaos:
          duration: 10s
"#,
    );
    assert_eq!(
        validate_workflow(&doc),
        vec![ValidationError::DurationInChaos { index: 0 }]
    );
}

#[test]
fn test_validation_error_messages() {
    let error = ValidationError::DuplicateTemplateNames {
        names: vec!["a".to_string(), "b".to_string()],
    };
    assert_eq!(
        error.to_string(),
        "spec.templates: template name must be unique, duplicated names: [a b]"
    );
}
