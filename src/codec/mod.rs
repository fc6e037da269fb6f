//! Conversion between one node's form values and its workflow template.

use crate::error::CodecError;
use crate::workflow::{
    EmbeddedChaos, ExperimentKind, NodeExperiment, ScheduleSpec, Template, TemplateBody,
    TemplateType, template_type_to_field_name,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};

pub mod selectors;

pub use selectors::{arr_to_obj_by_sep, obj_to_arr_by_sep};

/// Form fields that configure a schedule rather than the scheduled experiment.
const SCHEDULE_FIELDS: [&str; 4] = [
    "schedule",
    "historyLimit",
    "concurrencyPolicy",
    "startingDeadlineSeconds",
];

/// Values the schedule form starts from, in [`SCHEDULE_FIELDS`] order.
fn schedule_defaults() -> [(&'static str, Value); 4] {
    [
        ("schedule", json!("")),
        ("historyLimit", json!(1)),
        ("concurrencyPolicy", json!("Forbid")),
        ("startingDeadlineSeconds", json!(0)),
    ]
}

/// Converts the flat form values of a node into a template.
///
/// Kind-specific parameters move under the kind's field name. When the node is
/// `scheduled`, the schedule fields are split off and the experiment is wrapped
/// in a `Schedule` template instead. `Serial`/`Parallel` nodes come back with
/// no children; the caller owns the graph structure.
pub fn node_experiment_to_template(node: &NodeExperiment) -> Result<Template, CodecError> {
    let mut params = node.params.clone();

    if node.scheduled {
        let field = template_type_to_field_name(&node.template_type)?;
        let kind = ExperimentKind::from_field_name(field).ok_or_else(|| CodecError::UnmappedKind {
            template_type: node.template_type.to_string(),
        })?;

        let schedule = read_field(&params, "schedule", &node.name)?;
        let history_limit = read_field(&params, "historyLimit", &node.name)?;
        let concurrency_policy = read_field(&params, "concurrencyPolicy", &node.name)?;
        let starting_deadline_seconds = read_field(&params, "startingDeadlineSeconds", &node.name)?;
        params.retain(|key, _| !SCHEDULE_FIELDS.contains(&key.as_str()));

        let schedule = ScheduleSpec {
            schedule,
            history_limit,
            concurrency_policy,
            starting_deadline_seconds,
            chaos: EmbeddedChaos { kind, spec: params },
        };

        return Ok(Template {
            name: node.name.clone(),
            deadline: node.deadline.clone(),
            body: TemplateBody::Schedule(schedule),
        });
    }

    let body = match node.template_type {
        TemplateType::Chaos(kind) => TemplateBody::Chaos(EmbeddedChaos { kind, spec: params }),
        TemplateType::Suspend => TemplateBody::Suspend,
        TemplateType::Serial => TemplateBody::Serial { children: Vec::new() },
        TemplateType::Parallel => TemplateBody::Parallel { children: Vec::new() },
        TemplateType::Schedule => {
            return Err(CodecError::InvalidNodeExperiment {
                name: node.name.clone(),
                message: "a Schedule node must be an experiment with `scheduled` set".to_string(),
            });
        }
    };

    Ok(Template {
        name: node.name.clone(),
        deadline: node.deadline.clone(),
        body,
    })
}

/// The inverse of [`node_experiment_to_template`].
///
/// Scheduled experiments come back as their experiment kind with `scheduled`
/// set, missing schedule fields filled with the form defaults. The node `id`
/// is left for the caller to assign.
pub fn template_to_node_experiment(template: &Template) -> NodeExperiment {
    let template_type = match &template.body {
        TemplateBody::Schedule(schedule) => TemplateType::Chaos(schedule.chaos.kind),
        _ => template.template_type(),
    };

    let mut node = NodeExperiment::new(template.name.clone(), template_type);
    node.kind = Some(template_type.to_string());
    node.deadline = template.deadline.clone();

    match &template.body {
        TemplateBody::Chaos(chaos) => {
            node.params = restore_params(&chaos.spec);
        }
        TemplateBody::Schedule(schedule) => {
            node.scheduled = true;
            node.params = restore_params(&schedule.chaos.spec);

            let given = [
                schedule.schedule.clone().map(Value::from),
                schedule.history_limit.map(Value::from),
                schedule.concurrency_policy.clone().map(Value::from),
                schedule.starting_deadline_seconds.map(Value::from),
            ];
            for (value, (key, default)) in given.into_iter().zip(schedule_defaults()) {
                node.params.insert(key.to_string(), value.unwrap_or(default));
            }
        }
        TemplateBody::Suspend | TemplateBody::Serial { .. } | TemplateBody::Parallel { .. } => {}
    }

    node
}

fn restore_params(spec: &Map<String, Value>) -> Map<String, Value> {
    match selectors::restore_selector_arrays(Value::Object(spec.clone())) {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

fn read_field<T: DeserializeOwned>(
    params: &Map<String, Value>,
    key: &str,
    name: &str,
) -> Result<Option<T>, CodecError> {
    match params.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => serde_json::from_value(value.clone())
            .map(Some)
            .map_err(|e| CodecError::InvalidField {
                name: name.to_string(),
                field: key.to_string(),
                message: e.to_string(),
            }),
    }
}
