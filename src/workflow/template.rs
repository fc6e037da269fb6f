use super::kind::{ExperimentKind, TemplateType};
use crate::error::TemplateError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A named step of a workflow document.
///
/// The document form is flat (`{name, templateType, deadline, children, schedule,
/// podChaos, ...}`); this type keeps only the combinations the control plane
/// accepts, so a `Suspend` can never carry children and a chaos step always
/// carries its parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTemplate", into = "RawTemplate")]
pub struct Template {
    pub name: String,
    pub deadline: Option<String>,
    pub body: TemplateBody,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TemplateBody {
    Serial { children: Vec<String> },
    Parallel { children: Vec<String> },
    Suspend,
    Schedule(ScheduleSpec),
    Chaos(EmbeddedChaos),
}

/// Parameters of one experiment, stored under the kind's field name.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddedChaos {
    pub kind: ExperimentKind,
    pub spec: Map<String, Value>,
}

/// A recurring experiment wrapped in a `Schedule` template.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleSpec {
    pub schedule: Option<String>,
    pub history_limit: Option<i64>,
    pub concurrency_policy: Option<String>,
    pub starting_deadline_seconds: Option<i64>,
    pub chaos: EmbeddedChaos,
}

impl Template {
    pub fn serial(name: impl Into<String>, children: Vec<String>) -> Self {
        Self {
            name: name.into(),
            deadline: None,
            body: TemplateBody::Serial { children },
        }
    }

    pub fn parallel(name: impl Into<String>, children: Vec<String>) -> Self {
        Self {
            name: name.into(),
            deadline: None,
            body: TemplateBody::Parallel { children },
        }
    }

    pub fn suspend(name: impl Into<String>, deadline: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            deadline: Some(deadline.into()),
            body: TemplateBody::Suspend,
        }
    }

    pub fn template_type(&self) -> TemplateType {
        match &self.body {
            TemplateBody::Serial { .. } => TemplateType::Serial,
            TemplateBody::Parallel { .. } => TemplateType::Parallel,
            TemplateBody::Suspend => TemplateType::Suspend,
            TemplateBody::Schedule(_) => TemplateType::Schedule,
            TemplateBody::Chaos(chaos) => TemplateType::Chaos(chaos.kind),
        }
    }

    pub fn is_group(&self) -> bool {
        self.template_type().is_group()
    }

    /// Child template names. Empty for anything but `Serial` and `Parallel`.
    pub fn children(&self) -> &[String] {
        match &self.body {
            TemplateBody::Serial { children } | TemplateBody::Parallel { children } => children,
            _ => &[],
        }
    }

    /// The experiment this template runs, directly or through a schedule.
    pub fn embedded_chaos(&self) -> Option<&EmbeddedChaos> {
        match &self.body {
            TemplateBody::Chaos(chaos) => Some(chaos),
            TemplateBody::Schedule(schedule) => Some(&schedule.chaos),
            _ => None,
        }
    }
}

// --- Document form ---

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTemplate {
    name: String,
    template_type: TemplateType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    deadline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    children: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    schedule: Option<RawSchedule>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSchedule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    schedule: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    history_limit: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    concurrency_policy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    starting_deadline_seconds: Option<i64>,
    #[serde(rename = "type")]
    kind: TemplateType,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

fn unexpected(name: &str, template_type: TemplateType, field: &str) -> TemplateError {
    TemplateError::UnexpectedField {
        template: name.to_string(),
        template_type: template_type.to_string(),
        field: field.to_string(),
    }
}

fn reject_leftovers(
    name: &str,
    template_type: TemplateType,
    prefix: &str,
    extra: &Map<String, Value>,
) -> Result<(), TemplateError> {
    match extra.keys().next() {
        Some(key) => Err(unexpected(name, template_type, &format!("{}{}", prefix, key))),
        None => Ok(()),
    }
}

/// Removes the parameter object of `kind` from `extra`.
fn take_chaos(
    name: &str,
    kind: ExperimentKind,
    prefix: &str,
    extra: &mut Map<String, Value>,
) -> Result<EmbeddedChaos, TemplateError> {
    let field = format!("{}{}", prefix, kind.field_name());
    match extra.remove(kind.field_name()) {
        Some(Value::Object(spec)) => Ok(EmbeddedChaos { kind, spec }),
        // `podChaos: {}` written as `podChaos:` in YAML.
        Some(Value::Null) => Ok(EmbeddedChaos {
            kind,
            spec: Map::new(),
        }),
        Some(other) => Err(TemplateError::InvalidField {
            template: name.to_string(),
            field,
            message: format!("expected a mapping, found {}", other),
        }),
        None => Err(TemplateError::MissingField {
            template: name.to_string(),
            field,
        }),
    }
}

impl TryFrom<RawTemplate> for Template {
    type Error = TemplateError;

    fn try_from(raw: RawTemplate) -> Result<Self, Self::Error> {
        let RawTemplate {
            name,
            template_type,
            deadline,
            children,
            schedule,
            mut extra,
        } = raw;

        if !template_type.is_group() && children.is_some() {
            return Err(unexpected(&name, template_type, "children"));
        }
        if template_type != TemplateType::Schedule && schedule.is_some() {
            return Err(unexpected(&name, template_type, "schedule"));
        }

        let body = match template_type {
            TemplateType::Serial | TemplateType::Parallel => {
                reject_leftovers(&name, template_type, "", &extra)?;
                let children = children.unwrap_or_default();
                if template_type == TemplateType::Serial {
                    TemplateBody::Serial { children }
                } else {
                    TemplateBody::Parallel { children }
                }
            }
            TemplateType::Suspend => {
                reject_leftovers(&name, template_type, "", &extra)?;
                TemplateBody::Suspend
            }
            TemplateType::Schedule => {
                reject_leftovers(&name, template_type, "", &extra)?;
                let raw_schedule = schedule.ok_or_else(|| TemplateError::MissingField {
                    template: name.clone(),
                    field: "schedule".to_string(),
                })?;
                TemplateBody::Schedule(schedule_from_raw(&name, raw_schedule)?)
            }
            TemplateType::Chaos(kind) => {
                let chaos = take_chaos(&name, kind, "", &mut extra)?;
                reject_leftovers(&name, template_type, "", &extra)?;
                TemplateBody::Chaos(chaos)
            }
        };

        Ok(Template {
            name,
            deadline,
            body,
        })
    }
}

fn schedule_from_raw(name: &str, raw: RawSchedule) -> Result<ScheduleSpec, TemplateError> {
    let RawSchedule {
        schedule,
        history_limit,
        concurrency_policy,
        starting_deadline_seconds,
        kind,
        mut extra,
    } = raw;

    let kind = kind
        .experiment_kind()
        .ok_or_else(|| TemplateError::InvalidField {
            template: name.to_string(),
            field: "schedule.type".to_string(),
            message: format!("'{}' is not an experiment kind", kind),
        })?;
    let chaos = take_chaos(name, kind, "schedule.", &mut extra)?;
    reject_leftovers(name, TemplateType::Schedule, "schedule.", &extra)?;

    Ok(ScheduleSpec {
        schedule,
        history_limit,
        concurrency_policy,
        starting_deadline_seconds,
        chaos,
    })
}

impl From<Template> for RawTemplate {
    fn from(template: Template) -> Self {
        let template_type = template.template_type();
        let mut extra = Map::new();
        let mut children = None;
        let mut schedule = None;

        match template.body {
            TemplateBody::Serial { children: c } | TemplateBody::Parallel { children: c } => {
                children = Some(c);
            }
            TemplateBody::Suspend => {}
            TemplateBody::Schedule(spec) => {
                let mut schedule_extra = Map::new();
                schedule_extra.insert(
                    spec.chaos.kind.field_name().to_string(),
                    Value::Object(spec.chaos.spec),
                );
                schedule = Some(RawSchedule {
                    schedule: spec.schedule,
                    history_limit: spec.history_limit,
                    concurrency_policy: spec.concurrency_policy,
                    starting_deadline_seconds: spec.starting_deadline_seconds,
                    kind: TemplateType::Chaos(spec.chaos.kind),
                    extra: schedule_extra,
                });
            }
            TemplateBody::Chaos(chaos) => {
                extra.insert(chaos.kind.field_name().to_string(), Value::Object(chaos.spec));
            }
        }

        RawTemplate {
            name: template.name,
            template_type,
            deadline: template.deadline,
            children,
            schedule,
            extra,
        }
    }
}
