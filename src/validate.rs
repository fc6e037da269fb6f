//! Structural checks a workflow document must pass before submission.

use crate::error::ValidationError;
use crate::workflow::{TemplateBody, WorkflowDocument};
use ahash::{AHashMap, AHashSet};
use itertools::Itertools;

const DNS1123_SUBDOMAIN_MAX_LENGTH: usize = 253;

/// Collects every structural problem of `document`. Empty when it is valid.
///
/// A document without templates only reports [`ValidationError::NoTemplates`].
pub fn validate_workflow(document: &WorkflowDocument) -> Vec<ValidationError> {
    let spec = &document.spec;
    if spec.templates.is_empty() {
        return vec![ValidationError::NoTemplates];
    }

    let mut errors = Vec::new();
    let names: AHashSet<&str> = spec.templates.iter().map(|t| t.name.as_str()).collect();

    // An empty entry matches no template either, so it reports both.
    if spec.entry.is_empty() {
        errors.push(ValidationError::EntryRequired);
    }
    if !names.contains(spec.entry.as_str()) {
        errors.push(ValidationError::EntryNotFound(spec.entry.clone()));
    }

    let mut counts: AHashMap<&str, usize> = AHashMap::new();
    for template in &spec.templates {
        *counts.entry(template.name.as_str()).or_default() += 1;
    }
    let duplicates: Vec<String> = counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(name, _)| name.to_string())
        .sorted()
        .collect();
    if !duplicates.is_empty() {
        errors.push(ValidationError::DuplicateTemplateNames { names: duplicates });
    }

    for (index, template) in spec.templates.iter().enumerate() {
        if let Err(message) = check_dns1123_subdomain(&template.name) {
            errors.push(ValidationError::InvalidTemplateName {
                index,
                name: template.name.clone(),
                message,
            });
        }

        match &template.body {
            TemplateBody::Suspend if template.deadline.as_deref().unwrap_or("").is_empty() => {
                errors.push(ValidationError::SuspendWithoutDeadline { index });
            }
            TemplateBody::Serial { children } | TemplateBody::Parallel { children } => {
                for (child_index, child) in children.iter().enumerate() {
                    if !names.contains(child.as_str()) {
                        errors.push(ValidationError::ChildNotFound {
                            index,
                            child_index,
                            name: child.clone(),
                        });
                    }
                }
            }
            _ => {}
        }

        if template
            .embedded_chaos()
            .is_some_and(|chaos| chaos.spec.contains_key("duration"))
        {
            errors.push(ValidationError::DurationInChaos { index });
        }
    }

    errors
}

/// Kubernetes object name rules: lowercase alphanumerics, `-` and `.`,
/// starting and ending with an alphanumeric.
fn check_dns1123_subdomain(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("must not be empty".to_string());
    }
    if name.len() > DNS1123_SUBDOMAIN_MAX_LENGTH {
        return Err(format!(
            "must be no more than {} characters",
            DNS1123_SUBDOMAIN_MAX_LENGTH
        ));
    }

    let is_alnum = |c: char| c.is_ascii_lowercase() || c.is_ascii_digit();
    if let Some(c) = name.chars().find(|&c| !is_alnum(c) && c != '-' && c != '.') {
        return Err(format!("invalid character '{}'", c));
    }
    let starts_ok = name.chars().next().is_some_and(is_alnum);
    let ends_ok = name.chars().next_back().is_some_and(is_alnum);
    if !starts_ok || !ends_ok {
        return Err("must start and end with a lowercase alphanumeric character".to_string());
    }
    Ok(())
}
