use std::collections::BTreeSet;

use crate::error::ValidationError;
use crate::expressions::substitute;
use crate::types::{Definition, Template, VarSpec, Vars};
use crate::validate::Parse;

/// Globally unique, time-ordered id used to name rendered definitions.
pub fn new_id() -> String {
    uuid::Uuid::now_v7().to_string()
}

/// Resolves every declared variable from `supplied`, its default, or the empty
/// string when it may be empty. Undeclared names in `supplied` are ignored.
pub fn merge_vars(specs: &[VarSpec], supplied: &Vars) -> Result<Vars, ValidationError> {
    let mut resolved = Vars::new();
    for spec in specs {
        let value = match (supplied.get(&spec.name), &spec.default) {
            (Some(v), _) => v.clone(),
            (None, Some(d)) => d.clone(),
            (None, None) if spec.can_empty => String::new(),
            (None, None) => return Err(ValidationError::MissingRequiredVariable(spec.name.clone())),
        };

        if value.is_empty() && !spec.can_empty {
            return Err(ValidationError::MissingRequiredVariable(spec.name.clone()));
        }
        if !spec.allows(&value) {
            return Err(ValidationError::InvalidOption {
                var: spec.name.clone(),
                value,
            });
        }
        resolved.insert(spec.name.clone(), value);
    }
    Ok(resolved)
}

impl Template {
    pub fn merge_vars(&self, supplied: &Vars) -> Result<Vars, ValidationError> {
        merge_vars(&self.vars, supplied)
    }

    /// Renders a fresh, validated definition named `<template>::<id>`.
    pub fn render(&self, supplied: &Vars) -> Result<Definition, ValidationError> {
        self.render_with_id(supplied, &new_id())
    }

    pub fn render_with_id(&self, supplied: &Vars, id: &str) -> Result<Definition, ValidationError> {
        let vars = self.merge_vars(supplied)?;
        let mut missing = BTreeSet::new();
        let mut api = self.api.clone();

        if self.method {
            api.method = substitute(&self.api.method, &vars, &mut missing);
        }
        if self.url {
            api.url = substitute(&self.api.url, &vars, &mut missing);
            api.urls = self
                .api
                .urls
                .iter()
                .map(|u| substitute(u, &vars, &mut missing))
                .collect();
        }
        for (key, value) in api.headers.iter_mut() {
            if self.header_is_templated(key) {
                *value = substitute(value, &vars, &mut missing);
            }
        }
        if self.body {
            api.body = substitute(&self.api.body, &vars, &mut missing);
        }

        if !missing.is_empty() {
            return Err(ValidationError::MissingVariableValues(missing.into_iter().collect()));
        }

        api.name = format!("{}::{}", self.name, id);
        api.parse()?;
        Ok(api)
    }
}
