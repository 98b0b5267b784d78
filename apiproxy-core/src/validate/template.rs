use crate::error::ValidationError;
use crate::types::{Method, Template, VarSpec};
use crate::validate::Parse;

impl Parse for Template {
    fn parse(&mut self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingName);
        }

        for (name, default) in std::mem::take(&mut self.defaults) {
            if !self.vars.iter().any(|v| v.name == name) {
                self.vars.push(VarSpec::new(name).with_default(default));
            }
        }
        for var in &self.vars {
            var.validate()?;
        }

        if !self.method {
            let method: Method = self.api.method.parse()?;
            self.api.method = method.as_str().to_string();
        }

        if !self.url && self.api.url.trim().is_empty() && self.api.urls.is_empty() {
            return Err(ValidationError::MissingTarget);
        }

        // A listed header must carry a value: fixed headers send it as-is,
        // templated ones render it.
        for key in self.headers.keys() {
            let present = self.api.headers.get(key).is_some_and(|v| !v.is_empty());
            if !present {
                return Err(ValidationError::MissingHeader(key.clone()));
            }
        }

        if self.body && self.api.body.is_empty() {
            return Err(ValidationError::MissingBody);
        }

        // Rendered definitions get their own generated name.
        self.api.name.clear();

        Ok(())
    }
}

impl VarSpec {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingVariableName);
        }
        if let Some(default) = &self.default {
            if !self.allows(default) {
                return Err(ValidationError::InvalidDefaultOption {
                    var: self.name.clone(),
                    default: default.clone(),
                });
            }
        }
        Ok(())
    }
}
