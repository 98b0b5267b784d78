use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use apiproxy_core::{
    parse_definitions, parse_templates, DataFormat, Definition, Parse, ParseError, Template,
    ValidationError, Vars,
};
use apiproxy_store::{MemoryStore, Store, StoreError};

use crate::executor::{ExecError, ExecOptions, Executor, HttpResponseParts, Transport};

pub const DEFINITION_STORE: &str = "api-proxy";
pub const TEMPLATE_STORE: &str = "api-proxy-template";

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Exec(#[from] ExecError),
    #[error("record {index} ({name:?}): {source}")]
    Batch {
        index: usize,
        name: String,
        source: Box<RegistryError>,
    },
}

impl RegistryError {
    /// The response that came with an unsuccessful execution, if any.
    pub fn response(&self) -> Option<&HttpResponseParts> {
        match self {
            RegistryError::Exec(e) => e.response(),
            RegistryError::Batch { source, .. } => source.response(),
            _ => None,
        }
    }
}

/// Named definitions and templates plus the executor that runs them.
pub struct Registry {
    definitions: MemoryStore<Definition>,
    templates: MemoryStore<Template>,
    executor: Executor,
}

impl Registry {
    pub fn new(executor: Executor) -> Self {
        Self {
            definitions: MemoryStore::new(DEFINITION_STORE),
            templates: MemoryStore::new(TEMPLATE_STORE),
            executor,
        }
    }

    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self::new(Executor::new(transport))
    }

    pub fn executor(&self) -> &Executor {
        &self.executor
    }

    pub fn definitions(&self) -> &MemoryStore<Definition> {
        &self.definitions
    }

    pub fn templates(&self) -> &MemoryStore<Template> {
        &self.templates
    }

    /// Normalizes `def` and stores it under its name.
    pub fn register_definition(&self, mut def: Definition) -> Result<(), RegistryError> {
        if def.name.trim().is_empty() {
            return Err(ValidationError::MissingName.into());
        }
        def.parse()?;
        let name = def.name.clone();
        self.definitions.register(&name, def)?;
        tracing::debug!(key = %name, "definition registered");
        Ok(())
    }

    pub fn register_template(&self, mut template: Template) -> Result<(), RegistryError> {
        template.parse()?;
        let name = template.name.clone();
        self.templates.register(&name, template)?;
        tracing::debug!(key = %name, "template registered");
        Ok(())
    }

    /// Registers every definition in `data` in order, stopping at the first failure.
    /// Records before the failing one stay registered.
    pub fn register_definitions_data(
        &self,
        format: DataFormat,
        data: &[u8],
    ) -> Result<Vec<String>, RegistryError> {
        let defs = parse_definitions(data, format)?;
        let mut names = Vec::with_capacity(defs.len());
        for (index, def) in defs.into_iter().enumerate() {
            let name = def.name.clone();
            self.register_definition(def).map_err(|e| RegistryError::Batch {
                index,
                name: name.clone(),
                source: Box::new(e),
            })?;
            names.push(name);
        }
        Ok(names)
    }

    pub fn register_templates_data(
        &self,
        format: DataFormat,
        data: &[u8],
    ) -> Result<Vec<String>, RegistryError> {
        let templates = parse_templates(data, format)?;
        let mut names = Vec::with_capacity(templates.len());
        for (index, template) in templates.into_iter().enumerate() {
            let name = template.name.clone();
            self.register_template(template).map_err(|e| RegistryError::Batch {
                index,
                name: name.clone(),
                source: Box::new(e),
            })?;
            names.push(name);
        }
        Ok(names)
    }

    pub fn definition(&self, name: &str) -> Result<Definition, RegistryError> {
        Ok(self.definitions.lookup(name)?)
    }

    pub fn template(&self, name: &str) -> Result<Template, RegistryError> {
        Ok(self.templates.lookup(name)?)
    }

    pub fn definition_names(&self) -> Vec<String> {
        self.definitions.keys()
    }

    pub fn template_names(&self) -> Vec<String> {
        self.templates.keys()
    }

    /// Looks `name` up, loading and normalizing it through `loader` on a miss.
    /// Loaded definitions expire after `ttl` when one is given.
    pub async fn definition_or_load<F, Fut>(
        &self,
        name: &str,
        ttl: Option<Duration>,
        loader: F,
    ) -> Result<Definition, RegistryError>
    where
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = Result<Definition, RegistryError>>,
    {
        self.definitions
            .get_or_compute(name, ttl, |key| async move {
                let mut def = loader(key.clone()).await?;
                if def.name.trim().is_empty() {
                    def.name = key;
                }
                def.parse()?;
                Ok::<_, RegistryError>(def)
            })
            .await
    }

    pub async fn run_by_name(&self, name: &str) -> Result<HttpResponseParts, RegistryError> {
        self.run_by_name_with(name, &ExecOptions::default()).await
    }

    pub async fn run_by_name_with(
        &self,
        name: &str,
        opts: &ExecOptions,
    ) -> Result<HttpResponseParts, RegistryError> {
        let def = self.definition(name)?;
        Ok(self.executor.execute_with(&def, opts).await?)
    }

    /// Renders a fresh definition from the named template. The result is not stored.
    pub fn render_template(&self, name: &str, vars: &Vars) -> Result<Definition, RegistryError> {
        let template = self.template(name)?;
        Ok(template.render(vars)?)
    }

    pub async fn run_template_by_name(
        &self,
        name: &str,
        vars: &Vars,
    ) -> Result<HttpResponseParts, RegistryError> {
        self.run_template_by_name_with(name, vars, &ExecOptions::default())
            .await
    }

    pub async fn run_template_by_name_with(
        &self,
        name: &str,
        vars: &Vars,
        opts: &ExecOptions,
    ) -> Result<HttpResponseParts, RegistryError> {
        let def = self.render_template(name, vars)?;
        tracing::debug!(template = %name, name = %def.name, url = %def.url, "rendered template");
        Ok(self.executor.execute_with(&def, opts).await?)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(Executor::default())
    }
}
