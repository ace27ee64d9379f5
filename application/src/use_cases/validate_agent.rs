//! Validate Agent use case
//!
//! Admission-time checks over an agent declaration, run once per create or
//! update. Single pass and fail fast: the first fatal failure is returned
//! and nothing after it is checked.

use crate::ports::parameter_validator::ParameterValidator;
use crate::ports::resource_store::ResourceStore;
use crate::use_cases::resolve_value::ValueSourceResolver;
use crate::use_cases::validate_parameters::StoreParameterValidator;
use ark_domain::agent::validation::{
    AgentToolType, is_model_validation_exempt, is_valid_builtin_tool, resolve_model_spec,
    supported_builtin_tools,
};
use ark_domain::resource::AgentTool;
use ark_domain::{Agent, CoreError, Warnings};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Admission failures, rendered as the message shown to whoever submitted
/// the declaration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error(
        "no model specified for agent and no 'default' model found in namespace {namespace}: {cause}"
    )]
    DefaultModelMissing { namespace: String, cause: String },

    #[error("model {model} not found in namespace {namespace}: {cause}")]
    ModelNotFound {
        model: String,
        namespace: String,
        cause: String,
    },

    #[error("{0}")]
    Parameters(String),

    #[error("tool[{index}]: built-in tools must specify a name")]
    BuiltInToolUnnamed { index: usize },

    #[error("tool[{index}]: unsupported built-in tool '{name}': supported built-in tools are: {supported}")]
    UnsupportedBuiltInTool {
        index: usize,
        name: String,
        supported: String,
    },

    #[error("tool[{index}]: {tool_type} tools must specify a name")]
    ToolUnnamed { index: usize, tool_type: String },

    #[error("tool[{index}]: {cause}")]
    ToolLookup { index: usize, cause: String },

    #[error("tool[{index}]: unsupported tool type '{tool_type}': supported types are: built-in, custom")]
    UnsupportedToolType { index: usize, tool_type: String },
}

impl From<ValidationError> for CoreError {
    fn from(err: ValidationError) -> Self {
        CoreError::Validation(err.to_string())
    }
}

/// Use case for admitting agent declarations
pub struct AgentValidator {
    store: Arc<dyn ResourceStore>,
    parameters: Arc<dyn ParameterValidator>,
}

impl AgentValidator {
    /// Validator backed by `store`, with the store-backed parameter checks
    pub fn new(store: Arc<dyn ResourceStore>) -> Self {
        let parameters = Arc::new(StoreParameterValidator::new(ValueSourceResolver::new(
            Arc::clone(&store),
        )));
        Self { store, parameters }
    }

    pub fn with_parameter_validator(mut self, parameters: Arc<dyn ParameterValidator>) -> Self {
        self.parameters = parameters;
        self
    }

    pub async fn validate_create(&self, agent: &Agent) -> Result<Warnings, ValidationError> {
        self.validate(agent).await
    }

    pub async fn validate_update(&self, agent: &Agent) -> Result<Warnings, ValidationError> {
        self.validate(agent).await
    }

    /// Deletions are always admitted
    pub async fn validate_delete(&self, _agent: &Agent) -> Result<Warnings, ValidationError> {
        Ok(Warnings::new())
    }

    /// Run every check in order: model, parameters, then tools by index.
    ///
    /// Warnings are only returned when all checks pass.
    pub async fn validate(&self, agent: &Agent) -> Result<Warnings, ValidationError> {
        let namespace = agent.namespace();
        debug!(agent = %agent.metadata.name, namespace = %namespace, "Validating agent");

        self.validate_model(agent).await?;

        self.parameters
            .validate(&agent.spec.parameters, namespace)
            .await
            .map_err(ValidationError::Parameters)?;

        let mut warnings = Warnings::new();
        for (index, tool) in agent.spec.tools.iter().enumerate() {
            warnings.extend(self.validate_tool(namespace, index, tool).await?);
        }

        info!(agent = %agent.metadata.name, warnings = warnings.len(), "Agent admitted");
        Ok(warnings)
    }

    async fn validate_model(&self, agent: &Agent) -> Result<(), ValidationError> {
        if is_model_validation_exempt(agent) {
            debug!(agent = %agent.metadata.name, "Execution engine exempt from model validation");
            return Ok(());
        }

        let model_ref = agent.spec.model_ref.as_ref();
        let (model, namespace) = resolve_model_spec(model_ref, agent.namespace());

        match self.store.get_model(&namespace, &model).await {
            Ok(_) => Ok(()),
            Err(e) if model_ref.is_none() => Err(ValidationError::DefaultModelMissing {
                namespace,
                cause: e.to_string(),
            }),
            Err(e) => Err(ValidationError::ModelNotFound {
                model,
                namespace,
                cause: e.to_string(),
            }),
        }
    }

    async fn validate_tool(
        &self,
        namespace: &str,
        index: usize,
        tool: &AgentTool,
    ) -> Result<Warnings, ValidationError> {
        let tool_type: AgentToolType =
            tool.tool_type
                .parse()
                .map_err(|tool_type| ValidationError::UnsupportedToolType { index, tool_type })?;

        match (tool_type, tool.name()) {
            (AgentToolType::BuiltIn, None) => Err(ValidationError::BuiltInToolUnnamed { index }),
            (AgentToolType::BuiltIn, Some(name)) if !is_valid_builtin_tool(name) => {
                Err(ValidationError::UnsupportedBuiltInTool {
                    index,
                    name: name.to_string(),
                    supported: supported_builtin_tools(),
                })
            }
            (AgentToolType::BuiltIn, Some(_)) => Ok(Warnings::new()),
            (AgentToolType::Custom, None) => Err(ValidationError::ToolUnnamed {
                index,
                tool_type: tool.tool_type.clone(),
            }),
            (AgentToolType::Custom, Some(name)) => {
                self.store
                    .get_tool(namespace, name)
                    .await
                    .map_err(|e| ValidationError::ToolLookup {
                        index,
                        cause: e.to_string(),
                    })?;
                Ok(Warnings::new())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::resolve_value::tests::MemoryStore;
    use ark_domain::resource::AgentModelRef;
    use ark_domain::{HttpSpec, Model, ObjectMeta, Parameter, Tool};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn store() -> MemoryStore {
        MemoryStore::default()
            .with_model(Model::new(ObjectMeta::new("default", "default"), "openai"))
            .with_model(Model::new(ObjectMeta::new("gpt-4o", "models"), "azure"))
            .with_tool(Tool::http(
                ObjectMeta::new("weather", "default"),
                HttpSpec::new("https://wttr.in/{city}"),
            ))
    }

    fn validator() -> AgentValidator {
        AgentValidator::new(Arc::new(store()))
    }

    fn agent(name: &str) -> Agent {
        Agent::new(ObjectMeta::new(name, "default"))
    }

    #[tokio::test]
    async fn test_builtin_tools() {
        let ok = agent("a").with_tool(AgentTool::built_in("noop"));
        assert_eq!(validator().validate(&ok).await, Ok(vec![]));

        let bad = agent("a")
            .with_tool(AgentTool::built_in("terminate"))
            .with_tool(AgentTool::built_in("sleep"));
        let err = validator().validate(&bad).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "tool[1]: unsupported built-in tool 'sleep': supported built-in tools are: noop, terminate"
        );

        let unnamed = agent("a").with_tool(AgentTool::built_in(""));
        let err = validator().validate(&unnamed).await.unwrap_err();
        assert_eq!(err, ValidationError::BuiltInToolUnnamed { index: 0 });
    }

    #[tokio::test]
    async fn test_custom_tools() {
        let ok = agent("a").with_tool(AgentTool::custom("weather"));
        assert!(validator().validate(&ok).await.is_ok());

        let missing = agent("a").with_tool(AgentTool::custom("stocks"));
        let err = validator().validate(&missing).await.unwrap_err();
        assert_eq!(err.to_string(), "tool[0]: tool default/stocks not found");

        let unnamed = agent("a").with_tool(AgentTool::custom(""));
        let err = validator().validate(&unnamed).await.unwrap_err();
        assert_eq!(err.to_string(), "tool[0]: custom tools must specify a name");
    }

    #[tokio::test]
    async fn test_unknown_tool_type_rejected() {
        let mut tool = AgentTool::custom("x");
        tool.tool_type = "mcp".into();
        let err = validator()
            .validate(&agent("a").with_tool(tool))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::UnsupportedToolType {
                index: 0,
                tool_type: "mcp".into()
            }
        );
    }

    #[tokio::test]
    async fn test_model_errors_are_namespace_qualified() {
        let store = MemoryStore::default();
        let validator = AgentValidator::new(Arc::new(store));

        let err = validator.validate(&agent("a")).await.unwrap_err();
        assert!(
            err.to_string()
                .starts_with("no model specified for agent and no 'default' model found in namespace default")
        );

        let err = validator
            .validate(&agent("a").with_model("gpt-5"))
            .await
            .unwrap_err();
        assert!(
            err.to_string()
                .starts_with("model gpt-5 not found in namespace default")
        );
    }

    #[tokio::test]
    async fn test_model_ref_namespace() {
        let mut scoped = agent("a");
        scoped.spec.model_ref = Some(AgentModelRef {
            name: "gpt-4o".into(),
            namespace: Some("models".into()),
        });
        assert!(validator().validate(&scoped).await.is_ok());
    }

    #[tokio::test]
    async fn test_exempt_engine_skips_model() {
        let validator = AgentValidator::new(Arc::new(MemoryStore::default()));
        let remote = agent("remote").with_execution_engine("a2a");
        assert!(validator.validate(&remote).await.is_ok());
    }

    struct CountingValidator {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl ParameterValidator for CountingValidator {
        async fn validate(&self, _parameters: &[Parameter], _namespace: &str) -> Result<(), String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err("parameter 'x': rejected".into())
            } else {
                Ok(())
            }
        }
    }

    #[tokio::test]
    async fn test_fail_fast_order() {
        // model failure: parameters never checked
        let params = Arc::new(CountingValidator {
            calls: AtomicUsize::new(0),
            fail: true,
        });
        let validator = AgentValidator::new(Arc::new(MemoryStore::default()))
            .with_parameter_validator(params.clone());
        assert!(validator.validate(&agent("a")).await.is_err());
        assert_eq!(params.calls.load(Ordering::SeqCst), 0);

        // parameter failure: tools never checked
        let validator = AgentValidator::new(Arc::new(store())).with_parameter_validator(params.clone());
        let err = validator
            .validate(&agent("a").with_tool(AgentTool::built_in("sleep")))
            .await
            .unwrap_err();
        assert_eq!(err, ValidationError::Parameters("parameter 'x': rejected".into()));
        assert_eq!(params.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_delete_always_admitted() {
        let validator = AgentValidator::new(Arc::new(MemoryStore::default()));
        assert!(validator.validate_delete(&agent("a")).await.is_ok());
    }
}
