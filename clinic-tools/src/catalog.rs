//! Runtime catalog of tool specs and executors.

use std::future::Future;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use clinic_gate::ToolDescriptor;
use clinic_primitives::Persona;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Result alias for tool operations.
pub type ToolResult<T> = Result<T, ToolError>;

/// Errors produced by tool registration and invocation.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Tool spec failed validation.
    #[error("invalid tool spec: {reason}")]
    InvalidSpec {
        /// Human-readable reason for rejection.
        reason: String,
    },

    /// Tool name collided with an existing registration.
    #[error("tool `{name}` is already registered")]
    DuplicateTool {
        /// Name of the offending tool.
        name: String,
    },

    /// Requested tool does not exist.
    #[error("tool `{name}` is not registered")]
    UnknownTool {
        /// Name of the missing tool.
        name: String,
    },

    /// The access gate refused the invocation for the turn's persona.
    #[error("tool `{name}` is not available to the {persona} persona")]
    Denied {
        /// Name of the refused tool.
        name: String,
        /// Persona the turn is running as.
        persona: Persona,
    },

    /// Tool arguments could not be decoded.
    #[error("invalid tool arguments: {reason}")]
    InvalidArguments {
        /// Human-readable reason for rejection.
        reason: String,
    },

    /// Tool execution failed.
    #[error("tool execution failed: {reason}")]
    Execution {
        /// Human-readable error returned by the tool implementation.
        reason: String,
    },
}

impl ToolError {
    /// Creates an invalid-arguments error from the supplied reason.
    #[must_use]
    pub fn invalid_arguments(reason: impl Into<String>) -> Self {
        Self::InvalidArguments {
            reason: reason.into(),
        }
    }

    /// Creates an execution error from the supplied reason.
    #[must_use]
    pub fn execution(reason: impl Into<String>) -> Self {
        Self::Execution {
            reason: reason.into(),
        }
    }
}

/// Rendering returned by a tool handler: one or more text blocks.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolOutput {
    blocks: Vec<String>,
}

impl ToolOutput {
    /// Creates an output consisting of a single text block.
    #[must_use]
    pub fn text(block: impl Into<String>) -> Self {
        Self {
            blocks: vec![block.into()],
        }
    }

    /// Appends another text block.
    #[must_use]
    pub fn with_block(mut self, block: impl Into<String>) -> Self {
        self.blocks.push(block.into());
        self
    }

    /// Returns the text blocks in order.
    #[must_use]
    pub fn blocks(&self) -> &[String] {
        &self.blocks
    }

    /// Joins all blocks into one newline-separated string.
    #[must_use]
    pub fn joined(&self) -> String {
        self.blocks.join("\n")
    }
}

/// Describes a registered tool: identity, parameter schema, and the minimum
/// persona required to call it.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToolSpec {
    name: String,
    description: String,
    parameters: Value,
    min_persona: Persona,
}

impl ToolSpec {
    /// Creates a spec for the supplied identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::InvalidSpec`] if the name or description is
    /// empty.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: Value,
        min_persona: Persona,
    ) -> ToolResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ToolError::InvalidSpec {
                reason: "tool name cannot be empty".into(),
            });
        }

        let description = description.into();
        if description.trim().is_empty() {
            return Err(ToolError::InvalidSpec {
                reason: "tool description cannot be empty".into(),
            });
        }

        Ok(Self {
            name,
            description,
            parameters,
            min_persona,
        })
    }

    /// Returns the tool name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the human-readable description shown to the model.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the JSON schema for the tool's arguments.
    #[must_use]
    pub fn parameters(&self) -> &Value {
        &self.parameters
    }

    /// Returns the minimum persona required to call the tool.
    #[must_use]
    pub fn min_persona(&self) -> Persona {
        self.min_persona
    }

    /// Returns the gate-facing descriptor for this spec.
    #[must_use]
    pub fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor::new(self.name.clone(), self.min_persona)
    }
}

/// Trait implemented by tool executors.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Invokes the tool with validated JSON arguments, returning a rendering.
    async fn invoke(&self, input: Value) -> ToolResult<ToolOutput>;
}

#[async_trait]
impl<F, Fut> Tool for F
where
    F: Send + Sync + Fn(Value) -> Fut,
    Fut: Future<Output = ToolResult<ToolOutput>> + Send,
{
    async fn invoke(&self, input: Value) -> ToolResult<ToolOutput> {
        (self)(input).await
    }
}

/// Handle returned by the catalog for direct invocation.
#[derive(Clone)]
pub struct ToolHandle {
    spec: ToolSpec,
    executor: Arc<dyn Tool>,
}

impl ToolHandle {
    /// Returns the associated spec.
    #[must_use]
    pub fn spec(&self) -> &ToolSpec {
        &self.spec
    }

    /// Executes the underlying tool implementation.
    ///
    /// # Errors
    ///
    /// Propagates any error returned by the underlying implementation.
    pub async fn invoke(&self, input: Value) -> ToolResult<ToolOutput> {
        self.executor.invoke(input).await
    }
}

/// Insertion-ordered catalog of tools keyed by unique name.
///
/// Registration order is significant: the descriptor sequence handed to the
/// access gate preserves it, and gated tool listings come back in the same
/// order.
#[derive(Default)]
pub struct ToolCatalog {
    inner: RwLock<Vec<ToolHandle>>,
}

impl std::fmt::Debug for ToolCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.read().expect("tool catalog poisoned");
        let names: Vec<_> = inner.iter().map(|h| h.spec().name().to_owned()).collect();
        f.debug_struct("ToolCatalog")
            .field("registered", &names)
            .finish()
    }
}

impl ToolCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a tool implementation under the spec's name.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::DuplicateTool`] if the name is already present.
    ///
    /// # Panics
    ///
    /// Panics if the internal catalog lock is poisoned.
    pub fn register<T>(&self, spec: ToolSpec, tool: T) -> ToolResult<()>
    where
        T: Tool + 'static,
    {
        let mut inner = self.inner.write().expect("tool catalog poisoned");
        if inner.iter().any(|h| h.spec().name() == spec.name()) {
            return Err(ToolError::DuplicateTool {
                name: spec.name().to_owned(),
            });
        }

        inner.push(ToolHandle {
            spec,
            executor: Arc::new(tool),
        });

        Ok(())
    }

    /// Returns a handle to the tool matching the supplied name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<ToolHandle> {
        let inner = self.inner.read().ok()?;
        inner.iter().find(|h| h.spec().name() == name).cloned()
    }

    /// Invokes a registered tool directly, bypassing any gate.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::UnknownTool`] when the tool is not found, or
    /// propagates the implementation's error.
    pub async fn invoke(&self, name: &str, input: Value) -> ToolResult<ToolOutput> {
        let handle = self.get(name).ok_or_else(|| ToolError::UnknownTool {
            name: name.to_owned(),
        })?;
        handle.invoke(input).await
    }

    /// Returns gate-facing descriptors for every tool, in registration order.
    ///
    /// # Panics
    ///
    /// Panics if the internal catalog lock is poisoned.
    #[must_use]
    pub fn descriptors(&self) -> Vec<ToolDescriptor> {
        let inner = self.inner.read().expect("tool catalog poisoned");
        inner.iter().map(|h| h.spec().descriptor()).collect()
    }

    /// Returns the specs of all registered tools, in registration order.
    ///
    /// # Panics
    ///
    /// Panics if the internal catalog lock is poisoned.
    #[must_use]
    pub fn specs(&self) -> Vec<ToolSpec> {
        let inner = self.inner.read().expect("tool catalog poisoned");
        inner.iter().map(|h| h.spec().clone()).collect()
    }
}
