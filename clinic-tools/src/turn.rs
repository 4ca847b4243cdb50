//! Per-conversation turn orchestration.
//!
//! A [`TurnContext`] ties together everything one agent invocation needs:
//! the persona resolved from the caller's staff role, an access gate built
//! over the catalog, and a mailbox owned by this conversation. The embedding
//! application drives the cycle: load the inbox, let the LLM runtime invoke
//! gated tools, then drain the outbox for persistence.

use std::sync::Arc;

use clinic_gate::{AccessGate, GateError};
use clinic_mailbox::{InboxMessage, Mailbox, OutboxMessage};
use clinic_primitives::Persona;
use serde_json::Value;
use tracing::debug;

use crate::catalog::{ToolCatalog, ToolError, ToolOutput, ToolResult, ToolSpec};

/// One conversation's view of the tool surface.
///
/// The caller serializes turns against a context; separate conversations
/// get separate contexts (and therefore separate mailboxes).
pub struct TurnContext {
    persona: Persona,
    gate: AccessGate,
    mailbox: Arc<Mailbox>,
    catalog: Arc<ToolCatalog>,
}

impl TurnContext {
    /// Builds a context for the given staff role over the supplied catalog.
    ///
    /// The mailbox is the same instance the catalog's mailbox-backed tools
    /// were registered with; the caller creates one per conversation. The
    /// role is resolved to a persona with the fail-safe default of
    /// [`Persona::ReadOnly`] for unrecognized values.
    ///
    /// The gate is built from the catalog's descriptors at this point;
    /// tools registered afterwards are not visible to this turn.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::DuplicateTool`] if the catalog's descriptor
    /// sequence contains a duplicated name.
    pub fn new(role: &str, catalog: Arc<ToolCatalog>, mailbox: Arc<Mailbox>) -> ToolResult<Self> {
        let persona = Persona::resolve(role);
        let gate = AccessGate::new(catalog.descriptors()).map_err(|err| match err {
            GateError::DuplicateTool { name } => ToolError::DuplicateTool { name },
        })?;
        debug!(role, persona = %persona, "turn context created");

        Ok(Self {
            persona,
            gate,
            mailbox,
            catalog,
        })
    }

    /// Returns the persona this turn runs as.
    #[must_use]
    pub fn persona(&self) -> Persona {
        self.persona
    }

    /// Returns this conversation's mailbox, for sharing with tool handlers.
    #[must_use]
    pub fn mailbox(&self) -> &Arc<Mailbox> {
        &self.mailbox
    }

    /// Returns the names of every tool this turn's persona may call, in
    /// catalog order.
    #[must_use]
    pub fn allowed_tools(&self) -> Vec<&str> {
        self.gate.allowed_tools(self.persona)
    }

    /// Returns the specs for the tools this turn's persona may call, in
    /// catalog order. This is the description handed to the LLM runtime.
    #[must_use]
    pub fn allowed_specs(&self) -> Vec<ToolSpec> {
        self.catalog
            .specs()
            .into_iter()
            .filter(|spec| self.gate.can_use_tool(self.persona, spec.name()))
            .collect()
    }

    /// Reports whether this turn's persona may call the named tool.
    #[must_use]
    pub fn can_use(&self, tool_name: &str) -> bool {
        self.gate.can_use_tool(self.persona, tool_name)
    }

    /// Replaces the inbox ahead of the turn.
    pub fn set_inbox(&self, messages: Vec<InboxMessage>) {
        self.mailbox.set_inbox(messages);
    }

    /// Invokes a tool on behalf of this turn, enforcing the gate first.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::Denied`] when the gate refuses the persona,
    /// [`ToolError::UnknownTool`] when the catalog has no such tool, or the
    /// handler's own error.
    pub async fn invoke(&self, tool_name: &str, input: Value) -> ToolResult<ToolOutput> {
        if !self.gate.can_use_tool(self.persona, tool_name) {
            debug!(tool = tool_name, persona = %self.persona, "tool invocation denied");
            return Err(ToolError::Denied {
                name: tool_name.to_owned(),
                persona: self.persona,
            });
        }
        self.catalog.invoke(tool_name, input).await
    }

    /// Drains the outbox after the turn for persistence by the caller.
    #[must_use]
    pub fn drain_outbox(&self) -> Vec<OutboxMessage> {
        self.mailbox.drain_outbox()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stub_catalog() -> Arc<ToolCatalog> {
        let catalog = ToolCatalog::new();
        for (name, persona) in [
            ("lookup_patient", Persona::ReadOnly),
            ("create_task", Persona::ReadAction),
            ("void_invoice", Persona::Full),
        ] {
            let spec = ToolSpec::new(
                name,
                "stub",
                serde_json::json!({ "type": "object", "properties": {} }),
                persona,
            )
            .unwrap();
            catalog
                .register(spec, |_: Value| async move { Ok(ToolOutput::text("ok")) })
                .unwrap();
        }
        Arc::new(catalog)
    }

    #[tokio::test]
    async fn gate_filters_invocations_by_persona() {
        let turn = TurnContext::new("billing", stub_catalog(), Arc::new(Mailbox::new())).unwrap();
        assert_eq!(turn.persona(), Persona::ReadAction);
        assert_eq!(turn.allowed_tools(), ["lookup_patient", "create_task"]);

        turn.invoke("create_task", serde_json::json!({}))
            .await
            .unwrap();

        let err = turn
            .invoke("void_invoice", serde_json::json!({}))
            .await
            .expect_err("full-only tool should be denied");
        assert!(matches!(
            err,
            ToolError::Denied { name, persona }
                if name == "void_invoice" && persona == Persona::ReadAction
        ));
    }

    #[tokio::test]
    async fn unknown_role_gets_read_only_view() {
        let turn = TurnContext::new("nonexistent_role", stub_catalog(), Arc::new(Mailbox::new())).unwrap();
        assert_eq!(turn.persona(), Persona::ReadOnly);
        assert_eq!(turn.allowed_tools(), ["lookup_patient"]);
        assert!(!turn.can_use("create_task"));
    }

    #[tokio::test]
    async fn admin_sees_every_spec() {
        let turn = TurnContext::new("admin", stub_catalog(), Arc::new(Mailbox::new())).unwrap();
        let names: Vec<_> = turn
            .allowed_specs()
            .iter()
            .map(|s| s.name().to_owned())
            .collect();
        assert_eq!(names, ["lookup_patient", "create_task", "void_invoice"]);
    }

    #[tokio::test]
    async fn unknown_tool_is_denied_before_lookup() {
        let turn = TurnContext::new("admin", stub_catalog(), Arc::new(Mailbox::new())).unwrap();
        let err = turn
            .invoke("nonexistent_tool", serde_json::json!({}))
            .await
            .expect_err("unknown tool should be denied");
        assert!(matches!(err, ToolError::Denied { .. }));
    }

    #[tokio::test]
    async fn contexts_do_not_share_mailboxes() {
        let catalog = stub_catalog();
        let a = TurnContext::new("admin", Arc::clone(&catalog), Arc::new(Mailbox::new())).unwrap();
        let b = TurnContext::new("admin", catalog, Arc::new(Mailbox::new())).unwrap();

        a.set_inbox(vec![InboxMessage::new("scheduling", "for a", 1)]);
        assert!(b.mailbox().inbox().is_empty());
    }
}
