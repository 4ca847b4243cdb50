//! Builtin tools backed by the mailbox and the task sink.

use std::sync::Arc;

use clinic_mailbox::{Mailbox, MessageKind, OutboxMessage};
use clinic_primitives::{AgentSection, Persona};
use rand::Rng;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::catalog::{ToolCatalog, ToolError, ToolOutput, ToolResult, ToolSpec};
use crate::task::{TaskAssignee, TaskPriority, TaskRecord, TaskSink};

pub use crate::task::NullTaskSink;

/// Maximum number of characters of message content echoed back in the
/// `send_message` confirmation. The stored message is never truncated.
pub const CONTENT_PREVIEW_CHARS: usize = 100;

/// Registers the builtin tools with the catalog, in a fixed order:
/// `check_inbox`, `send_message`, `create_task`.
///
/// The mailbox is shared with the turn that will drive these tools; the
/// task sink receives every created task.
///
/// # Errors
///
/// Returns [`ToolError::DuplicateTool`] if any builtin name is already
/// registered.
pub fn register_builtin(
    catalog: &ToolCatalog,
    mailbox: Arc<Mailbox>,
    tasks: Arc<dyn TaskSink>,
) -> ToolResult<()> {
    register_check_inbox(catalog, Arc::clone(&mailbox))?;
    register_send_message(catalog, mailbox)?;
    register_create_task(catalog, tasks)?;
    Ok(())
}

fn register_check_inbox(catalog: &ToolCatalog, mailbox: Arc<Mailbox>) -> ToolResult<()> {
    let spec = ToolSpec::new(
        "check_inbox",
        "Check for messages sent to you by other sections of the practice.",
        serde_json::json!({
            "type": "object",
            "properties": {},
            "additionalProperties": false,
        }),
        Persona::ReadOnly,
    )?;

    catalog.register(spec, move |_input: Value| {
        let mailbox = Arc::clone(&mailbox);
        async move {
            let inbox = mailbox.inbox();
            if inbox.is_empty() {
                return Ok(ToolOutput::text("No new messages."));
            }

            let mut body = format!("You have {} message(s):", inbox.len());
            for message in &inbox {
                body.push_str(&format!(
                    "\n- From {}: {}",
                    message.sender(),
                    message.content()
                ));
            }
            Ok(ToolOutput::text(body))
        }
    })
}

#[derive(Debug, Deserialize)]
struct SendMessageArgs {
    to_agent: String,
    content: String,
    #[serde(default)]
    kind: MessageKind,
}

fn register_send_message(catalog: &ToolCatalog, mailbox: Arc<Mailbox>) -> ToolResult<()> {
    let sections: Vec<&str> = AgentSection::ALL.iter().map(|s| s.as_str()).collect();
    let kinds: Vec<&str> = MessageKind::ALL.iter().map(|k| k.as_str()).collect();

    let spec = ToolSpec::new(
        "send_message",
        "Send a message to another section of the practice. It will be \
         delivered the next time that section's assistant runs.",
        serde_json::json!({
            "type": "object",
            "required": ["to_agent", "content"],
            "properties": {
                "to_agent": {
                    "type": "string",
                    "enum": sections,
                    "description": "Section to deliver the message to",
                },
                "content": {
                    "type": "string",
                    "description": "Message body",
                },
                "kind": {
                    "type": "string",
                    "enum": kinds,
                    "default": "message",
                    "description": "How the receiving section should treat the message",
                },
            },
            "additionalProperties": false,
        }),
        Persona::ReadAction,
    )?;

    catalog.register(spec, move |input: Value| {
        let mailbox = Arc::clone(&mailbox);
        async move {
            let args: SendMessageArgs = serde_json::from_value(input)
                .map_err(|err| ToolError::invalid_arguments(err.to_string()))?;
            let to_agent: AgentSection = args
                .to_agent
                .parse()
                .map_err(|err: clinic_primitives::Error| {
                    ToolError::invalid_arguments(err.to_string())
                })?;

            let shown = content_preview(&args.content);
            mailbox.push_outbox(OutboxMessage::new(to_agent, args.content, args.kind));
            debug!(to = %to_agent, kind = %args.kind, "message queued for delivery");

            Ok(ToolOutput::text(format!(
                "Message queued for {to_agent} ({}): {shown}",
                args.kind
            )))
        }
    })
}

#[derive(Debug, Deserialize)]
struct CreateTaskArgs {
    title: String,
    assign_to: TaskAssignee,
    priority: TaskPriority,
    #[serde(default)]
    notes: Option<String>,
}

fn register_create_task(catalog: &ToolCatalog, tasks: Arc<dyn TaskSink>) -> ToolResult<()> {
    let assignees: Vec<&str> = TaskAssignee::ALL.iter().map(|a| a.as_str()).collect();
    let priorities: Vec<&str> = TaskPriority::ALL.iter().map(|p| p.as_str()).collect();

    let spec = ToolSpec::new(
        "create_task",
        "Create a follow-up task and route it to the responsible team.",
        serde_json::json!({
            "type": "object",
            "required": ["title", "assign_to", "priority"],
            "properties": {
                "title": {
                    "type": "string",
                    "description": "Short summary of the work",
                },
                "assign_to": {
                    "type": "string",
                    "enum": assignees,
                    "description": "Team responsible for the task",
                },
                "priority": {
                    "type": "string",
                    "enum": priorities,
                    "description": "Urgency level",
                },
                "notes": {
                    "type": "string",
                    "description": "Optional free-form detail",
                },
            },
            "additionalProperties": false,
        }),
        Persona::ReadAction,
    )?;

    catalog.register(spec, move |input: Value| {
        let tasks = Arc::clone(&tasks);
        async move {
            let args: CreateTaskArgs = serde_json::from_value(input)
                .map_err(|err| ToolError::invalid_arguments(err.to_string()))?;

            let task = TaskRecord {
                id: format!("TASK-{}", rand::thread_rng().gen_range(1000..10000)),
                title: args.title,
                assign_to: args.assign_to,
                priority: args.priority,
                notes: args.notes,
            };
            tasks.record(&task).await?;
            debug!(id = %task.id, assign_to = %task.assign_to, "task created");

            let mut body = format!(
                "Created {}: \"{}\"\nAssigned to: {}\nPriority: {}",
                task.id, task.title, task.assign_to, task.priority
            );
            if let Some(notes) = &task.notes {
                body.push_str(&format!("\nNotes: {notes}"));
            }
            body.push_str(&format!(
                "\nThe {} team will see this task in their queue.",
                task.assign_to
            ));
            Ok(ToolOutput::text(body))
        }
    })
}

/// Derives the bounded display preview of a message body. Contents longer
/// than [`CONTENT_PREVIEW_CHARS`] characters are cut there and marked with
/// an ellipsis; the canonical stored content is unaffected.
fn content_preview(content: &str) -> String {
    let mut preview: String = content.chars().take(CONTENT_PREVIEW_CHARS).collect();
    if content.chars().count() > CONTENT_PREVIEW_CHARS {
        preview.push_str("...");
    }
    preview
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use clinic_mailbox::InboxMessage;

    use super::*;

    #[derive(Default)]
    struct CapturingSink {
        recorded: Mutex<Vec<TaskRecord>>,
    }

    #[async_trait]
    impl TaskSink for CapturingSink {
        async fn record(&self, task: &TaskRecord) -> ToolResult<()> {
            self.recorded.lock().unwrap().push(task.clone());
            Ok(())
        }
    }

    fn setup() -> (ToolCatalog, Arc<Mailbox>, Arc<CapturingSink>) {
        let catalog = ToolCatalog::new();
        let mailbox = Arc::new(Mailbox::new());
        let sink = Arc::new(CapturingSink::default());
        register_builtin(
            &catalog,
            Arc::clone(&mailbox),
            Arc::clone(&sink) as Arc<dyn TaskSink>,
        )
        .unwrap();
        (catalog, mailbox, sink)
    }

    #[tokio::test]
    async fn check_inbox_reports_empty_mailbox() {
        let (catalog, _mailbox, _sink) = setup();
        let output = catalog
            .invoke("check_inbox", serde_json::json!({}))
            .await
            .unwrap();
        assert_eq!(output.joined(), "No new messages.");
    }

    #[tokio::test]
    async fn check_inbox_lists_messages_in_order_without_clearing() {
        let (catalog, mailbox, _sink) = setup();
        mailbox.set_inbox(vec![InboxMessage::new("scheduling", "Slot open", 100)]);

        let output = catalog
            .invoke("check_inbox", serde_json::json!({}))
            .await
            .unwrap();
        let text = output.joined();
        assert!(text.contains("1 message(s)"));
        assert!(text.contains("From scheduling: Slot open"));

        // A second read within the same turn sees the same contents.
        let again = catalog
            .invoke("check_inbox", serde_json::json!({}))
            .await
            .unwrap();
        assert_eq!(again.joined(), text);
    }

    #[tokio::test]
    async fn send_message_stores_full_content_and_truncates_preview() {
        let (catalog, mailbox, _sink) = setup();
        let content = "x".repeat(150);

        let output = catalog
            .invoke(
                "send_message",
                serde_json::json!({
                    "to_agent": "rcm",
                    "content": content,
                    "kind": "escalate",
                }),
            )
            .await
            .unwrap();

        let text = output.joined();
        assert!(text.contains(&format!("{}...", "x".repeat(100))));
        assert!(!text.contains(&content));

        let drained = mailbox.drain_outbox();
        assert_eq!(drained.len(), 1);
        assert_eq!(drained[0].content().len(), 150);
        assert_eq!(drained[0].to_agent(), AgentSection::Rcm);
        assert_eq!(drained[0].kind(), MessageKind::Escalate);
    }

    #[tokio::test]
    async fn send_message_short_content_is_not_marked_truncated() {
        let (catalog, mailbox, _sink) = setup();
        let output = catalog
            .invoke(
                "send_message",
                serde_json::json!({ "to_agent": "front_desk", "content": "short note" }),
            )
            .await
            .unwrap();

        assert!(output.joined().contains("short note"));
        assert!(!output.joined().contains("..."));
        assert_eq!(drained_kind(&mailbox), MessageKind::Message);
    }

    fn drained_kind(mailbox: &Mailbox) -> MessageKind {
        mailbox.drain_outbox()[0].kind()
    }

    #[tokio::test]
    async fn send_message_rejects_unknown_section() {
        let (catalog, mailbox, _sink) = setup();
        let err = catalog
            .invoke(
                "send_message",
                serde_json::json!({ "to_agent": "radiology", "content": "hi" }),
            )
            .await
            .expect_err("unknown section should be rejected");

        assert!(matches!(err, ToolError::InvalidArguments { .. }));
        assert!(mailbox.drain_outbox().is_empty());
    }

    #[tokio::test]
    async fn create_task_mints_four_digit_ids_and_records_them() {
        let (catalog, _mailbox, sink) = setup();
        let output = catalog
            .invoke(
                "create_task",
                serde_json::json!({
                    "title": "Verify insurance for Tuesday hygiene block",
                    "assign_to": "billing",
                    "priority": "high",
                }),
            )
            .await
            .unwrap();

        let recorded = sink.recorded.lock().unwrap();
        assert_eq!(recorded.len(), 1);
        let task = &recorded[0];
        let digits = task.id.strip_prefix("TASK-").expect("TASK- prefix");
        assert_eq!(digits.len(), 4);
        let number: u16 = digits.parse().unwrap();
        assert!((1000..10000).contains(&number));

        let text = output.joined();
        assert!(text.contains(&task.id));
        assert!(text.contains("billing"));
        assert!(text.contains("high"));
    }

    #[tokio::test]
    async fn create_task_rejects_unknown_priority() {
        let (catalog, _mailbox, sink) = setup();
        let err = catalog
            .invoke(
                "create_task",
                serde_json::json!({
                    "title": "t",
                    "assign_to": "billing",
                    "priority": "whenever",
                }),
            )
            .await
            .expect_err("unknown priority should be rejected");

        assert!(matches!(err, ToolError::InvalidArguments { .. }));
        assert!(sink.recorded.lock().unwrap().is_empty());
    }
}
