//! Task records and the sink boundary for durable task storage.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::catalog::ToolResult;

/// Staff group a task can be assigned to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskAssignee {
    /// Reception and patient intake.
    FrontDesk,
    /// Billing and claims.
    Billing,
    /// Clinical staff.
    Clinical,
    /// Practice administration.
    OfficeManager,
}

impl TaskAssignee {
    /// Every assignable group, in schema enumeration order.
    pub const ALL: [Self; 4] = [
        Self::FrontDesk,
        Self::Billing,
        Self::Clinical,
        Self::OfficeManager,
    ];

    /// Returns the wire identifier for this assignee.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FrontDesk => "front_desk",
            Self::Billing => "billing",
            Self::Clinical => "clinical",
            Self::OfficeManager => "office_manager",
        }
    }
}

impl std::fmt::Display for TaskAssignee {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Urgency of a task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    /// Can wait for a quiet moment.
    Low,
    /// Normal queue position.
    Medium,
    /// Should be picked up today.
    High,
    /// Needs attention now.
    Urgent,
}

impl TaskPriority {
    /// Every priority level, in schema enumeration order.
    pub const ALL: [Self; 4] = [Self::Low, Self::Medium, Self::High, Self::Urgent];

    /// Returns the wire identifier for this priority.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }
}

impl std::fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A task produced by the `create_task` tool.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    /// Synthetic identifier of the form `TASK-NNNN`.
    pub id: String,
    /// Short summary of the work.
    pub title: String,
    /// Group responsible for the task.
    pub assign_to: TaskAssignee,
    /// Urgency level.
    pub priority: TaskPriority,
    /// Optional free-form detail.
    pub notes: Option<String>,
}

/// Boundary through which created tasks leave the agent layer.
///
/// The agent layer never persists tasks itself; the embedding application
/// implements this trait to capture creation events for durable storage.
#[async_trait]
pub trait TaskSink: Send + Sync {
    /// Records a newly created task.
    async fn record(&self, task: &TaskRecord) -> ToolResult<()>;
}

/// Sink that drops every record.
///
/// Suitable for tests and for deployments that re-derive task creation from
/// the tool's rendering instead of intercepting records.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullTaskSink;

#[async_trait]
impl TaskSink for NullTaskSink {
    async fn record(&self, _task: &TaskRecord) -> ToolResult<()> {
        Ok(())
    }
}
