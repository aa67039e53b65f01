use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Result of a task execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskResult {
    /// Response produced by the task, if any
    pub response: Option<String>,
    /// Next action to take
    pub next_action: NextAction,
}

impl TaskResult {
    pub fn new(response: Option<String>, next_action: NextAction) -> Self {
        Self {
            response,
            next_action,
        }
    }

    /// Shorthand for a task that produced nothing and hands over to the next edge
    pub fn proceed() -> Self {
        Self::new(None, NextAction::Continue)
    }
}

/// Defines what should happen after a task completes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NextAction {
    /// Follow the first matching outgoing edge, ending if there is none
    Continue,
    /// Jump to a specific task by ID
    GoTo(String),
    /// End the graph execution
    End,
}

/// Core trait that all tasks must implement.
///
/// `S` is the state record threaded through the graph. Tasks get exclusive
/// access to it for the duration of `run`.
#[async_trait]
pub trait Task<S: Send>: Send + Sync {
    /// Unique identifier for this task, the type name unless overridden
    fn id(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Execute the task against the given state
    async fn run(&self, state: &mut S) -> Result<TaskResult>;
}
