use thiserror::Error;

/// Errors raised while building or executing a graph
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("Task execution failed: {0}")]
    TaskExecutionFailed(String),

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Invalid state: {0}")]
    StateError(String),

    #[error("Graph '{0}' has no start task")]
    NoStartTask(String),

    #[error("Graph '{graph_id}' exceeded the step limit of {limit}")]
    StepLimitExceeded { graph_id: String, limit: usize },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, GraphError>;
