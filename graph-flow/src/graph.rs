use dashmap::DashMap;
use std::sync::{Arc, Mutex};
use tracing::debug;

use crate::{
    error::{GraphError, Result},
    task::{NextAction, Task},
};

/// Default upper bound on task runs per execution
pub const DEFAULT_MAX_STEPS: usize = 64;

/// Type alias for edge condition functions
pub type EdgeCondition<S> = Arc<dyn Fn(&S) -> bool + Send + Sync>;

/// Edge between tasks in the graph
pub struct Edge<S> {
    pub from: String,
    pub to: String,
    pub condition: Option<EdgeCondition<S>>,
}

impl<S> Clone for Edge<S> {
    fn clone(&self) -> Self {
        Self {
            from: self.from.clone(),
            to: self.to.clone(),
            condition: self.condition.clone(),
        }
    }
}

/// A graph of tasks operating on a shared state of type `S`
pub struct Graph<S: Send + 'static> {
    pub id: String,
    tasks: DashMap<String, Arc<dyn Task<S>>>,
    edges: Mutex<Vec<Edge<S>>>,
    start_task_id: Mutex<Option<String>>,
    max_steps: usize,
}

impl<S: Send + 'static> Graph<S> {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tasks: DashMap::new(),
            edges: Mutex::new(Vec::new()),
            start_task_id: Mutex::new(None),
            max_steps: DEFAULT_MAX_STEPS,
        }
    }

    /// Add a task to the graph
    pub fn add_task(&self, task: Arc<dyn Task<S>>) -> &Self {
        let task_id = task.id().to_string();
        let is_first = self.tasks.is_empty();
        self.tasks.insert(task_id.clone(), task);

        // The first task doubles as the entry point until told otherwise
        if is_first {
            *lock(&self.start_task_id) = Some(task_id);
        }

        self
    }

    /// Set the starting task. Unknown ids are ignored.
    pub fn set_start_task(&self, task_id: impl Into<String>) -> &Self {
        let task_id = task_id.into();
        if self.tasks.contains_key(&task_id) {
            *lock(&self.start_task_id) = Some(task_id);
        }
        self
    }

    /// Add an unconditional edge between tasks
    pub fn add_edge(&self, from: impl Into<String>, to: impl Into<String>) -> &Self {
        lock(&self.edges).push(Edge {
            from: from.into(),
            to: to.into(),
            condition: None,
        });
        self
    }

    /// Add an edge that is only followed when `condition` holds for the current state
    pub fn add_conditional_edge<F>(
        &self,
        from: impl Into<String>,
        to: impl Into<String>,
        condition: F,
    ) -> &Self
    where
        F: Fn(&S) -> bool + Send + Sync + 'static,
    {
        lock(&self.edges).push(Edge {
            from: from.into(),
            to: to.into(),
            condition: Some(Arc::new(condition)),
        });
        self
    }

    /// Run the graph from its start task until a task ends it or no edge matches
    pub async fn execute(&self, state: &mut S) -> Result<ExecutionResult> {
        let start = self
            .start_task_id()
            .ok_or_else(|| GraphError::NoStartTask(self.id.clone()))?;
        self.execute_from(&start, state).await
    }

    /// Run the graph starting from a specific task
    pub async fn execute_from(&self, task_id: &str, state: &mut S) -> Result<ExecutionResult> {
        let mut current = task_id.to_string();
        let mut visited = Vec::new();
        let mut response = None;

        loop {
            if visited.len() >= self.max_steps {
                return Err(GraphError::StepLimitExceeded {
                    graph_id: self.id.clone(),
                    limit: self.max_steps,
                });
            }

            let task = self
                .get_task(&current)
                .ok_or_else(|| GraphError::TaskNotFound(current.clone()))?;

            debug!(graph_id = %self.id, task_id = %current, "running task");
            let result = task.run(state).await?;
            visited.push(current.clone());

            if result.response.is_some() {
                response = result.response;
            }

            let next = match result.next_action {
                NextAction::End => None,
                NextAction::Continue => self.find_next_task(&current, state),
                NextAction::GoTo(target_id) => {
                    if !self.tasks.contains_key(&target_id) {
                        return Err(GraphError::TaskNotFound(target_id));
                    }
                    Some(target_id)
                }
            };

            match next {
                Some(next_task_id) => {
                    debug!(from = %current, to = %next_task_id, "following edge");
                    current = next_task_id;
                }
                None => {
                    debug!(graph_id = %self.id, task_id = %current, "execution finished");
                    return Ok(ExecutionResult { response, visited });
                }
            }
        }
    }

    /// Find the next task based on edges and conditions, first match wins
    pub fn find_next_task(&self, current_task_id: &str, state: &S) -> Option<String> {
        let edges = lock(&self.edges);

        edges
            .iter()
            .filter(|edge| edge.from == current_task_id)
            .find(|edge| match &edge.condition {
                Some(condition) => condition(state),
                None => true,
            })
            .map(|edge| edge.to.clone())
    }

    /// Get the start task ID
    pub fn start_task_id(&self) -> Option<String> {
        lock(&self.start_task_id).clone()
    }

    /// Get a task by ID
    pub fn get_task(&self, task_id: &str) -> Option<Arc<dyn Task<S>>> {
        self.tasks.get(task_id).map(|entry| entry.clone())
    }

    pub fn max_steps(&self) -> usize {
        self.max_steps
    }
}

// Edges and the start id stay consistent even if a holder panicked.
fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Builder for creating graphs
pub struct GraphBuilder<S: Send + 'static> {
    graph: Graph<S>,
}

impl<S: Send + 'static> GraphBuilder<S> {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            graph: Graph::new(id),
        }
    }

    pub fn add_task(self, task: Arc<dyn Task<S>>) -> Self {
        self.graph.add_task(task);
        self
    }

    pub fn add_edge(self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.graph.add_edge(from, to);
        self
    }

    pub fn add_conditional_edge<F>(
        self,
        from: impl Into<String>,
        to: impl Into<String>,
        condition: F,
    ) -> Self
    where
        F: Fn(&S) -> bool + Send + Sync + 'static,
    {
        self.graph.add_conditional_edge(from, to, condition);
        self
    }

    pub fn set_start_task(self, task_id: impl Into<String>) -> Self {
        self.graph.set_start_task(task_id);
        self
    }

    pub fn max_steps(mut self, max_steps: usize) -> Self {
        self.graph.max_steps = max_steps;
        self
    }

    pub fn build(self) -> Graph<S> {
        self.graph
    }
}

/// Outcome of running a graph to completion
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    /// Last response emitted by any task
    pub response: Option<String>,
    /// Task ids in the order they ran
    pub visited: Vec<String>,
}

impl ExecutionResult {
    /// The task the execution stopped on
    pub fn last_task(&self) -> Option<&str> {
        self.visited.last().map(String::as_str)
    }
}
