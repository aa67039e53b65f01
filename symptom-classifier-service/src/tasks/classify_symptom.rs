use async_trait::async_trait;
use graph_flow::{GraphError, Result, Task, TaskResult};
use std::sync::Arc;
use tracing::{error, info};

use crate::{
    llm::{TextGenerator, classification_prompt},
    models::{Category, TriageState},
};

/// Asks the model which triage category a symptom belongs to
pub struct ClassifySymptomTask {
    generator: Arc<dyn TextGenerator>,
}

impl ClassifySymptomTask {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }
}

#[async_trait]
impl Task<TriageState> for ClassifySymptomTask {
    fn id(&self) -> &str {
        "classify"
    }

    async fn run(&self, state: &mut TriageState) -> Result<TaskResult> {
        if state.symptom.trim().is_empty() {
            return Err(GraphError::StateError(
                "symptom must be set before classification".to_string(),
            ));
        }

        info!(task_id = %self.id(), "classifying symptom");

        let prompt = classification_prompt(&state.symptom);
        let raw = self.generator.generate(&prompt).await.map_err(|e| {
            error!(task_id = %self.id(), error = %e, "LLM call failed");
            GraphError::TaskExecutionFailed(e.to_string())
        })?;

        let output = raw.trim().to_string();
        let category = Category::route(&output);

        info!(
            task_id = %self.id(),
            classifier_output = %output,
            category = %category,
            "symptom classified"
        );

        state.classifier_output = Some(output);
        state.category = Some(category);

        Ok(TaskResult::proceed())
    }
}
