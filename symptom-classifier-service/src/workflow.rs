use graph_flow::{Graph, GraphBuilder, GraphError, Task};
use std::sync::Arc;
use tracing::info;

use crate::{
    error::{LLM_NOT_INITIALIZED, ServiceError},
    llm::TextGenerator,
    models::{Category, Classification, TriageState},
    tasks::*,
};

/// Wire classify -> {general | emergency | mental_health}
pub fn build_triage_workflow(generator: Arc<dyn TextGenerator>) -> Graph<TriageState> {
    let classify_task = Arc::new(ClassifySymptomTask::new(generator));
    let classify_id = classify_task.id().to_string();

    let general_task = Arc::new(GeneralWardTask);
    let general_id = general_task.id().to_string();

    let emergency_task = Arc::new(EmergencyCareTask);
    let emergency_id = emergency_task.id().to_string();

    let mental_health_task = Arc::new(MentalHealthTask);
    let mental_health_id = mental_health_task.id().to_string();

    GraphBuilder::<TriageState>::new("symptom_triage")
        .add_task(classify_task)
        .add_task(general_task)
        .add_task(emergency_task)
        .add_task(mental_health_task)
        .set_start_task(&classify_id)
        .add_conditional_edge(&classify_id, &general_id, |s: &TriageState| {
            s.category == Some(Category::General)
        })
        .add_conditional_edge(&classify_id, &emergency_id, |s: &TriageState| {
            s.category == Some(Category::Emergency)
        })
        .add_conditional_edge(&classify_id, &mental_health_id, |s: &TriageState| {
            s.category == Some(Category::MentalHealth)
        })
        .build()
}

/// Runs one symptom through the triage workflow
pub struct SymptomPipeline {
    graph: Option<Graph<TriageState>>,
}

impl SymptomPipeline {
    /// `None` leaves the pipeline unconfigured; every run then fails with a
    /// configuration error.
    pub fn new(generator: Option<Arc<dyn TextGenerator>>) -> Self {
        Self {
            graph: generator.map(build_triage_workflow),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.graph.is_some()
    }

    pub async fn classify(&self, symptom: &str) -> Result<Classification, ServiceError> {
        let graph = self
            .graph
            .as_ref()
            .ok_or_else(|| ServiceError::Configuration(LLM_NOT_INITIALIZED.to_string()))?;

        let mut state = TriageState::new(symptom);
        let result = graph.execute(&mut state).await?;

        info!(path = ?result.visited, "triage workflow finished");

        into_classification(state)
    }
}

fn into_classification(state: TriageState) -> Result<Classification, ServiceError> {
    let incomplete = |field: &str| {
        ServiceError::Workflow(GraphError::StateError(format!(
            "workflow finished without {}",
            field
        )))
    };

    Ok(Classification {
        category: state.category.ok_or_else(|| incomplete("a category"))?,
        answer: state.answer.ok_or_else(|| incomplete("an answer"))?,
        recommendation: state
            .recommendation
            .ok_or_else(|| incomplete("a recommendation"))?,
        urgency: state.urgency.ok_or_else(|| incomplete("an urgency"))?,
        symptom: state.symptom,
    })
}
