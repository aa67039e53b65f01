use graph_flow::{GraphError, NextAction, Result, TaskResult};
use tracing::info;

use crate::models::{Category, TriageState};

/// Fill in the canned referral for `branch` and end the workflow
pub(crate) fn refer(state: &mut TriageState, branch: Category) -> Result<TaskResult> {
    if state.category.is_none() {
        return Err(GraphError::StateError(format!(
            "{} branch reached before classification",
            branch
        )));
    }

    let answer = branch.answer_for(&state.symptom);
    state.recommendation = Some(branch.recommendation().to_string());
    state.urgency = Some(branch.urgency());
    state.answer = Some(answer.clone());

    info!(branch = %branch, urgency = %branch.urgency(), "referral prepared");

    Ok(TaskResult::new(Some(answer), NextAction::End))
}
