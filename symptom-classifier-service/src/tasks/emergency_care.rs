use async_trait::async_trait;
use graph_flow::{Result, Task, TaskResult};
use tracing::warn;

use super::referral::refer;
use crate::models::{Category, TriageState};

/// Sends the patient straight to the emergency room
pub struct EmergencyCareTask;

#[async_trait]
impl Task<TriageState> for EmergencyCareTask {
    fn id(&self) -> &str {
        "emergency"
    }

    async fn run(&self, state: &mut TriageState) -> Result<TaskResult> {
        warn!(task_id = %self.id(), "symptom classified as an emergency");
        refer(state, Category::Emergency)
    }
}
