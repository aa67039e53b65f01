use async_trait::async_trait;
use graph_flow::{Result, Task, TaskResult};

use super::referral::refer;
use crate::models::{Category, TriageState};

/// Refers the patient to counseling
pub struct MentalHealthTask;

#[async_trait]
impl Task<TriageState> for MentalHealthTask {
    fn id(&self) -> &str {
        "mental_health"
    }

    async fn run(&self, state: &mut TriageState) -> Result<TaskResult> {
        refer(state, Category::MentalHealth)
    }
}
