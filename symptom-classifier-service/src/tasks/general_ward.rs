use async_trait::async_trait;
use graph_flow::{Result, Task, TaskResult};

use super::referral::refer;
use crate::models::{Category, TriageState};

/// Directs routine complaints to the general ward
pub struct GeneralWardTask;

#[async_trait]
impl Task<TriageState> for GeneralWardTask {
    fn id(&self) -> &str {
        "general"
    }

    async fn run(&self, state: &mut TriageState) -> Result<TaskResult> {
        refer(state, Category::General)
    }
}
